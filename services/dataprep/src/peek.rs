//! Human-readable dataset summary.

use std::fmt::Write;

use netcdf_parser::GriddedDataset;

/// Describe the axes, variables and attributes of `dataset`.
pub fn describe(dataset: &GriddedDataset) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write_description(&mut out, dataset);
    out
}

fn write_description(out: &mut String, dataset: &GriddedDataset) -> std::fmt::Result {
    if let Some(path) = dataset.source() {
        writeln!(out, "Dataset: {}", path.display())?;
    }

    let time = dataset.time();
    writeln!(
        out,
        "Dimensions: time={} y={} x={}",
        time.len(),
        dataset.y().len(),
        dataset.x().len()
    )?;

    writeln!(out, "Coords:")?;
    match time.units.as_deref() {
        Some(units) => writeln!(out, "  time ({})", units)?,
        None => writeln!(out, "  time")?,
    }
    if !time.is_empty() {
        writeln!(
            out,
            "    {} .. {}",
            time.label(0),
            time.label(time.len() - 1)
        )?;
    }
    write_axis(out, "x", dataset.x())?;
    write_axis(out, "y", dataset.y())?;

    writeln!(out, "Variables:")?;
    for var in dataset.variables() {
        let (t, h, w) = var.shape();
        write!(out, "  {} ({}, {}, {})", var.name(), t, h, w)?;
        if let Some(units) = var.units() {
            write!(out, " [{}]", units)?;
        }
        writeln!(out)?;
    }

    if !dataset.attributes().is_empty() {
        writeln!(out, "Attributes:")?;
        for (name, value) in dataset.attributes() {
            writeln!(out, "  {}: {}", name, value)?;
        }
    }
    Ok(())
}

fn write_axis(out: &mut String, name: &str, values: &[f64]) -> std::fmt::Result {
    match (values.first(), values.last()) {
        (Some(first), Some(last)) => {
            writeln!(out, "  {} [{}] {} .. {}", name, values.len(), first, last)
        }
        _ => writeln!(out, "  {} [0]", name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netcdf_parser::{GridVariable, TimeAxis};

    #[test]
    fn test_describe_lists_variables_and_coords() {
        let time = TimeAxis::new(
            vec![0.0, 1.0],
            Some("hours since 2025-10-03 00:00:00".to_string()),
        );
        let rain = GridVariable::new("rain", 2, 1, 2, vec![0.0; 4])
            .unwrap()
            .with_units("mm");
        let orog = GridVariable::new("orography", 1, 1, 2, vec![5.0, 6.0]).unwrap();
        let ds = GriddedDataset::from_parts(vec![88.0, 89.0], vec![20.5], time, vec![rain, orog])
            .unwrap()
            .with_attribute("title", "test");

        let text = describe(&ds);

        assert!(text.contains("Dimensions: time=2 y=1 x=2"));
        assert!(text.contains("  time (hours since 2025-10-03 00:00:00)"));
        assert!(text.contains("2025-10-03T00:00:00 .. 2025-10-03T01:00:00"));
        assert!(text.contains("  x [2] 88 .. 89"));
        assert!(text.contains("  rain (2, 1, 2) [mm]"));
        assert!(text.contains("  orography (1, 1, 2)\n"));
        assert!(text.contains("  title: test"));
    }
}
