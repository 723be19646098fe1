//! HTTP request handlers for the calendar API.

pub mod calendar;
pub mod districts;
pub mod health;
