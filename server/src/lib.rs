//! Read-only HTTP API over home sensor readings
//!
//! Air quality, solar production and weather forecast readings are served
//! from three SQLite tables. Every `filtered` endpoint shares one predicate
//! builder (`data::filters`) that turns query parameters into bound SQL.

pub mod api;
mod app;
pub mod core;
pub mod data;
pub mod utils;
