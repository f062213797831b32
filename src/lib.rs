//! Earthquake catalog dashboard: a cleaning pipeline over a historical
//! catalog plus map, treemap and scatter views driven by sidebar filters.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod sample;
pub mod state;
pub mod ui;
