//! meteodash library
//!
//! Weather dashboard pipeline: geocoding, Open-Meteo forecast and PVGIS
//! clients, pure derivations, view models, and the terminal and text
//! presentations built on them.

pub mod app;
pub mod cli;
pub mod data;
pub mod fetch;
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod session;
pub mod ui;
pub mod view;
