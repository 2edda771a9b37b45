//! Epi Dashboard - Validated COVID-19 Dataset Dashboard
//!
//! Loads the Our World in Data COVID-19 table, runs advisory validation
//! checks over it and derives per-country metrics and trend charts.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod logging;
pub mod stats;
pub mod validate;
