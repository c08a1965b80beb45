//! CLI library components for the SDR converter.

pub mod logging;
pub mod report;
