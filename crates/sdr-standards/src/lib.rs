#![deny(unsafe_code)]

//! Record layouts for SDR data-return files.
//!
//! Layouts are declared as CSV field tables plus a TOML manifest. The tables
//! under `layouts/` are compiled in; [`LayoutRegistry::from_dir`] reads the
//! same structure from disk.

pub mod csv;
pub mod error;
pub mod manifest;
pub mod registry;

pub use crate::error::StandardsError;
pub use crate::registry::LayoutRegistry;
