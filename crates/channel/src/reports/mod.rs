//! Hazard report lifecycle: file, confirm, resolve, look up nearby.

pub mod registry;

pub use registry::ReportRegistry;
