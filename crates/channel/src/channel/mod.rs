//! Channel centerlines and marker placement.

pub mod polyline;

pub use polyline::Channel;
