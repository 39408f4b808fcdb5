//! Sensor subsystem: the water-level probe and its smoothing filter.
//!
//! The filter is owned by the control task alone; nothing else samples the
//! probe.

pub mod rain_filter;
pub mod rain_gauge;

pub use rain_filter::{FilterParams, RainFilter};
pub use rain_gauge::RainGauge;
