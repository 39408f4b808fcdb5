//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements                  | Connects to                 |
//! |------------|-----------------------------|-----------------------------|
//! | `hardware` | ActuatorPort, IndicatorPort | LEDC servos, GPIO lamps     |
//! | `display`  | DisplayPort                 | Serial log (16x2 stand-in)  |
//! | `log_sink` | EventSink                   | Serial log output           |
//! | `time`     | AsyncDelay                  | async-io-mini reactor timer |
//!
//! The probe adapter lives with the signal chain in
//! [`sensors::rain_gauge`](crate::sensors::rain_gauge).

pub mod display;
pub mod hardware;
pub mod log_sink;
pub mod time;
