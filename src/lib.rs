//! Floodgate flood-barrier controller library.
//!
//! Exposes the control core for integration testing and simulation.  All
//! ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module; on the host the drivers fall back to in-memory
//! stubs.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod fsm;
pub mod pins;
pub mod remote;
pub mod scheduler;
pub mod sensors;
pub mod tasks;

pub mod adapters;
pub mod drivers;
