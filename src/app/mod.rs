//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the flood-barrier rules: the service that owns the
//! controller, the commands it accepts and the events it emits.  All
//! interaction with hardware happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
pub mod shared;
