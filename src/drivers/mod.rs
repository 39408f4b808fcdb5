//! Actuator drivers, hardware initialisation, and peripheral helpers.

pub mod hw_init;
pub mod indicators;
pub mod ir_receiver;
pub mod servo;
pub mod task_pin;
