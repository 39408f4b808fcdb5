//! Barrier control: the state machine wrapper, rain bands and display text.

pub mod bands;
pub mod barrier;
pub mod display;

pub use bands::{RainBand, Thresholds};
pub use barrier::{BarrierController, BarrierSnapshot, IgnoreReason, RemoteOutcome, Transition};
pub use crate::fsm::context::{BarrierState, Mode, OutputCommands, Position};
