//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` is the single struct that state handlers read from and
//! write to.  It carries the input being processed, the output commands
//! the handlers produce, and the configured thresholds and angles.  Think
//! of it as the "blackboard" in a blackboard architecture.

use crate::config::SystemConfig;
use crate::control::bands::Thresholds;

// ---------------------------------------------------------------------------
// Barrier state (derived from the FSM's current StateId)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Lowered,
    Raised,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Automatic,
    Manual,
}

/// Barrier position plus who is in charge of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarrierState {
    pub position: Position,
    pub mode: Mode,
}

impl BarrierState {
    pub const INITIAL: Self = Self {
        position: Position::Lowered,
        mode: Mode::Automatic,
    };
}

// ---------------------------------------------------------------------------
// Input (written by the controller before each tick)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BarrierInput {
    /// A filtered water level in millimetres.
    Rain(f32),
    /// An accepted (non-repeat, valid) remote code: toggle the barrier.
    RemoteToggle,
}

// ---------------------------------------------------------------------------
// Output commands (written by state handlers; applied by AppService)
// ---------------------------------------------------------------------------

/// Desired state of every actuator and indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputCommands {
    /// Servo angle in degrees.
    pub servo_angle: u8,
    pub green: bool,
    pub yellow: bool,
    /// Flood lamp; owned by position transitions.
    pub red: bool,
    /// Follows `red`.
    pub buzzer: bool,
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct FsmContext {
    // -- Timing --
    /// Inputs processed since the current state was entered.
    pub ticks_in_state: u64,
    /// Inputs processed since boot.
    pub total_ticks: u64,

    // -- Input --
    pub input: BarrierInput,

    // -- Outputs --
    pub commands: OutputCommands,

    // -- Configuration --
    pub thresholds: Thresholds,
    pub lowered_angle: u8,
    pub raised_angle: u8,
}

impl FsmContext {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            ticks_in_state: 0,
            total_ticks: 0,
            input: BarrierInput::Rain(0.0),
            commands: OutputCommands::default(),
            thresholds: Thresholds::from(config),
            lowered_angle: config.lowered_angle,
            raised_angle: config.raised_angle,
        }
    }
}
