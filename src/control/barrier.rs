//! Barrier controller: the FSM plus remote debounce and status lamps.
//!
//! ```text
//!  filtered level ──▶ apply_rain_level ─────┐
//!                                           ├──▶ Fsm ──▶ OutputCommands
//!  decoded code ──▶ debounce ──▶ toggle ────┘        (servo, red, buzzer)
//!                                                          +
//!                          status_indicators(state, level) (green, yellow)
//! ```
//!
//! Position transitions own the servo angle, the red lamp and the buzzer.
//! The green and yellow lamps are re-derived after every input as a pure
//! function of the resulting state and the last level.  No operation here
//! can fail: malformed input degrades to "no change this cycle".

use super::bands::{RainBand, Thresholds};
use crate::config::SystemConfig;
use crate::fsm::context::{BarrierInput, BarrierState, FsmContext, Mode, OutputCommands, Position};
use crate::fsm::{states, Fsm, StateId};
use crate::remote::DecodedCommand;

/// Why a remote code did not reach the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The trace did not decode.
    Invalid,
    /// Same code as the last accepted one (auto-repeat).
    Repeat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteOutcome {
    Applied { from: BarrierState, to: BarrierState },
    Ignored(IgnoreReason),
}

/// A position or mode change caused by one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: BarrierState,
    pub to: BarrierState,
}

/// Green and yellow lamp state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusLamps {
    pub green: bool,
    pub yellow: bool,
}

/// What the display and telemetry read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarrierSnapshot {
    pub state: BarrierState,
    pub rain_mm: f32,
    pub band: RainBand,
}

/// Lamps for a given state and level.
///
/// A manually raised barrier shows neither lamp (red is already on).
/// Otherwise green means normal, yellow means elevated, and a flood shows
/// neither.
pub fn status_indicators(state: BarrierState, level: f32, t: &Thresholds) -> StatusLamps {
    if state.mode == Mode::Manual && state.position == Position::Raised {
        return StatusLamps { green: false, yellow: false };
    }
    match RainBand::classify(level, t) {
        RainBand::Normal => StatusLamps { green: true, yellow: false },
        RainBand::Elevated => StatusLamps { green: false, yellow: true },
        RainBand::Flood => StatusLamps { green: false, yellow: false },
    }
}

pub struct BarrierController {
    fsm: Fsm,
    ctx: FsmContext,
    last_code: Option<u32>,
    last_level: f32,
}

impl BarrierController {
    /// Controller in `(Lowered, Automatic)` with a zero level.
    pub fn new(config: &SystemConfig) -> Self {
        let mut fsm = Fsm::new(states::build_state_table(), StateId::LoweredAuto);
        let mut ctx = FsmContext::new(config);
        fsm.start(&mut ctx);
        let mut this = Self {
            fsm,
            ctx,
            last_code: None,
            last_level: 0.0,
        };
        this.refresh_lamps();
        this
    }

    /// Evaluate one filtered level.
    ///
    /// In automatic mode a level at or above the warning threshold raises a
    /// lowered barrier and a level below the normal threshold lowers a
    /// raised one.  Anything else, and any level in manual mode, only
    /// updates the status lamps.
    pub fn apply_rain_level(&mut self, level: f32) -> Option<Transition> {
        self.last_level = level;
        let t = self.step(BarrierInput::Rain(level));
        self.refresh_lamps();
        t
    }

    /// Evaluate one decoded remote code.
    ///
    /// Invalid codes and repeats of the last accepted code are ignored.
    /// Anything else toggles the barrier: a raise leaves it in manual mode,
    /// a lower returns it to automatic.
    pub fn apply_remote_command(&mut self, cmd: DecodedCommand) -> RemoteOutcome {
        let code = match cmd {
            DecodedCommand::Code(c) => c,
            DecodedCommand::Invalid => return RemoteOutcome::Ignored(IgnoreReason::Invalid),
        };
        if self.last_code == Some(code) {
            return RemoteOutcome::Ignored(IgnoreReason::Repeat);
        }
        self.last_code = Some(code);

        let from = self.state();
        self.step(BarrierInput::RemoteToggle);
        self.refresh_lamps();
        RemoteOutcome::Applied {
            from,
            to: self.state(),
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> BarrierState {
        self.fsm.current_state().barrier_state()
    }

    pub fn state_id(&self) -> StateId {
        self.fsm.current_state()
    }

    pub fn position(&self) -> Position {
        self.state().position
    }

    pub fn mode(&self) -> Mode {
        self.state().mode
    }

    pub fn outputs(&self) -> OutputCommands {
        self.ctx.commands
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.ctx.thresholds
    }

    pub fn last_code(&self) -> Option<u32> {
        self.last_code
    }

    pub fn last_level(&self) -> f32 {
        self.last_level
    }

    /// Inputs processed since the last transition.
    pub fn inputs_in_state(&self) -> u64 {
        self.fsm.ticks_in_current_state()
    }

    pub fn snapshot(&self) -> BarrierSnapshot {
        BarrierSnapshot {
            state: self.state(),
            rain_mm: self.last_level,
            band: RainBand::classify(self.last_level, &self.ctx.thresholds),
        }
    }

    // ── Internal ──────────────────────────────────────────────

    fn step(&mut self, input: BarrierInput) -> Option<Transition> {
        let from = self.state();
        self.ctx.input = input;
        self.fsm.tick(&mut self.ctx)?;
        Some(Transition {
            from,
            to: self.state(),
        })
    }

    fn refresh_lamps(&mut self) {
        let lamps = status_indicators(self.state(), self.last_level, &self.ctx.thresholds);
        self.ctx.commands.green = lamps.green;
        self.ctx.commands.yellow = lamps.yellow;
    }
}
