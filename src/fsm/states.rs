//! Concrete state handler functions and table builder.
//!
//! Each state is defined by three plain `fn` pointers: no closures, no
//! dynamic dispatch, no heap.
//!
//! ```text
//!  from            rain >= warning   rain < normal   remote
//!  LOWERED_AUTO    RAISED_AUTO       ·               RAISED_MANUAL
//!  RAISED_AUTO     ·                 LOWERED_AUTO    LOWERED_AUTO
//!  RAISED_MANUAL   ·                 ·               LOWERED_AUTO
//! ```
//!
//! Rain inputs inside `[normal, warning)` never move the barrier, and
//! `RAISED_MANUAL` ignores rain entirely.

use super::context::{BarrierInput, FsmContext};
use super::{StateDescriptor, StateId};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0: LoweredAuto
        StateDescriptor {
            id: StateId::LoweredAuto,
            name: "LoweredAuto",
            on_enter: Some(lowered_enter),
            on_exit: None,
            on_update: lowered_auto_update,
        },
        // Index 1: RaisedAuto
        StateDescriptor {
            id: StateId::RaisedAuto,
            name: "RaisedAuto",
            on_enter: Some(raised_enter),
            on_exit: None,
            on_update: raised_auto_update,
        },
        // Index 2: RaisedManual
        StateDescriptor {
            id: StateId::RaisedManual,
            name: "RaisedManual",
            on_enter: Some(raised_enter),
            on_exit: None,
            on_update: raised_manual_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  Shared entry actions
// ═══════════════════════════════════════════════════════════════════════════

fn lowered_enter(ctx: &mut FsmContext) {
    ctx.commands.servo_angle = ctx.lowered_angle;
    ctx.commands.red = false;
    ctx.commands.buzzer = false;
}

fn raised_enter(ctx: &mut FsmContext) {
    ctx.commands.servo_angle = ctx.raised_angle;
    ctx.commands.red = true;
    ctx.commands.buzzer = true;
}

// ═══════════════════════════════════════════════════════════════════════════
//  LOWERED_AUTO: the resting state
// ═══════════════════════════════════════════════════════════════════════════

fn lowered_auto_update(ctx: &mut FsmContext) -> Option<StateId> {
    match ctx.input {
        BarrierInput::Rain(level) if level >= ctx.thresholds.warning_mm => {
            Some(StateId::RaisedAuto)
        }
        BarrierInput::Rain(_) => None,
        BarrierInput::RemoteToggle => Some(StateId::RaisedManual),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  RAISED_AUTO: raised by the rain loop
// ═══════════════════════════════════════════════════════════════════════════

fn raised_auto_update(ctx: &mut FsmContext) -> Option<StateId> {
    match ctx.input {
        BarrierInput::Rain(level) if level < ctx.thresholds.normal_mm => {
            Some(StateId::LoweredAuto)
        }
        BarrierInput::Rain(_) => None,
        // Remote lower hands control straight back to the rain loop.
        BarrierInput::RemoteToggle => Some(StateId::LoweredAuto),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  RAISED_MANUAL: raised by the remote, rain is ignored
// ═══════════════════════════════════════════════════════════════════════════

fn raised_manual_update(ctx: &mut FsmContext) -> Option<StateId> {
    match ctx.input {
        BarrierInput::Rain(_) => None,
        BarrierInput::RemoteToggle => Some(StateId::LoweredAuto),
    }
}
