//! Function-pointer finite state machine engine for the barrier.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  StateTable                                                 │
//! │  ┌──────────────┬──────────┬─────────┬───────────────────┐  │
//! │  │ StateId      │ on_enter │ on_exit │ on_update         │  │
//! │  ├──────────────┼──────────┼─────────┼───────────────────┤  │
//! │  │ LoweredAuto  │ fn(ctx)  │ fn(ctx) │ fn(ctx)->Option<> │  │
//! │  │ RaisedAuto   │ fn(ctx)  │ fn(ctx) │ fn(ctx)->Option<> │  │
//! │  │ RaisedManual │ fn(ctx)  │ fn(ctx) │ fn(ctx)->Option<> │  │
//! │  └──────────────┴──────────┴─────────┴───────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The caller writes one [`BarrierInput`](context::BarrierInput) into the
//! context and calls [`Fsm::tick`].  The engine runs `on_update` for the
//! current state; if it returns `Some(next_id)`, the engine runs `on_exit`
//! for the current state, then `on_enter` for the next, and updates the
//! current pointer.  Actuator side effects live in `on_enter`, so they are
//! emitted exactly once per position change.

pub mod context;
pub mod states;

use context::{BarrierState, FsmContext, Mode, Position};
use log::info;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Enumeration of the resting states of the barrier.
/// Must stay in sync with the state table built in [`states::build_state_table`].
///
/// `(Lowered, Manual)` has no entry: a remote lower always hands control
/// back to the automatic loop in the same step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    LoweredAuto = 0,
    RaisedAuto = 1,
    RaisedManual = 2,
}

impl StateId {
    /// Total number of states, used to size the table array.
    pub const COUNT: usize = 3;

    /// Convert a `u8` index back to `StateId`.  Panics on out-of-range in
    /// debug builds; returns `LoweredAuto` in release.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::LoweredAuto,
            1 => Self::RaisedAuto,
            2 => Self::RaisedManual,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::LoweredAuto
            }
        }
    }

    /// Position and mode this state stands for.
    pub fn barrier_state(self) -> BarrierState {
        match self {
            Self::LoweredAuto => BarrierState {
                position: Position::Lowered,
                mode: Mode::Automatic,
            },
            Self::RaisedAuto => BarrierState {
                position: Position::Raised,
                mode: Mode::Automatic,
            },
            Self::RaisedManual => BarrierState {
                position: Position::Raised,
                mode: Mode::Manual,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
/// These run exactly once on each state transition.
pub type StateActionFn = fn(&mut FsmContext);

/// Signature for the per-input update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateUpdateFn = fn(&mut FsmContext) -> Option<StateId>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single FSM state.
/// Stored in a fixed-size array: no heap, no `dyn`.
pub struct StateDescriptor {
    pub id: StateId,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine.
///
/// Owns the state table and the index of the current state.  The
/// [`FsmContext`] is owned by the caller and threaded through every
/// handler call.
pub struct Fsm {
    /// Fixed-size table indexed by `StateId as usize`.
    table: [StateDescriptor; StateId::COUNT],
    /// Index of the currently active state.
    current: usize,
    /// Inputs processed since boot.
    tick_count: u64,
    /// Tick at which the current state was entered.
    state_entry_tick: u64,
}

impl Fsm {
    /// Construct a new FSM with the given state table, starting in `initial`.
    pub fn new(table: [StateDescriptor; StateId::COUNT], initial: StateId) -> Self {
        Self {
            table,
            current: initial as usize,
            tick_count: 0,
            state_entry_tick: 0,
        }
    }

    /// Run the initial `on_enter` for the starting state.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut FsmContext) {
        info!("FSM starting in state: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Feed the input currently stored in `ctx` through the machine.
    ///
    /// Returns the new state if a transition happened.
    pub fn tick(&mut self, ctx: &mut FsmContext) -> Option<StateId> {
        self.tick_count += 1;
        ctx.ticks_in_state = self.tick_count - self.state_entry_tick;
        ctx.total_ticks = self.tick_count;

        let next = (self.table[self.current].on_update)(ctx)?;
        if next as usize == self.current {
            return None;
        }
        self.transition(next, ctx);
        Some(next)
    }

    /// The current state's identity.
    pub fn current_state(&self) -> StateId {
        self.table[self.current].id
    }

    pub fn current_name(&self) -> &'static str {
        self.table[self.current].name
    }

    /// How many inputs the FSM has processed in the current state.
    pub fn ticks_in_current_state(&self) -> u64 {
        self.tick_count - self.state_entry_tick
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: StateId, ctx: &mut FsmContext) {
        let next_idx = next_id as usize;

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        self.current = next_idx;
        self.state_entry_tick = self.tick_count;
        ctx.ticks_in_state = 0;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}
