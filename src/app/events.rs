//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use heapless::Vec;

use super::ports::EventSink;
use crate::control::{BarrierState, IgnoreReason, Mode, OutputCommands, Position, RainBand};

/// Most events one command can produce: accepted, moved, mode changed.
pub const MAX_EVENTS_PER_COMMAND: usize = 4;

/// Events collected under the shared-service lock and emitted after it.
pub type EventBatch = Vec<AppEvent, MAX_EVENTS_PER_COMMAND>;

impl EventSink for EventBatch {
    fn emit(&mut self, event: &AppEvent) {
        // A single command never exceeds the capacity.
        let _ = self.push(event.clone());
    }
}

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service has started and driven every output (carries initial state).
    Started(BarrierState),

    /// The barrier moved.
    BarrierMoved { from: Position, to: Position },

    /// Control passed between the rain loop and the remote.
    ModeChanged { from: Mode, to: Mode },

    /// A remote code was accepted.
    RemoteAccepted(u32),

    /// A remote trace or code did not reach the state machine.
    RemoteIgnored(IgnoreReason),

    /// The filtered level crossed into another status band.
    BandChanged { from: RainBand, to: RainBand },

    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),
}

/// A point-in-time telemetry snapshot suitable for logging.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryData {
    pub state: BarrierState,
    pub rain_mm: f32,
    pub band: RainBand,
    pub outputs: OutputCommands,
    pub last_code: Option<u32>,
    /// Inputs evaluated since the last transition.
    pub inputs_in_state: u64,
    /// Commands handled since start.
    pub command_count: u64,
}
