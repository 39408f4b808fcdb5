//! Application service: the hexagonal core.
//!
//! [`AppService`] owns the [`BarrierController`] and the output hardware.
//! It turns [`AppCommand`]s into controller calls, pushes only the outputs
//! that changed to the ports, and reports what happened as [`AppEvent`]s.
//!
//! ```text
//!  AppCommand ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                 │       AppService        │
//! ActuatorPort ◀──│  BarrierController·FSM  │
//! IndicatorPort◀──└────────────────────────┘
//! ```
//!
//! The service owns its output adapter so that one locked call through
//! [`SharedService`](super::shared::SharedService) covers the decision and
//! the output writes together.  Nothing here logs: under that lock the
//! events go into an [`EventBatch`](super::events::EventBatch) and reach
//! the real sink only after the lock is released.

use crate::config::SystemConfig;
use crate::control::{
    BarrierController, BarrierSnapshot, BarrierState, OutputCommands, RainBand, RemoteOutcome,
    Transition,
};

use super::commands::AppCommand;
use super::events::{AppEvent, TelemetryData};
use super::ports::{ActuatorPort, EventSink, Indicator, IndicatorPort};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

pub struct AppService<H> {
    controller: BarrierController,
    hw: H,
    /// Outputs last written to the ports; `None` until [`start`](Self::start).
    applied: Option<OutputCommands>,
    band: RainBand,
    command_count: u64,
}

impl<H: ActuatorPort + IndicatorPort> AppService<H> {
    /// Construct the service.  Outputs are untouched until [`start`](Self::start).
    pub fn new(config: &SystemConfig, hw: H) -> Self {
        let controller = BarrierController::new(config);
        let band = controller.snapshot().band;
        Self {
            controller,
            hw,
            applied: None,
            band,
            command_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive every output to the initial state.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.applied = None;
        self.apply_outputs();
        let state = self.controller.state();
        sink.emit(&AppEvent::Started(state));
    }

    // ── Command handling ──────────────────────────────────────

    pub fn handle_command(&mut self, cmd: AppCommand, sink: &mut impl EventSink) {
        self.command_count += 1;
        match cmd {
            AppCommand::RainLevel(level) => {
                if let Some(t) = self.controller.apply_rain_level(level) {
                    emit_transition(t, sink);
                }
                let band = self.controller.snapshot().band;
                if band != self.band {
                    sink.emit(&AppEvent::BandChanged {
                        from: self.band,
                        to: band,
                    });
                    self.band = band;
                }
            }
            AppCommand::Remote(decoded) => match self.controller.apply_remote_command(decoded) {
                RemoteOutcome::Applied { from, to } => {
                    if let Some(code) = decoded.code() {
                        sink.emit(&AppEvent::RemoteAccepted(code));
                    }
                    emit_transition(Transition { from, to }, sink);
                }
                RemoteOutcome::Ignored(reason) => {
                    sink.emit(&AppEvent::RemoteIgnored(reason));
                }
            },
        }
        self.apply_outputs();
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> BarrierState {
        self.controller.state()
    }

    pub fn snapshot(&self) -> BarrierSnapshot {
        self.controller.snapshot()
    }

    pub fn controller(&self) -> &BarrierController {
        &self.controller
    }

    pub fn build_telemetry(&self) -> TelemetryData {
        let snap = self.controller.snapshot();
        TelemetryData {
            state: snap.state,
            rain_mm: snap.rain_mm,
            band: snap.band,
            outputs: self.controller.outputs(),
            last_code: self.controller.last_code(),
            inputs_in_state: self.controller.inputs_in_state(),
            command_count: self.command_count,
        }
    }

    pub fn hw(&self) -> &H {
        &self.hw
    }

    pub fn hw_mut(&mut self) -> &mut H {
        &mut self.hw
    }

    // ── Internal ──────────────────────────────────────────────

    /// Write the outputs that differ from what the ports last received.
    fn apply_outputs(&mut self) {
        let want = self.controller.outputs();
        let prev = self.applied;

        if prev.map(|p| p.servo_angle) != Some(want.servo_angle) {
            self.hw.set_barrier_angle(want.servo_angle);
        }
        for ind in Indicator::ALL {
            let on = lamp(&want, ind);
            if prev.map(|p| lamp(&p, ind)) != Some(on) {
                self.hw.set_indicator(ind, on);
            }
        }
        self.applied = Some(want);
    }
}

fn lamp(o: &OutputCommands, ind: Indicator) -> bool {
    match ind {
        Indicator::Green => o.green,
        Indicator::Yellow => o.yellow,
        Indicator::Red => o.red,
        Indicator::Buzzer => o.buzzer,
    }
}

fn emit_transition(t: Transition, sink: &mut impl EventSink) {
    if t.from.position != t.to.position {
        sink.emit(&AppEvent::BarrierMoved {
            from: t.from.position,
            to: t.to.position,
        });
    }
    if t.from.mode != t.to.mode {
        sink.emit(&AppEvent::ModeChanged {
            from: t.from.mode,
            to: t.to.mode,
        });
    }
}
