//! The three periodic tasks of the barrier controller.
//!
//! ```text
//!  RemoteTask  (50 ms)  EdgeCapture ─▶ decode ─▶ AppCommand::Remote    ─┐
//!  ControlTask (100 ms) RainFilter  ─────────▶ AppCommand::RainLevel ─┼─▶ SharedService
//!  DisplayTask (1 s)    snapshot ─▶ format_lines ─▶ DisplayPort        ◀┘
//! ```
//!
//! Tasks share nothing but the [`SharedService`] handle and, for the remote
//! task, the interrupt-fed [`EdgeCapture`].  Each `run_once` is one bounded
//! unit of work; the runner decides when it happens.

use log::debug;

use crate::app::commands::AppCommand;
use crate::app::events::AppEvent;
use crate::app::ports::{ActuatorPort, DisplayPort, EventSink, IndicatorPort, RainSensorPort};
use crate::app::shared::SharedService;
use crate::config::SystemConfig;
use crate::control::display::format_lines;
use crate::remote::decoder::decode_detailed;
use crate::remote::{DecodedCommand, EdgeCapture};
use crate::sensors::{FilterParams, RainFilter};

/// One independently schedulable unit of work.
pub trait PeriodicTask {
    fn name(&self) -> &'static str;
    fn period_ms(&self) -> u32;
    fn run_once(&mut self);
}

// ── Display ───────────────────────────────────────────────────

/// Refreshes the display from the controller snapshot and emits telemetry.
///
/// Never samples the probe: the level shown is the one the control loop
/// last acted on.
pub struct DisplayTask<'a, H, D, E> {
    shared: &'a SharedService<H>,
    display: D,
    sink: E,
    period_ms: u32,
}

impl<'a, H, D, E> DisplayTask<'a, H, D, E> {
    pub fn new(shared: &'a SharedService<H>, display: D, sink: E, config: &SystemConfig) -> Self {
        Self {
            shared,
            display,
            sink,
            period_ms: config.display_period_ms,
        }
    }

    pub fn display(&self) -> &D {
        &self.display
    }
}

impl<H, D, E> PeriodicTask for DisplayTask<'_, H, D, E>
where
    H: ActuatorPort + IndicatorPort,
    D: DisplayPort,
    E: EventSink,
{
    fn name(&self) -> &'static str {
        "display"
    }

    fn period_ms(&self) -> u32 {
        self.period_ms
    }

    fn run_once(&mut self) {
        let (snap, telemetry) = self.shared.lock(|svc| (svc.snapshot(), svc.build_telemetry()));
        let (line1, line2) = format_lines(snap.rain_mm, snap.band);
        self.display.show(&line1, &line2);
        self.sink.emit(&AppEvent::Telemetry(telemetry));
    }
}

// ── Control loop ──────────────────────────────────────────────

/// Samples the filter and feeds the level to the controller.
/// Sole owner of the [`RainFilter`].
pub struct ControlTask<'a, H, S, E> {
    shared: &'a SharedService<H>,
    filter: RainFilter<S>,
    sink: E,
    period_ms: u32,
}

impl<'a, H, S: RainSensorPort, E> ControlTask<'a, H, S, E> {
    pub fn new(shared: &'a SharedService<H>, sensor: S, sink: E, config: &SystemConfig) -> Self {
        Self {
            shared,
            filter: RainFilter::new(sensor, FilterParams::from(config)),
            sink,
            period_ms: config.control_period_ms,
        }
    }

    pub fn filter(&self) -> &RainFilter<S> {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut RainFilter<S> {
        &mut self.filter
    }
}

impl<H, S, E> PeriodicTask for ControlTask<'_, H, S, E>
where
    H: ActuatorPort + IndicatorPort,
    S: RainSensorPort,
    E: EventSink,
{
    fn name(&self) -> &'static str {
        "control"
    }

    fn period_ms(&self) -> u32 {
        self.period_ms
    }

    fn run_once(&mut self) {
        let level = self.filter.filtered_sample();
        self.shared
            .handle_command(AppCommand::RainLevel(level), &mut self.sink);
    }
}

// ── Remote poll ───────────────────────────────────────────────

/// Drains a ready edge trace, decodes it, and hands the result over.
pub struct RemoteTask<'a, H, E> {
    shared: &'a SharedService<H>,
    capture: &'a EdgeCapture,
    sink: E,
    period_ms: u32,
}

impl<'a, H, E> RemoteTask<'a, H, E> {
    pub fn new(
        shared: &'a SharedService<H>,
        capture: &'a EdgeCapture,
        sink: E,
        config: &SystemConfig,
    ) -> Self {
        Self {
            shared,
            capture,
            sink,
            period_ms: config.remote_poll_period_ms,
        }
    }
}

impl<H, E> PeriodicTask for RemoteTask<'_, H, E>
where
    H: ActuatorPort + IndicatorPort,
    E: EventSink,
{
    fn name(&self) -> &'static str {
        "remote"
    }

    fn period_ms(&self) -> u32 {
        self.period_ms
    }

    fn run_once(&mut self) {
        let Some(trace) = self.capture.take_trace() else {
            return;
        };
        let decoded = match decode_detailed(&trace) {
            Ok(code) => DecodedCommand::Code(code),
            Err(e) => {
                debug!("remote: trace dropped: {e}");
                DecodedCommand::Invalid
            }
        };
        self.shared
            .handle_command(AppCommand::Remote(decoded), &mut self.sink);
    }
}
