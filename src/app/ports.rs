//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (water-level probe, servos, indicator lamps, display,
//! event sinks, delays) implement these traits.  The
//! [`AppService`](super::service::AppService) and the periodic tasks consume
//! them via generics, so the control core never touches hardware directly.

use core::future::Future;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for the water-level probe.
pub trait RainSensorPort {
    /// One raw 12-bit conversion (`0..=4095`).  Blocking, bounded latency.
    fn read_raw_level(&mut self) -> u16;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the barrier servos.
pub trait ActuatorPort {
    /// Move the barrier to `angle` degrees (`0..=180`).  The controller
    /// only ever commands the configured lowered and raised angles.
    fn set_barrier_angle(&mut self, angle: u8);
}

// ───────────────────────────────────────────────────────────────
// Indicator port (driven adapter: domain → lamps / buzzer)
// ───────────────────────────────────────────────────────────────

/// The four independent boolean outputs on the front panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Green,
    Yellow,
    Red,
    Buzzer,
}

impl Indicator {
    pub const ALL: [Indicator; 4] = [Self::Green, Self::Yellow, Self::Red, Self::Buzzer];
}

pub trait IndicatorPort {
    fn set_indicator(&mut self, indicator: Indicator, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Display port
// ───────────────────────────────────────────────────────────────

/// Two-line, 16-column character display.
pub trait DisplayPort {
    /// Replace both lines.  Callers never pass more than 16 chars per line.
    fn show(&mut self, line1: &str, line2: &str);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Delay port (clock primitive for the periodic runner)
// ───────────────────────────────────────────────────────────────

/// Async delay used between periodic task runs.
///
/// On the device this is backed by the executor's reactor timer; tests
/// substitute a delay that advances simulated time instead of sleeping.
pub trait AsyncDelay {
    fn delay_ms(&mut self, ms: u32) -> impl Future<Output = ()>;
}

// ───────────────────────────────────────────────────────────────
// Scheduler delegate (decouples scheduler from the tasks it drives)
// ───────────────────────────────────────────────────────────────

/// Callback trait that the [`TaskScheduler`](crate::scheduler::TaskScheduler)
/// invokes when a task slot comes due.
///
/// The scheduler only knows slot ids and periods; the delegate maps an id
/// to the task that should run.
pub trait TaskDelegate {
    fn on_task_due(&mut self, id: u8);
}
