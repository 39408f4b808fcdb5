//! Mock hardware for integration tests.
//!
//! Records every output call so tests can assert on the full command
//! history without touching real GPIO/PWM registers, and provides a probe
//! whose level can be changed while a task owns it.

use std::cell::Cell;
use std::rc::Rc;

use floodgate::app::events::AppEvent;
use floodgate::app::ports::{
    ActuatorPort, DisplayPort, EventSink, Indicator, IndicatorPort, RainSensorPort,
};

// ── Output call record ────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputCall {
    Angle(u8),
    Lamp(Indicator, bool),
}

// ── MockHardware ──────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct MockHardware {
    pub calls: Vec<OutputCall>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last angle written, if any.
    pub fn angle(&self) -> Option<u8> {
        self.calls.iter().rev().find_map(|c| match c {
            OutputCall::Angle(a) => Some(*a),
            OutputCall::Lamp(..) => None,
        })
    }

    /// Current level of `ind` as last written (off if never written).
    pub fn is_on(&self, ind: Indicator) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                OutputCall::Lamp(i, on) if *i == ind => Some(*on),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn angle_writes(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, OutputCall::Angle(_)))
            .count()
    }
}

impl ActuatorPort for MockHardware {
    fn set_barrier_angle(&mut self, angle: u8) {
        self.calls.push(OutputCall::Angle(angle));
    }
}

impl IndicatorPort for MockHardware {
    fn set_indicator(&mut self, indicator: Indicator, on: bool) {
        self.calls.push(OutputCall::Lamp(indicator, on));
    }
}

// ── Event sink ────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct LogSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Display ───────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct MockDisplay {
    pub frames: Vec<(String, String)>,
}

impl DisplayPort for MockDisplay {
    fn show(&mut self, line1: &str, line2: &str) {
        self.frames.push((line1.to_owned(), line2.to_owned()));
    }
}

// ── Probe ─────────────────────────────────────────────────────

/// Probe whose raw reading is shared with the test through a handle.
#[derive(Debug, Clone, Default)]
pub struct SharedProbe {
    raw: Rc<Cell<u16>>,
}

#[allow(dead_code)]
impl SharedProbe {
    pub fn new(raw: u16) -> Self {
        Self {
            raw: Rc::new(Cell::new(raw)),
        }
    }

    pub fn set(&self, raw: u16) {
        self.raw.set(raw);
    }
}

impl RainSensorPort for SharedProbe {
    fn read_raw_level(&mut self) -> u16 {
        self.raw.get()
    }
}

// ── Remote signal generator ───────────────────────────────────

pub const LEADER_US: u32 = 13_500;
pub const ONE_US: u32 = 2_250;
pub const ZERO_US: u32 = 1_120;
pub const TAIL_US: u32 = 560;

/// Edge-to-edge intervals of one remote frame carrying `code`: 17 leader
/// intervals, 32 payload bits MSB first, then filler up to 68 edges.
pub fn frame_intervals(code: u32) -> Vec<u32> {
    let mut v = vec![LEADER_US; 17];
    for i in 0..32 {
        v.push(if (code >> (31 - i)) & 1 == 1 { ONE_US } else { ZERO_US });
    }
    v.resize(68, TAIL_US);
    v
}

/// Absolute timestamps for [`frame_intervals`], starting `start` and
/// wrapping at `modulus`.  The first interval is measured from the
/// capture's previous edge, so it is replaced by `start` itself.
pub fn frame_timestamps(code: u32, start: u32, modulus: u64) -> Vec<u32> {
    let mut t = u64::from(start);
    let mut out = vec![start];
    for &dt in &frame_intervals(code)[1..] {
        t = (t + u64::from(dt)) % modulus;
        out.push(t as u32);
    }
    out
}
