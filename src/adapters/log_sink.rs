//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (UART / USB-CDC on the board, stderr on host).

use log::{debug, info, warn};

use crate::app::events::{AppEvent, TelemetryData};
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

fn on_off(b: bool) -> &'static str {
    if b { "on" } else { "off" }
}

fn log_telemetry(t: &TelemetryData) {
    info!(
        "TELEM | state={:?}/{:?} | rain={:.1}mm ({}) | servo={}\u{00b0} | \
         G={} Y={} R={} buzz={} | last_code={} | inputs={} cmds={}",
        t.state.position,
        t.state.mode,
        t.rain_mm,
        t.band,
        t.outputs.servo_angle,
        on_off(t.outputs.green),
        on_off(t.outputs.yellow),
        on_off(t.outputs.red),
        on_off(t.outputs.buzzer),
        t.last_code.map_or_else(|| "-".into(), |c| format!("0x{c:08X}")),
        t.inputs_in_state,
        t.command_count,
    );
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => log_telemetry(t),
            AppEvent::BarrierMoved { from, to } => {
                info!("BARRIER | {:?} -> {:?}", from, to);
            }
            AppEvent::ModeChanged { from, to } => {
                info!("MODE | {:?} -> {:?}", from, to);
            }
            AppEvent::RemoteAccepted(code) => {
                info!("REMOTE | accepted 0x{:08X}", code);
            }
            AppEvent::RemoteIgnored(reason) => {
                debug!("REMOTE | ignored ({:?})", reason);
            }
            AppEvent::BandChanged { from, to } => {
                if to > from {
                    warn!("RAIN | {} -> {}", from, to);
                } else {
                    info!("RAIN | {} -> {}", from, to);
                }
            }
            AppEvent::Started(state) => {
                info!("START | initial_state={:?}/{:?}", state.position, state.mode);
            }
        }
    }
}
