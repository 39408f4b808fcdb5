//! Property tests for robustness of the control core.
//!
//! Runs on host (x86_64) only; proptest is not available for ESP32 targets.

#![cfg(not(target_os = "espidf"))]

use floodgate::config::SystemConfig;
use floodgate::control::display::{format_lines, DISPLAY_COLS};
use floodgate::control::{BarrierController, Mode, Position, RainBand, Thresholds};
use floodgate::remote::capture::{elapsed_ticks, EdgeCapture, REQUIRED_EDGES, TRACE_CAPACITY};
use floodgate::remote::decoder::{decode_detailed, MAX_EDGES, MIN_EDGES};
use floodgate::remote::{decode, DecodedCommand};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Input {
    Rain(f32),
    Remote(Option<u32>),
}

fn input() -> impl Strategy<Value = Input> {
    prop_oneof![
        4 => (0.0f32..45.0).prop_map(Input::Rain),
        1 => proptest::option::of(0u32..4).prop_map(Input::Remote),
    ]
}

fn feed(c: &mut BarrierController, i: Input) {
    match i {
        Input::Rain(mm) => {
            c.apply_rain_level(mm);
        }
        Input::Remote(code) => {
            let cmd = code.map_or(DecodedCommand::Invalid, DecodedCommand::Code);
            c.apply_remote_command(cmd);
        }
    }
}

// ── Decoder ───────────────────────────────────────────────────

proptest! {
    /// Arbitrary traces never panic, and the length gate is exact.
    #[test]
    fn decoder_total_on_arbitrary_traces(
        trace in proptest::collection::vec(any::<u32>(), 0..=120),
    ) {
        let result = decode_detailed(&trace);
        if !(MIN_EDGES..=MAX_EDGES).contains(&trace.len()) {
            prop_assert!(result.is_err());
        }
        prop_assert_eq!(decode(&trace).code(), result.ok());
    }

    /// Every code survives the path ISR timestamps → capture → decoder,
    /// wherever the timer happens to wrap.
    #[test]
    fn capture_then_decode_recovers_code(code in any::<u32>(), start in any::<u32>()) {
        let cap = EdgeCapture::new(1 << 32);
        let mut t = start;
        cap.on_edge(t);
        for i in 1..REQUIRED_EDGES {
            let dt = if (17..49).contains(&i) {
                if (code >> (31 - (i - 17))) & 1 == 1 { 2_250 } else { 1_120 }
            } else {
                560
            };
            t = t.wrapping_add(dt);
            cap.on_edge(t);
        }
        let trace = cap.take_trace().unwrap();
        prop_assert_eq!(decode(&trace), DecodedCommand::Code(code));
    }

    #[test]
    fn capture_never_exceeds_capacity(n in 0usize..300) {
        let cap = EdgeCapture::with_16bit_timer();
        for i in 0..n {
            cap.on_edge((i as u32 * 700) % 0x1_0000);
        }
        prop_assert!(cap.len() <= TRACE_CAPACITY);
        prop_assert_eq!(cap.is_ready(), n >= REQUIRED_EDGES);
    }

    #[test]
    fn elapsed_matches_modular_difference(last in 0u32..0x1_0000, dt in 0u32..0x1_0000) {
        let now = (last + dt) % 0x1_0000;
        prop_assert_eq!(elapsed_ticks(last, now, 0x1_0000), dt);
    }
}

// ── Controller ────────────────────────────────────────────────

proptest! {
    /// Outputs always agree with the state: servo at the state's angle,
    /// red and buzzer exactly when raised, and green/yellow never both on.
    #[test]
    fn outputs_consistent_with_state(inputs in proptest::collection::vec(input(), 1..80)) {
        let cfg = SystemConfig::default();
        let mut c = BarrierController::new(&cfg);
        for i in inputs {
            feed(&mut c, i);
            let o = c.outputs();
            let raised = c.position() == Position::Raised;
            prop_assert_eq!(o.servo_angle, if raised { cfg.raised_angle } else { cfg.lowered_angle });
            prop_assert_eq!(o.red, raised);
            prop_assert_eq!(o.buzzer, raised);
            prop_assert!(!(o.green && o.yellow));
            prop_assert!(!(c.position() == Position::Lowered && c.mode() == Mode::Manual));
        }
    }

    /// In automatic mode, after a rain sample the barrier is raised at or
    /// above the warning level and lowered below the normal level.
    #[test]
    fn automatic_mode_tracks_thresholds(
        inputs in proptest::collection::vec(input(), 0..40),
        level in 0.0f32..45.0,
    ) {
        let mut c = BarrierController::new(&SystemConfig::default());
        for i in inputs {
            feed(&mut c, i);
        }
        let was_manual = c.mode() == Mode::Manual;
        c.apply_rain_level(level);
        if !was_manual {
            let t = Thresholds::default();
            if level >= t.warning_mm {
                prop_assert_eq!(c.position(), Position::Raised);
            } else if level < t.normal_mm {
                prop_assert_eq!(c.position(), Position::Lowered);
            }
        } else {
            prop_assert_eq!(c.position(), Position::Raised);
        }
    }
}

// ── Display ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn display_lines_fit_panel(level in -10.0f32..5000.0) {
        let band = RainBand::classify(level, &Thresholds::default());
        let (l1, l2) = format_lines(level, band);
        prop_assert!(l1.chars().count() <= DISPLAY_COLS);
        prop_assert!(l2.chars().count() <= DISPLAY_COLS);
        prop_assert!(l2.starts_with("Status: "));
    }
}
