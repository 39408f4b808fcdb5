//! Integration tests for the command → controller → outputs pipeline.
//!
//! These run on the host and drive the shared service exactly as the
//! periodic tasks do, asserting on the recorded output calls and events.

use floodgate::app::commands::AppCommand;
use floodgate::app::events::AppEvent;
use floodgate::app::ports::Indicator;
use floodgate::app::service::AppService;
use floodgate::app::shared::SharedService;
use floodgate::config::SystemConfig;
use floodgate::control::{BarrierState, IgnoreReason, Mode, Position, RainBand};
use floodgate::remote::DecodedCommand;

use crate::mock_hw::{LogSink, MockHardware, OutputCall};

const CODE_A: u32 = 0x00FF_A25D;
const CODE_B: u32 = 0x00FF_629D;

fn make_app() -> (SharedService<MockHardware>, LogSink) {
    let shared = SharedService::new(AppService::new(&SystemConfig::default(), MockHardware::new()));
    let mut sink = LogSink::new();
    shared.start(&mut sink);
    (shared, sink)
}

fn rain(shared: &SharedService<MockHardware>, sink: &mut LogSink, mm: f32) {
    shared.handle_command(AppCommand::RainLevel(mm), sink);
}

fn remote(shared: &SharedService<MockHardware>, sink: &mut LogSink, code: u32) {
    shared.handle_command(AppCommand::Remote(DecodedCommand::Code(code)), sink);
}

fn lamps(shared: &SharedService<MockHardware>) -> [bool; 4] {
    shared.lock(|svc| Indicator::ALL.map(|i| svc.hw().is_on(i)))
}

// ── Start-up ──────────────────────────────────────────────────

#[test]
fn start_lowers_barrier_with_green_lamp() {
    let (shared, sink) = make_app();
    shared.lock(|svc| {
        assert_eq!(svc.hw().angle(), Some(0));
        assert_eq!(svc.hw().calls.len(), 5, "servo plus four indicators");
    });
    // green, yellow, red, buzzer
    assert_eq!(lamps(&shared), [true, false, false, false]);
    assert_eq!(sink.events, vec![AppEvent::Started(BarrierState::INITIAL)]);
}

// ── Rain automation ───────────────────────────────────────────

#[test]
fn flood_raises_and_drain_lowers_with_hysteresis() {
    let (shared, mut sink) = make_app();

    rain(&shared, &mut sink, 34.0);
    assert_eq!(shared.snapshot().state.position, Position::Raised);
    assert_eq!(lamps(&shared), [false, false, true, true]);

    // Inside the band: stays raised, yellow comes on.
    rain(&shared, &mut sink, 20.0);
    assert_eq!(shared.snapshot().state.position, Position::Raised);
    assert_eq!(lamps(&shared), [false, true, true, true]);

    rain(&shared, &mut sink, 14.9);
    assert_eq!(shared.snapshot().state.position, Position::Lowered);
    assert_eq!(lamps(&shared), [true, false, false, false]);

    let moves: Vec<_> = sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::BarrierMoved { .. }))
        .cloned()
        .collect();
    assert_eq!(
        moves,
        vec![
            AppEvent::BarrierMoved { from: Position::Lowered, to: Position::Raised },
            AppEvent::BarrierMoved { from: Position::Raised, to: Position::Lowered },
        ]
    );
}

#[test]
fn band_changes_reported_once_per_crossing() {
    let (shared, mut sink) = make_app();
    for mm in [3.0, 16.0, 17.0, 35.0, 36.0, 10.0] {
        rain(&shared, &mut sink, mm);
    }
    let bands: Vec<_> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::BandChanged { to, .. } => Some(*to),
            _ => None,
        })
        .collect();
    assert_eq!(bands, vec![RainBand::Elevated, RainBand::Flood, RainBand::Normal]);
}

#[test]
fn steady_level_writes_nothing_after_first_sample() {
    let (shared, mut sink) = make_app();
    rain(&shared, &mut sink, 5.0);
    let before = shared.lock(|svc| svc.hw().calls.len());
    for _ in 0..50 {
        rain(&shared, &mut sink, 5.0);
    }
    assert_eq!(shared.lock(|svc| svc.hw().calls.len()), before);
}

// ── Remote override ───────────────────────────────────────────

#[test]
fn remote_raise_is_manual_and_ignores_rain() {
    let (shared, mut sink) = make_app();

    remote(&shared, &mut sink, CODE_A);
    let s = shared.snapshot().state;
    assert_eq!((s.position, s.mode), (Position::Raised, Mode::Manual));
    assert_eq!(lamps(&shared), [false, false, true, true]);
    assert!(sink.events.contains(&AppEvent::RemoteAccepted(CODE_A)));
    assert!(sink.events.contains(&AppEvent::ModeChanged {
        from: Mode::Automatic,
        to: Mode::Manual
    }));

    // Dry weather does not lower a manually raised barrier.
    for _ in 0..10 {
        rain(&shared, &mut sink, 0.0);
    }
    assert_eq!(shared.snapshot().state.position, Position::Raised);
    assert_eq!(lamps(&shared), [false, false, true, true]);
}

#[test]
fn repeated_code_is_debounced_until_another_arrives() {
    let (shared, mut sink) = make_app();

    remote(&shared, &mut sink, CODE_A);
    remote(&shared, &mut sink, CODE_A);
    assert_eq!(shared.snapshot().state.position, Position::Raised);
    assert_eq!(
        sink.events.last(),
        Some(&AppEvent::RemoteIgnored(IgnoreReason::Repeat))
    );

    remote(&shared, &mut sink, CODE_B);
    let s = shared.snapshot().state;
    assert_eq!((s.position, s.mode), (Position::Lowered, Mode::Automatic));

    // CODE_A is fresh again now.
    remote(&shared, &mut sink, CODE_A);
    assert_eq!(shared.snapshot().state.position, Position::Raised);
}

#[test]
fn remote_lowers_a_rain_raised_barrier_into_automatic() {
    let (shared, mut sink) = make_app();
    rain(&shared, &mut sink, 38.0);
    remote(&shared, &mut sink, CODE_A);
    let s = shared.snapshot().state;
    assert_eq!((s.position, s.mode), (Position::Lowered, Mode::Automatic));

    // Rain still high: the next sample raises it again.
    rain(&shared, &mut sink, 38.0);
    assert_eq!(shared.snapshot().state.position, Position::Raised);
}

#[test]
fn invalid_trace_changes_nothing() {
    let (shared, mut sink) = make_app();
    let before = shared.lock(|svc| svc.hw().calls.clone());
    shared.handle_command(AppCommand::Remote(DecodedCommand::Invalid), &mut sink);
    assert_eq!(shared.lock(|svc| svc.hw().calls.clone()), before);
    assert_eq!(
        sink.events.last(),
        Some(&AppEvent::RemoteIgnored(IgnoreReason::Invalid))
    );
    assert_eq!(shared.lock(|svc| svc.controller().last_code()), None);
}

#[test]
fn all_ones_code_is_a_real_code() {
    let (shared, mut sink) = make_app();
    remote(&shared, &mut sink, 0xFFFF_FFFF);
    assert_eq!(shared.snapshot().state.position, Position::Raised);
}

// ── Telemetry ─────────────────────────────────────────────────

#[test]
fn telemetry_reflects_history() {
    let (shared, mut sink) = make_app();
    rain(&shared, &mut sink, 22.0);
    remote(&shared, &mut sink, CODE_A);
    let t = shared.build_telemetry();
    assert_eq!(t.command_count, 2);
    assert_eq!(t.last_code, Some(CODE_A));
    assert_eq!(t.band, RainBand::Elevated);
    assert_eq!(t.outputs.servo_angle, 90);
    assert!(t.outputs.red && t.outputs.buzzer);
    assert_eq!(shared.lock(|svc| svc.hw().angle_writes()), 2);
    assert_eq!(
        shared.lock(|svc| svc.hw().calls.last().copied()),
        Some(OutputCall::Lamp(Indicator::Buzzer, true))
    );
}
