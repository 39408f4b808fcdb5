//! End-to-end simulation: IR edges and probe readings in, servo and
//! lamps out, with all three tasks driven by the slot scheduler in 10 ms
//! steps of simulated time.

use floodgate::app::service::AppService;
use floodgate::app::shared::SharedService;
use floodgate::config::SystemConfig;
use floodgate::control::{Mode, Position};
use floodgate::remote::EdgeCapture;
use floodgate::scheduler::{TaskScheduler, TaskSet};
use floodgate::tasks::{ControlTask, DisplayTask, RemoteTask};

use crate::mock_hw::{frame_timestamps, LogSink, MockDisplay, MockHardware, SharedProbe};

const STEP_MS: u32 = 10;
const US_MODULUS: u64 = 1 << 32;

/// Clamp limit: 4000 / 4095 of the 40 mm span, about 39 mm.
const STORM_RAW: u16 = 4000;

fn run_for(ms: u32, sched: &mut TaskScheduler, set: &mut TaskSet<'_>) {
    for _ in 0..ms / STEP_MS {
        sched.tick(STEP_MS, set);
    }
}

fn send_frame(capture: &EdgeCapture, code: u32, start_us: u32) {
    for t in frame_timestamps(code, start_us, US_MODULUS) {
        capture.on_edge(t);
    }
}

#[test]
fn full_day_of_weather_and_remote_use() {
    let cfg = SystemConfig::default();
    let shared = SharedService::new(AppService::new(&cfg, MockHardware::new()));
    shared.start(&mut LogSink::new());

    let capture = EdgeCapture::new(US_MODULUS);
    let probe = SharedProbe::new(0);

    let mut remote = RemoteTask::new(&shared, &capture, LogSink::new(), &cfg);
    let mut control = ControlTask::new(&shared, probe.clone(), LogSink::new(), &cfg);
    let mut display = DisplayTask::new(&shared, MockDisplay::default(), LogSink::new(), &cfg);

    let state = || {
        let s = shared.snapshot().state;
        (s.position, s.mode)
    };

    {
        let mut set = TaskSet::new();
        set.push(&mut remote);
        set.push(&mut control);
        set.push(&mut display);
        let mut sched = set.scheduler();

        // Dry morning.
        run_for(1_000, &mut sched, &mut set);
        assert_eq!(state(), (Position::Lowered, Mode::Automatic));

        // Operator raises the barrier by remote.
        send_frame(&capture, 0x00FF_A25D, 1_000_000);
        run_for(50, &mut sched, &mut set);
        assert_eq!(state(), (Position::Raised, Mode::Manual));

        // A storm while in manual mode changes nothing but the lamps.
        probe.set(STORM_RAW);
        run_for(3_000, &mut sched, &mut set);
        assert_eq!(state(), (Position::Raised, Mode::Manual));

        // Holding the button resends the same code: ignored.
        send_frame(&capture, 0x00FF_A25D, 9_000_000);
        run_for(50, &mut sched, &mut set);
        assert_eq!(state(), (Position::Raised, Mode::Manual));

        // Another button lowers it; the flooded probe raises it again
        // under automatic control within one control period.
        send_frame(&capture, 0x00FF_629D, u32::MAX - 30_000);
        run_for(50, &mut sched, &mut set);
        run_for(100, &mut sched, &mut set);
        assert_eq!(state(), (Position::Raised, Mode::Automatic));

        // The storm passes.
        probe.set(0);
        run_for(2_000, &mut sched, &mut set);
        assert_eq!(state(), (Position::Lowered, Mode::Automatic));

        assert_eq!(sched.now_ms(), 8_250);
    }

    // One display refresh per simulated second.
    let frames = &display.display().frames;
    assert_eq!(frames.len(), 8);
    assert_eq!(frames[0].1, "Status: NORMAL");
    assert!(frames.iter().any(|(_, l2)| l2 == "Status: !!FLOOD!"));
    assert!(frames.iter().all(|(l1, l2)| l1.len() <= 16 && l2.len() <= 16));

    assert!(capture.is_empty());
    assert!(control.filter().last_filtered() < 1.0);
}

#[test]
fn storm_raises_after_filter_converges() {
    let cfg = SystemConfig::default();
    let shared = SharedService::new(AppService::new(&cfg, MockHardware::new()));
    shared.start(&mut LogSink::new());

    let probe = SharedProbe::new(STORM_RAW);
    let mut control = ControlTask::new(&shared, probe, LogSink::new(), &cfg);
    let mut set = TaskSet::new();
    set.push(&mut control);
    let mut sched = set.scheduler();

    // 39 mm * (1 - 0.8^n) first reaches 34 mm at the 10th sample.
    run_for(900, &mut sched, &mut set);
    assert_eq!(shared.snapshot().state.position, Position::Lowered);
    run_for(100, &mut sched, &mut set);
    assert_eq!(shared.snapshot().state.position, Position::Raised);
    assert_eq!(shared.lock(|svc| svc.hw().angle()), Some(cfg.raised_angle));
}
