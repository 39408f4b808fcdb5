//! Floodgate firmware: main entry point.
//!
//! Hexagonal architecture, three periodic tasks on one async executor.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter        RainGauge        LogDisplay            │
//! │  (Actuator+Indicator)   (RainSensor)     (Display)             │
//! │  LogEventSink           ReactorDelay     IR_CAPTURE ◀── ISR    │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │   SharedService ─▶ AppService ─▶ BarrierController     │    │
//! │  │                                  (FSM · bands)         │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  LocalExecutor: remote (50 ms) · control (100 ms) · display    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use anyhow::{Context, Result};
use embedded_hal::delay::DelayNs;
use log::{error, info};

use floodgate::adapters::display::LogDisplay;
use floodgate::adapters::hardware::HardwareAdapter;
use floodgate::adapters::log_sink::LogEventSink;
use floodgate::adapters::time::{ReactorDelay, ThreadDelay};
use floodgate::app::service::AppService;
use floodgate::app::shared::SharedService;
use floodgate::config::SystemConfig;
use floodgate::drivers::hw_init;
use floodgate::drivers::ir_receiver::IR_CAPTURE;
use floodgate::drivers::task_pin::{spawn_on_core, Core};
use floodgate::pins;
use floodgate::scheduler::run_periodic;
use floodgate::sensors::RainGauge;
use floodgate::tasks::{ControlTask, DisplayTask, RemoteTask};

/// Time for the servos to reach the lowered position before the IR
/// receiver is armed.
const SERVO_SETTLE_MS: u32 = 500;

type Shared = SharedService<HardwareAdapter>;

// ── Executor thread ───────────────────────────────────────────

/// Build the three tasks and drive them on a local executor.  Never returns.
fn run_tasks(shared: &'static Shared, config: SystemConfig) {
    let executor: edge_executor::LocalExecutor<'_, 4> = edge_executor::LocalExecutor::new();

    let mut remote = RemoteTask::new(shared, &IR_CAPTURE, LogEventSink::new(), &config);
    let mut control = ControlTask::new(
        shared,
        RainGauge::new(pins::RAIN_ADC_GPIO),
        LogEventSink::new(),
        &config,
    );
    let mut display = DisplayTask::new(shared, LogDisplay::new(), LogEventSink::new(), &config);

    executor
        .spawn(async move { run_periodic(&mut remote, &mut ReactorDelay, None).await })
        .detach();
    executor
        .spawn(async move { run_periodic(&mut control, &mut ReactorDelay, None).await })
        .detach();
    executor
        .spawn(async move { run_periodic(&mut display, &mut ReactorDelay, None).await })
        .detach();

    // The reactor drives the timers; the executor drives the tasks.
    futures_lite::future::block_on(executor.run(core::future::pending::<()>()));
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Floodgate v{}                    ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = SystemConfig::default();
    config.validate().context("built-in configuration rejected")?;
    info!(
        "Thresholds: normal < {:.1} mm, warning >= {:.1} mm",
        config.normal_rain_mm, config.warning_rain_mm
    );

    // ── 3. Peripherals ────────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Without outputs the barrier cannot be driven; halt and let the
        // task watchdog reset the board.
        error!("HAL init failed: {} - halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 4. Control core ───────────────────────────────────────
    let shared: &'static Shared = Box::leak(Box::new(SharedService::new(AppService::new(
        &config,
        HardwareAdapter::default(),
    ))));
    shared.start(&mut LogEventSink::new());

    ThreadDelay.delay_ms(SERVO_SETTLE_MS);

    // ── 5. IR receiver ────────────────────────────────────────
    if let Err(e) = hw_init::init_isr_service() {
        error!("IR ISR init failed: {} - continuing without remote", e);
    }

    // ── 6. Tasks ──────────────────────────────────────────────
    info!("System ready. Starting tasks.");
    let handle = spawn_on_core(Core::App, 5, 16, "tasks\0", move || run_tasks(shared, config))
        .context("failed to spawn task thread")?;

    if handle.join().is_err() {
        error!("task thread panicked");
    }
    Ok(())
}
