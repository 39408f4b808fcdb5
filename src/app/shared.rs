//! Lock-guarded handle to the [`AppService`] shared by every task.
//!
//! Every read-modify-write of the barrier state, together with the output
//! writes it causes, runs inside one [`SharedService::lock`] call.  The
//! control and remote tasks can therefore never interleave halfway through
//! a decision.
//!
//! On the board the lock masks interrupts, including the IR edge interrupt,
//! so it covers one controller step and at most five port writes and
//! nothing else.  Events are buffered in an [`EventBatch`] while it is held
//! and handed to the caller's sink after it is released.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use log::info;

use super::commands::AppCommand;
use super::events::{EventBatch, TelemetryData};
use super::ports::{ActuatorPort, EventSink, IndicatorPort};
use super::service::AppService;
use crate::control::BarrierSnapshot;

pub struct SharedService<H> {
    inner: Mutex<CriticalSectionRawMutex, RefCell<AppService<H>>>,
}

impl<H> SharedService<H> {
    pub const fn new(service: AppService<H>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(service)),
        }
    }

    /// Run `f` with exclusive access to the service.
    ///
    /// `f` must not call back into the same handle.
    pub fn lock<R>(&self, f: impl FnOnce(&mut AppService<H>) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }
}

impl<H: ActuatorPort + IndicatorPort> SharedService<H> {
    /// Drive every output to the initial state, then report it to `sink`.
    pub fn start(&self, sink: &mut impl EventSink) {
        let mut events = EventBatch::new();
        let state_id = self.lock(|svc| {
            svc.start(&mut events);
            svc.controller().state_id()
        });
        info!("AppService started in {:?}", state_id);
        emit_all(&events, sink);
    }

    pub fn handle_command(&self, cmd: AppCommand, sink: &mut impl EventSink) {
        let mut events = EventBatch::new();
        self.lock(|svc| svc.handle_command(cmd, &mut events));
        emit_all(&events, sink);
    }

    pub fn snapshot(&self) -> BarrierSnapshot {
        self.lock(|svc| svc.snapshot())
    }

    pub fn build_telemetry(&self) -> TelemetryData {
        self.lock(|svc| svc.build_telemetry())
    }
}

fn emit_all(events: &EventBatch, sink: &mut impl EventSink) {
    for event in events {
        sink.emit(event);
    }
}
