//! Delay adapters.
//!
//! - [`ReactorDelay`]: async delay on the `async-io-mini` reactor, used
//!   between periodic task runs on the executor.
//! - [`ThreadDelay`]: blocking `embedded-hal` delay for one-off waits
//!   during bring-up (servo settle), before the executor starts.

use std::time::Duration;

use async_io_mini::Timer;
use embedded_hal::delay::DelayNs;

use crate::app::ports::AsyncDelay;

/// Reactor-backed async delay.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReactorDelay;

impl AsyncDelay for ReactorDelay {
    async fn delay_ms(&mut self, ms: u32) {
        Timer::after(Duration::from_millis(u64::from(ms))).await;
    }
}

/// Blocking delay that parks the calling thread (a FreeRTOS task on the
/// device).
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadDelay;

impl DelayNs for ThreadDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}
