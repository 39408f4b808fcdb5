//! IR receiver front end.
//!
//! ## Hardware
//!
//! Demodulating 38 kHz receiver, active low.  The GPIO fires on every
//! falling edge; the ISR stamps it with the free-running microsecond timer
//! (truncated to `u32`) and hands it to [`IR_CAPTURE`].  Decoding happens
//! later in the remote task.

use crate::remote::EdgeCapture;

/// Wrap modulus of the `u32`-truncated microsecond timestamp.
pub const US_TIMER_MODULUS: u64 = 1 << 32;

/// Edge buffer shared between the IR interrupt and the remote task.
pub static IR_CAPTURE: EdgeCapture = EdgeCapture::new(US_TIMER_MODULUS);

/// Record one falling edge.  ISR-safe: atomics only, bounded time.
pub fn ir_isr_handler(now_us: u32) {
    IR_CAPTURE.on_edge(now_us);
}
