//! ISR-side edge capture for the IR receiver.
//!
//! ```text
//!  GPIO falling edge ──▶ on_edge(now) ──▶ [ d0 | d1 | ... | d99 ]  len
//!      (ISR)                                                      ready ──▶ take_trace()
//!                                                                          (remote task)
//! ```
//!
//! The interrupt is the only producer.  It writes the next slot, then
//! publishes it by moving `len` forward with a compare-exchange, and raises
//! `ready` only on the edge that brings the count to exactly
//! [`REQUIRED_EDGES`].  Edges beyond that keep appending until the buffer is
//! full.
//!
//! The remote-poll task clears `ready`, copies the slots out and stores
//! `len = 0`.  An edge that lands while the copy is in flight is dropped:
//! either it is appended past the copied range and discarded by the reset,
//! or its compare-exchange loses to the reset.  It can never re-raise
//! `ready`, because the count is already past [`REQUIRED_EDGES`].  So
//! `ready` implies at least [`REQUIRED_EDGES`] published slots, and the next
//! frame always starts at slot 0.
//!
//! Every operation is a single atomic access, so interrupt-side work is
//! bounded and lock-free.

use core::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};

use heapless::Vec;

/// Slot count of the capture buffer.
pub const TRACE_CAPACITY: usize = 100;

/// Edge count at which a trace is complete enough to decode
/// (leader, 32 payload bits and their spaces).
pub const REQUIRED_EDGES: usize = 68;

/// Modulus of the default capture timer: a 16-bit counter at 1 MHz.
pub const TIMER16_MODULUS: u64 = 0x1_0000;

/// Consumer-side snapshot of one captured transmission.
pub type EdgeTrace = Vec<u32, TRACE_CAPACITY>;

/// Lock-free single-producer / single-consumer edge buffer.
pub struct EdgeCapture {
    slots: [AtomicU32; TRACE_CAPACITY],
    len: AtomicUsize,
    ready: AtomicBool,
    last_edge: AtomicU32,
    timer_modulus: u64,
}

impl EdgeCapture {
    /// Capture buffer for a free-running timer that wraps at
    /// `timer_modulus` ticks (`1 << 32` for a plain `u32` counter).
    pub const fn new(timer_modulus: u64) -> Self {
        Self {
            slots: [const { AtomicU32::new(0) }; TRACE_CAPACITY],
            len: AtomicUsize::new(0),
            ready: AtomicBool::new(false),
            last_edge: AtomicU32::new(0),
            timer_modulus,
        }
    }

    /// Capture buffer for the 16-bit 1 MHz capture timer.
    pub const fn with_16bit_timer() -> Self {
        Self::new(TIMER16_MODULUS)
    }

    /// Record one qualifying edge.  Call from the GPIO interrupt.
    ///
    /// `now` is the raw timer count; it must already be reduced to
    /// `0..timer_modulus`.
    pub fn on_edge(&self, now: u32) {
        self.on_edge_with(now, || {});
    }

    fn on_edge_with(&self, now: u32, before_publish: impl FnOnce()) {
        let last = self.last_edge.load(Ordering::Relaxed);
        let elapsed = elapsed_ticks(last, now, self.timer_modulus);
        self.last_edge.store(now, Ordering::Relaxed);

        let len = self.len.load(Ordering::Acquire);
        if len >= TRACE_CAPACITY {
            return;
        }
        self.slots[len].store(elapsed, Ordering::Relaxed);
        before_publish();

        // Fails only if the consumer reset the buffer after our load.
        let published = self
            .len
            .compare_exchange(len, len + 1, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if published && len + 1 == REQUIRED_EDGES {
            self.ready.store(true, Ordering::Release);
        }
    }

    /// Take the pending trace, if one is ready, and reset the buffer.
    ///
    /// Called from the remote-poll task only.
    pub fn take_trace(&self) -> Option<EdgeTrace> {
        self.take_trace_with(|| {})
    }

    fn take_trace_with(&self, during_copy: impl FnOnce()) -> Option<EdgeTrace> {
        if !self.ready.swap(false, Ordering::AcqRel) {
            return None;
        }

        let len = self.len.load(Ordering::Acquire).min(TRACE_CAPACITY);
        let mut trace = EdgeTrace::new();
        for slot in &self.slots[..len] {
            // Capacity equals slot count, so this cannot overflow.
            let _ = trace.push(slot.load(Ordering::Relaxed));
        }
        during_copy();
        self.len.store(0, Ordering::Release);
        Some(trace)
    }

    /// Edges captured since the last reset.
    pub fn len(&self) -> usize {
        self.len.load(Ordering::Acquire)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a complete trace is waiting for the consumer.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}

/// Ticks between two counter reads, corrected for one wraparound.
pub fn elapsed_ticks(last: u32, now: u32, modulus: u64) -> u32 {
    if now >= last {
        now - last
    } else {
        (modulus - u64::from(last) + u64::from(now)) as u32
    }
}
