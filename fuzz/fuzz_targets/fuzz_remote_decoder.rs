//! Fuzz target: edge capture + remote decoder
//!
//! Treats the input as a stream of little-endian `u16` timer counts fed to
//! a 16-bit capture buffer, then decodes whatever trace becomes ready.
//! Asserts that nothing panics, the buffer never overflows, and the
//! decoder agrees with its detailed variant.
//!
//! cargo fuzz run fuzz_remote_decoder

#![no_main]

use floodgate::remote::capture::{EdgeCapture, TRACE_CAPACITY};
use floodgate::remote::decoder::decode_detailed;
use floodgate::remote::decode;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let cap = EdgeCapture::with_16bit_timer();

    for pair in data.chunks_exact(2) {
        cap.on_edge(u32::from(u16::from_le_bytes([pair[0], pair[1]])));
        assert!(cap.len() <= TRACE_CAPACITY);

        if let Some(trace) = cap.take_trace() {
            assert!(trace.len() <= TRACE_CAPACITY);
            assert_eq!(decode(&trace).code(), decode_detailed(&trace).ok());
            assert!(cap.is_empty());
        }
    }
});
