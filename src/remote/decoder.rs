//! Pulse-distance decoder for the remote's fixed 32-bit code.
//!
//! A complete transmission produces between [`MIN_EDGES`] and [`MAX_EDGES`]
//! falling-edge deltas.  The 32 payload edges start at [`PAYLOAD_OFFSET`];
//! each one is classified by its duration:
//!
//! | Duration (ticks)          | Meaning          |
//! |---------------------------|------------------|
//! | `> LONG_THRESHOLD`        | bit 1            |
//! | `(SHORT_THRESHOLD, LONG]` | bit 0            |
//! | anything else             | abort, invalid   |
//!
//! Bits are assembled most-significant first.  The decoder is pure and
//! never touches the capture buffer itself.

use crate::error::DecodeError;

/// Fewest edges a complete transmission produces.
pub const MIN_EDGES: usize = 68;
/// Capture capacity; longer traces are impossible and rejected.
pub const MAX_EDGES: usize = 100;
/// Index of the first payload edge (past the leader edges).
pub const PAYLOAD_OFFSET: usize = 17;
/// Payload width in bits.
pub const PAYLOAD_BITS: usize = 32;
/// Durations above this are a logical 1.
pub const LONG_THRESHOLD: u32 = 1400;
/// Durations at or below this are noise.
pub const SHORT_THRESHOLD: u32 = 200;

/// Result of one decode attempt.
///
/// `Invalid` is distinct from every 32-bit value, so an all-ones payload
/// is a perfectly good code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodedCommand {
    Code(u32),
    Invalid,
}

impl DecodedCommand {
    pub fn code(self) -> Option<u32> {
        match self {
            Self::Code(c) => Some(c),
            Self::Invalid => None,
        }
    }

    pub fn is_valid(self) -> bool {
        matches!(self, Self::Code(_))
    }
}

impl From<Result<u32, DecodeError>> for DecodedCommand {
    fn from(r: Result<u32, DecodeError>) -> Self {
        match r {
            Ok(code) => Self::Code(code),
            Err(_) => Self::Invalid,
        }
    }
}

/// Decode a trace, collapsing every failure into [`DecodedCommand::Invalid`].
pub fn decode(trace: &[u32]) -> DecodedCommand {
    decode_detailed(trace).into()
}

/// Decode a trace, reporting why it was rejected.
pub fn decode_detailed(trace: &[u32]) -> Result<u32, DecodeError> {
    if !(MIN_EDGES..=MAX_EDGES).contains(&trace.len()) {
        return Err(DecodeError::BadLength(trace.len()));
    }

    let payload = &trace[PAYLOAD_OFFSET..PAYLOAD_OFFSET + PAYLOAD_BITS];
    let mut code = 0u32;
    for (index, &ticks) in payload.iter().enumerate() {
        let bit = classify(ticks).ok_or(DecodeError::BitOutOfRange { index, ticks })?;
        code = (code << 1) | u32::from(bit);
    }
    Ok(code)
}

fn classify(ticks: u32) -> Option<bool> {
    if ticks > LONG_THRESHOLD {
        Some(true)
    } else if ticks > SHORT_THRESHOLD {
        Some(false)
    } else {
        None
    }
}
