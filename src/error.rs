//! Error types for the flood-barrier firmware.
//!
//! None of these escape the control core: decode failures discard the
//! trace, sensor overflows are clamped, and config errors are caught at
//! boot.  They exist so each of those recoveries can be logged with a
//! precise reason.  All variants are `Copy`.

use core::fmt;

// ---------------------------------------------------------------------------
// Remote decode errors
// ---------------------------------------------------------------------------

/// Why a captured edge trace did not yield a 32-bit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Trace length outside the admissible edge-count window.
    BadLength(usize),
    /// A payload edge fell outside both the "0" and "1" duration bands.
    BitOutOfRange {
        /// Payload bit index (0 = most significant).
        index: usize,
        /// Offending duration in timer ticks.
        ticks: u32,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadLength(len) => write!(f, "trace length {len} out of range"),
            Self::BitOutOfRange { index, ticks } => {
                write!(f, "bit {index} duration {ticks} out of range")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// Raw reading above the expected ADC domain (carries the raw value).
    OutOfRange(u16),
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange(raw) => write!(f, "raw reading {raw} out of range"),
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A field failed range validation.
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for DecodeError {}
impl std::error::Error for SensorError {}
impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            DecodeError::BadLength(12).to_string(),
            "trace length 12 out of range"
        );
        assert_eq!(
            DecodeError::BitOutOfRange { index: 3, ticks: 50 }.to_string(),
            "bit 3 duration 50 out of range"
        );
        assert_eq!(
            SensorError::OutOfRange(4095).to_string(),
            "raw reading 4095 out of range"
        );
    }
}
