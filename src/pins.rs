//! GPIO / peripheral pin assignments for the barrier controller board.
//!
//! Every driver references this module rather than hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Water-level probe
// ---------------------------------------------------------------------------

/// ADC1 input for the resistive water-level probe.
pub const RAIN_ADC_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// IR remote receiver
// ---------------------------------------------------------------------------

/// Demodulated IR receiver output (active low, falling-edge interrupt).
pub const IR_RX_GPIO: i32 = 8;

// ---------------------------------------------------------------------------
// Barrier servos (two gate leaves driven in lockstep)
// ---------------------------------------------------------------------------

pub const SERVO_LEFT_GPIO: i32 = 6;
pub const SERVO_RIGHT_GPIO: i32 = 7;
/// Standard hobby-servo frame rate.
pub const SERVO_PWM_FREQ_HZ: u32 = 50;

// ---------------------------------------------------------------------------
// Indicators
// ---------------------------------------------------------------------------

pub const LED_GREEN_GPIO: i32 = 10;
pub const LED_YELLOW_GPIO: i32 = 11;
pub const LED_RED_GPIO: i32 = 12;
pub const BUZZER_GPIO: i32 = 13;
