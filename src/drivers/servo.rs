//! Barrier servo pair driver (two hobby servos on one 50 Hz LEDC timer).
//!
//! Both servos always receive the same angle; the linkage mirrors one of
//! them mechanically.
//!
//! ## Pulse mapping
//!
//! `0°` → 500 µs, `180°` → 2500 µs, linear in between.  At 50 Hz the
//! period is 20 ms, so duty = pulse / 20000 of the 14-bit full scale.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: writes both LEDC channels via hw_init helpers.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;

/// Largest commanded angle.  Anything above is clamped.
pub const MAX_ANGLE: u8 = 180;
/// Pulse width at 0°.
pub const MIN_PULSE_US: u32 = 500;
/// Pulse width at [`MAX_ANGLE`].
pub const MAX_PULSE_US: u32 = 2500;
/// One PWM period at 50 Hz.
pub const PERIOD_US: u32 = 20_000;

/// Pulse width for `angle` (clamped to [`MAX_ANGLE`]).
pub fn pulse_us(angle: u8) -> u32 {
    let angle = u32::from(angle.min(MAX_ANGLE));
    MIN_PULSE_US + angle * (MAX_PULSE_US - MIN_PULSE_US) / u32::from(MAX_ANGLE)
}

/// LEDC duty count for a pulse width at the servo timer resolution.
pub fn duty_for_pulse(pulse_us: u32) -> u32 {
    pulse_us * hw_init::SERVO_DUTY_MAX / PERIOD_US
}

pub struct ServoDriver {
    angle: Option<u8>,
    pulse_us: u32,
    writes: u32,
}

impl Default for ServoDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl ServoDriver {
    /// A driver that has not commanded anything yet.  The servos hold
    /// whatever position they had until the first [`set_angle`](Self::set_angle).
    pub fn new() -> Self {
        Self {
            angle: None,
            pulse_us: 0,
            writes: 0,
        }
    }

    pub fn set_angle(&mut self, angle: u8) {
        let angle = angle.min(MAX_ANGLE);
        let pulse = pulse_us(angle);
        let duty = duty_for_pulse(pulse);

        hw_init::ledc_set(hw_init::LEDC_CH_SERVO_LEFT, duty);
        hw_init::ledc_set(hw_init::LEDC_CH_SERVO_RIGHT, duty);

        self.angle = Some(angle);
        self.pulse_us = pulse;
        self.writes = self.writes.wrapping_add(1);
    }

    /// Last commanded angle, `None` before the first command.
    pub fn angle(&self) -> Option<u8> {
        self.angle
    }

    pub fn pulse_us(&self) -> u32 {
        self.pulse_us
    }

    /// Number of PWM updates issued.
    pub fn writes(&self) -> u32 {
        self.writes
    }
}
