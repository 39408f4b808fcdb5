//! System configuration parameters
//!
//! All tunable parameters for the flood barrier.  Nothing here is
//! persisted: the device boots with [`SystemConfig::default()`] on every
//! power cycle.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Rain thresholds ---
    /// Below this level (mm) the rain is considered normal
    pub normal_rain_mm: f32,
    /// At or above this level (mm) the barrier is raised automatically
    pub warning_rain_mm: f32,
    /// Full-scale height of the water-level probe (mm)
    pub sensor_max_mm: f32,

    // --- Sensor ---
    /// Raw ADC readings above this are clamped before scaling
    pub adc_clamp_max: u16,
    /// ADC full-scale count (12-bit converter)
    pub adc_full_scale: u16,
    /// Weight of the newest sample in the exponential filter
    pub filter_weight_new: f32,

    // --- Barrier servo ---
    /// Servo angle for the lowered barrier (degrees)
    pub lowered_angle: u8,
    /// Servo angle for the raised barrier (degrees)
    pub raised_angle: u8,

    // --- Task periods ---
    /// Display refresh period (milliseconds)
    pub display_period_ms: u32,
    /// Automatic control loop period (milliseconds)
    pub control_period_ms: u32,
    /// Remote-command poll period (milliseconds)
    pub remote_poll_period_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Rain thresholds
            normal_rain_mm: 15.0,
            warning_rain_mm: 34.0,
            sensor_max_mm: 40.0,

            // Sensor
            adc_clamp_max: 4000,
            adc_full_scale: 4095,
            filter_weight_new: 0.2,

            // Servo
            lowered_angle: 0,
            raised_angle: 90,

            // Timing
            display_period_ms: 1000,   // 1 Hz
            control_period_ms: 100,    // 10 Hz
            remote_poll_period_ms: 50, // 20 Hz
        }
    }
}

impl SystemConfig {
    /// Reject configurations that would break the controller's invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.normal_rain_mm > 0.0) {
            return Err(ConfigError::Invalid("normal_rain_mm must be positive"));
        }
        if self.normal_rain_mm >= self.warning_rain_mm {
            return Err(ConfigError::Invalid(
                "normal_rain_mm must be below warning_rain_mm",
            ));
        }
        if self.warning_rain_mm > self.sensor_max_mm {
            return Err(ConfigError::Invalid(
                "warning_rain_mm must not exceed sensor_max_mm",
            ));
        }
        if self.adc_full_scale == 0 || self.adc_clamp_max > self.adc_full_scale {
            return Err(ConfigError::Invalid(
                "adc_clamp_max must be within the ADC full scale",
            ));
        }
        if !(self.filter_weight_new > 0.0 && self.filter_weight_new < 1.0) {
            return Err(ConfigError::Invalid("filter_weight_new must be in (0, 1)"));
        }
        if self.lowered_angle > 180 || self.raised_angle > 180 {
            return Err(ConfigError::Invalid("servo angles must be 0..=180"));
        }
        if self.display_period_ms == 0
            || self.control_period_ms == 0
            || self.remote_poll_period_ms == 0
        {
            return Err(ConfigError::Invalid("task periods must be non-zero"));
        }
        Ok(())
    }
}
