//! Hardware adapter: bridges the barrier drivers to the domain port traits.
//!
//! Owns the servo pair and the indicator outputs, exposing them through
//! [`ActuatorPort`] and [`IndicatorPort`].  The probe is not here: the
//! control task owns its [`RainGauge`](crate::sensors::RainGauge) through
//! the filter.  On non-espidf targets the drivers use in-memory stubs.

use crate::app::ports::{ActuatorPort, Indicator, IndicatorPort};
use crate::drivers::indicators::IndicatorOutputs;
use crate::drivers::servo::ServoDriver;

/// Concrete adapter that combines the output hardware behind port traits.
pub struct HardwareAdapter {
    servo: ServoDriver,
    indicators: IndicatorOutputs,
}

impl Default for HardwareAdapter {
    fn default() -> Self {
        Self::new(ServoDriver::new(), IndicatorOutputs::new())
    }
}

impl HardwareAdapter {
    pub fn new(servo: ServoDriver, indicators: IndicatorOutputs) -> Self {
        Self { servo, indicators }
    }

    pub fn servo(&self) -> &ServoDriver {
        &self.servo
    }

    pub fn indicators(&self) -> &IndicatorOutputs {
        &self.indicators
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn set_barrier_angle(&mut self, angle: u8) {
        self.servo.set_angle(angle);
    }
}

// ── IndicatorPort implementation ──────────────────────────────

impl IndicatorPort for HardwareAdapter {
    fn set_indicator(&mut self, indicator: Indicator, on: bool) {
        self.indicators.set(indicator, on);
    }
}
