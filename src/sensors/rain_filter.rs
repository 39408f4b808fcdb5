//! Clamp, scale and smooth the water-level probe.
//!
//! `sample()` is one instantaneous reading in millimetres.
//! `filtered_sample()` folds that reading into an exponential moving
//! average and is the only value the controller acts on.  The average
//! starts at zero on boot and is never reset.

use log::debug;

use crate::app::ports::RainSensorPort;
use crate::config::SystemConfig;
use crate::error::SensorError;

/// Scaling and smoothing parameters, copied out of [`SystemConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterParams {
    pub clamp_max: u16,
    pub full_scale: u16,
    pub sensor_max_mm: f32,
    pub weight_new: f32,
}

impl From<&SystemConfig> for FilterParams {
    fn from(c: &SystemConfig) -> Self {
        Self {
            clamp_max: c.adc_clamp_max,
            full_scale: c.adc_full_scale,
            sensor_max_mm: c.sensor_max_mm,
            weight_new: c.filter_weight_new,
        }
    }
}

impl Default for FilterParams {
    fn default() -> Self {
        Self::from(&SystemConfig::default())
    }
}

pub struct RainFilter<S> {
    sensor: S,
    params: FilterParams,
    state: f32,
}

impl<S: RainSensorPort> RainFilter<S> {
    pub fn new(sensor: S, params: FilterParams) -> Self {
        Self {
            sensor,
            params,
            state: 0.0,
        }
    }

    /// One clamped, scaled reading in millimetres.
    pub fn sample(&mut self) -> f32 {
        let raw = self.sensor.read_raw_level();
        self.scale(raw)
    }

    /// Take a sample and fold it into the moving average.
    pub fn filtered_sample(&mut self) -> f32 {
        let new = self.sample();
        let w = self.params.weight_new;
        self.state = (1.0 - w) * self.state + w * new;
        self.state
    }

    /// The average as of the last [`filtered_sample`](Self::filtered_sample).
    pub fn last_filtered(&self) -> f32 {
        self.state
    }

    fn scale(&self, raw: u16) -> f32 {
        let p = &self.params;
        let clamped = match check_range(raw, p.clamp_max) {
            Ok(v) => v,
            Err(e) => {
                debug!("rain: {e}, clamped to {}", p.clamp_max);
                p.clamp_max
            }
        };
        f32::from(clamped) / f32::from(p.full_scale.max(1)) * p.sensor_max_mm
    }
}

fn check_range(raw: u16, max: u16) -> Result<u16, SensorError> {
    if raw > max {
        Err(SensorError::OutOfRange(raw))
    } else {
        Ok(raw)
    }
}
