//! Resistive water-level probe on an ADC1 channel.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the probe channel via the oneshot API (initialised by hw_init).
//! On host/test: reads from a static `AtomicU16` for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

use crate::app::ports::RainSensorPort;

#[cfg(not(target_os = "espidf"))]
static SIM_RAIN_ADC: AtomicU16 = AtomicU16::new(0);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_rain_adc(raw: u16) {
    SIM_RAIN_ADC.store(raw, Ordering::Relaxed);
}

pub struct RainGauge {
    _adc_gpio: i32,
    total_reads: u32,
}

impl RainGauge {
    pub fn new(adc_gpio: i32) -> Self {
        Self {
            _adc_gpio: adc_gpio,
            total_reads: 0,
        }
    }

    pub fn total_reads(&self) -> u32 {
        self.total_reads
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> u16 {
        use crate::drivers::hw_init;
        hw_init::adc1_read(hw_init::ADC1_CH_RAIN)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> u16 {
        SIM_RAIN_ADC.load(Ordering::Relaxed)
    }
}

impl RainSensorPort for RainGauge {
    fn read_raw_level(&mut self) -> u16 {
        self.total_reads = self.total_reads.saturating_add(1);
        self.read_adc()
    }
}
