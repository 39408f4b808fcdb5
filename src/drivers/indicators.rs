//! Indicator lamps and buzzer.
//!
//! Four plain GPIO outputs, active high.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the GPIOs via hw_init.
//! On host/test: tracks state in-memory only.

use crate::app::ports::Indicator;
use crate::drivers::hw_init;
use crate::pins;

/// GPIO behind each indicator.
pub fn pin_for(indicator: Indicator) -> i32 {
    match indicator {
        Indicator::Green => pins::LED_GREEN_GPIO,
        Indicator::Yellow => pins::LED_YELLOW_GPIO,
        Indicator::Red => pins::LED_RED_GPIO,
        Indicator::Buzzer => pins::BUZZER_GPIO,
    }
}

pub struct IndicatorOutputs {
    state: [bool; Indicator::ALL.len()],
}

impl Default for IndicatorOutputs {
    fn default() -> Self {
        Self::new()
    }
}

impl IndicatorOutputs {
    pub fn new() -> Self {
        Self {
            state: [false; Indicator::ALL.len()],
        }
    }

    pub fn set(&mut self, indicator: Indicator, on: bool) {
        hw_init::gpio_write(pin_for(indicator), on);
        self.state[indicator as usize] = on;
    }

    pub fn is_on(&self, indicator: Indicator) -> bool {
        self.state[indicator as usize]
    }
}
