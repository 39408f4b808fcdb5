//! Rain thresholds and the three status bands they carve out.

use crate::config::SystemConfig;

/// The two decision thresholds, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Below this the level is normal; a raised automatic barrier lowers.
    pub normal_mm: f32,
    /// At or above this the level is a flood; a lowered automatic barrier raises.
    pub warning_mm: f32,
}

impl From<&SystemConfig> for Thresholds {
    fn from(c: &SystemConfig) -> Self {
        Self {
            normal_mm: c.normal_rain_mm,
            warning_mm: c.warning_rain_mm,
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::from(&SystemConfig::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RainBand {
    /// `< normal`
    Normal,
    /// `[normal, warning)`; the hysteresis band.
    Elevated,
    /// `>= warning`
    Flood,
}

impl RainBand {
    pub fn classify(level: f32, t: &Thresholds) -> Self {
        if level >= t.warning_mm {
            Self::Flood
        } else if level >= t.normal_mm {
            Self::Elevated
        } else {
            Self::Normal
        }
    }

    /// Word shown after `Status: ` on the display.
    pub fn status_label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Elevated => "WARNING",
            Self::Flood => "!!FLOOD!!",
        }
    }
}

impl core::fmt::Display for RainBand {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.status_label())
    }
}
