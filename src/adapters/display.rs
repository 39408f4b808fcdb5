//! Console-backed character display.
//!
//! Stands in for the 16x2 panel: keeps the two current lines and logs them
//! whenever they change, so a steady display does not flood the console.

use log::info;

use crate::app::ports::DisplayPort;
use crate::control::display::DisplayLine;

#[derive(Debug, Default)]
pub struct LogDisplay {
    line1: DisplayLine,
    line2: DisplayLine,
    refreshes: u32,
}

impl LogDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> (&str, &str) {
        (self.line1.as_str(), self.line2.as_str())
    }

    /// Number of `show` calls that changed the content.
    pub fn refreshes(&self) -> u32 {
        self.refreshes
    }
}

/// Copy `src` into `dst`, dropping what does not fit.
fn store(dst: &mut DisplayLine, src: &str) {
    dst.clear();
    for ch in src.chars() {
        if dst.push(ch).is_err() {
            break;
        }
    }
}

impl DisplayPort for LogDisplay {
    fn show(&mut self, line1: &str, line2: &str) {
        if self.line1.as_str() == line1 && self.line2.as_str() == line2 {
            return;
        }
        store(&mut self.line1, line1);
        store(&mut self.line2, line2);
        self.refreshes = self.refreshes.wrapping_add(1);
        info!("LCD | {:<16} | {:<16} |", self.line1, self.line2);
    }
}
