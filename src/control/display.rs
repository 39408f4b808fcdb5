//! Text for the 16x2 character display.

use core::fmt::Write;

use heapless::String;

use super::bands::RainBand;

/// Visible columns per line.
pub const DISPLAY_COLS: usize = 16;

pub type DisplayLine = String<DISPLAY_COLS>;

/// `("Rain: {level:>3} mm", "Status: {label}")`, each cut to the panel width.
///
/// The level is truncated toward zero, not rounded.
pub fn format_lines(level_mm: f32, band: RainBand) -> (DisplayLine, DisplayLine) {
    let mm = level_mm.max(0.0) as u32;

    let mut line1 = DisplayLine::new();
    push_truncated(&mut line1, format_args!("Rain: {mm:>3} mm"));

    let mut line2 = DisplayLine::new();
    push_truncated(&mut line2, format_args!("Status: {}", band.status_label()));

    (line1, line2)
}

/// Write formatted text, silently dropping whatever overflows the line.
fn push_truncated(line: &mut DisplayLine, args: core::fmt::Arguments<'_>) {
    struct Clip<'a>(&'a mut DisplayLine);

    impl Write for Clip<'_> {
        fn write_str(&mut self, s: &str) -> core::fmt::Result {
            for c in s.chars() {
                if self.0.push(c).is_err() {
                    break;
                }
            }
            Ok(())
        }
    }

    let _ = Clip(line).write_fmt(args);
}
