//! Drop-detect input

use embassy_rp::Peri;
use embassy_rp::gpio::{Input, Pull};

/// Drop-detect line from the carrier release mechanism.
///
/// Wired active low: the line sits high while the glider hangs in the
/// carrier and reads low once released. Inverted wiring inverts the
/// trigger.
pub struct DropSensor<'a> {
    input: Input<'a>,
}

impl<'a> DropSensor<'a> {
    pub fn new(pin: Peri<'a, impl embassy_rp::gpio::Pin>) -> Self {
        Self {
            input: Input::new(pin, Pull::Up),
        }
    }

    /// Sample the line. A single low reading is enough to latch the
    /// release; there is no debounce.
    pub fn is_dropped(&self) -> bool {
        self.input.is_low()
    }
}
