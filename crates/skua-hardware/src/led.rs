//! WS2812B RGB LED driver for status indication

use embassy_rp::Peri;
use embassy_rp::peripherals::DMA_CH0;
use embassy_rp::pio::{Common, StateMachine};
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use smart_leds::RGB8;

/// LED colors for the states this airframe signals
pub mod colors {
    use smart_leds::RGB8;

    pub const OFF: RGB8 = RGB8 { r: 0, g: 0, b: 0 };
    pub const GREEN: RGB8 = RGB8 { r: 0, g: 50, b: 0 };
    pub const BLUE: RGB8 = RGB8 { r: 0, g: 0, b: 50 };
    pub const ORANGE: RGB8 = RGB8 { r: 50, g: 20, b: 0 };
    pub const CYAN: RGB8 = RGB8 { r: 0, g: 50, b: 50 };
}

/// Pattern channel from the control loop to the LED task
pub static LED_COMMANDS: Channel<CriticalSectionRawMutex, LedPattern, 8> = Channel::new();

/// LED patterns for different system states
#[derive(Clone, Copy, Debug)]
pub enum LedPattern {
    Off,
    Solid(RGB8),
    SlowBlink(RGB8), // 1Hz - booting
    FastBlink(RGB8), // 4Hz - turn in progress
    Pulse(RGB8),     // Breathing - settling out of the turn
}

pub struct StatusLed<'a, PIO, const SM: usize>
where
    PIO: embassy_rp::pio::Instance,
{
    ws2812: PioWs2812<'a, PIO, SM, 1>,
    current_pattern: LedPattern,
    pattern_counter: u32,
}

impl<PIO, const SM: usize> StatusLed<'_, PIO, SM>
where
    PIO: embassy_rp::pio::Instance,
{
    pub fn new(
        common: &mut Common<'static, PIO>,
        sm: StateMachine<'static, PIO, SM>,
        pin: Peri<'static, impl embassy_rp::pio::PioPin>,
        dma: Peri<'static, DMA_CH0>,
    ) -> Self {
        let program = PioWs2812Program::new(common);
        let ws2812 = PioWs2812::new(common, sm, dma, pin, &program);

        Self {
            ws2812,
            current_pattern: LedPattern::Off,
            pattern_counter: 0,
        }
    }

    /// Set a new LED pattern
    pub async fn set_pattern(&mut self, pattern: LedPattern) {
        self.current_pattern = pattern;
        self.pattern_counter = 0;
        self.update().await;
    }

    /// Advance the animation one tick
    pub async fn update(&mut self) {
        let color = match self.current_pattern {
            LedPattern::Off => colors::OFF,

            LedPattern::Solid(color) => color,

            LedPattern::SlowBlink(color) => {
                // 1Hz blink
                if (self.pattern_counter / 50).is_multiple_of(2) {
                    color
                } else {
                    colors::OFF
                }
            }

            LedPattern::FastBlink(color) => {
                // 4Hz blink
                if (self.pattern_counter / 12).is_multiple_of(2) {
                    color
                } else {
                    colors::OFF
                }
            }

            LedPattern::Pulse(color) => {
                // Breathing effect
                let phase = (self.pattern_counter % 100) as f32;
                let brightness = if phase < 50.0 {
                    phase / 50.0
                } else {
                    2.0 - (phase / 50.0)
                };

                RGB8 {
                    r: (color.r as f32 * brightness) as u8,
                    g: (color.g as f32 * brightness) as u8,
                    b: (color.b as f32 * brightness) as u8,
                }
            }
        };

        self.ws2812.write(&[color; 1]).await;
        self.pattern_counter = self.pattern_counter.wrapping_add(1);
    }
}
