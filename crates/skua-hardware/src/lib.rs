#![no_std]

pub mod drop;
pub mod led;
pub mod pwm;

// Re-export commonly used types
pub use drop::DropSensor;
pub use led::{LedPattern, StatusLed};
pub use pwm::{PwmOutputs, PwmPins};
