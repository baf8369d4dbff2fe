#![no_std]

pub mod lut;

// Re-export LUT functions for easy access
pub use lut::*;

// PWM timing parameters
pub const REFRESH_INTERVAL_US: u32 = 20_000; // 50Hz servo refresh rate

// Servo range (standard 1000-2000μs)
pub const SERVO_MIN_PULSE_US: u32 = 1_000;
pub const SERVO_MAX_PULSE_US: u32 = 2_000;
pub const SERVO_CENTER_US: u32 = 1_500;

// Aileron servo travel
pub const SERVO_RANGE_DEG: u8 = 180;

// Aileron set-points
pub const NEUTRAL_ANGLE_DEG: u8 = 90; // Straight flight
pub const FULL_TURN_ANGLE_DEG: u8 = 180; // Hard-over deflection for the turn

// Turn sequence timing. Airframe-specific tuning constants: TURN_HOLD_MS
// approximates one full rotation on the Kite testbed at its trim speed.
pub const TURN_HOLD_MS: u64 = 5_000;
pub const SETTLE_HOLD_MS: u64 = 2_000; // Let the airframe straighten out

// Control loop timing parameters
pub const CONTROL_LOOP_FREQUENCY_HZ: u32 = 100;
pub const CONTROL_LOOP_PERIOD_MS: u64 = 1000 / CONTROL_LOOP_FREQUENCY_HZ as u64; // 10ms

// Supervisor parameters
pub const WATCHDOG_TIMEOUT_MS: u64 = 500; // Hardware watchdog timeout

// Status LED timing
pub const LED_UPDATE_PERIOD_MS: u64 = 10;
pub const STATUS_LOG_INTERVAL_S: u32 = 10; // Periodic status log cadence
