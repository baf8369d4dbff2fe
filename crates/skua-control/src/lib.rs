#![no_std]

pub mod error;
pub mod latch;
pub mod release;
pub mod sequencer;
pub mod servo;

// Re-export commonly used types
pub use error::SequenceError;
pub use latch::ReleaseLatch;
pub use release::ReleaseLogic;
pub use sequencer::{TurnPhase, TurnSequencer};
pub use servo::ServoSetpoint;
