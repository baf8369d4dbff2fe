#![no_std]

pub mod system;

// Re-export main types
pub use system::{
    ReleaseController, SUP_CTRL_READY, SUP_LED_READY, SUP_START_CTRL, supervisor_task,
};
