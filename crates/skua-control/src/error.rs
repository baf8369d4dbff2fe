//! Flash-efficient error handling using thiserror 2.0

use thiserror::Error;

/// Turn sequence errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequenceError {
    #[error("turn sequence already started this power cycle")]
    AlreadyStarted,
}
