//! Timed state machine for the open-loop turn.
//!
//! Replaces blocking holds with elapsed-time checks, so the control loop
//! keeps running while the servo holds a set-point.

use embassy_time::{Duration, Instant};
use skua_config::{SETTLE_HOLD_MS, TURN_HOLD_MS};

use crate::error::SequenceError;
use crate::servo::ServoSetpoint;

/// Phases of the one-shot turn sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TurnPhase {
    Idle,
    Turning,
    Settling,
    Complete,
}

pub struct TurnSequencer {
    phase: TurnPhase,
    phase_entered: Instant,
}

impl Default for TurnSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnSequencer {
    pub const fn new() -> Self {
        Self {
            phase: TurnPhase::Idle,
            phase_entered: Instant::from_ticks(0),
        }
    }

    /// Start the turn. Yields the full-turn set-point to apply.
    pub fn trigger(&mut self, now: Instant) -> Result<ServoSetpoint, SequenceError> {
        if self.phase != TurnPhase::Idle {
            return Err(SequenceError::AlreadyStarted);
        }

        self.phase = TurnPhase::Turning;
        self.phase_entered = now;
        Ok(ServoSetpoint::FullTurn)
    }

    /// Advance the sequence against the sampled clock. Yields a set-point
    /// only on a transition that moves the servo; holding a phase yields
    /// nothing.
    pub fn poll(&mut self, now: Instant) -> Option<ServoSetpoint> {
        match self.phase {
            TurnPhase::Idle | TurnPhase::Complete => None,

            TurnPhase::Turning => {
                if now.duration_since(self.phase_entered) >= Duration::from_millis(TURN_HOLD_MS) {
                    self.phase = TurnPhase::Settling;
                    self.phase_entered = now;
                    Some(ServoSetpoint::Neutral)
                } else {
                    None
                }
            }

            TurnPhase::Settling => {
                // Servo is already back at neutral; just wait out the hold
                if now.duration_since(self.phase_entered) >= Duration::from_millis(SETTLE_HOLD_MS) {
                    self.phase = TurnPhase::Complete;
                }
                None
            }
        }
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, TurnPhase::Turning | TurnPhase::Settling)
    }

    pub fn is_complete(&self) -> bool {
        self.phase == TurnPhase::Complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    #[test]
    fn idle_emits_nothing() {
        let mut seq = TurnSequencer::new();
        assert_eq!(seq.poll(at(0)), None);
        assert_eq!(seq.poll(at(60_000)), None);
        assert_eq!(seq.phase(), TurnPhase::Idle);
        assert!(!seq.is_active());
    }

    #[test]
    fn trigger_yields_full_turn() {
        let mut seq = TurnSequencer::new();
        assert_eq!(seq.trigger(at(100)), Ok(ServoSetpoint::FullTurn));
        assert_eq!(seq.phase(), TurnPhase::Turning);
        assert!(seq.is_active());
    }

    #[test]
    fn holds_full_turn_for_the_configured_duration() {
        let mut seq = TurnSequencer::new();
        seq.trigger(at(0)).unwrap();

        assert_eq!(seq.poll(at(TURN_HOLD_MS - 1)), None);
        assert_eq!(seq.phase(), TurnPhase::Turning);

        assert_eq!(seq.poll(at(TURN_HOLD_MS)), Some(ServoSetpoint::Neutral));
        assert_eq!(seq.phase(), TurnPhase::Settling);
    }

    #[test]
    fn settles_then_completes_without_further_commands() {
        let mut seq = TurnSequencer::new();
        seq.trigger(at(0)).unwrap();
        seq.poll(at(TURN_HOLD_MS));

        assert_eq!(seq.poll(at(TURN_HOLD_MS + SETTLE_HOLD_MS - 1)), None);
        assert_eq!(seq.phase(), TurnPhase::Settling);

        assert_eq!(seq.poll(at(TURN_HOLD_MS + SETTLE_HOLD_MS)), None);
        assert!(seq.is_complete());

        // Nothing ever again
        assert_eq!(seq.poll(at(TURN_HOLD_MS + SETTLE_HOLD_MS + 60_000)), None);
    }

    #[test]
    fn double_trigger_is_rejected() {
        let mut seq = TurnSequencer::new();
        seq.trigger(at(0)).unwrap();
        assert_eq!(seq.trigger(at(10)), Err(SequenceError::AlreadyStarted));

        // Still rejected once the sequence has run out
        seq.poll(at(TURN_HOLD_MS));
        seq.poll(at(TURN_HOLD_MS + SETTLE_HOLD_MS));
        assert!(seq.is_complete());
        assert_eq!(seq.trigger(at(20_000)), Err(SequenceError::AlreadyStarted));
    }
}
