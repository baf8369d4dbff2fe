use embassy_time::Instant;

use crate::latch::ReleaseLatch;
use crate::sequencer::{TurnPhase, TurnSequencer};
use crate::servo::ServoSetpoint;

/// Latch plus sequencer behind the control loop's single entry point.
///
/// Holds all mutable release state for the power-on session; constructed
/// once at startup and driven by the polling loop.
#[derive(Default)]
pub struct ReleaseLogic {
    latch: ReleaseLatch,
    sequencer: TurnSequencer,
}

impl ReleaseLogic {
    pub const fn new() -> Self {
        Self {
            latch: ReleaseLatch::new(),
            sequencer: TurnSequencer::new(),
        }
    }

    /// One loop iteration: feed the current drop-detect sample and the
    /// sampled clock, get back the servo command to apply, if any.
    pub fn poll(&mut self, dropped: bool, now: Instant) -> Option<ServoSetpoint> {
        if self.latch.update(dropped)
            && let Ok(setpoint) = self.sequencer.trigger(now)
        {
            return Some(setpoint);
        }

        self.sequencer.poll(now)
    }

    pub fn is_released(&self) -> bool {
        self.latch.released
    }

    pub fn phase(&self) -> TurnPhase {
        self.sequencer.phase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;
    use skua_config::{CONTROL_LOOP_PERIOD_MS, SETTLE_HOLD_MS, TURN_HOLD_MS};

    /// Commands observed while feeding samples at the loop cadence,
    /// tagged with the time they were emitted
    type Trace = Vec<(ServoSetpoint, u64), 8>;

    /// Feed one sample per loop period starting at `start_ms`, recording
    /// every emitted command. Returns the time after the last sample.
    fn run(logic: &mut ReleaseLogic, samples: &[bool], start_ms: u64, trace: &mut Trace) -> u64 {
        let mut t = start_ms;
        for &dropped in samples {
            if let Some(cmd) = logic.poll(dropped, Instant::from_millis(t)) {
                trace.push((cmd, t)).unwrap();
            }
            t += CONTROL_LOOP_PERIOD_MS;
        }
        t
    }

    #[test]
    fn initial_state_emits_nothing() {
        let mut logic = ReleaseLogic::new();
        assert!(!logic.is_released());
        assert_eq!(logic.phase(), TurnPhase::Idle);
        assert_eq!(logic.poll(false, Instant::from_millis(0)), None);
    }

    #[test]
    fn no_drop_path_never_actuates() {
        let mut logic = ReleaseLogic::new();
        let mut trace = Trace::new();
        // Two full sequence durations worth of clean samples
        run(&mut logic, &[false; 2000], 0, &mut trace);

        assert!(trace.is_empty());
        assert!(!logic.is_released());
        assert_eq!(logic.phase(), TurnPhase::Idle);
    }

    #[test]
    fn single_low_sample_runs_the_full_sequence_once() {
        let mut logic = ReleaseLogic::new();
        let mut trace = Trace::new();

        let mut samples = [false; 2000];
        samples[2] = true; // one qualifying sample, then clean line again
        run(&mut logic, &samples, 0, &mut trace);

        assert_eq!(trace.len(), 2);
        let (first, fired_at) = trace[0];
        let (second, returned_at) = trace[1];
        assert_eq!(first, ServoSetpoint::FullTurn);
        assert_eq!(fired_at, 2 * CONTROL_LOOP_PERIOD_MS);
        assert_eq!(second, ServoSetpoint::Neutral);
        assert!(returned_at - fired_at >= TURN_HOLD_MS);

        assert!(logic.is_released());
        assert_eq!(logic.phase(), TurnPhase::Complete);
    }

    #[test]
    fn spurious_second_low_has_no_effect() {
        // Input sequence HIGH, HIGH, LOW, HIGH, LOW - the second LOW lands
        // while the turn is still in progress and must change nothing
        let mut logic = ReleaseLogic::new();
        let mut trace = Trace::new();

        let t = run(
            &mut logic,
            &[false, false, true, false, true],
            0,
            &mut trace,
        );
        assert_eq!(trace.len(), 1);
        assert_eq!(trace[0].0, ServoSetpoint::FullTurn);

        // Run the rest of the sequence out on a clean line
        run(&mut logic, &[false; 1000], t, &mut trace);
        assert_eq!(trace.len(), 2);
        assert_eq!(trace[1].0, ServoSetpoint::Neutral);
        assert_eq!(logic.phase(), TurnPhase::Complete);
    }

    #[test]
    fn input_changes_during_the_sequence_are_ignored() {
        let mut logic = ReleaseLogic::new();
        let mut trace = Trace::new();

        // Trigger, then toggle the line wildly for the whole sequence
        let total = ((TURN_HOLD_MS + SETTLE_HOLD_MS) / CONTROL_LOOP_PERIOD_MS) as usize + 10;
        let mut t = 0;
        for i in 0..total {
            let dropped = i == 0 || i % 3 == 0;
            if let Some(cmd) = logic.poll(dropped, Instant::from_millis(t)) {
                trace.push((cmd, t)).unwrap();
            }
            t += CONTROL_LOOP_PERIOD_MS;
        }

        // Only the scheduled transitions appear
        assert_eq!(trace.len(), 2);
        assert_eq!(trace[0].0, ServoSetpoint::FullTurn);
        assert_eq!(trace[1].0, ServoSetpoint::Neutral);
        assert_eq!(logic.phase(), TurnPhase::Complete);
    }
}
