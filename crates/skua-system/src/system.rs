use defmt::info;
use embassy_futures::join::join;
use embassy_rp::watchdog::Watchdog;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant};
use skua_config::WATCHDOG_TIMEOUT_MS;
use skua_control::{ReleaseLogic, ServoSetpoint, TurnPhase};
use skua_hardware::pwm::PwmOutputs;

/// Drop-release controller: the single owner of actuation state.
///
/// Constructed once at startup and driven by the polling loop; holds the
/// release latch, the turn sequencer and the servo output together so no
/// other task can touch the aileron.
pub struct ReleaseController<'a> {
    pwm: PwmOutputs<'a>,
    logic: ReleaseLogic,
    watchdog: Option<Watchdog>,
}

impl<'a> ReleaseController<'a> {
    pub fn new(pwm: PwmOutputs<'a>) -> Self {
        Self {
            pwm,
            logic: ReleaseLogic::new(),
            watchdog: None,
        }
    }

    /// Drive the aileron to the neutral set-point
    pub fn center(&mut self) {
        self.pwm.set_safe_positions();
        info!("Aileron centered at neutral");
    }

    /// Start the hardware watchdog
    pub fn init_watchdog(&mut self, mut watchdog: Watchdog) {
        watchdog.start(Duration::from_millis(WATCHDOG_TIMEOUT_MS));
        self.watchdog = Some(watchdog);
        info!("Watchdog armed with {}ms timeout", WATCHDOG_TIMEOUT_MS);
    }

    /// Feed the watchdog timer to prevent a system reset
    pub fn kick_watchdog(&mut self) {
        if let Some(ref mut wd) = self.watchdog {
            wd.feed();
        }
    }

    /// One control loop iteration: sample in, servo command out
    pub fn step(&mut self, dropped: bool, now: Instant) {
        if let Some(setpoint) = self.logic.poll(dropped, now) {
            match setpoint {
                ServoSetpoint::FullTurn => info!("Drop detected, starting turn"),
                ServoSetpoint::Neutral => info!("Turn hold elapsed, returning to neutral"),
            }
            self.pwm.set_aileron_us(setpoint.pulse_us());
        }
    }

    pub fn is_released(&self) -> bool {
        self.logic.is_released()
    }

    pub fn phase(&self) -> TurnPhase {
        self.logic.phase()
    }
}

// Ready signals from participating tasks
pub static SUP_LED_READY: Signal<CriticalSectionRawMutex, ()> = Signal::new();
pub static SUP_CTRL_READY: Signal<CriticalSectionRawMutex, ()> = Signal::new();

// Start signal releasing the control loop from the barrier
pub static SUP_START_CTRL: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Supervisor task that waits for all participants to be ready, then
/// releases the control loop
#[embassy_executor::task]
pub async fn supervisor_task() {
    info!("Supervisor: waiting for tasks to initialize");

    let led_ready = SUP_LED_READY.wait();
    let ctrl_ready = SUP_CTRL_READY.wait();
    let _ = join(led_ready, ctrl_ready).await;

    info!("Supervisor: all tasks initialized, releasing start barrier");
    SUP_START_CTRL.signal(());
}
