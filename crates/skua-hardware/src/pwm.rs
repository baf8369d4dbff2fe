use core::time::Duration;
use embassy_rp::Peri;
use embassy_rp::peripherals::{PIN_9, PIO0};
use embassy_rp::pio::{Common, StateMachine};
use embassy_rp::pio_programs::pwm::{PioPwm, PioPwmProgram};
use skua_config::{REFRESH_INTERVAL_US, SERVO_CENTER_US};

pub struct PwmOutputs<'a> {
    pub aileron: PioPwm<'a, PIO0, 0>,
}

impl<'a> PwmOutputs<'a> {
    pub fn new(
        common: &mut Common<'a, PIO0>,
        sm0: StateMachine<'a, PIO0, 0>,
        pins: &'a mut PwmPins,
    ) -> Self {
        let prg = PioPwmProgram::new(common);

        let mut aileron = PioPwm::new(common, sm0, pins.aileron.reborrow(), &prg);

        // Configure period and start output
        aileron.set_period(Duration::from_micros(REFRESH_INTERVAL_US.into()));
        aileron.start();

        Self { aileron }
    }

    pub fn set_safe_positions(&mut self) {
        self.aileron
            .write(Duration::from_micros(SERVO_CENTER_US.into()));
    }

    pub fn set_aileron_us(&mut self, pulse_us: u32) {
        self.aileron.write(Duration::from_micros(pulse_us.into()));
    }
}

pub struct PwmPins<'a> {
    pub aileron: Peri<'a, PIN_9>,
}
