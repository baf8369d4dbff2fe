#![no_std]
#![no_main]

//! Firmware for the Kite drop-glider testbed

use defmt::{debug, info};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::peripherals::{DMA_CH0, PIN_10, PIO0, PIO1};
use embassy_rp::pio::{InterruptHandler as PioIrqHandler, Pio};
use embassy_rp::watchdog::Watchdog;
use embassy_rp::{Peri, bind_interrupts};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Receiver;
use embassy_time::{Duration, Instant, Ticker, Timer};
use panic_probe as _;
use skua_config::{
    CONTROL_LOOP_FREQUENCY_HZ, CONTROL_LOOP_PERIOD_MS, LED_UPDATE_PERIOD_MS, STATUS_LOG_INTERVAL_S,
};
use skua_control::TurnPhase;
use skua_hardware::DropSensor;
use skua_hardware::led::{LED_COMMANDS, LedPattern, StatusLed, colors};
use skua_hardware::pwm::{PwmOutputs, PwmPins};
use skua_system::{
    ReleaseController, SUP_CTRL_READY, SUP_LED_READY, SUP_START_CTRL, supervisor_task,
};

bind_interrupts!(
    struct Irqs {
        PIO0_IRQ_0 => PioIrqHandler<PIO0>;
        PIO1_IRQ_0 => PioIrqHandler<PIO1>;
    }
);

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    // Status LED on PIO1 (separate from PWM on PIO0)
    info!("Setting up status LED");
    let Pio {
        common: led_common,
        sm0: led_sm0,
        ..
    } = Pio::new(p.PIO1, Irqs);
    spawner
        .spawn(led_task(led_common, led_sm0, p.DMA_CH0, p.PIN_10))
        .unwrap();

    info!("Spawning supervisor");
    spawner.spawn(supervisor_task()).unwrap();

    info!("Setting up aileron PWM");
    let mut pwm_pins = PwmPins { aileron: p.PIN_9 };
    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO0, Irqs);
    let pwm = PwmOutputs::new(&mut common, sm0, &mut pwm_pins);

    let sensor = DropSensor::new(p.PIN_2);

    let mut fc = ReleaseController::new(pwm);
    fc.center();

    info!("Arming watchdog");
    fc.init_watchdog(Watchdog::new(p.WATCHDOG));

    // Signal readiness and wait for the supervisor to release the loop
    SUP_CTRL_READY.signal(());
    info!("Waiting for supervisor start barrier");
    SUP_START_CTRL.wait().await;

    let _ = LED_COMMANDS.try_send(pattern_for(fc.phase()));
    info!("Entering control loop, waiting for drop");

    let mut ticker = Ticker::every(Duration::from_millis(CONTROL_LOOP_PERIOD_MS));
    let mut last_phase = fc.phase();
    let mut loop_counter = 0u32;

    loop {
        ticker.next().await;

        fc.kick_watchdog();
        fc.step(sensor.is_dropped(), Instant::now());

        let phase = fc.phase();
        if phase != last_phase {
            let _ = LED_COMMANDS.try_send(pattern_for(phase));
            last_phase = phase;
        }

        loop_counter = loop_counter.wrapping_add(1);
        if loop_counter.is_multiple_of(CONTROL_LOOP_FREQUENCY_HZ * STATUS_LOG_INTERVAL_S) {
            debug!("Status: released={} phase={}", fc.is_released(), phase);
        }
    }
}

fn pattern_for(phase: TurnPhase) -> LedPattern {
    match phase {
        TurnPhase::Idle => LedPattern::Solid(colors::GREEN),
        TurnPhase::Turning => LedPattern::FastBlink(colors::ORANGE),
        TurnPhase::Settling => LedPattern::Pulse(colors::ORANGE),
        TurnPhase::Complete => LedPattern::Solid(colors::CYAN),
    }
}

#[embassy_executor::task]
async fn led_task(
    mut common: embassy_rp::pio::Common<'static, PIO1>,
    sm0: embassy_rp::pio::StateMachine<'static, PIO1, 0>,
    dma: Peri<'static, DMA_CH0>,
    pin: Peri<'static, PIN_10>,
) {
    info!("LED task starting");

    let mut led = StatusLed::new(&mut common, sm0, pin, dma);
    let receiver: Receiver<'static, CriticalSectionRawMutex, LedPattern, 8> =
        LED_COMMANDS.receiver();

    // Boot pattern until the controller takes over
    led.set_pattern(LedPattern::SlowBlink(colors::BLUE)).await;

    SUP_LED_READY.signal(());

    loop {
        if let Ok(pattern) = receiver.try_receive() {
            led.set_pattern(pattern).await;
        }

        led.update().await;

        Timer::after(Duration::from_millis(LED_UPDATE_PERIOD_MS)).await;
    }
}
