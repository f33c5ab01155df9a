#![no_main]
#![no_std]

use ovenwatch_firmware as _; // global logger + panicking-behavior

#[rtic::app(device = stm32f1xx_hal::pac, peripherals = true, dispatchers = [EXTI0])]
mod app {
    use fugit::ExtU64;
    use systick_monotonic::Systick;

    use ovenwatch_control::{Fault, Monitor, Report};

    use ovenwatch_firmware::config::{Indicator, CONFIG, SAMPLES};
    use ovenwatch_firmware::system::cycle_timer::CycleTimer;
    use ovenwatch_firmware::system::indicators::Indicators;
    use ovenwatch_firmware::system::sensor::Acquisition;
    use ovenwatch_firmware::system::{StatusLed, System};

    const BLINKS: u8 = 1;

    type OvenMonitor = Monitor<CycleTimer, Acquisition, Indicators, Indicator, SAMPLES, 2>;

    #[monotonic(binds = SysTick, default = true)]
    type Mono = Systick<1000>; // 1 kHz / 1 ms granularity

    #[shared]
    struct Shared {
        monitor: OvenMonitor,
    }

    #[local]
    struct Local {
        status_led: StatusLed,
    }

    #[init]
    fn init(cx: init::Context) -> (Shared, Local, init::Monotonics) {
        defmt::info!("INIT");

        let system = System::init(cx.core, cx.device);
        let mono = system.mono;
        let status_led = system.status_led;

        let mut monitor = OvenMonitor::new(
            &CONFIG,
            system.cycle_timer,
            system.acquisition,
            system.indicators,
        )
        .unwrap_or_else(|error| defmt::panic!("Invalid configuration: {}", error));
        monitor.start();

        blink::spawn(true, BLINKS).unwrap();

        (
            Shared { monitor },
            Local { status_led },
            init::Monotonics(mono),
        )
    }

    #[task(binds = TIM2, shared = [monitor], priority = 2)]
    fn cycle(mut cx: cycle::Context) {
        let outcome = cx.shared.monitor.lock(OvenMonitor::on_cycle_expired);
        report(outcome);
    }

    #[task(binds = DMA1_CHANNEL1, shared = [monitor], priority = 2)]
    fn acquired(mut cx: acquired::Context) {
        let outcome = cx.shared.monitor.lock(OvenMonitor::on_acquisition_event);
        report(outcome);
    }

    fn report(outcome: Result<Option<Report<Indicator>>, Fault>) {
        match outcome {
            Ok(Some(report)) => {
                defmt::info!("Cycle {} lights {}", report.cycle, report.label);
            }
            Ok(None) => (),
            Err(fault) => defmt::panic!("Monitoring failed: {}", fault),
        }
    }

    #[task(local = [status_led])]
    fn blink(cx: blink::Context, on: bool, blinks: u8) {
        let time_on = 200.millis();
        let time_off_short = 200.millis();
        let time_off_long = 2.secs();

        if on {
            cx.local.status_led.set_low();
            blink::spawn_after(time_on, false, blinks).unwrap();
        } else {
            cx.local.status_led.set_high();
            if blinks > 1 {
                blink::spawn_after(time_off_short, true, blinks - 1).unwrap();
            } else {
                blink::spawn_after(time_off_long, true, BLINKS).unwrap();
            }
        }
    }
}
