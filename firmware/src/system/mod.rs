pub mod cycle_timer;
pub mod indicators;
pub mod sensor;

pub use stm32f1xx_hal as hal;

use hal::adc::{Adc, SampleTime};
use hal::gpio::{gpioc::PC13, Output, PinState, PushPull};
use hal::pac::CorePeripherals;
use hal::pac::Peripherals as DevicePeripherals;
use hal::prelude::*;
use systick_monotonic::Systick;

use cycle_timer::CycleTimer;
use indicators::{Indicators, Pins as IndicatorsPins};
use sensor::Acquisition;
#[cfg(feature = "polling")]
use {ovenwatch_control::Polling, sensor::AdcSensor};
#[cfg(not(feature = "polling"))]
use {
    crate::config::SAMPLES,
    ovenwatch_control::{Handshake, Sample, Transfer},
    sensor::AdcTransfer,
};

pub const SYSCLK_HZ: u32 = 48_000_000;

pub type StatusLed = PC13<Output<PushPull>>;

pub struct System {
    pub mono: Systick<1000>,
    pub status_led: StatusLed,
    pub indicators: Indicators,
    pub cycle_timer: CycleTimer,
    pub acquisition: Acquisition,
}

impl System {
    /// Initialize system abstraction
    ///
    /// # Panics
    ///
    /// The system can be initialized only once. It panics otherwise.
    #[must_use]
    pub fn init(cp: CorePeripherals, dp: DevicePeripherals) -> Self {
        let mut flash = dp.FLASH.constrain();
        let rcc = dp.RCC.constrain();

        // 8 MHz crystal of the blue pill. ADC clock must stay below 14 MHz.
        let clocks = rcc
            .cfgr
            .use_hse(8.MHz())
            .sysclk(SYSCLK_HZ.Hz())
            .pclk1(24.MHz())
            .adcclk(12.MHz())
            .freeze(&mut flash.acr);

        let mut gpioa = dp.GPIOA.split();
        let mut gpioc = dp.GPIOC.split();

        let mono = Systick::new(cp.SYST, SYSCLK_HZ);

        // Active low on the blue pill.
        let status_led = gpioc
            .pc13
            .into_push_pull_output_with_state(&mut gpioc.crh, PinState::High);

        let indicators = Indicators::new(IndicatorsPins {
            green: gpioa.pa8.into_push_pull_output(&mut gpioa.crh),
            yellow: gpioc.pc15.into_push_pull_output(&mut gpioc.crh),
            red: gpioc.pc14.into_push_pull_output(&mut gpioc.crh),
        });

        let cycle_timer = CycleTimer::new(dp.TIM2.counter_ms(&clocks));

        let mut adc = Adc::adc1(dp.ADC1, clocks);
        // LM35 output impedance asks for a longer sampling.
        adc.set_sample_time(SampleTime::T_55);
        let sensor_pin = gpioa.pa1.into_analog(&mut gpioa.crl);

        #[cfg(feature = "polling")]
        let acquisition = Polling::immediate(AdcSensor::new(adc, sensor_pin));

        #[cfg(not(feature = "polling"))]
        let acquisition = {
            let dma = dp.DMA1.split().1;
            let buffer = cortex_m::singleton!(: [Sample; SAMPLES] = [0; SAMPLES]).unwrap();
            if cfg!(feature = "no-handshake") {
                let engine = AdcTransfer::new(adc, sensor_pin, dma, buffer, Handshake::None);
                Transfer::without_handshake(engine)
            } else {
                let engine = AdcTransfer::new(adc, sensor_pin, dma, buffer, Handshake::Signaled);
                Transfer::signaled(engine)
            }
        };

        Self {
            mono,
            status_led,
            indicators,
            cycle_timer,
            acquisition,
        }
    }
}
