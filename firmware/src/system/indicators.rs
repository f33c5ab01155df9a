use ovenwatch_control::DiscreteOutputs;

use crate::config::Indicator;
use crate::system::hal::gpio;

/// Three lamps of the oven, lit one at a time.
pub struct Indicators {
    pins: Pins,
}

pub struct Pins {
    pub green: GreenPin,
    pub yellow: YellowPin,
    pub red: RedPin,
}

pub type GreenPin = gpio::gpioa::PA8<gpio::Output<gpio::PushPull>>;
pub type YellowPin = gpio::gpioc::PC15<gpio::Output<gpio::PushPull>>;
pub type RedPin = gpio::gpioc::PC14<gpio::Output<gpio::PushPull>>;

impl Indicators {
    #[must_use]
    pub fn new(pins: Pins) -> Self {
        let mut indicators = Self { pins };
        indicators.set(Indicator::Green, false);
        indicators.set(Indicator::Yellow, false);
        indicators.set(Indicator::Red, false);
        indicators
    }

    pub fn set(&mut self, indicator: Indicator, on: bool) {
        let state = on.into();
        match indicator {
            Indicator::Green => self.pins.green.set_state(state),
            Indicator::Yellow => self.pins.yellow.set_state(state),
            Indicator::Red => self.pins.red.set_state(state),
        }
    }

    #[must_use]
    pub fn is_lit(&self, indicator: Indicator) -> bool {
        match indicator {
            Indicator::Green => self.pins.green.is_set_high(),
            Indicator::Yellow => self.pins.yellow.is_set_high(),
            Indicator::Red => self.pins.red.is_set_high(),
        }
    }
}

impl DiscreteOutputs<Indicator> for Indicators {
    fn assert(&mut self, label: Indicator) {
        self.set(label, true);
    }

    fn deassert(&mut self, label: Indicator) {
        self.set(label, false);
    }
}
