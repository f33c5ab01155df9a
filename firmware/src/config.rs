//! Constants of the oven monitor.

use fugit::MillisDurationU32;

use ovenwatch_control::{Band, Config, Conversion, Edge, Resolution, TickRate};

/// Samples averaged in a single cycle.
pub const SAMPLES: usize = 16;

/// ADC reference, the 3.3 V rail of the board.
pub const VREF_MV: u32 = 3300;

pub const RESOLUTION: Resolution = Resolution::BITS_12;

/// Lamp lit for the measured temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum Indicator {
    Green,
    Yellow,
    Red,
}

/// Below 40 °C green, below 70 °C yellow, red otherwise.
pub const CONFIG: Config<Indicator, 2> = Config {
    period: MillisDurationU32::secs(60),
    // CounterMs prescales the 16-bit TIM2 to 1 kHz.
    tick_rate: TickRate::sixteen_bit(1_000),
    resolution: RESOLUTION,
    conversion: Conversion::lm35(VREF_MV, RESOLUTION),
    bands: [
        Band {
            bound: 40,
            label: Indicator::Green,
        },
        Band {
            bound: 70,
            label: Indicator::Yellow,
        },
    ],
    top: Indicator::Red,
    edge: Edge::Exclusive,
};
