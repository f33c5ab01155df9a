//! Compile-time configuration and its validation.

use fugit::MillisDurationU32;

use crate::batch::Resolution;
use crate::classifier::{Band, Bands, Edge};
use crate::conversion::Conversion;
use crate::error::ConfigError;
use crate::scheduler::{Period, TickRate};

/// Constants describing one monitor.
///
/// Meant to be declared as a `const` and validated during initialization,
/// before any interrupt is enabled.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config<L, const B: usize> {
    pub period: MillisDurationU32,
    pub tick_rate: TickRate,
    pub resolution: Resolution,
    pub conversion: Conversion,
    pub bands: [Band<L>; B],
    pub top: L,
    pub edge: Edge,
}

/// Configuration that passed validation.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings<L, const B: usize> {
    pub period: Period,
    pub resolution: Resolution,
    pub conversion: Conversion,
    pub bands: Bands<L, B>,
}

impl<L: Copy + PartialEq, const B: usize> Config<L, B> {
    /// Check the configuration for a batch of `N` samples.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: an empty batch, a period the
    /// counter cannot represent, unordered bounds, or bounds above the
    /// highest converted reading.
    pub fn validate<const N: usize>(&self) -> Result<Settings<L, B>, ConfigError> {
        if N == 0 {
            return Err(ConfigError::EmptyBatch);
        }
        let period = Period::new(self.period, self.tick_rate)?;
        let bands = Bands::new(self.bands, self.top, self.edge)?;
        bands.check_reachable(self.conversion.max_output(self.resolution))?;
        Ok(Settings {
            period,
            resolution: self.resolution,
            conversion: self.conversion,
            bands,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Color {
        Green,
        Yellow,
        Red,
    }

    const OVEN: Config<Color, 2> = Config {
        period: MillisDurationU32::secs(60),
        tick_rate: TickRate::sixteen_bit(1_000),
        resolution: Resolution::BITS_12,
        conversion: Conversion::lm35(3300, Resolution::BITS_12),
        bands: [
            Band {
                bound: 40,
                label: Color::Green,
            },
            Band {
                bound: 70,
                label: Color::Yellow,
            },
        ],
        top: Color::Red,
        edge: Edge::Exclusive,
    };

    #[test]
    fn oven_configuration_is_valid() {
        let settings = OVEN.validate::<16>().unwrap();
        assert_eq!(settings.period.ticks(), 60_000);
        assert_eq!(settings.bands.classify(55), Color::Yellow);
    }

    #[test]
    fn empty_batch_is_rejected() {
        assert_eq!(OVEN.validate::<0>().unwrap_err(), ConfigError::EmptyBatch);
    }

    #[test]
    fn fast_counter_overflows() {
        let config = Config {
            tick_rate: TickRate::sixteen_bit(10_000),
            ..OVEN
        };
        assert!(matches!(
            config.validate::<16>(),
            Err(ConfigError::PeriodOverflow { .. })
        ));
    }

    #[test]
    fn bounds_above_the_converted_range_are_rejected() {
        let config = Config {
            conversion: Conversion::lm35(500, Resolution::BITS_12),
            ..OVEN
        };
        assert_eq!(
            config.validate::<16>().unwrap_err(),
            ConfigError::UnreachableBand {
                index: 1,
                bound: 70,
                max_value: 49,
            }
        );
    }

    #[test]
    fn raw_bounds_fit_twelve_bits() {
        let config = Config {
            conversion: Conversion::IDENTITY,
            ..OVEN
        };
        assert!(config.validate::<8>().is_ok());
    }
}
