//! Linear mapping of the averaged raw reading into the classified unit.

use crate::batch::Resolution;
use crate::error::ConfigError;
use crate::reducer::AveragedReading;

/// Integer transfer function `value * numerator / denominator`.
///
/// The result is truncated, matching a float calculation cast back to an
/// unsigned integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Conversion {
    numerator: u32,
    denominator: u32,
}

impl Default for Conversion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Conversion {
    /// Classify raw averages as they are.
    pub const IDENTITY: Self = Self {
        numerator: 1,
        denominator: 1,
    };

    /// # Errors
    ///
    /// Fails on a zero denominator.
    pub const fn new(numerator: u32, denominator: u32) -> Result<Self, ConfigError> {
        if denominator == 0 {
            return Err(ConfigError::ZeroDenominator);
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// LM35 sensor giving 10 mV per degree Celsius, sampled against a
    /// reference of `vref_mv` millivolts.
    #[must_use]
    pub const fn lm35(vref_mv: u32, resolution: Resolution) -> Self {
        Self {
            numerator: vref_mv,
            denominator: resolution.levels() * 10,
        }
    }

    #[must_use]
    pub fn apply(self, reading: AveragedReading) -> u16 {
        let scaled = u64::from(reading.0) * u64::from(self.numerator) / u64::from(self.denominator);
        scaled.min(u64::from(u16::MAX)) as u16
    }

    /// The highest value the conversion produces for the given resolution.
    #[must_use]
    pub fn max_output(self, resolution: Resolution) -> u16 {
        self.apply(AveragedReading(resolution.max_sample()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_keeps_the_reading() {
        assert_eq!(Conversion::IDENTITY.apply(AveragedReading(1234)), 1234);
    }

    #[test]
    fn lm35_at_3300_millivolts_converts_to_degrees() {
        let lm35 = Conversion::lm35(3300, Resolution::BITS_12);
        assert_eq!(lm35.apply(AveragedReading(0)), 0);
        assert_eq!(lm35.apply(AveragedReading(2048)), 165);
        assert_eq!(lm35.apply(AveragedReading(4095)), 329);
        assert_eq!(lm35.max_output(Resolution::BITS_12), 329);
    }

    #[test]
    fn lm35_truncates_like_a_float_cast() {
        let lm35 = Conversion::lm35(3300, Resolution::BITS_12);
        for raw in 0..4096_u16 {
            let float = (f64::from(raw) * 3.3 / 4096.0) * 100.0;
            let expected = float as u16;
            let actual = lm35.apply(AveragedReading(raw));
            assert_eq!(actual, expected, "raw {raw}");
        }
    }

    #[test]
    fn lm35_keeps_the_reference_below_ten_millivolts() {
        let lm35 = Conversion::lm35(3305, Resolution::BITS_12);
        assert_eq!(lm35.apply(AveragedReading(4095)), 330);
        assert_eq!(lm35.apply(AveragedReading(2048)), 165);
    }

    #[test]
    fn zero_denominator_is_rejected() {
        assert_eq!(Conversion::new(1, 0), Err(ConfigError::ZeroDenominator));
    }

    #[test]
    fn result_saturates_at_sample_width() {
        let gain = Conversion::new(100, 1).unwrap();
        assert_eq!(gain.apply(AveragedReading(4095)), u16::MAX);
    }
}
