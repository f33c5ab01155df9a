//! Configuration errors and fatal runtime faults.

use core::fmt;

/// Rejected compile-time configuration.
///
/// These are detected once, while the monitor is being built, before any
/// interrupt is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The period rounds down to zero ticks of the counter.
    PeriodTooShort,
    /// The period needs more ticks than the counter can represent.
    PeriodOverflow { ticks: u64, max_ticks: u32 },
    /// Band bounds must be strictly increasing.
    UnorderedBands { index: usize },
    /// A bound lies above anything the sensor and conversion can produce,
    /// leaving every band above it unreachable.
    UnreachableBand { index: usize, bound: u16, max_value: u16 },
    /// The conversion would divide by zero.
    ZeroDenominator,
    /// A batch must hold at least one sample.
    EmptyBatch,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PeriodTooShort => write!(f, "period is shorter than one tick"),
            Self::PeriodOverflow { ticks, max_ticks } => write!(
                f,
                "period needs {ticks} ticks, counter holds at most {max_ticks}"
            ),
            Self::UnorderedBands { index } => {
                write!(f, "band {index} does not lie above its predecessor")
            }
            Self::UnreachableBand {
                index,
                bound,
                max_value,
            } => write!(
                f,
                "band {index} bound {bound} exceeds the highest reading {max_value}"
            ),
            Self::ZeroDenominator => write!(f, "conversion denominator is zero"),
            Self::EmptyBatch => write!(f, "batch capacity is zero"),
        }
    }
}

/// Fault that must stop the monitor.
///
/// None of these can be recovered from at runtime. The firmware treats
/// them as panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fault {
    /// Reduction was requested on a batch that was not completely written.
    IncompleteBatch { written: usize, capacity: usize },
    /// Acquisition tried to write past the batch capacity.
    BatchOverflow { capacity: usize },
    /// The transfer engine kept writing the destination while it was being
    /// read.
    TornSnapshot { before: usize, after: usize },
    /// A polled sample did not become ready within the spin limit.
    SensorTimeout { index: usize },
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IncompleteBatch { written, capacity } => write!(
                f,
                "batch holds {written} of {capacity} samples, refusing to reduce"
            ),
            Self::BatchOverflow { capacity } => {
                write!(f, "acquisition wrote past {capacity} samples")
            }
            Self::TornSnapshot { before, after } => write!(
                f,
                "transfer moved from {before} to {after} while being read"
            ),
            Self::SensorTimeout { index } => {
                write!(f, "sample {index} was never ready")
            }
        }
    }
}
