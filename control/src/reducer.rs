//! Collapse of a completed batch into its average.

use crate::batch::{Completed, Sample};

/// Integer mean of one completed batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AveragedReading(pub Sample);

/// Average the batch, truncating the remainder.
#[must_use]
pub fn reduce<const N: usize>(batch: Completed<'_, N>) -> AveragedReading {
    let sum: u64 = batch.samples().iter().map(|s| u64::from(*s)).sum();
    // The mean of samples never exceeds the largest of them.
    AveragedReading((sum / N as u64) as Sample)
}
