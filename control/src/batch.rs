//! Fixed-capacity store of raw samples collected during one cycle.

/// A single raw reading of the sensor.
pub type Sample = u16;

/// Bit width of the sensor's samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Resolution(u8);

impl Resolution {
    pub const BITS_12: Self = Self(12);

    /// # Panics
    ///
    /// Samples are 16 bits wide, wider resolutions panic.
    #[must_use]
    pub const fn bits(bits: u8) -> Self {
        assert!(bits >= 1 && bits <= 16);
        Self(bits)
    }

    #[must_use]
    pub const fn max_sample(self) -> Sample {
        (((1_u32) << self.0) - 1) as Sample
    }

    /// Number of distinct sample values, i.e. `2^bits`.
    #[must_use]
    pub const fn levels(self) -> u32 {
        1 << self.0
    }
}

/// Ordered batch of `N` samples.
///
/// The batch is either being filled or complete. It becomes complete when
/// its `N`-th slot is written and stays so until it is reset. Only a
/// complete batch hands out a [`Completed`] view. A batch without any
/// slots never completes.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Batch<const N: usize> {
    slots: [Sample; N],
    written: usize,
}

/// Read-only view of a batch with all of its slots written.
#[derive(Debug, Clone, Copy)]
pub struct Completed<'a, const N: usize>(&'a [Sample; N]);

impl<const N: usize> Default for Batch<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Batch<N> {
    pub const CAPACITY: usize = N;

    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: [0; N],
            written: 0,
        }
    }

    /// Mark the batch empty. Old samples stay in place until overwritten.
    pub fn reset(&mut self) {
        self.written = 0;
    }

    /// Append a sample behind the last written one.
    ///
    /// # Errors
    ///
    /// Returns `Full` when all `N` slots were already written since the
    /// last reset.
    pub fn push(&mut self, sample: Sample) -> Result<(), Full> {
        if self.written == N {
            return Err(Full);
        }
        self.slots[self.written] = sample;
        self.written += 1;
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.written
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.written == 0
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        N > 0 && self.written == N
    }

    #[must_use]
    pub fn slot(&self, index: usize) -> Option<Sample> {
        if index < self.written {
            Some(self.slots[index])
        } else {
            None
        }
    }

    #[must_use]
    pub fn completed(&self) -> Option<Completed<'_, N>> {
        if self.is_complete() {
            Some(Completed(&self.slots))
        } else {
            None
        }
    }
}

impl<'a, const N: usize> Completed<'a, N> {
    #[must_use]
    pub fn samples(&self) -> &'a [Sample; N] {
        self.0
    }
}

/// The batch has no free slot left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Full;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_created_it_is_empty_and_incomplete() {
        let batch: Batch<8> = Batch::new();
        assert!(batch.is_empty());
        assert!(!batch.is_complete());
        assert!(batch.completed().is_none());
    }

    #[test]
    fn when_all_slots_are_written_it_completes() {
        let mut batch: Batch<4> = Batch::new();
        for sample in [1, 2, 3] {
            batch.push(sample).unwrap();
            assert!(batch.completed().is_none());
        }
        batch.push(4).unwrap();

        let completed = batch.completed().expect("batch should be complete");
        assert_eq!(completed.samples(), &[1, 2, 3, 4]);
    }

    #[test]
    fn when_written_past_capacity_it_refuses() {
        let mut batch: Batch<2> = Batch::new();
        batch.push(1).unwrap();
        batch.push(2).unwrap();
        assert_eq!(batch.push(3), Err(Full));
        assert_eq!(batch.len(), 2);
    }

    #[test]
    fn when_reset_it_hides_old_samples() {
        let mut batch: Batch<2> = Batch::new();
        batch.push(10).unwrap();
        batch.push(20).unwrap();
        batch.reset();

        assert!(batch.is_empty());
        assert_eq!(batch.slot(0), None);

        batch.push(30).unwrap();
        assert_eq!(batch.slot(0), Some(30));
        assert!(batch.completed().is_none());
    }

    #[test]
    fn zero_capacity_batch_never_completes() {
        let mut batch: Batch<0> = Batch::new();
        assert!(!batch.is_complete());
        assert!(batch.completed().is_none());
        assert_eq!(batch.push(1), Err(Full));
    }

    #[test]
    fn twelve_bit_resolution_tops_at_4095() {
        assert_eq!(Resolution::BITS_12.max_sample(), 4095);
        assert_eq!(Resolution::BITS_12.levels(), 4096);
        assert_eq!(Resolution::bits(16).max_sample(), u16::MAX);
    }
}
