//! Blocking acquisition spinning on a per-sample ready condition.

use super::{Acquisition, Progress};
use crate::batch::{Batch, Sample};
use crate::error::Fault;

/// Sensor read one conversion at a time.
pub trait PollingSensor {
    fn trigger_one_shot(&mut self);
    fn is_sample_ready(&mut self, index: usize) -> bool;
    fn read_sample(&mut self, index: usize) -> Sample;

    /// Mask the sensor's own interrupt.
    fn mask(&mut self) {}

    fn unmask(&mut self) {}
}

/// Where the spin-read of the batch runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Trigger {
    /// Trigger and read the whole batch inside the timer interrupt.
    Immediate,
    /// Trigger in the timer interrupt, read in the sensor's interrupt.
    Deferred,
}

/// Acquisition reading `N` samples by busy-waiting on each of them.
///
/// The spin happens in interrupt context and blocks every interrupt of
/// lower or equal priority. This is acceptable only as long as `N` is small
/// and a single conversion takes a fraction of the cycle period.
///
/// The wait for a single sample is bounded, a sensor that is not ready
/// within the spin limit faults the cycle.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Polling<S> {
    sensor: S,
    trigger: Trigger,
    spin_limit: u32,
}

impl<S: PollingSensor> Polling<S> {
    /// Polls of the ready condition tolerated before a sample times out.
    pub const DEFAULT_SPIN_LIMIT: u32 = 100_000;

    pub fn immediate(sensor: S) -> Self {
        Self {
            sensor,
            trigger: Trigger::Immediate,
            spin_limit: Self::DEFAULT_SPIN_LIMIT,
        }
    }

    pub fn deferred(sensor: S) -> Self {
        Self {
            sensor,
            trigger: Trigger::Deferred,
            spin_limit: Self::DEFAULT_SPIN_LIMIT,
        }
    }

    #[must_use]
    pub fn with_spin_limit(mut self, spin_limit: u32) -> Self {
        self.spin_limit = spin_limit;
        self
    }

    pub fn spin_limit(&self) -> u32 {
        self.spin_limit
    }

    pub fn trigger(&self) -> Trigger {
        self.trigger
    }

    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    fn read_batch<const N: usize>(&mut self, batch: &mut Batch<N>) -> Result<(), Fault> {
        batch.reset();
        for index in 0..N {
            let mut spins = 0;
            while !self.sensor.is_sample_ready(index) {
                spins += 1;
                if spins >= self.spin_limit {
                    return Err(Fault::SensorTimeout { index });
                }
                core::hint::spin_loop();
            }
            let sample = self.sensor.read_sample(index);
            batch
                .push(sample)
                .map_err(|_| Fault::BatchOverflow { capacity: N })?;
        }
        Ok(())
    }
}

impl<S: PollingSensor, const N: usize> Acquisition<N> for Polling<S> {
    fn start_cycle(&mut self, batch: &mut Batch<N>) -> Result<Progress, Fault> {
        match self.trigger {
            Trigger::Immediate => {
                self.sensor.mask();
                self.sensor.trigger_one_shot();
                self.read_batch(batch)?;
                Ok(Progress::Complete)
            }
            Trigger::Deferred => {
                self.sensor.trigger_one_shot();
                Ok(Progress::Pending)
            }
        }
    }

    fn complete_cycle(&mut self, batch: &mut Batch<N>) -> Result<(), Fault> {
        // Stays masked until the cycle is classified and rearmed.
        self.sensor.mask();
        self.read_batch(batch)
    }

    fn rearm(&mut self) {
        self.sensor.unmask();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sensor becoming ready only after being asked a few times.
    #[derive(Default)]
    struct SlowSensor {
        triggered: u32,
        masked: bool,
        polls: u32,
        ready_after: u32,
        reads: [Option<u32>; 8],
    }

    impl PollingSensor for SlowSensor {
        fn trigger_one_shot(&mut self) {
            self.triggered += 1;
        }

        fn is_sample_ready(&mut self, _index: usize) -> bool {
            self.polls += 1;
            self.polls % (self.ready_after + 1) == 0
        }

        fn read_sample(&mut self, index: usize) -> Sample {
            // Records the poll count at which each sample was read.
            self.reads[index] = Some(self.polls);
            100 + index as Sample
        }

        fn mask(&mut self) {
            self.masked = true;
        }

        fn unmask(&mut self) {
            self.masked = false;
        }
    }

    #[test]
    fn polling_starts_with_the_default_spin_limit() {
        let immediate = Polling::immediate(SlowSensor::default());
        assert_eq!(immediate.trigger(), Trigger::Immediate);
        assert_eq!(immediate.spin_limit(), Polling::<SlowSensor>::DEFAULT_SPIN_LIMIT);

        let deferred = Polling::deferred(SlowSensor::default()).with_spin_limit(10);
        assert_eq!(deferred.trigger(), Trigger::Deferred);
        assert_eq!(deferred.spin_limit(), 10);
    }

    #[test]
    fn immediate_polling_completes_within_the_start() {
        let mut polling = Polling::immediate(SlowSensor {
            ready_after: 2,
            ..SlowSensor::default()
        });
        let mut batch: Batch<8> = Batch::new();

        let progress = polling.start_cycle(&mut batch).unwrap();

        assert_eq!(progress, Progress::Complete);
        assert_eq!(
            batch.completed().unwrap().samples(),
            &[100, 101, 102, 103, 104, 105, 106, 107]
        );
        assert_eq!(polling.sensor().triggered, 1);
    }

    #[test]
    fn each_sample_is_read_after_its_ready_condition() {
        let mut polling = Polling::immediate(SlowSensor {
            ready_after: 3,
            ..SlowSensor::default()
        });
        let mut batch: Batch<8> = Batch::new();
        polling.start_cycle(&mut batch).unwrap();

        for (index, read) in polling.sensor().reads.iter().enumerate() {
            assert_eq!(*read, Some(4 * (index as u32 + 1)));
        }
    }

    #[test]
    fn sensor_stays_masked_until_rearmed() {
        let mut polling = Polling::immediate(SlowSensor::default());
        let mut batch: Batch<8> = Batch::new();

        polling.start_cycle(&mut batch).unwrap();
        assert!(polling.sensor().masked);

        Acquisition::<8>::rearm(&mut polling);
        assert!(!polling.sensor().masked);
    }

    #[test]
    fn deferred_polling_only_triggers_in_the_start() {
        let mut polling = Polling::deferred(SlowSensor::default());
        let mut batch: Batch<8> = Batch::new();

        let progress = polling.start_cycle(&mut batch).unwrap();

        assert_eq!(progress, Progress::Pending);
        assert_eq!(polling.sensor().triggered, 1);
        assert_eq!(polling.sensor().polls, 0);
        assert!(!polling.sensor().masked);
        assert!(batch.is_empty());
    }

    #[test]
    fn sensor_not_ready_within_the_spin_limit_times_out() {
        let mut polling = Polling::immediate(SlowSensor {
            ready_after: 3,
            ..SlowSensor::default()
        })
        .with_spin_limit(3);
        let mut batch: Batch<8> = Batch::new();

        assert_eq!(
            polling.start_cycle(&mut batch),
            Err(Fault::SensorTimeout { index: 0 })
        );
        assert!(!batch.is_complete());
    }

    #[test]
    fn sensor_ready_just_below_the_spin_limit_is_read() {
        let mut polling = Polling::immediate(SlowSensor {
            ready_after: 2,
            ..SlowSensor::default()
        })
        .with_spin_limit(3);
        let mut batch: Batch<8> = Batch::new();

        assert_eq!(polling.start_cycle(&mut batch), Ok(Progress::Complete));
    }

    #[test]
    fn deferred_polling_reads_the_batch_in_the_completion() {
        let mut polling = Polling::deferred(SlowSensor::default());
        let mut batch: Batch<8> = Batch::new();

        polling.start_cycle(&mut batch).unwrap();
        polling.complete_cycle(&mut batch).unwrap();

        assert!(batch.is_complete());
        assert!(polling.sensor().masked);
    }
}
