//! Interrupt-level glue running one cycle after another.
//!
//! ```text
//!   [ Scheduler ] --(cycle expired)--> [ Acquisition ] --(complete)--+
//!        A                                                           |
//!        |                                                           V
//!        +---------- Idle <---- [ Actuator ] <-- [ Classifier ] <-- [ Reducer ]
//! ```

use crate::acquisition::{Acquisition, Progress};
use crate::actuator::{actuate, DiscreteOutputs};
use crate::batch::Batch;
use crate::config::{Config, Settings};
use crate::error::{ConfigError, Fault};
use crate::log;
use crate::reducer::{reduce, AveragedReading};
use crate::scheduler::{CountdownTimer, Scheduler};

/// Phase of the current cycle.
///
/// Reduction, classification and actuation run synchronously and never
/// show up as a state of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    Idle,
    Acquiring { cycle: u32 },
}

/// Outcome of a resolved cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Report<L> {
    pub cycle: u32,
    pub average: AveragedReading,
    pub value: u16,
    pub label: L,
}

/// Context of the monitor, owning every component and the shared batch.
///
/// Handlers are meant to be called from interrupts of a single priority
/// level, each taking `&mut self`, so a cycle is never re-entered.
#[derive(Debug)]
pub struct Monitor<T, A, O, L, const N: usize, const B: usize> {
    scheduler: Scheduler<T>,
    acquisition: A,
    outputs: O,
    settings: Settings<L, B>,
    batch: Batch<N>,
    state: State,
    active: Option<L>,
    overruns: u32,
}

impl<T, A, O, L, const N: usize, const B: usize> Monitor<T, A, O, L, N, B>
where
    T: CountdownTimer,
    A: Acquisition<N>,
    O: DiscreteOutputs<L>,
    L: Copy + PartialEq,
{
    /// # Errors
    ///
    /// Fails when the configuration does not pass validation.
    pub fn new(
        config: &Config<L, B>,
        timer: T,
        acquisition: A,
        outputs: O,
    ) -> Result<Self, ConfigError> {
        let settings = config.validate::<N>()?;
        Ok(Self {
            scheduler: Scheduler::new(timer),
            acquisition,
            outputs,
            settings,
            batch: Batch::new(),
            state: State::Idle,
            active: None,
            overruns: 0,
        })
    }

    /// Prepare the acquisition and arm the timer. Cycles run from now on.
    pub fn start(&mut self) {
        self.acquisition.prepare();
        self.scheduler.arm(self.settings.period);
        log::info!(
            "Monitoring every {} ticks, batch of {}",
            self.settings.period.ticks(),
            N
        );
    }

    /// Handle the timer interrupt.
    ///
    /// # Errors
    ///
    /// Propagates faults of the acquisition and of the cycle resolution.
    pub fn on_cycle_expired(&mut self) -> Result<Option<Report<L>>, Fault> {
        let cycle = self.scheduler.expire();
        match self.state {
            State::Acquiring { cycle: outstanding } => {
                self.overruns = self.overruns.wrapping_add(1);
                log::warning!(
                    "Skipping cycle {}, cycle {} is still acquiring",
                    cycle,
                    outstanding
                );
                Ok(None)
            }
            State::Idle => match self.acquisition.start_cycle(&mut self.batch)? {
                Progress::Complete => self.resolve(cycle).map(Some),
                Progress::Pending => {
                    self.state = State::Acquiring { cycle };
                    log::debug!("Cycle {} acquiring", cycle);
                    Ok(None)
                }
            },
        }
    }

    /// Handle the sensor-ready or transfer-complete interrupt.
    ///
    /// # Errors
    ///
    /// Propagates faults of the acquisition and of the cycle resolution.
    pub fn on_acquisition_event(&mut self) -> Result<Option<Report<L>>, Fault> {
        match self.state {
            State::Idle => {
                log::warning!("Ignoring acquisition event outside of a cycle");
                Ok(None)
            }
            State::Acquiring { cycle } => {
                self.acquisition.complete_cycle(&mut self.batch)?;
                self.resolve(cycle).map(Some)
            }
        }
    }

    fn resolve(&mut self, cycle: u32) -> Result<Report<L>, Fault> {
        let completed = self.batch.completed().ok_or(Fault::IncompleteBatch {
            written: self.batch.len(),
            capacity: N,
        })?;
        let average = reduce(completed);
        let value = self.settings.conversion.apply(average);
        let label = self.settings.bands.classify(value);
        actuate(&self.settings.bands, &mut self.outputs, label);
        self.active = Some(label);

        self.state = State::Idle;
        self.acquisition.rearm();
        log::info!("Cycle {} averaged {} into {}", cycle, average.0, value);

        Ok(Report {
            cycle,
            average,
            value,
            label,
        })
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Label of the currently asserted output, none before the first cycle.
    pub fn active(&self) -> Option<L> {
        self.active
    }

    /// Timer ticks that arrived while a cycle was still acquiring.
    pub fn overruns(&self) -> u32 {
        self.overruns
    }

    pub fn settings(&self) -> &Settings<L, B> {
        &self.settings
    }

    pub fn batch(&self) -> &Batch<N> {
        &self.batch
    }

    pub fn scheduler(&self) -> &Scheduler<T> {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut Scheduler<T> {
        &mut self.scheduler
    }

    pub fn acquisition(&self) -> &A {
        &self.acquisition
    }

    pub fn acquisition_mut(&mut self) -> &mut A {
        &mut self.acquisition
    }

    pub fn outputs(&self) -> &O {
        &self.outputs
    }
}
