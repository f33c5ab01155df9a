//! Strategies collecting one batch of samples per cycle.
//!
//! A strategy is chosen when the monitor is built, each one covering a way
//! the sensor hands over its data:
//!
//! * [`Polling`]: the CPU triggers a conversion and spins on a per-sample
//!   ready condition, either straight in the timer interrupt or in the
//!   sensor's own interrupt.
//! * [`Transfer`]: a background transfer engine writes the samples on its
//!   own, signaling completion through an interrupt or not at all.

mod polling;
mod transfer;

pub use polling::{Polling, PollingSensor, Trigger};
pub use transfer::{Handshake, Transfer, TransferEngine};

use crate::batch::Batch;
use crate::error::Fault;

/// Whether a started cycle already has its batch complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Progress {
    Complete,
    /// The batch is completed later, in the acquisition interrupt.
    Pending,
}

/// Collects samples into a batch owned by the monitor.
///
/// Calls follow one order per cycle: `start_cycle`, then `complete_cycle`
/// if the start returned [`Progress::Pending`], then `rearm` once the batch
/// was reduced and classified.
pub trait Acquisition<const N: usize> {
    /// Prepare hardware before the first cycle.
    fn prepare(&mut self) {}

    /// Begin collecting the batch for a new cycle.
    ///
    /// # Errors
    ///
    /// Fails when the batch overflows or the snapshot is torn.
    fn start_cycle(&mut self, batch: &mut Batch<N>) -> Result<Progress, Fault>;

    /// Finish the batch in the acquisition interrupt.
    ///
    /// # Errors
    ///
    /// Fails when the batch overflows.
    fn complete_cycle(&mut self, batch: &mut Batch<N>) -> Result<(), Fault>;

    /// Get ready for the next cycle.
    fn rearm(&mut self);
}
