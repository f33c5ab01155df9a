//! Acquisition delegated to an autonomous transfer engine.

use super::{Acquisition, Progress};
use crate::batch::{Batch, Sample};
use crate::error::Fault;

/// Background engine moving conversions into a destination buffer.
///
/// The destination belongs to the engine while it runs. The core only
/// reads it slot by slot.
pub trait TransferEngine {
    /// Set up a transfer of `count` samples into the destination.
    fn configure_autonomous(&mut self, count: usize);
    fn enable(&mut self);
    /// Samples written since the last enable.
    fn transferred(&self) -> usize;
    fn read_slot(&self, index: usize) -> Sample;
    /// Release the destination after completion was signaled.
    fn finish(&mut self) {}
}

/// How the end of a transfer is communicated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Handshake {
    /// The engine raises a transfer-complete interrupt after `N` samples.
    Signaled,
    /// The engine runs continuously; the timer tick reads whatever the
    /// destination holds.
    None,
}

/// Acquisition filling the batch from a transfer engine's destination.
///
/// There is no double-buffering. Without a handshake the snapshot may be
/// taken while the engine is still writing, mixing samples of two passes.
/// `detect_overlap` turns that into [`Fault::TornSnapshot`] in debug builds.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transfer<E> {
    engine: E,
    handshake: Handshake,
    detect_overlap: bool,
}

impl<E: TransferEngine> Transfer<E> {
    pub fn signaled(engine: E) -> Self {
        Self {
            engine,
            handshake: Handshake::Signaled,
            detect_overlap: false,
        }
    }

    pub fn without_handshake(engine: E) -> Self {
        Self {
            engine,
            handshake: Handshake::None,
            detect_overlap: false,
        }
    }

    #[must_use]
    pub fn detect_overlap(mut self) -> Self {
        self.detect_overlap = true;
        self
    }

    pub fn handshake(&self) -> Handshake {
        self.handshake
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    fn snapshot<const N: usize>(&mut self, batch: &mut Batch<N>) -> Result<(), Fault> {
        let before = self.engine.transferred();
        batch.reset();
        for index in 0..N {
            batch
                .push(self.engine.read_slot(index))
                .map_err(|_| Fault::BatchOverflow { capacity: N })?;
        }
        if self.detect_overlap && cfg!(debug_assertions) {
            let after = self.engine.transferred();
            if after != before {
                return Err(Fault::TornSnapshot { before, after });
            }
        }
        Ok(())
    }
}

impl<E: TransferEngine, const N: usize> Acquisition<N> for Transfer<E> {
    fn prepare(&mut self) {
        self.engine.configure_autonomous(N);
        if self.handshake == Handshake::None {
            self.engine.enable();
        }
    }

    fn start_cycle(&mut self, batch: &mut Batch<N>) -> Result<Progress, Fault> {
        match self.handshake {
            Handshake::Signaled => {
                self.engine.enable();
                Ok(Progress::Pending)
            }
            Handshake::None => {
                self.snapshot(batch)?;
                // Rearmed eagerly, the batch already holds its own copy.
                self.engine.enable();
                Ok(Progress::Complete)
            }
        }
    }

    fn complete_cycle(&mut self, batch: &mut Batch<N>) -> Result<(), Fault> {
        self.engine.finish();
        self.snapshot(batch)
    }

    fn rearm(&mut self) {
        if self.handshake == Handshake::Signaled {
            self.engine.configure_autonomous(N);
        }
    }
}
