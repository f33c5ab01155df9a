//! Periodic sensor monitoring driving mutually-exclusive indicators.
//!
//! It is meant to run in a firmware, with the handlers of [`Monitor`] called
//! from interrupts. Hardware is reached only through collaborator traits, so
//! the whole pipeline can be exercised on the host as well.
//!
//! Following is the flow of a single cycle:
//!
//! ```text
//!           [ CountdownTimer ]
//!                  |
//!   (cycle expired)|
//!                  V
//!    [ Scheduler ] --> [ Acquisition ] <----- {PollingSensor | TransferEngine}
//!                          |
//!                  (Batch) |
//!                          V
//!                    [ Reducer ] --> [ Conversion ] --> [ Classifier ]
//!                                                            |
//!                                                    (label) |
//!                                                            V
//!                                                      [ Actuator ]
//!                                                            |
//!                                                   {DiscreteOutputs}
//! ```

#![cfg_attr(not(test), no_std)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]

mod log;

pub mod acquisition;
pub mod actuator;
pub mod batch;
pub mod classifier;
pub mod config;
pub mod conversion;
pub mod coordinator;
pub mod error;
pub mod reducer;
pub mod scheduler;

pub use crate::acquisition::{
    Acquisition, Handshake, Polling, PollingSensor, Progress, Transfer, TransferEngine, Trigger,
};
pub use crate::actuator::DiscreteOutputs;
pub use crate::batch::{Batch, Resolution, Sample};
pub use crate::classifier::{Band, Bands, Edge};
pub use crate::config::{Config, Settings};
pub use crate::conversion::Conversion;
pub use crate::coordinator::{Monitor, Report, State};
pub use crate::error::{ConfigError, Fault};
pub use crate::reducer::AveragedReading;
pub use crate::scheduler::{Countdown, CountdownTimer, Period, Scheduler, TickRate};
