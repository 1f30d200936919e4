#![cfg_attr(not(test), no_std)]
// src/lib.rs

pub mod commands;
pub mod config;
pub mod cs_pin_wrapper;
pub mod errors;
pub mod hal;
pub mod micro_rwd;
pub mod report;
pub mod sequencer;
pub mod tick;
pub mod uid;

#[cfg(feature = "board")]
pub mod board;

pub use config::SequencerConfig;
pub use errors::{ReadAbort, ReaderError};
pub use hal::{CardReader, PeriodicTimer};
pub use micro_rwd::MicroRwd;
pub use report::{Reporter, SerialReporter};
pub use sequencer::{Sequencer, SequencerState};
pub use tick::TickFlag;
pub use uid::{Uid, UID_LEN};
