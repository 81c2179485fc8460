// ABOUTME: Sequencer module - serialized, rate-limited execution of async work.
// ABOUTME: Contains the sequencer, its outcome handles, and their errors.

mod error;
mod handle;
mod sequencer;

pub use error::{SequencerError, WorkError};
pub use handle::OutcomeHandle;
pub use sequencer::{Sequencer, SequencerStats};

#[cfg(test)]
mod handle_test;
