//! Candidate data: synthesis, CSV persistence and summaries
//!
//! The generator produces the labelled dataset every training run starts
//! from; storage round-trips it through CSV so externally edited files are
//! picked up on the next run.

pub mod candidate;
pub mod storage;
pub mod summary;

pub use self::candidate::*;
pub use self::storage::*;
pub use self::summary::*;
