#![forbid(unsafe_code)]
//! strata-io: file formats for Strata.
//!
//! Readers parse the events file (one JSON object per line) and the
//! constraints document; the writer emits the canonical level encoding.
//! Failures are fatal to the invocation: there is no partial output.

pub mod error;
pub mod readers;
pub mod writers;

pub use error::{Error, Result};
pub use readers::constraints::read_constraint_sets;
pub use readers::events::read_events;
pub use writers::level::write_level;
