//! Readers for the two input documents.

pub mod constraints;
pub mod events;
