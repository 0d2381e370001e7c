//! Output emission
//!
//! Serializes sync results to JSON files for downstream ingestion.

mod writer;

pub use writer::write_objects;

#[cfg(test)]
mod tests;
