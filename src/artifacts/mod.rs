//! Output formats and the data structures built from them
//!
//! - `core`: terminal output and record rendering
//! - `output`: line classification, error tolerance and per-invocation transcripts
//! - `records`: flat records, the tagged-text parser and the marshal decoder
//! - `spec`: section-oriented text forms
//! - `types`: typed domain records

pub mod core;
pub mod output;
pub mod records;
pub mod spec;
pub mod types;
