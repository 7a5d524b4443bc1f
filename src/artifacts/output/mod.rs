//! Plain and tagged text output handling
//!
//! - `channel`: line classification into message channels
//! - `options`: per-invocation flags and the benign-message patterns they enable
//! - `transcript`: success folding and line/record accumulation for one invocation

pub mod channel;
pub mod options;
pub mod transcript;
