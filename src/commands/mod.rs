//! Client facade commands
//!
//! Each command is an `impl` block on [`crate::areas::client::P4Client`],
//! organized into two categories:
//!
//! - `queries`: Read-only commands returning typed records
//! - `actions`: Commands that change server or workspace state
//!
//! Every command picks its output mode and tolerated messages, runs once and
//! maps the resulting records.

pub mod actions;
pub mod queries;
