//! Commands that change server or workspace state
//!
//! ## Commands
//!
//! - `login`: Log in and out, check ticket state
//! - `client_forms`: Create and delete workspaces
//! - `open`: Open files for edit, add or delete, and revert them
//! - `sync`: Update the workspace

pub mod client_forms;
pub mod login;
pub mod open;
pub mod sync;
