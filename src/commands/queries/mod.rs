//! Read-only commands
//!
//! ## Commands
//!
//! - `info`: Connection and server details
//! - `clients`: List workspaces and read workspace forms
//! - `files`: File metadata (`fstat`, `files`, `opened`)
//! - `describe`: Change details in marshalled mode
//! - `where_files`: Depot to workspace mapping
//! - `history`: Change and file history summaries
//! - `streams`: List streams
//! - `print`: File contents

pub mod clients;
pub mod describe;
pub mod files;
pub mod history;
pub mod info;
pub mod print;
pub mod streams;
pub mod where_files;
