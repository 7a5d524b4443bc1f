//! Client library for the Perforce command line tool
//!
//! - `areas`: configuration, command lines and process execution
//! - `artifacts`: output classification, record parsing and typed records
//! - `commands`: one facade method per sub-command family
//!
//! ```ignore
//! let config = ClientConfig::new("perforce:1666", "bob", "bob-ws");
//! let client = P4Client::new(config)?;
//! let result = client.sync(&["//depot/main/..."], SyncOptions::default()).await?;
//! ```

pub mod areas;
pub mod artifacts;
pub mod commands;

pub use areas::client::{P4Client, Request};
pub use areas::config::ClientConfig;
pub use areas::invoker::{ProcessInvoker, Runner};
pub use artifacts::output::options::CommandOptions;
pub use commands::actions::login::LoginResult;
pub use commands::actions::sync::{SyncOptions, SyncResult};
pub use commands::queries::clients::ClientFilter;
pub use commands::queries::history::{ChangeStatus, ChangesQuery};
pub use commands::queries::streams::StreamFilter;
