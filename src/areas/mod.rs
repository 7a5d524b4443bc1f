//! Execution side of the client
//!
//! - `config`: connection settings and executable lookup
//! - `builder`: command line composition
//! - `invoker`: process execution behind the `Runner` seam
//! - `client`: the facade tying a request to one invocation

pub mod builder;
pub mod client;
pub mod config;
pub mod invoker;
