//! Client configuration
//!
//! Everything the client needs to reach the server is passed in explicitly;
//! the library never falls back to environment variables or global settings.

use anyhow::{Context, bail};
use is_executable::IsExecutable;
use std::path::{Path, PathBuf};

pub const DEFAULT_EXECUTABLE: &str = "p4";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Executable name (looked up in `PATH`) or path
    pub executable: PathBuf,
    /// Directory the executable runs in
    pub working_dir: PathBuf,
    /// `host:port` of the server, passed as `-p`
    pub server: String,
    /// Passed as `-u`
    pub user: String,
    /// Workspace name, passed as `-c` unless a command opts out
    pub client: String,
    /// Identification banner, passed as `-zprog`
    pub program_name: String,
    /// Identification banner, passed as `-zversion`
    pub program_version: String,
}

impl ClientConfig {
    pub fn new(
        server: impl Into<String>,
        user: impl Into<String>,
        client: impl Into<String>,
    ) -> Self {
        ClientConfig {
            executable: PathBuf::from(DEFAULT_EXECUTABLE),
            working_dir: PathBuf::from("."),
            server: server.into(),
            user: user.into(),
            client: client.into(),
            program_name: env!("CARGO_PKG_NAME").to_string(),
            program_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn with_executable(mut self, executable: impl Into<PathBuf>) -> Self {
        self.executable = executable.into();
        self
    }

    pub fn with_working_dir(mut self, working_dir: impl Into<PathBuf>) -> Self {
        self.working_dir = working_dir.into();
        self
    }

    pub fn with_program(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.program_name = name.into();
        self.program_version = version.into();
        self
    }

    /// Locate the executable, searching `PATH` when only a name was given
    pub fn resolve_executable(&self) -> anyhow::Result<PathBuf> {
        if self.executable.components().count() > 1 {
            return Self::check_executable(&self.executable);
        }

        let path_var = std::env::var_os("PATH").context("PATH is not set")?;
        std::env::split_paths(&path_var)
            .map(|dir| dir.join(&self.executable))
            .find(|candidate| candidate.is_file() && candidate.is_executable())
            .with_context(|| format!("{} not found in PATH", self.executable.display()))
    }

    fn check_executable(path: &Path) -> anyhow::Result<PathBuf> {
        if !path.exists() {
            bail!("executable does not exist: {}", path.display());
        }
        if !path.is_executable() {
            bail!("file is not executable: {}", path.display());
        }
        Ok(path.to_path_buf())
    }
}
