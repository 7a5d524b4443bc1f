//! Command line composition
//!
//! Every invocation carries the connection options, `-s` unless raw output
//! was requested, and the identification banner, followed by the base
//! command the facade chose (including any `-ztag`, `-G` or `-x` option).

use crate::areas::config::ClientConfig;
use crate::artifacts::output::options::CommandOptions;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
}

impl CommandLine {
    pub fn build<I, S>(config: &ClientConfig, options: CommandOptions, base: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = Vec::new();

        // empty values are left out so the executable's own settings apply
        if !config.server.is_empty() {
            args.push(format!("-p{}", config.server));
        }
        if !config.user.is_empty() {
            args.push(format!("-u{}", config.user));
        }
        if !options.contains(CommandOptions::NO_CLIENT) && !config.client.is_empty() {
            args.push(format!("-c{}", config.client));
        }
        if !options.contains(CommandOptions::NO_CHANNELS) {
            args.push(String::from("-s"));
        }
        args.push(format!("-zprog={}", config.program_name));
        args.push(format!("-zversion={}", config.program_version));
        args.extend(base.into_iter().map(Into::into));

        CommandLine {
            program: config.executable.display().to_string(),
            args,
        }
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn into_args(self) -> Vec<String> {
        self.args
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.contains(char::is_whitespace) {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}
