//! The client facade
//!
//! [`P4Client`] owns the configuration and the [`Runner`]. Every command goes
//! through [`P4Client::run`], which composes the command line, drives one
//! invocation, classifies its output and decodes records. The per-command
//! methods live in `crate::commands`.

use anyhow::Context;
use std::io::Write;
use tempfile::NamedTempFile;

use crate::areas::builder::CommandLine;
use crate::areas::config::ClientConfig;
use crate::areas::invoker::{Invocation, ProcessInvoker, Runner};
use crate::artifacts::output::options::CommandOptions;
use crate::artifacts::output::transcript::{CommandOutput, Transcript};
use crate::artifacts::records::marshal;

/// Path lists longer than this are passed through a `-x` argument file
pub const ARG_FILE_THRESHOLD: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Channel-prefixed text lines
    #[default]
    Plain,
    /// Channel-prefixed text with `info1:` field lines (`-ztag`)
    Tagged,
    /// Marshalled dictionaries on stdout (`-G`)
    Marshalled,
}

/// One sub-command with its arguments and handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    command: String,
    args: Vec<String>,
    paths: Vec<String>,
    mode: OutputMode,
    options: CommandOptions,
    stdin: Option<String>,
    capture_clobbered: bool,
}

impl Request {
    fn with_mode(command: &str, mode: OutputMode) -> Self {
        Request {
            command: command.to_string(),
            args: Vec::new(),
            paths: Vec::new(),
            mode,
            options: CommandOptions::empty(),
            stdin: None,
            capture_clobbered: false,
        }
    }

    pub fn plain(command: &str) -> Self {
        Self::with_mode(command, OutputMode::Plain)
    }

    pub fn tagged(command: &str) -> Self {
        Self::with_mode(command, OutputMode::Tagged)
    }

    pub fn marshalled(command: &str) -> Self {
        Self::with_mode(command, OutputMode::Marshalled)
    }

    /// Plain mode without `-s`, for commands that only print human-formatted text
    pub fn raw(command: &str) -> Self {
        Self::plain(command).options(CommandOptions::NO_CHANNELS)
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// File arguments, placed after all other arguments
    pub fn paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.paths
            .extend(paths.into_iter().map(|path| path.as_ref().to_string()));
        self
    }

    pub fn options(mut self, options: CommandOptions) -> Self {
        self.options |= options;
        self
    }

    pub fn stdin(mut self, payload: impl Into<String>) -> Self {
        self.stdin = Some(payload.into());
        self
    }

    pub fn capturing_clobbered(mut self) -> Self {
        self.capture_clobbered = true;
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    fn effective_options(&self) -> CommandOptions {
        match self.mode {
            OutputMode::Marshalled => self.options | CommandOptions::NO_CHANNELS,
            _ => self.options,
        }
    }
}

#[derive(Debug)]
pub struct P4Client<R: Runner = ProcessInvoker> {
    config: ClientConfig,
    runner: R,
}

impl P4Client<ProcessInvoker> {
    /// Client running the configured executable
    pub fn new(config: ClientConfig) -> anyhow::Result<Self> {
        let runner = ProcessInvoker::from_config(&config)?;
        Ok(P4Client { config, runner })
    }
}

impl<R: Runner> P4Client<R> {
    pub fn with_runner(config: ClientConfig, runner: R) -> Self {
        P4Client { config, runner }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run one request and collect its output
    ///
    /// The returned output carries the success decision; use
    /// [`CommandOutput::into_result`] or [`P4Client::run_checked`] to turn a
    /// failure into an error.
    pub async fn run(&self, request: Request) -> anyhow::Result<CommandOutput> {
        let options = request.effective_options();

        let mut base = match request.mode {
            OutputMode::Plain => Vec::new(),
            OutputMode::Tagged => vec![String::from("-ztag")],
            OutputMode::Marshalled => vec![String::from("-G")],
        };

        // kept alive until the process has exited
        let arg_file = if request.paths.len() > ARG_FILE_THRESHOLD {
            let file = write_arg_file(&request.paths)?;
            base.push(String::from("-x"));
            base.push(file.path().display().to_string());
            Some(file)
        } else {
            None
        };

        base.push(request.command.clone());
        base.extend(request.args);
        if arg_file.is_none() {
            base.extend(request.paths);
        }

        let line = CommandLine::build(&self.config, options, base);
        tracing::debug!(command = %line, "running");

        let mut transcript = Transcript::new(options);
        if request.mode == OutputMode::Tagged {
            transcript = transcript.tagged();
        }
        if request.capture_clobbered {
            transcript = transcript.capturing_clobbered();
        }

        let invocation = Invocation::new(line.into_args())
            .with_stdin(request.stdin)
            .with_binary(request.mode == OutputMode::Marshalled);

        let completion = self
            .runner
            .run(&invocation, &mut |raw: &str| transcript.accept(raw))
            .await?;

        if request.mode == OutputMode::Marshalled {
            let records = marshal::decode(&completion.stdout)
                .with_context(|| format!("failed to decode `{}` output", request.command))?;
            records
                .into_iter()
                .for_each(|record| transcript.accept_record(record));
        }

        drop(arg_file);
        Ok(transcript.finish(completion.exit_code))
    }

    /// Run one request, failing when its output does not indicate success
    pub async fn run_checked(&self, request: Request) -> anyhow::Result<CommandOutput> {
        let command = request.command.clone();
        self.run(request).await?.into_result(&command)
    }
}

fn write_arg_file(paths: &[String]) -> anyhow::Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix("p4args")
        .tempfile()
        .context("failed to create argument file")?;
    for path in paths {
        writeln!(file, "{path}").context("failed to write argument file")?;
    }
    file.flush().context("failed to write argument file")?;
    tracing::trace!(path = %file.path().display(), count = paths.len(), "argument file");
    Ok(file)
}
