//! Process execution
//!
//! A [`Runner`] executes one [`Invocation`] and reports output lines through a
//! callback. [`ProcessInvoker`] is the real implementation on top of
//! `tokio::process`: stdout and stderr are pumped concurrently and the callback
//! is serialized behind a mutex, so lines arrive in the order they were read.

use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::process::Command;
use tokio::sync::Mutex;

use crate::areas::config::ClientConfig;

/// One execution request: arguments after the executable name
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Invocation {
    pub args: Vec<String>,
    /// Written to the child's stdin, which is closed otherwise
    #[new(default)]
    pub stdin: Option<String>,
    /// Capture stdout as raw bytes instead of splitting it into lines
    #[new(default)]
    pub binary: bool,
}

impl Invocation {
    pub fn with_stdin(mut self, stdin: Option<String>) -> Self {
        self.stdin = stdin;
        self
    }

    pub fn with_binary(mut self, binary: bool) -> Self {
        self.binary = binary;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    /// `-1` when the process was terminated by a signal
    pub exit_code: i32,
    /// Raw stdout, only filled for binary invocations
    pub stdout: Bytes,
}

/// Seam between the client facade and the operating system
#[allow(async_fn_in_trait)]
pub trait Runner {
    async fn run(
        &self,
        invocation: &Invocation,
        on_line: &mut (dyn FnMut(&str) + Send),
    ) -> anyhow::Result<Completion>;
}

type LineSink<'a> = Mutex<&'a mut (dyn FnMut(&str) + Send)>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInvoker {
    executable: PathBuf,
    working_dir: PathBuf,
}

impl ProcessInvoker {
    pub fn new(executable: impl Into<PathBuf>, working_dir: impl Into<PathBuf>) -> Self {
        ProcessInvoker {
            executable: executable.into(),
            working_dir: working_dir.into(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> anyhow::Result<Self> {
        Ok(Self::new(config.resolve_executable()?, &config.working_dir))
    }

    pub fn executable(&self) -> &PathBuf {
        &self.executable
    }
}

impl Runner for ProcessInvoker {
    async fn run(
        &self,
        invocation: &Invocation,
        on_line: &mut (dyn FnMut(&str) + Send),
    ) -> anyhow::Result<Completion> {
        let mut child = Command::new(&self.executable)
            .args(&invocation.args)
            .current_dir(&self.working_dir)
            .stdin(if invocation.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to start {}", self.executable.display()))?;

        let stdout = child.stdout.take().context("child stdout was not captured")?;
        let stderr = child.stderr.take().context("child stderr was not captured")?;
        let stdin = child.stdin.take();

        let feed = async {
            if let (Some(mut stdin), Some(payload)) = (stdin, invocation.stdin.as_deref()) {
                stdin
                    .write_all(payload.as_bytes())
                    .await
                    .context("failed to write child stdin")?;
                // dropping closes the pipe
                drop(stdin);
            }
            Ok::<_, anyhow::Error>(())
        };

        let sink: LineSink = Mutex::new(on_line);

        let captured = if invocation.binary {
            let capture = async {
                let mut buffer = Vec::new();
                let mut stdout = stdout;
                stdout
                    .read_to_end(&mut buffer)
                    .await
                    .context("failed to read child stdout")?;
                Ok::<_, anyhow::Error>(Bytes::from(buffer))
            };
            let (_, captured, _) = tokio::try_join!(feed, capture, pump(stderr, &sink))?;
            captured
        } else {
            tokio::try_join!(feed, pump(stdout, &sink), pump(stderr, &sink))?;
            Bytes::new()
        };

        let status = child
            .wait()
            .await
            .with_context(|| format!("failed to wait for {}", self.executable.display()))?;

        Ok(Completion {
            exit_code: status.code().unwrap_or(-1),
            stdout: captured,
        })
    }
}

/// Forward every line of `reader` to the shared sink
async fn pump<Rd: AsyncRead + Unpin>(reader: Rd, sink: &LineSink<'_>) -> anyhow::Result<()> {
    let mut segments = BufReader::new(reader).split(b'\n');

    while let Some(segment) = segments
        .next_segment()
        .await
        .context("failed to read child output")?
    {
        let line = String::from_utf8_lossy(&segment);
        let mut on_line = sink.lock().await;
        (*on_line)(&line);
    }

    Ok(())
}
