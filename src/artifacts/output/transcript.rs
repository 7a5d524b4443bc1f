//! Per-invocation output accumulation
//!
//! A [`Transcript`] receives every raw line of one command execution, folds
//! the success flag, feeds tagged lines to the record parser and keeps the
//! surviving lines for the caller. It is owned by exactly one invocation.

use crate::artifacts::output::channel::{OutputChannel, OutputLine, classify};
use crate::artifacts::output::options::CommandOptions;
use crate::artifacts::records::raw_record::RawRecord;
use crate::artifacts::records::tag_parser::TagParser;

/// Error text the sync command reports for locally modified, writable files
pub const CLOBBER_PREFIX: &str = "Can't clobber writable file ";

macro_rules! trace_raw {
    ($($arg:tt)*) => {
        #[cfg(feature = "trace_raw_lines")]
        {
            tracing::trace!($($arg)*);
        }
    };
}

#[derive(Debug)]
pub struct Transcript {
    options: CommandOptions,
    success: bool,
    lines: Vec<OutputLine>,
    parser: Option<TagParser>,
    capture_clobbered: bool,
    clobbered: Vec<String>,
    decoded: Vec<RawRecord>,
}

impl Transcript {
    pub fn new(options: CommandOptions) -> Self {
        Transcript {
            options,
            success: true,
            lines: Vec::new(),
            parser: None,
            capture_clobbered: false,
            clobbered: Vec::new(),
            decoded: Vec::new(),
        }
    }

    /// Route `TaggedInfo` lines into a record parser
    pub fn tagged(mut self) -> Self {
        self.parser = Some(TagParser::new());
        self
    }

    /// Collect "can't clobber" errors as tampered files instead of failures
    pub fn capturing_clobbered(mut self) -> Self {
        self.capture_clobbered = true;
        self
    }

    pub fn options(&self) -> CommandOptions {
        self.options
    }

    /// Classify and accept one raw line
    pub fn accept(&mut self, raw: &str) {
        trace_raw!(raw, "received");

        match classify(raw, self.options) {
            Some(line) => self.accept_line(line),
            None => tracing::trace!(line = raw, "dropped"),
        }
    }

    /// Accept an already classified line
    pub fn accept_line(&mut self, line: OutputLine) {
        if self.capture_clobbered
            && line.channel == OutputChannel::Error
            && let Some(path) = line.text.strip_prefix(CLOBBER_PREFIX)
        {
            tracing::info!(path, "writable file left untouched");
            self.clobbered.push(path.trim().to_string());
            return;
        }

        match line.channel {
            OutputChannel::Error => tracing::warn!(text = %line.text, "error"),
            OutputChannel::Unknown if !self.options.contains(CommandOptions::NO_CHANNELS) => {
                tracing::warn!(text = %line.text, "unrecognized output")
            }
            channel => tracing::debug!(%channel, text = %line.text),
        }

        self.success &= line.permits_success(self.options);

        if line.channel == OutputChannel::TaggedInfo
            && let Some(parser) = self.parser.as_mut()
        {
            parser.accept(&line.text);
        }

        self.lines.push(line);
    }

    /// Accept one dictionary decoded from marshalled output
    ///
    /// Dictionaries whose `code` is `error`, `info` or `text` are messages
    /// rather than data and go through the same path as channel lines.
    pub fn accept_record(&mut self, record: RawRecord) {
        let channel = match record.get("code") {
            Some("error") => OutputChannel::Error,
            Some("info") => OutputChannel::Info,
            Some("text") => OutputChannel::Text,
            _ => {
                tracing::trace!(%record, "record");
                self.decoded.push(record);
                return;
            }
        };

        let text = record.text("data").trim_end_matches(['\r', '\n']).to_string();
        if self.options.suppresses(&text) {
            tracing::trace!(line = text, "dropped");
            return;
        }
        self.accept_line(OutputLine::new(channel, text));
    }

    /// Whether the lines seen so far allow success
    pub fn is_successful(&self) -> bool {
        self.success
    }

    pub fn finish(self, exit_code: i32) -> CommandOutput {
        // the executable exits non-zero for clobber errors even when they were the only failure
        let exit_ok = exit_code == 0
            || self.options.contains(CommandOptions::IGNORE_EXIT_CODE)
            || (self.success && !self.clobbered.is_empty());
        if !exit_ok {
            tracing::warn!(exit_code, "command exited with failure");
        }

        let mut records = self.decoded;
        records.extend(self.parser.map(TagParser::finish).unwrap_or_default());

        CommandOutput {
            success: self.success && exit_ok,
            exit_code,
            lines: self.lines,
            records,
            clobbered: self.clobbered,
        }
    }
}

/// Everything one invocation produced
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub success: bool,
    pub exit_code: i32,
    pub lines: Vec<OutputLine>,
    pub records: Vec<RawRecord>,
    pub clobbered: Vec<String>,
}

impl CommandOutput {
    pub fn lines_on(&self, channel: OutputChannel) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .filter(move |line| line.channel == channel)
            .map(|line| line.text.as_str())
    }

    pub fn errors(&self) -> impl Iterator<Item = &str> {
        self.lines_on(OutputChannel::Error)
    }

    pub fn error_text(&self) -> String {
        self.errors().collect::<Vec<_>>().join("\n")
    }

    /// Whether any error line contains `needle`
    pub fn has_error_containing(&self, needle: &str) -> bool {
        self.errors().any(|text| text.contains(needle))
    }

    /// Text of every kept line, in arrival order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|line| line.text.as_str())
    }

    /// Turn a failed invocation into an error describing why
    pub fn into_result(self, command: &str) -> anyhow::Result<Self> {
        if self.success {
            return Ok(self);
        }

        let detail = self.error_text();
        if !detail.is_empty() {
            anyhow::bail!("`{command}` failed: {detail}")
        }

        let unrecognized = self
            .lines_on(OutputChannel::Unknown)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        match (unrecognized.is_empty(), self.exit_code) {
            (true, code) => anyhow::bail!("`{command}` failed with exit code {code}"),
            (false, 0) => anyhow::bail!("`{command}` failed on unrecognized output: {unrecognized}"),
            (false, code) => anyhow::bail!("`{command}` failed with exit code {code}: {unrecognized}"),
        }
    }
}
