//! Output line classification
//!
//! When invoked with `-s` the executable prefixes every line it prints with the
//! message channel it belongs to:
//!
//! ```text
//! info: //depot/main/a.c#3 - updating /ws/main/a.c
//! info1: depotFile //depot/main/a.c
//! error: //depot/main/b.c - no such file(s).
//! exit: 1
//! ```
//!
//! `classify` maps each raw line onto exactly one [`OutputChannel`] and strips
//! the prefix. It never fails: anything it does not recognize becomes
//! [`OutputChannel::Unknown`], which the success fold treats as unsafe.

use crate::artifacts::output::options::CommandOptions;
use derive_new::new;

/// Channel prefixes keyed by the word in front of `": "`
///
/// `info2` lines are dropped together with `exit` lines.
const CHANNEL_PREFIXES: phf::Map<&'static str, OutputChannel> = phf::phf_map! {
    "text" => OutputChannel::Text,
    "info" => OutputChannel::Info,
    "info1" => OutputChannel::TaggedInfo,
    "info2" => OutputChannel::Exit,
    "warning" => OutputChannel::Warning,
    "error" => OutputChannel::Error,
    "exit" => OutputChannel::Exit,
};

const PREFIX_SEPARATOR: &str = ": ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputChannel {
    Unknown,
    Text,
    Info,
    TaggedInfo,
    Warning,
    Error,
    Exit,
}

impl OutputChannel {
    pub fn as_str(&self) -> &str {
        match self {
            OutputChannel::Unknown => "unknown",
            OutputChannel::Text => "text",
            OutputChannel::Info => "info",
            OutputChannel::TaggedInfo => "info1",
            OutputChannel::Warning => "warning",
            OutputChannel::Error => "error",
            OutputChannel::Exit => "exit",
        }
    }
}

impl std::fmt::Display for OutputChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single classified line with its channel prefix removed
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct OutputLine {
    pub channel: OutputChannel,
    pub text: String,
}

impl OutputLine {
    /// Whether this line leaves the command's running success flag untouched
    pub fn permits_success(&self, options: CommandOptions) -> bool {
        let error_tolerated =
            self.channel != OutputChannel::Error || options.contains(CommandOptions::NO_FAIL_ON_ERRORS);
        let recognized = self.channel != OutputChannel::Unknown
            || options.contains(CommandOptions::NO_CHANNELS);

        error_tolerated && recognized
    }
}

/// Classify a raw output line
///
/// Returns `None` when the line is dropped: empty lines, `exit:`/`info2:`
/// lines, and lines matching an enabled ignore pattern.
pub fn classify(line: &str, options: CommandOptions) -> Option<OutputLine> {
    let line = line.trim_end_matches(['\r', '\n']);

    if options.contains(CommandOptions::NO_CHANNELS) {
        return Some(OutputLine::new(OutputChannel::Unknown, line.to_string()));
    }

    if line.trim().is_empty() || options.suppresses(line) {
        return None;
    }

    let Some((channel, text)) = split_channel(line) else {
        return Some(OutputLine::new(OutputChannel::Unknown, line.to_string()));
    };

    match channel {
        OutputChannel::Exit => None,
        OutputChannel::TaggedInfo if !is_tagged_field(text) => {
            Some(OutputLine::new(OutputChannel::Info, text.to_string()))
        }
        channel => Some(OutputLine::new(channel, text.to_string())),
    }
}

fn split_channel(line: &str) -> Option<(OutputChannel, &str)> {
    let (prefix, text) = line.split_once(PREFIX_SEPARATOR)?;
    CHANNEL_PREFIXES
        .get(prefix)
        .map(|channel| (*channel, text))
}

/// `info1:` carries both structured `key value` fields and free-text commentary
///
/// A path separator appearing before the first space means the line starts
/// with a path rather than a field name.
fn is_tagged_field(text: &str) -> bool {
    !text
        .chars()
        .take_while(|c| *c != ' ')
        .any(|c| c == '/' || c == '\\')
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("text: hello", OutputChannel::Text, "hello")]
    #[case("info: //depot/a#1 - updating /ws/a", OutputChannel::Info, "//depot/a#1 - updating /ws/a")]
    #[case("warning: careful", OutputChannel::Warning, "careful")]
    #[case("error: broken", OutputChannel::Error, "broken")]
    #[case("info1: depotFile //depot/a", OutputChannel::TaggedInfo, "depotFile //depot/a")]
    #[case("info1: //depot/a#1 - was edit", OutputChannel::Info, "//depot/a#1 - was edit")]
    #[case(r"info1: c:\ws\a - opened", OutputChannel::Info, r"c:\ws\a - opened")]
    #[case("info1: otherOpen", OutputChannel::TaggedInfo, "otherOpen")]
    #[case("bogus line", OutputChannel::Unknown, "bogus line")]
    #[case("info:no-space", OutputChannel::Unknown, "info:no-space")]
    fn classifies_by_prefix(
        #[case] line: &str,
        #[case] channel: OutputChannel,
        #[case] text: &str,
    ) {
        let classified = classify(line, CommandOptions::empty());

        pretty_assertions::assert_eq!(classified, Some(OutputLine::new(channel, text.to_string())));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("exit: 0")]
    #[case("info2: secondary")]
    fn drops_noise(#[case] line: &str) {
        assert_eq!(classify(line, CommandOptions::empty()), None);
    }

    #[test]
    fn no_channels_passes_lines_through_verbatim() {
        let options = CommandOptions::NO_CHANNELS;

        let classified = classify("error: kept as is", options);
        pretty_assertions::assert_eq!(
            classified,
            Some(OutputLine::new(OutputChannel::Unknown, "error: kept as is".to_string()))
        );

        let classified = classify("", options);
        pretty_assertions::assert_eq!(
            classified,
            Some(OutputLine::new(OutputChannel::Unknown, String::new()))
        );
    }

    #[test]
    fn enabled_ignore_pattern_drops_the_line() {
        let line = "error: //ws/... - file(s) up-to-date.";

        assert_eq!(classify(line, CommandOptions::IGNORE_UP_TO_DATE), None);
        assert_eq!(
            classify(line, CommandOptions::empty()).map(|l| l.channel),
            Some(OutputChannel::Error)
        );
    }

    #[test]
    fn password_prompt_is_dropped_only_when_enabled() {
        let line = "Enter password: ";

        assert_eq!(classify(line, CommandOptions::IGNORE_ENTER_PASSWORD), None);
        assert_eq!(
            classify(line, CommandOptions::empty()).map(|l| l.channel),
            Some(OutputChannel::Unknown)
        );
    }

    #[test]
    fn carriage_returns_are_trimmed() {
        let classified = classify("info: done\r", CommandOptions::empty());

        assert_eq!(classified.map(|l| l.text), Some("done".to_string()));
    }

    #[rstest]
    #[case(OutputChannel::Info, CommandOptions::empty(), true)]
    #[case(OutputChannel::Error, CommandOptions::empty(), false)]
    #[case(OutputChannel::Error, CommandOptions::NO_FAIL_ON_ERRORS, true)]
    #[case(OutputChannel::Unknown, CommandOptions::NO_FAIL_ON_ERRORS, false)]
    #[case(OutputChannel::Unknown, CommandOptions::NO_CHANNELS, true)]
    #[case(OutputChannel::Warning, CommandOptions::empty(), true)]
    fn success_contribution(
        #[case] channel: OutputChannel,
        #[case] options: CommandOptions,
        #[case] expected: bool,
    ) {
        let line = OutputLine::new(channel, String::from("x"));

        assert_eq!(line.permits_success(options), expected);
    }

    proptest! {
        #[test]
        fn recognized_prefix_is_stripped_exactly(
            prefix in prop::sample::select(vec!["text: ", "info: ", "warning: ", "error: "]),
            body in "[a-zA-Z0-9 #.:-]{0,40}[a-zA-Z0-9]",
        ) {
            let line = format!("{prefix}{body}");
            let classified = classify(&line, CommandOptions::empty()).unwrap();

            prop_assert_eq!(format!("{prefix}{}", classified.text), line);
        }

        #[test]
        fn classify_never_panics(line in "\\PC{0,80}") {
            let _ = classify(&line, CommandOptions::empty());
            let _ = classify(&line, CommandOptions::all());
        }
    }
}
