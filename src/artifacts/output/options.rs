use bitflags::bitflags;

bitflags! {
    /// Per-invocation switches controlling client context, channel parsing and error tolerance
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CommandOptions: u32 {
        /// Do not pass `-c<client>` to the executable
        const NO_CLIENT = 1 << 0;
        /// Error-channel lines do not fail the command
        const NO_FAIL_ON_ERRORS = 1 << 1;
        /// Do not pass `-s`; every line is passed through verbatim as `Unknown`
        const NO_CHANNELS = 1 << 2;
        /// A non-zero exit code does not fail the command
        const IGNORE_EXIT_CODE = 1 << 3;
        const IGNORE_UP_TO_DATE = 1 << 4;
        const IGNORE_NO_SUCH_FILES = 1 << 5;
        const IGNORE_NOT_IN_CLIENT_VIEW = 1 << 6;
        const IGNORE_NOT_ON_CLIENT = 1 << 7;
        const IGNORE_NOT_OPENED_ON_THIS_CLIENT = 1 << 8;
        const IGNORE_PROTECTED_NAMESPACE = 1 << 9;
        const IGNORE_ENTER_PASSWORD = 1 << 10;

        /// Tolerances used by existence checks
        const IGNORE_MISSING = Self::IGNORE_NO_SUCH_FILES.bits()
            | Self::IGNORE_NOT_IN_CLIENT_VIEW.bits()
            | Self::IGNORE_PROTECTED_NAMESPACE.bits();
    }
}

/// How an ignore pattern is matched against a raw line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PatternKind {
    Suffix,
    Prefix,
}

/// Known benign messages, each enabled by exactly one flag
const IGNORE_PATTERNS: [(CommandOptions, PatternKind, &str); 7] = [
    (
        CommandOptions::IGNORE_UP_TO_DATE,
        PatternKind::Suffix,
        "- file(s) up-to-date.",
    ),
    (
        CommandOptions::IGNORE_NO_SUCH_FILES,
        PatternKind::Suffix,
        " - no such file(s).",
    ),
    (
        CommandOptions::IGNORE_NOT_IN_CLIENT_VIEW,
        PatternKind::Suffix,
        "- file(s) not in client view.",
    ),
    (
        CommandOptions::IGNORE_NOT_ON_CLIENT,
        PatternKind::Suffix,
        "- file(s) not on client.",
    ),
    (
        CommandOptions::IGNORE_NOT_OPENED_ON_THIS_CLIENT,
        PatternKind::Suffix,
        " - file(s) not opened on this client.",
    ),
    (
        CommandOptions::IGNORE_PROTECTED_NAMESPACE,
        PatternKind::Suffix,
        " - protected namespace - access denied.",
    ),
    (
        CommandOptions::IGNORE_ENTER_PASSWORD,
        PatternKind::Prefix,
        "Enter password:",
    ),
];

impl CommandOptions {
    /// Returns the flag whose pattern matches `line`, if that flag is enabled
    pub fn suppressing_flag(&self, line: &str) -> Option<CommandOptions> {
        IGNORE_PATTERNS
            .iter()
            .filter(|(flag, _, _)| self.contains(*flag))
            .find(|(_, kind, pattern)| match kind {
                PatternKind::Suffix => line.ends_with(pattern),
                PatternKind::Prefix => line.starts_with(pattern),
            })
            .map(|(flag, _, _)| *flag)
    }

    pub fn suppresses(&self, line: &str) -> bool {
        self.suppressing_flag(line).is_some()
    }
}
