//! Change and file history summaries
//!
//! `changes -l -t` and `filelog -l -t` only produce human-formatted text:
//!
//! ```text
//! Change 123 on 2021/01/02 03:04:05 by bob@bob-ws
//!
//!         Fix the build
//!
//! //depot/main/a.c
//! ... #3 change 123 edit on 2021/01/02 03:04:05 by bob@bob-ws (text)
//!
//!         Fix the build
//!
//! ... ... copy into //depot/rel/a.c#1
//! ```
//!
//! Header lines have a fixed token shape. Blank and tab-indented lines that
//! follow a header fold into its description until the next non-indented
//! line. Lines that fit no shape are logged and skipped.

use chrono::NaiveDateTime;

const DATE_FORMAT: &str = "%Y/%m/%d %H:%M:%S";
const CHANGE_TOKENS: usize = 7;
const FILELOG_TOKENS: usize = 11;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSummary {
    pub number: i64,
    pub date: NaiveDateTime,
    pub user: String,
    pub client: String,
    /// `submitted`, or the status shown after the header such as `pending`
    pub status: String,
    pub description: String,
}

impl ChangeSummary {
    /// Parse a `Change N on DATE TIME by USER@CLIENT` header line
    pub fn parse_header(line: &str) -> Option<Self> {
        let tokens = line.split_whitespace().collect::<Vec<_>>();
        if tokens.len() < CHANGE_TOKENS
            || tokens[0] != "Change"
            || tokens[2] != "on"
            || tokens[5] != "by"
        {
            return None;
        }

        let number = tokens[1].parse::<i64>().ok()?;
        let date = parse_date(tokens[3], tokens[4])?;
        let (user, client) = tokens[6].split_once('@')?;
        let status = tokens
            .get(CHANGE_TOKENS)
            .map(|status| status.trim_matches('*').to_string())
            .unwrap_or_else(|| "submitted".to_string());

        Some(ChangeSummary {
            number,
            date,
            user: user.to_string(),
            client: client.to_string(),
            status,
            description: String::new(),
        })
    }

    pub fn is_pending(&self) -> bool {
        self.status == "pending"
    }
}

/// One revision entry of a file's history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChangeSummary {
    pub depot_file: String,
    pub revision: i64,
    pub change: i64,
    pub action: String,
    pub date: NaiveDateTime,
    pub user: String,
    pub client: String,
    pub file_type: String,
    pub description: String,
}

impl FileChangeSummary {
    /// Parse a `... #REV change N ACTION on DATE TIME by USER@CLIENT (TYPE)` line
    pub fn parse_header(depot_file: &str, line: &str) -> Option<Self> {
        let tokens = line.split_whitespace().collect::<Vec<_>>();
        if tokens.len() < FILELOG_TOKENS
            || tokens[0] != "..."
            || tokens[2] != "change"
            || tokens[5] != "on"
            || tokens[8] != "by"
        {
            return None;
        }

        let revision = tokens[1].strip_prefix('#')?.parse::<i64>().ok()?;
        let change = tokens[3].parse::<i64>().ok()?;
        let date = parse_date(tokens[6], tokens[7])?;
        let (user, client) = tokens[9].split_once('@')?;
        let file_type = tokens[10]
            .strip_prefix('(')
            .and_then(|t| t.strip_suffix(')'))?;

        Some(FileChangeSummary {
            depot_file: depot_file.to_string(),
            revision,
            change,
            action: tokens[4].to_string(),
            date,
            user: user.to_string(),
            client: client.to_string(),
            file_type: file_type.to_string(),
            description: String::new(),
        })
    }
}

fn parse_date(date: &str, time: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(&format!("{date} {time}"), DATE_FORMAT).ok()
}

fn is_continuation(line: &str) -> bool {
    line.trim().is_empty() || line.starts_with('\t') || line.starts_with(' ')
}

/// Accumulates description lines for the entry currently being read
#[derive(Debug, Default)]
struct Description {
    lines: Vec<String>,
}

impl Description {
    fn push(&mut self, line: &str) {
        let line = line.strip_prefix('\t').unwrap_or(line.trim_start());
        self.lines.push(line.trim_end().to_string());
    }

    fn take(&mut self) -> String {
        let lines = std::mem::take(&mut self.lines);
        let start = lines.iter().position(|l| !l.is_empty()).unwrap_or(lines.len());
        let end = lines.iter().rposition(|l| !l.is_empty()).map_or(start, |i| i + 1);
        lines[start..end].join("\n")
    }
}

/// Parse the raw output of `changes -l -t`
pub fn parse_changes<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<ChangeSummary> {
    let mut changes: Vec<ChangeSummary> = Vec::new();
    let mut description = Description::default();
    let mut in_entry = false;

    for line in lines {
        if is_continuation(line) {
            if in_entry {
                description.push(line);
            }
            continue;
        }

        if let Some(last) = changes.last_mut().filter(|_| in_entry) {
            last.description = description.take();
        }
        description.take();

        match ChangeSummary::parse_header(line) {
            Some(change) => {
                tracing::trace!(number = change.number, "change summary");
                changes.push(change);
                in_entry = true;
            }
            None => {
                tracing::warn!(line, "skipping unrecognized change line");
                in_entry = false;
            }
        }
    }

    if let Some(last) = changes.last_mut().filter(|_| in_entry) {
        last.description = description.take();
    }

    changes
}

/// Parse the raw output of `filelog -l -t`
pub fn parse_filelog<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<FileChangeSummary> {
    let mut revisions: Vec<FileChangeSummary> = Vec::new();
    let mut description = Description::default();
    let mut depot_file: Option<String> = None;
    let mut in_entry = false;

    for line in lines {
        if is_continuation(line) {
            if in_entry {
                description.push(line);
            }
            continue;
        }

        if let Some(last) = revisions.last_mut().filter(|_| in_entry) {
            last.description = description.take();
        }
        description.take();
        in_entry = false;

        if line.starts_with("//") {
            depot_file = Some(line.trim_end().to_string());
            continue;
        }

        if line.starts_with("... ... ") {
            tracing::trace!(line, "skipping integration record");
            continue;
        }

        let parsed = depot_file
            .as_deref()
            .and_then(|depot_file| FileChangeSummary::parse_header(depot_file, line));
        match parsed {
            Some(revision) => {
                tracing::trace!(
                    depot_file = revision.depot_file,
                    revision = revision.revision,
                    "file change summary"
                );
                revisions.push(revision);
                in_entry = true;
            }
            None => tracing::warn!(line, "skipping unrecognized filelog line"),
        }
    }

    if let Some(last) = revisions.last_mut().filter(|_| in_entry) {
        last.description = description.take();
    }

    revisions
}
