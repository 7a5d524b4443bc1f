//! Spec forms
//!
//! Clients, streams and changes are edited as text forms made of named
//! sections:
//!
//! ```text
//! # A comment line
//! Client:	bob-ws
//!
//! Root:	/home/bob/ws
//!
//! View:
//! 	//depot/main/... //bob-ws/main/...
//! 	-//depot/main/gen/... //bob-ws/main/gen/...
//! ```
//!
//! A line that starts with a letter and has a `:` before any whitespace opens
//! a section. Blank and tab-indented lines continue the current value.

use anyhow::Context;
use std::fmt;

/// Section header: a name starting with a letter, then `:` before any whitespace
const SECTION_REGEX: &str = r"^([A-Za-z][^\s:]*):(.*)$";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Section {
    name: String,
    value: String,
    multiline: bool,
}

/// Ordered list of named sections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Spec {
    sections: Vec<Section>,
}

impl Spec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the text form of a spec
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let header = regex::Regex::new(SECTION_REGEX)
            .with_context(|| format!("invalid spec section regex: {SECTION_REGEX}"))?;

        let mut spec = Spec::new();
        let mut current: Option<(Section, Vec<String>)> = None;

        for line in text.lines() {
            let line = line.trim_end_matches('\r');

            if line.trim().is_empty() || line.starts_with('\t') {
                if let Some((section, continuation)) = current.as_mut() {
                    section.multiline |= line.starts_with('\t');
                    continuation.push(line.strip_prefix('\t').unwrap_or_default().to_string());
                }
                continue;
            }

            if let Some((section, continuation)) = current.take() {
                spec.push_section(section, continuation);
            }

            match header.captures(line) {
                Some(caps) => {
                    let inline = caps[2].trim();
                    current = Some((
                        Section {
                            name: caps[1].to_string(),
                            value: inline.to_string(),
                            multiline: false,
                        },
                        Vec::new(),
                    ));
                }
                None if line.starts_with('#') => {}
                None => tracing::warn!(line, "skipping unrecognized spec line"),
            }
        }

        if let Some((section, continuation)) = current.take() {
            spec.push_section(section, continuation);
        }

        Ok(spec)
    }

    fn push_section(&mut self, mut section: Section, continuation: Vec<String>) {
        let mut lines = continuation;
        while lines.last().is_some_and(|line| line.trim().is_empty()) {
            lines.pop();
        }

        if !lines.is_empty() {
            let head = std::mem::take(&mut section.value);
            section.value = std::iter::once(head)
                .filter(|head| !head.is_empty())
                .chain(lines)
                .collect::<Vec<_>>()
                .join("\n");
        }

        tracing::trace!(name = section.name, "spec section");
        self.sections.push(section);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|section| section.name == name)
            .map(|section| section.value.as_str())
    }

    /// Set a section value, appending the section if it does not exist yet
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        let multiline = value.contains('\n');

        match self.sections.iter_mut().find(|section| section.name == name) {
            Some(section) => {
                section.multiline |= multiline;
                section.value = value;
            }
            None => self.sections.push(Section {
                name: name.to_string(),
                value,
                multiline,
            }),
        }
    }

    /// Set a list section such as `View:`, always written in multi-line form
    pub fn set_lines<I, S>(&mut self, name: &str, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let value = lines
            .into_iter()
            .map(|line| line.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("\n");
        self.set(name, value);
        if let Some(section) = self.sections.iter_mut().find(|section| section.name == name) {
            section.multiline = true;
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let position = self.sections.iter().position(|section| section.name == name)?;
        Some(self.sections.remove(position).value)
    }

    /// Values of a list section, one per line
    pub fn lines(&self, name: &str) -> Vec<&str> {
        self.get(name)
            .map(|value| value.lines().collect())
            .unwrap_or_default()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|section| section.name.as_str())
    }
}

impl fmt::Display for Spec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.sections {
            if section.multiline || section.value.contains('\n') {
                writeln!(f, "{}:", section.name)?;
                for line in section.value.lines() {
                    writeln!(f, "\t{line}")?;
                }
            } else {
                writeln!(f, "{}:\t{}", section.name, section.value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
