use colored::Colorize;
use std::io::Write;

use crate::artifacts::types::change_summary::{ChangeSummary, FileChangeSummary};
use crate::artifacts::types::client_record::ClientRecord;
use crate::artifacts::types::describe_record::DescribeRecord;
use crate::artifacts::types::file_record::FileRecord;
use crate::artifacts::types::info_record::InfoRecord;
use crate::artifacts::types::stream_record::StreamRecord;
use crate::artifacts::types::where_record::WhereRecord;
use crate::commands::actions::login::LoginResult;
use crate::commands::actions::sync::SyncResult;

const LABEL_WIDTH: usize = 16;
const DATE_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

pub fn info(writer: &mut dyn Write, info: &InfoRecord) -> anyhow::Result<()> {
    let offset = info
        .server_utc_offset
        .map(|offset| offset.to_string())
        .unwrap_or_default();
    let fields = [
        ("User name", info.user_name.as_str()),
        ("Client name", info.client_name.as_str()),
        ("Client root", info.client_root.as_str()),
        ("Client stream", info.client_stream.as_str()),
        ("Server address", info.server_address.as_str()),
        ("Server version", info.server_version.as_str()),
        ("Server offset", offset.as_str()),
        ("Case handling", info.case_handling.as_str()),
    ];

    for (label, value) in fields.iter().filter(|(_, value)| !value.is_empty()) {
        writeln!(writer, "{}{value}", format!("{:<LABEL_WIDTH$}", format!("{label}:")).bold())?;
    }
    Ok(())
}

pub fn login(writer: &mut dyn Write, result: LoginResult) -> anyhow::Result<()> {
    let text = match result {
        LoginResult::Succeeded => "logged in".green(),
        LoginResult::MissingPassword => "password required".yellow(),
        LoginResult::IncorrectPassword => "incorrect password".red(),
        LoginResult::Failed => "login failed".red(),
    };
    writeln!(writer, "{text}")?;
    Ok(())
}

pub fn clients(writer: &mut dyn Write, clients: &[ClientRecord]) -> anyhow::Result<()> {
    for client in clients {
        write!(writer, "{} {} {}", client.name.bold(), client.owner, client.root)?;
        if client.is_stream_client() {
            write!(writer, " {}", client.stream.cyan())?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

pub fn files(writer: &mut dyn Write, files: &[FileRecord]) -> anyhow::Result<()> {
    for file in files {
        let action = match (file.is_opened(), file.is_deleted_at_head()) {
            (true, _) => file.action.green(),
            (false, true) => file.head_action.red(),
            (false, false) => file.head_action.normal(),
        };
        writeln!(
            writer,
            "{}#{} - {} ({})",
            file.depot_file, file.rev, action, file.file_type
        )?;
    }
    Ok(())
}

pub fn sync(writer: &mut dyn Write, result: &SyncResult) -> anyhow::Result<()> {
    for file in &result.files {
        writeln!(
            writer,
            "{}#{} - {} {}",
            file.depot_file,
            file.rev,
            file.action.green(),
            file.client_file
        )?;
    }
    for path in &result.tampered {
        writeln!(writer, "{} {path}", "tampered:".red())?;
    }
    Ok(())
}

pub fn describe(writer: &mut dyn Write, changes: &[DescribeRecord]) -> anyhow::Result<()> {
    for change in changes {
        let time = change
            .time
            .map(|time| time.format(DATE_FORMAT).to_string())
            .unwrap_or_default();
        writeln!(
            writer,
            "{} {} by {}@{} on {} {}",
            "Change".yellow(),
            change.change.to_string().yellow(),
            change.user,
            change.client,
            time,
            format!("*{}*", change.status).dimmed()
        )?;
        writeln!(writer)?;
        for line in change.description.trim_end().lines() {
            writeln!(writer, "\t{line}")?;
        }
        writeln!(writer)?;
        for file in &change.files {
            writeln!(writer, "... {}#{} {}", file.depot_file, file.rev, file.action)?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

pub fn where_files(writer: &mut dyn Write, locations: &[WhereRecord]) -> anyhow::Result<()> {
    for location in locations {
        let marker = if location.unmapped { "-" } else { "" };
        writeln!(
            writer,
            "{marker}{} {marker}{} {}",
            location.depot_file, location.client_file, location.local_path
        )?;
    }
    Ok(())
}

pub fn changes(writer: &mut dyn Write, changes: &[ChangeSummary]) -> anyhow::Result<()> {
    for change in changes {
        write!(
            writer,
            "{} {} on {} by {}@{}",
            "Change".yellow(),
            change.number.to_string().yellow(),
            change.date.format(DATE_FORMAT),
            change.user,
            change.client
        )?;
        if change.is_pending() {
            write!(writer, " {}", "*pending*".red())?;
        }
        writeln!(writer)?;
        for line in change.description.lines() {
            writeln!(writer, "\t{line}")?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

pub fn filelog(writer: &mut dyn Write, revisions: &[FileChangeSummary]) -> anyhow::Result<()> {
    let mut current: Option<&str> = None;
    for revision in revisions {
        if current != Some(revision.depot_file.as_str()) {
            writeln!(writer, "{}", revision.depot_file.bold())?;
            current = Some(revision.depot_file.as_str());
        }
        writeln!(
            writer,
            "... #{} change {} {} on {} by {}@{} ({})",
            revision.revision,
            revision.change.to_string().yellow(),
            revision.action,
            revision.date.format(DATE_FORMAT),
            revision.user,
            revision.client,
            revision.file_type
        )?;
        for line in revision.description.lines() {
            writeln!(writer, "\t{line}")?;
        }
    }
    Ok(())
}

pub fn streams(writer: &mut dyn Write, streams: &[StreamRecord]) -> anyhow::Result<()> {
    for stream in streams {
        writeln!(
            writer,
            "{} {} {} '{}'",
            stream.stream.bold(),
            stream.stream_type.cyan(),
            stream.parent,
            stream.name
        )?;
    }
    Ok(())
}
