//! Changelist descriptions
//!
//! `describe` reports the files of a changelist as families of indexed keys
//! (`depotFile0`, `action0`, `rev0`, … then `depotFile1`, …) inside a single
//! record rather than as a list. The family ends at the first index whose
//! `depotFile<n>` key is absent.

use crate::artifacts::records::raw_record::RawRecord;

/// One file entry of a described changelist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescribedFile {
    pub depot_file: String,
    pub action: String,
    pub file_type: String,
    pub rev: i64,
    pub file_size: i64,
    pub digest: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescribeRecord {
    pub change: i64,
    pub user: String,
    pub client: String,
    pub time: Option<chrono::DateTime<chrono::Utc>>,
    pub description: String,
    pub status: String,
    pub change_type: String,
    pub path: String,
    pub files: Vec<DescribedFile>,
}

impl DescribeRecord {
    pub fn is_submitted(&self) -> bool {
        self.status == "submitted"
    }
}

impl From<&RawRecord> for DescribeRecord {
    fn from(record: &RawRecord) -> Self {
        let files = (0..)
            .map_while(|index| {
                let depot_file = record.get(&format!("depotFile{index}"))?;
                Some(DescribedFile {
                    depot_file: depot_file.to_string(),
                    action: record.text(&format!("action{index}")),
                    file_type: record.text(&format!("type{index}")),
                    rev: record.number(&format!("rev{index}")),
                    file_size: record.number(&format!("fileSize{index}")),
                    digest: record.text(&format!("digest{index}")),
                })
            })
            .collect::<Vec<_>>();

        let described = DescribeRecord {
            change: record.number("change"),
            user: record.text("user"),
            client: record.text("client"),
            time: record.timestamp("time"),
            description: record.text("desc"),
            status: record.text("status"),
            change_type: record.text("changeType"),
            path: record.text("path"),
            files,
        };
        tracing::trace!(change = described.change, files = described.files.len(), "describe record");
        described
    }
}
