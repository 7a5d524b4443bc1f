use crate::artifacts::records::raw_record::RawRecord;
use bitflags::bitflags;

bitflags! {
    /// File type modifiers packed after the `+` in a type such as `text+mwx`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FileTypeFlags: u8 {
        const MOD_TIME = 0b0001;
        const ALWAYS_WRITABLE = 0b0010;
        const EXECUTABLE = 0b0100;
        const EXCLUSIVE_CHECKOUT = 0b1000;
    }
}

impl FileTypeFlags {
    /// Decode the modifiers of a full file type, ignoring unknown characters
    pub fn from_file_type(file_type: &str) -> Self {
        let Some((_, modifiers)) = file_type.split_once('+') else {
            return Self::empty();
        };

        modifiers.chars().fold(Self::empty(), |flags, c| match c {
            'm' => flags | Self::MOD_TIME,
            'w' => flags | Self::ALWAYS_WRITABLE,
            'x' => flags | Self::EXECUTABLE,
            'l' => flags | Self::EXCLUSIVE_CHECKOUT,
            _ => flags,
        })
    }
}

/// A file as reported by `fstat`, `files`, `opened`, `sync` and the open commands
///
/// Each command reports a different subset of fields; absent numbers are `-1`
/// and absent strings are empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub depot_file: String,
    pub client_file: String,
    /// Head revision (`headRev`), or the revision the command acted on (`rev`,
    /// `workRev` for the open commands)
    pub rev: i64,
    pub have_rev: i64,
    pub head_action: String,
    pub head_change: i64,
    pub head_time: Option<chrono::DateTime<chrono::Utc>>,
    /// Action the command performed, or the open action for opened files
    pub action: String,
    /// Changelist number; the default changelist is `0`
    pub change: i64,
    pub file_type: String,
    pub file_size: i64,
    pub digest: String,
    pub flags: FileTypeFlags,
}

impl FileRecord {
    /// Whether the action is an open action in a changelist
    ///
    /// Sync results report past-tense actions such as `updated`, which never
    /// count as open.
    pub fn is_opened(&self) -> bool {
        matches!(
            self.action.as_str(),
            "add"
                | "edit"
                | "delete"
                | "branch"
                | "move/add"
                | "move/delete"
                | "integrate"
                | "import"
                | "archive"
                | "purge"
        )
    }

    pub fn is_deleted_at_head(&self) -> bool {
        matches!(self.head_action.as_str(), "delete" | "move/delete")
    }
}

impl From<&RawRecord> for FileRecord {
    fn from(record: &RawRecord) -> Self {
        let file_type = record
            .get("type")
            .or_else(|| record.get("headType"))
            .unwrap_or_default()
            .to_string();
        let rev = ["headRev", "rev", "workRev"]
            .into_iter()
            .find(|key| record.contains_key(key))
            .map_or(-1, |key| record.number(key));
        let change = match record.get("change") {
            Some("default") => 0,
            _ => record.number("change"),
        };
        let client_file = record
            .get("clientFile")
            .or_else(|| record.get("path"))
            .unwrap_or_default()
            .to_string();

        let file = FileRecord {
            depot_file: record.text("depotFile"),
            client_file,
            rev,
            have_rev: record.number("haveRev"),
            head_action: record.text("headAction"),
            head_change: record.number("headChange"),
            head_time: record.timestamp("headTime"),
            action: record.text("action"),
            change,
            flags: FileTypeFlags::from_file_type(&file_type),
            file_type,
            file_size: record
                .get("fileSize")
                .map(|_| record.number("fileSize"))
                .unwrap_or_else(|| record.number("headFileSize")),
            digest: record.text("digest"),
        };
        tracing::trace!(?file, "file record");
        file
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("text+mwxl", FileTypeFlags::all())]
    #[case("text", FileTypeFlags::empty())]
    #[case("binary+l", FileTypeFlags::EXCLUSIVE_CHECKOUT)]
    #[case("xtext+xk", FileTypeFlags::EXECUTABLE)]
    #[case("text+", FileTypeFlags::empty())]
    fn decodes_type_modifiers(#[case] file_type: &str, #[case] expected: FileTypeFlags) {
        assert_eq!(FileTypeFlags::from_file_type(file_type), expected);
    }

    #[test]
    fn maps_fstat_fields() {
        let record: RawRecord = [
            ("depotFile", "//depot/main/a.c"),
            ("clientFile", "/ws/main/a.c"),
            ("headAction", "edit"),
            ("headType", "text+mw"),
            ("headTime", "1609556645"),
            ("headRev", "4"),
            ("headChange", "123"),
            ("haveRev", "3"),
            ("fileSize", "77"),
            ("digest", "D41D8CD98F00B204E9800998ECF8427E"),
        ]
        .into_iter()
        .collect();

        let file = FileRecord::from(&record);

        assert_eq!(file.depot_file, "//depot/main/a.c");
        assert_eq!(file.client_file, "/ws/main/a.c");
        assert_eq!(file.rev, 4);
        assert_eq!(file.have_rev, 3);
        assert_eq!(file.head_change, 123);
        assert_eq!(file.file_size, 77);
        assert_eq!(file.file_type, "text+mw");
        assert_eq!(file.flags, FileTypeFlags::MOD_TIME | FileTypeFlags::ALWAYS_WRITABLE);
        assert_eq!(file.head_time.map(|t| t.timestamp()), Some(1_609_556_645));
        assert!(!file.is_opened());
    }

    #[test]
    fn maps_opened_fields_with_defaults() {
        let record: RawRecord = [
            ("depotFile", "//depot/main/b.c"),
            ("rev", "2"),
            ("action", "edit"),
            ("change", "default"),
            ("type", "binary+l"),
        ]
        .into_iter()
        .collect();

        let file = FileRecord::from(&record);

        assert_eq!(file.rev, 2);
        assert_eq!(file.change, 0);
        assert_eq!(file.have_rev, -1);
        assert_eq!(file.file_size, -1);
        assert_eq!(file.client_file, "");
        assert_eq!(file.head_time, None);
        assert!(file.is_opened());
        assert_eq!(file.flags, FileTypeFlags::EXCLUSIVE_CHECKOUT);
    }

    #[test]
    fn synced_file_is_not_opened() {
        let record: RawRecord = [
            ("depotFile", "//depot/main/a.c"),
            ("clientFile", "/ws/main/a.c"),
            ("rev", "5"),
            ("action", "updated"),
            ("fileSize", "10"),
        ]
        .into_iter()
        .collect();

        let file = FileRecord::from(&record);

        assert!(!file.is_opened());
        assert_eq!(file.rev, 5);
    }

    #[test]
    fn fstat_of_a_file_opened_for_edit_is_opened() {
        let record: RawRecord = [
            ("depotFile", "//depot/main/a.c"),
            ("headAction", "edit"),
            ("headRev", "4"),
            ("haveRev", "4"),
            ("action", "edit"),
            ("change", "default"),
            ("workRev", "4"),
        ]
        .into_iter()
        .collect();

        let file = FileRecord::from(&record);

        assert!(file.is_opened());
        assert_eq!(file.change, 0);
    }

    #[test]
    fn open_command_revision_comes_from_work_rev() {
        let record: RawRecord = [("depotFile", "//depot/main/a.c"), ("workRev", "4"), ("action", "edit")]
            .into_iter()
            .collect();

        assert_eq!(FileRecord::from(&record).rev, 4);
    }

    #[test]
    fn deleted_head_is_detected() {
        let record: RawRecord = [("depotFile", "//depot/x"), ("headAction", "move/delete")]
            .into_iter()
            .collect();

        assert!(FileRecord::from(&record).is_deleted_at_head());
    }
}
