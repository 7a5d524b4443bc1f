use crate::artifacts::records::raw_record::RawRecord;

/// One mapping line reported by `where`
///
/// A path may map through several view lines; exclusion lines carry the
/// `unmap` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhereRecord {
    pub depot_file: String,
    pub client_file: String,
    pub local_path: String,
    pub unmapped: bool,
}

impl From<&RawRecord> for WhereRecord {
    fn from(record: &RawRecord) -> Self {
        let location = WhereRecord {
            depot_file: record.text("depotFile"),
            client_file: record.text("clientFile"),
            local_path: record.text("path"),
            unmapped: record.contains_key("unmap"),
        };
        tracing::trace!(?location, "where record");
        location
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn maps_where_fields() {
        let record: RawRecord = [
            ("depotFile", "//depot/main/a.c"),
            ("clientFile", "//bob-ws/main/a.c"),
            ("path", "/home/bob/ws/main/a.c"),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            WhereRecord::from(&record),
            WhereRecord {
                depot_file: "//depot/main/a.c".to_string(),
                client_file: "//bob-ws/main/a.c".to_string(),
                local_path: "/home/bob/ws/main/a.c".to_string(),
                unmapped: false,
            }
        );
    }

    #[test]
    fn unmap_marks_exclusions() {
        let record: RawRecord = [("unmap", ""), ("depotFile", "//depot/main/gen/...")]
            .into_iter()
            .collect();

        assert!(WhereRecord::from(&record).unmapped);
    }
}
