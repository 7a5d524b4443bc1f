use crate::artifacts::records::raw_record::RawRecord;

/// A stream as listed by `streams`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamRecord {
    pub stream: String,
    pub name: String,
    pub owner: String,
    pub parent: String,
    pub stream_type: String,
    pub options: String,
    pub description: String,
    pub base_parent: String,
    pub firmer_than_parent: bool,
    pub change_flows_to_parent: bool,
    pub change_flows_from_parent: bool,
    pub update: Option<chrono::DateTime<chrono::Utc>>,
    pub access: Option<chrono::DateTime<chrono::Utc>>,
}

impl StreamRecord {
    /// Mainline streams have no parent
    pub fn is_mainline(&self) -> bool {
        self.stream_type == "mainline" || self.parent.is_empty() || self.parent == "none"
    }
}

fn flag(record: &RawRecord, key: &str) -> bool {
    record.get(key).is_some_and(|value| value == "true")
}

impl From<&RawRecord> for StreamRecord {
    fn from(record: &RawRecord) -> Self {
        let stream = StreamRecord {
            stream: record.text("Stream"),
            name: record.text("Name"),
            owner: record.text("Owner"),
            parent: record.text("Parent"),
            stream_type: record.text("Type"),
            options: record.text("Options"),
            description: record.text("Description").trim_end().to_string(),
            base_parent: record.text("baseParent"),
            firmer_than_parent: flag(record, "firmerThanParent"),
            change_flows_to_parent: flag(record, "changeFlowsToParent"),
            change_flows_from_parent: flag(record, "changeFlowsFromParent"),
            update: record.timestamp("Update"),
            access: record.timestamp("Access"),
        };
        tracing::trace!(?stream, "stream record");
        stream
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn maps_stream_fields() {
        let record: RawRecord = [
            ("Stream", "//streams/dev"),
            ("Update", "1609556645"),
            ("Owner", "bob"),
            ("Name", "dev"),
            ("Parent", "//streams/main"),
            ("Type", "development"),
            ("Description", "Development line.\n"),
            ("Options", "allsubmit unlocked toparent fromparent mergedown"),
            ("firmerThanParent", "false"),
            ("changeFlowsToParent", "true"),
            ("changeFlowsFromParent", "true"),
            ("baseParent", "//streams/main"),
        ]
        .into_iter()
        .collect();

        let stream = StreamRecord::from(&record);

        assert_eq!(stream.stream, "//streams/dev");
        assert_eq!(stream.parent, "//streams/main");
        assert_eq!(stream.description, "Development line.");
        assert!(!stream.firmer_than_parent);
        assert!(stream.change_flows_to_parent);
        assert!(!stream.is_mainline());
        assert_eq!(stream.access, None);
    }

    #[test]
    fn stream_without_parent_is_mainline() {
        let record: RawRecord = [("Stream", "//streams/main"), ("Parent", "none"), ("Type", "mainline")]
            .into_iter()
            .collect();

        assert!(StreamRecord::from(&record).is_mainline());
    }
}
