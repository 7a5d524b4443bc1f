use crate::artifacts::records::raw_record::RawRecord;

/// A workspace as listed by `clients`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientRecord {
    pub name: String,
    pub owner: String,
    pub host: String,
    pub root: String,
    pub stream: String,
    pub options: String,
    pub submit_options: String,
    pub line_end: String,
    pub description: String,
    pub update: Option<chrono::DateTime<chrono::Utc>>,
    pub access: Option<chrono::DateTime<chrono::Utc>>,
}

impl ClientRecord {
    pub fn is_stream_client(&self) -> bool {
        !self.stream.is_empty()
    }

    /// Whether the client's options contain the given word, e.g. `allwrite`
    pub fn has_option(&self, option: &str) -> bool {
        self.options.split_whitespace().any(|word| word == option)
    }
}

impl From<&RawRecord> for ClientRecord {
    fn from(record: &RawRecord) -> Self {
        let client = ClientRecord {
            name: record.text("client"),
            owner: record.text("Owner"),
            host: record.text("Host"),
            root: record.text("Root"),
            stream: record.text("Stream"),
            options: record.text("Options"),
            submit_options: record.text("SubmitOptions"),
            line_end: record.text("LineEnd"),
            description: record.text("Description").trim_end().to_string(),
            update: record.timestamp("Update"),
            access: record.timestamp("Access"),
        };
        tracing::trace!(?client, "client record");
        client
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn maps_clients_fields() {
        let record: RawRecord = [
            ("client", "bob-ws"),
            ("Update", "1609556645"),
            ("Access", "1609556700"),
            ("Owner", "bob"),
            ("Options", "noallwrite noclobber nocompress unlocked nomodtime normdir"),
            ("SubmitOptions", "submitunchanged"),
            ("LineEnd", "local"),
            ("Root", "/home/bob/ws"),
            ("Host", ""),
            ("Description", "Created by bob.\n"),
            ("Stream", "//streams/main"),
        ]
        .into_iter()
        .collect();

        let client = ClientRecord::from(&record);

        assert_eq!(client.name, "bob-ws");
        assert_eq!(client.owner, "bob");
        assert_eq!(client.root, "/home/bob/ws");
        assert_eq!(client.description, "Created by bob.");
        assert_eq!(client.update.map(|t| t.timestamp()), Some(1_609_556_645));
        assert!(client.is_stream_client());
        assert!(client.has_option("noclobber"));
        assert!(!client.has_option("clobber"));
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let client = ClientRecord::from(&RawRecord::new());

        assert_eq!(client.name, "");
        assert_eq!(client.access, None);
        assert!(!client.is_stream_client());
    }
}
