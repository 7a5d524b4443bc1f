use std::fmt;

/// Flat, insertion-ordered set of string fields produced by either the tag
/// parser or the marshal decoder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: Vec<(String, String)>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == key)
    }

    /// Insert or overwrite a field, keeping the original position on overwrite
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let position = self.fields.iter().position(|(k, _)| k == key)?;
        Some(self.fields.remove(position).1)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// String field, empty when absent
    pub fn text(&self, key: &str) -> String {
        self.get(key).unwrap_or_default().to_string()
    }

    /// Numeric field, `-1` when absent or unparsable
    pub fn number(&self, key: &str) -> i64 {
        self.get(key)
            .and_then(|value| value.trim().parse::<i64>().ok())
            .unwrap_or(-1)
    }

    /// Unix timestamp field
    pub fn timestamp(&self, key: &str) -> Option<chrono::DateTime<chrono::Utc>> {
        self.get(key)
            .and_then(|value| value.trim().parse::<i64>().ok())
            .and_then(|seconds| chrono::DateTime::from_timestamp(seconds, 0))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut record = RawRecord::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

impl fmt::Display for RawRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{{{fields}}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_preserves_order_and_overwrites_in_place() {
        let mut record = RawRecord::new();
        record.insert("b", "1");
        record.insert("a", "2");
        record.insert("b", "3");

        pretty_assertions::assert_eq!(record.iter().collect::<Vec<_>>(), vec![("b", "3"), ("a", "2")]);
    }

    #[test]
    fn defensive_accessors() {
        let record: RawRecord = [("rev", "12"), ("size", "n/a"), ("time", "1609556645")]
            .into_iter()
            .collect();

        assert_eq!(record.number("rev"), 12);
        assert_eq!(record.number("size"), -1);
        assert_eq!(record.number("missing"), -1);
        assert_eq!(record.text("missing"), "");
        assert_eq!(
            record.timestamp("time").map(|t| t.to_rfc3339()),
            Some("2021-01-02T03:04:05+00:00".to_string())
        );
    }

    #[test]
    fn display_lists_fields() {
        let record: RawRecord = [("a", "1"), ("b", "")].into_iter().collect();

        assert_eq!(record.to_string(), "{a=1, b=}");
    }
}
