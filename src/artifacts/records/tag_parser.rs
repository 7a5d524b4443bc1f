//! Tagged output record parser
//!
//! With `-ztag` every field of every record arrives as its own `key value`
//! line and nothing separates one record from the next. The only reliable
//! boundary signal is a key recurring: when a line names a key the
//! in-progress record already holds, that record is complete.
//!
//! Two consequences follow from the output contract and are not worked
//! around: a record with no fields is invisible, and two consecutive records
//! that share no key are merged into one.

use crate::artifacts::records::raw_record::RawRecord;

#[derive(Debug, Default)]
pub struct TagParser {
    current: RawRecord,
    records: Vec<RawRecord>,
}

impl TagParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one tagged line (channel prefix already stripped)
    pub fn accept(&mut self, line: &str) {
        let (key, value) = line.split_once(' ').unwrap_or((line, ""));

        if self.current.contains_key(key) {
            self.flush();
        }

        self.current.insert(key, value);
    }

    /// Flush the in-progress record and return everything parsed
    pub fn finish(mut self) -> Vec<RawRecord> {
        self.flush();
        self.records
    }

    fn flush(&mut self) {
        if self.current.is_empty() {
            return;
        }

        let record = std::mem::take(&mut self.current);
        tracing::trace!(%record, "tagged record completed");
        self.records.push(record);
    }
}
