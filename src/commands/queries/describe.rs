use crate::areas::client::{P4Client, Request};
use crate::areas::invoker::Runner;
use crate::artifacts::types::describe_record::DescribeRecord;

impl<R: Runner> P4Client<R> {
    /// Change details with their file lists, without diffs
    ///
    /// Runs in marshalled mode so multi-line descriptions come back intact.
    pub async fn describe(&self, changes: &[i64]) -> anyhow::Result<Vec<DescribeRecord>> {
        if changes.is_empty() {
            return Ok(Vec::new());
        }

        let output = self
            .run_checked(
                Request::marshalled("describe")
                    .arg("-s")
                    .args(changes.iter().map(i64::to_string)),
            )
            .await?;

        Ok(output.records.iter().map(DescribeRecord::from).collect())
    }
}
