use crate::areas::client::{P4Client, Request};
use crate::areas::invoker::Runner;
use crate::artifacts::output::options::CommandOptions;
use crate::artifacts::types::where_record::WhereRecord;

impl<R: Runner> P4Client<R> {
    /// Depot, workspace and local locations of each path
    ///
    /// Paths outside the workspace view are skipped. Exclusion mappings are
    /// reported with `unmapped` set.
    pub async fn where_files<S: AsRef<str>>(&self, paths: &[S]) -> anyhow::Result<Vec<WhereRecord>> {
        let output = self
            .run_checked(
                Request::tagged("where")
                    .paths(paths)
                    .options(CommandOptions::IGNORE_NOT_IN_CLIENT_VIEW),
            )
            .await?;

        Ok(output.records.iter().map(WhereRecord::from).collect())
    }
}
