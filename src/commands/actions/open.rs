use crate::areas::client::{P4Client, Request};
use crate::areas::invoker::Runner;
use crate::artifacts::output::options::CommandOptions;
use crate::artifacts::types::file_record::FileRecord;

impl<R: Runner> P4Client<R> {
    /// Open files for edit in the default change
    pub async fn edit<S: AsRef<str>>(&self, paths: &[S]) -> anyhow::Result<Vec<FileRecord>> {
        self.open_files("edit", paths, CommandOptions::empty()).await
    }

    /// Open new files for add in the default change
    pub async fn add<S: AsRef<str>>(&self, paths: &[S]) -> anyhow::Result<Vec<FileRecord>> {
        self.open_files("add", paths, CommandOptions::empty()).await
    }

    /// Open files for delete in the default change
    pub async fn delete<S: AsRef<str>>(&self, paths: &[S]) -> anyhow::Result<Vec<FileRecord>> {
        self.open_files("delete", paths, CommandOptions::empty()).await
    }

    /// Discard changes to opened files; paths that are not open are skipped
    pub async fn revert<S: AsRef<str>>(&self, paths: &[S]) -> anyhow::Result<Vec<FileRecord>> {
        self.open_files("revert", paths, CommandOptions::IGNORE_NOT_OPENED_ON_THIS_CLIENT)
            .await
    }

    async fn open_files<S: AsRef<str>>(
        &self,
        command: &str,
        paths: &[S],
        options: CommandOptions,
    ) -> anyhow::Result<Vec<FileRecord>> {
        if paths.is_empty() {
            return Ok(Vec::new());
        }

        let output = self
            .run_checked(Request::tagged(command).paths(paths).options(options))
            .await?;

        Ok(output.records.iter().map(FileRecord::from).collect())
    }
}
