use crate::areas::client::{P4Client, Request};
use crate::areas::invoker::Runner;
use crate::artifacts::output::options::CommandOptions;
use crate::artifacts::types::file_record::FileRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Resend files the server believes are already up to date
    pub force: bool,
    /// Report what would be synced without touching the workspace
    pub preview: bool,
    /// Update the have list without writing local files
    pub keep_local: bool,
}

impl SyncOptions {
    fn args(&self) -> Vec<&'static str> {
        [(self.force, "-f"), (self.preview, "-n"), (self.keep_local, "-k")]
            .into_iter()
            .filter_map(|(enabled, flag)| enabled.then_some(flag))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncResult {
    pub files: Vec<FileRecord>,
    /// Local paths left untouched because they were writable and modified
    pub tampered: Vec<String>,
}

impl SyncResult {
    pub fn is_clean(&self) -> bool {
        self.tampered.is_empty()
    }
}

impl<R: Runner> P4Client<R> {
    /// Bring the workspace up to date with the given paths, or all of it when `paths` is empty
    ///
    /// Files that are already up to date are not an error. Writable files the
    /// server refuses to clobber are returned in [`SyncResult::tampered`].
    pub async fn sync<S: AsRef<str>>(&self, paths: &[S], options: SyncOptions) -> anyhow::Result<SyncResult> {
        let output = self
            .run_checked(
                Request::tagged("sync")
                    .args(options.args())
                    .paths(paths)
                    .options(CommandOptions::IGNORE_UP_TO_DATE)
                    .capturing_clobbered(),
            )
            .await?;

        let result = SyncResult {
            files: output.records.iter().map(FileRecord::from).collect(),
            tampered: output.clobbered,
        };
        tracing::debug!(files = result.files.len(), tampered = result.tampered.len(), "synced");
        Ok(result)
    }
}
