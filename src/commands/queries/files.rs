use crate::areas::client::{P4Client, Request};
use crate::areas::invoker::Runner;
use crate::artifacts::output::options::CommandOptions;
use crate::artifacts::types::file_record::FileRecord;

impl<R: Runner> P4Client<R> {
    /// File metadata; any missing or inaccessible path fails the command
    pub async fn fstat<S: AsRef<str>>(&self, paths: &[S]) -> anyhow::Result<Vec<FileRecord>> {
        self.stat_files(paths, CommandOptions::empty()).await
    }

    /// File metadata for the paths that exist, silently skipping the rest
    pub async fn existing_files<S: AsRef<str>>(&self, paths: &[S]) -> anyhow::Result<Vec<FileRecord>> {
        self.stat_files(paths, CommandOptions::IGNORE_MISSING).await
    }

    /// Whether the path resolves to at least one file not deleted at head
    pub async fn file_exists(&self, path: &str) -> anyhow::Result<bool> {
        let files = self.existing_files(&[path]).await?;
        Ok(files.iter().any(|file| !file.is_deleted_at_head()))
    }

    async fn stat_files<S: AsRef<str>>(
        &self,
        paths: &[S],
        options: CommandOptions,
    ) -> anyhow::Result<Vec<FileRecord>> {
        let output = self
            .run_checked(Request::tagged("fstat").arg("-Ol").paths(paths).options(options))
            .await?;

        Ok(output.records.iter().map(FileRecord::from).collect())
    }

    /// Head revisions of depot files
    pub async fn files<S: AsRef<str>>(&self, paths: &[S]) -> anyhow::Result<Vec<FileRecord>> {
        let output = self
            .run_checked(
                Request::tagged("files")
                    .paths(paths)
                    .options(CommandOptions::IGNORE_NO_SUCH_FILES),
            )
            .await?;

        let files = output
            .records
            .iter()
            .map(|record| {
                // `files` reports head data under the unprefixed names
                let mut file = FileRecord::from(record);
                file.head_action = std::mem::take(&mut file.action);
                file.head_change = std::mem::replace(&mut file.change, -1);
                file.head_time = record.timestamp("time");
                file
            })
            .collect();
        Ok(files)
    }

    /// Files opened in the current workspace, optionally limited to `paths`
    pub async fn opened<S: AsRef<str>>(&self, paths: &[S]) -> anyhow::Result<Vec<FileRecord>> {
        let output = self
            .run_checked(
                Request::tagged("opened")
                    .paths(paths)
                    .options(CommandOptions::IGNORE_NOT_OPENED_ON_THIS_CLIENT),
            )
            .await?;

        Ok(output.records.iter().map(FileRecord::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::areas::invoker::scripted::{Reply, scripted_client};
    use crate::artifacts::types::file_record::FileTypeFlags;
    use pretty_assertions::assert_eq;

    const FSTAT_A: [&str; 5] = [
        "info1: depotFile //depot/main/a.sh",
        "info1: headAction edit",
        "info1: headType text+x",
        "info1: headRev 3",
        "info1: haveRev 2",
    ];

    #[tokio::test]
    async fn fstat_maps_file_records() {
        let client = scripted_client([Reply::lines(&FSTAT_A)]);

        let files = client.fstat(&["//depot/main/a.sh"]).await.unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].rev, 3);
        assert_eq!(files[0].have_rev, 2);
        assert!(files[0].flags.contains(FileTypeFlags::EXECUTABLE));
        assert_eq!(
            client.runner().last_command(),
            vec!["-ztag", "fstat", "-Ol", "//depot/main/a.sh"]
        );
    }

    #[tokio::test]
    async fn fstat_fails_on_missing_files() {
        let client = scripted_client([Reply::lines(&["error: //depot/nope - no such file(s)."]).exit(1)]);

        let error = client.fstat(&["//depot/nope"]).await.unwrap_err();

        assert!(error.to_string().contains("no such file(s)"));
    }

    #[tokio::test]
    async fn existing_files_skips_missing_and_unmapped_paths() {
        let mut lines = FSTAT_A.to_vec();
        lines.push("error: //depot/nope - no such file(s).");
        lines.push("error: //other/x - file(s) not in client view.");
        let client = scripted_client([Reply::lines(&lines)]);

        let files = client
            .existing_files(&["//depot/main/a.sh", "//depot/nope", "//other/x"])
            .await
            .unwrap();

        assert_eq!(files.len(), 1);
    }

    #[tokio::test]
    async fn file_deleted_at_head_does_not_exist() {
        let client = scripted_client([
            Reply::lines(&["info1: depotFile //depot/gone", "info1: headAction delete"]),
            Reply::lines(&["error: //depot/never - no such file(s)."]),
            Reply::lines(&FSTAT_A),
        ]);

        assert!(!client.file_exists("//depot/gone").await.unwrap());
        assert!(!client.file_exists("//depot/never").await.unwrap());
        assert!(client.file_exists("//depot/main/a.sh").await.unwrap());
    }

    #[tokio::test]
    async fn files_reports_head_data() {
        let client = scripted_client([Reply::lines(&[
            "info1: depotFile //depot/main/a.c",
            "info1: rev 4",
            "info1: change 120",
            "info1: action edit",
            "info1: type text",
            "info1: time 1609556645",
        ])]);

        let files = client.files(&["//depot/main/..."]).await.unwrap();

        assert_eq!(files[0].rev, 4);
        assert_eq!(files[0].head_action, "edit");
        assert_eq!(files[0].head_change, 120);
        assert!(files[0].head_time.is_some());
        assert!(!files[0].is_opened());
    }

    #[tokio::test]
    async fn opened_tolerates_files_that_are_not_open() {
        let client = scripted_client([Reply::lines(&[
            "info1: depotFile //depot/main/a.c",
            "info1: clientFile //bob-ws/main/a.c",
            "info1: rev 3",
            "info1: action edit",
            "info1: change default",
            "info1: type text",
            "error: //bob-ws/main/b.c - file(s) not opened on this client.",
        ])]);

        let files = client.opened(&["//bob-ws/main/..."]).await.unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].change, 0);
        assert!(files[0].is_opened());
    }
}
