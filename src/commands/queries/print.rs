use anyhow::Context;
use bytes::Bytes;
use std::path::Path;

use crate::areas::client::{P4Client, Request};
use crate::areas::invoker::Runner;

impl<R: Runner> P4Client<R> {
    /// Contents of a depot file revision
    pub async fn print(&self, depot_path: &str) -> anyhow::Result<Bytes> {
        let staging = tempfile::Builder::new()
            .prefix("p4print")
            .tempdir()
            .context("failed to create print directory")?;
        let target = staging.path().join("content");

        self.print_to(depot_path, &target).await?;

        let content = tokio::fs::read(&target)
            .await
            .with_context(|| format!("`print` produced no file for {depot_path}"))?;
        Ok(Bytes::from(content))
    }

    /// Write a depot file revision to `destination`
    pub async fn print_to(&self, depot_path: &str, destination: &Path) -> anyhow::Result<()> {
        self.run_checked(
            Request::plain("print")
                .args(["-q", "-o"])
                .arg(destination.display().to_string())
                .arg(depot_path),
        )
        .await?;

        tracing::debug!(depot_path, destination = %destination.display(), "printed");
        Ok(())
    }
}
