use crate::areas::client::{P4Client, Request};
use crate::areas::invoker::Runner;
use crate::artifacts::output::options::CommandOptions;
use crate::artifacts::spec::Spec;

impl<R: Runner> P4Client<R> {
    /// Create or update a workspace from its form
    pub async fn create_client(&self, spec: &Spec) -> anyhow::Result<()> {
        let name = spec.get("Client").unwrap_or_default();
        if name.is_empty() {
            anyhow::bail!("client form has no Client field");
        }

        self.run_checked(
            Request::plain("client")
                .arg("-i")
                .stdin(spec.to_string())
                .options(CommandOptions::NO_CLIENT),
        )
        .await?;

        tracing::info!(client = name, "client saved");
        Ok(())
    }

    /// Delete a workspace; `force` also deletes it when it has opened files or is locked
    pub async fn delete_client(&self, name: &str, force: bool) -> anyhow::Result<()> {
        let mut request = Request::plain("client").arg("-d");
        if force {
            request = request.arg("-f");
        }

        self.run_checked(request.arg(name).options(CommandOptions::NO_CLIENT))
            .await?;

        tracing::info!(client = name, "client deleted");
        Ok(())
    }
}
