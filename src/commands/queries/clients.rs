use crate::areas::client::{P4Client, Request};
use crate::areas::invoker::Runner;
use crate::artifacts::output::options::CommandOptions;
use crate::artifacts::spec::Spec;
use crate::artifacts::types::client_record::ClientRecord;

/// Narrows the workspaces listed by `clients`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientFilter {
    /// Only workspaces owned by this user
    pub user: Option<String>,
    /// Case-sensitive name pattern, e.g. `build-*`
    pub name_pattern: Option<String>,
    /// Only workspaces bound to this stream
    pub stream: Option<String>,
    pub max: Option<u32>,
}

impl ClientFilter {
    fn args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(user) = &self.user {
            args.extend(["-u".to_string(), user.clone()]);
        }
        if let Some(pattern) = &self.name_pattern {
            args.extend(["-e".to_string(), pattern.clone()]);
        }
        if let Some(stream) = &self.stream {
            args.extend(["-S".to_string(), stream.clone()]);
        }
        if let Some(max) = self.max {
            args.extend(["-m".to_string(), max.to_string()]);
        }
        args
    }
}

impl<R: Runner> P4Client<R> {
    /// Workspaces matching `filter`, read as marshalled dictionaries since
    /// descriptions span several lines
    pub async fn clients(&self, filter: &ClientFilter) -> anyhow::Result<Vec<ClientRecord>> {
        let output = self
            .run_checked(
                Request::marshalled("clients")
                    .args(filter.args())
                    .options(CommandOptions::NO_CLIENT),
            )
            .await?;

        Ok(output.records.iter().map(ClientRecord::from).collect())
    }

    /// Whether a workspace with exactly this name exists
    pub async fn client_exists(&self, name: &str) -> anyhow::Result<bool> {
        let filter = ClientFilter {
            name_pattern: Some(name.to_string()),
            ..Default::default()
        };
        let clients = self.clients(&filter).await?;

        Ok(clients.iter().any(|client| client.name == name))
    }

    /// The form of a workspace; a workspace that does not exist yet yields a default form
    pub async fn client_spec(&self, name: &str) -> anyhow::Result<Spec> {
        let output = self
            .run_checked(
                Request::raw("client")
                    .args(["-o", name])
                    .options(CommandOptions::NO_CLIENT),
            )
            .await?;

        Spec::parse(&output.texts().collect::<Vec<_>>().join("\n"))
    }
}
