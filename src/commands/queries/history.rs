use crate::areas::client::{P4Client, Request};
use crate::areas::invoker::Runner;
use crate::artifacts::types::change_summary::{ChangeSummary, FileChangeSummary, parse_changes, parse_filelog};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeStatus {
    Pending,
    Shelved,
    Submitted,
}

impl ChangeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeStatus::Pending => "pending",
            ChangeStatus::Shelved => "shelved",
            ChangeStatus::Submitted => "submitted",
        }
    }
}

/// Selects the changes listed by `changes`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangesQuery {
    /// Only changes affecting files under this path
    pub path: Option<String>,
    pub max: Option<u32>,
    pub status: Option<ChangeStatus>,
    pub user: Option<String>,
    pub client: Option<String>,
}

impl ChangesQuery {
    fn args(&self) -> Vec<String> {
        let mut args = vec!["-l".to_string(), "-t".to_string()];
        if let Some(max) = self.max {
            args.extend(["-m".to_string(), max.to_string()]);
        }
        if let Some(status) = self.status {
            args.extend(["-s".to_string(), status.as_str().to_string()]);
        }
        if let Some(user) = &self.user {
            args.extend(["-u".to_string(), user.clone()]);
        }
        if let Some(client) = &self.client {
            args.extend(["-c".to_string(), client.clone()]);
        }
        args.extend(self.path.clone());
        args
    }
}

impl<R: Runner> P4Client<R> {
    /// Change summaries with full descriptions, newest first
    pub async fn changes(&self, query: &ChangesQuery) -> anyhow::Result<Vec<ChangeSummary>> {
        let output = self.run_checked(Request::raw("changes").args(query.args())).await?;

        Ok(parse_changes(output.texts()))
    }

    /// Revision history of one file, newest first
    pub async fn filelog(&self, path: &str, max: Option<u32>) -> anyhow::Result<Vec<FileChangeSummary>> {
        let mut request = Request::raw("filelog").args(["-l", "-t"]);
        if let Some(max) = max {
            request = request.args(["-m".to_string(), max.to_string()]);
        }

        let output = self.run_checked(request.arg(path)).await?;

        Ok(parse_filelog(output.texts()))
    }
}
