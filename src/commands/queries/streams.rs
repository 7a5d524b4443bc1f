use crate::areas::client::{P4Client, Request};
use crate::areas::invoker::Runner;
use crate::artifacts::output::options::CommandOptions;
use crate::artifacts::types::stream_record::StreamRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamFilter {
    /// Stream path patterns such as `//streams/...`
    pub paths: Vec<String>,
    /// Filter expression passed to `-F`, e.g. `Type=release`
    pub expression: Option<String>,
    pub max: Option<u32>,
}

impl<R: Runner> P4Client<R> {
    /// Streams matching `filter`, decoded from marshalled output
    pub async fn streams(&self, filter: &StreamFilter) -> anyhow::Result<Vec<StreamRecord>> {
        let mut request = Request::marshalled("streams").options(CommandOptions::NO_CLIENT);
        if let Some(expression) = &filter.expression {
            request = request.args(["-F", expression.as_str()]);
        }
        if let Some(max) = filter.max {
            request = request.args(["-m".to_string(), max.to_string()]);
        }

        let output = self.run_checked(request.paths(&filter.paths)).await?;

        Ok(output.records.iter().map(StreamRecord::from).collect())
    }
}
