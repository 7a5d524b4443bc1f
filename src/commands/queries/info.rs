use crate::areas::client::{P4Client, Request};
use crate::areas::invoker::Runner;
use crate::artifacts::output::options::CommandOptions;
use crate::artifacts::types::info_record::InfoRecord;

impl<R: Runner> P4Client<R> {
    /// Connection and server details
    pub async fn info(&self) -> anyhow::Result<InfoRecord> {
        let output = self
            .run_checked(Request::tagged("info").options(CommandOptions::NO_CLIENT))
            .await?;

        output
            .records
            .first()
            .map(InfoRecord::from)
            .ok_or_else(|| anyhow::anyhow!("`info` returned no record"))
    }
}

#[cfg(test)]
mod tests {
    use crate::areas::invoker::scripted::{Reply, scripted_client};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn maps_the_info_record() {
        let client = scripted_client([Reply::lines(&[
            "info1: userName bob",
            "info1: clientName bob-ws",
            "info1: serverDate 2021/01/02 03:04:05 -0800 PST",
            "info1: caseHandling sensitive",
        ])]);

        let info = client.info().await.unwrap();

        assert_eq!(info.user_name, "bob");
        assert!(info.has_client());
        assert!(info.is_case_sensitive());
        assert_eq!(info.server_utc_offset.map(|offset| offset.local_minus_utc()), Some(-8 * 3600));
        assert_eq!(client.runner().last_command(), vec!["-ztag", "info"]);
        assert!(!client.runner().invocations()[0].args.contains(&"-cbob-ws".to_string()));
    }

    #[tokio::test]
    async fn missing_record_is_an_error() {
        let client = scripted_client([Reply::lines(&[])]);

        assert!(client.info().await.is_err());
    }
}
