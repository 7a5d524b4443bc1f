use crate::areas::client::{P4Client, Request};
use crate::areas::invoker::Runner;
use crate::artifacts::output::options::CommandOptions;
use crate::artifacts::output::transcript::CommandOutput;

/// Error text when the password prompt hit the end of stdin
const MISSING_PASSWORD_TEXT: &str = "EOF";
const INCORRECT_PASSWORD_TEXT: &str = "Authentication failed";
/// Error texts meaning there is no valid ticket
const NOT_LOGGED_IN_TEXTS: [&str; 2] = ["P4PASSWD", "has expired"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginResult {
    Succeeded,
    MissingPassword,
    IncorrectPassword,
    Failed,
}

impl LoginResult {
    fn from_output(output: &CommandOutput, password_given: bool) -> Self {
        if output.success {
            return LoginResult::Succeeded;
        }
        if !password_given && output.has_error_containing(MISSING_PASSWORD_TEXT) {
            return LoginResult::MissingPassword;
        }
        if password_given && output.has_error_containing(INCORRECT_PASSWORD_TEXT) {
            return LoginResult::IncorrectPassword;
        }
        LoginResult::Failed
    }
}

impl<R: Runner> P4Client<R> {
    /// Obtain a ticket, answering the password prompt with `password`
    pub async fn login(&self, password: Option<&str>) -> anyhow::Result<LoginResult> {
        let mut request = Request::plain("login").options(CommandOptions::IGNORE_ENTER_PASSWORD);
        if let Some(password) = password {
            request = request.stdin(format!("{password}\n"));
        }

        let output = self.run(request).await?;
        let result = LoginResult::from_output(&output, password.is_some());
        if result != LoginResult::Succeeded {
            tracing::warn!(?result, errors = output.error_text(), "login rejected");
        }
        Ok(result)
    }

    pub async fn logout(&self) -> anyhow::Result<()> {
        self.run_checked(Request::plain("logout")).await?;
        Ok(())
    }

    /// Whether the current user holds a valid ticket
    ///
    /// A missing or expired ticket is an answer, not a failure.
    pub async fn logged_in_state(&self) -> anyhow::Result<bool> {
        let output = self.run(Request::plain("login").arg("-s")).await?;
        if output.success {
            return Ok(true);
        }

        if NOT_LOGGED_IN_TEXTS
            .iter()
            .any(|text| output.has_error_containing(text))
        {
            return Ok(false);
        }

        output.into_result("login -s").map(|_| false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::areas::invoker::scripted::{Reply, scripted_client};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(Some("secret"), &["info: User bob logged in."], 0, LoginResult::Succeeded)]
    #[case(None, &["Enter password: ", "error: Password invalid.", "error: EOF reading terminal."], 1, LoginResult::MissingPassword)]
    #[case(Some("wrong"), &["Enter password: ", "error: Password invalid.", "error: 'Authentication failed.'"], 1, LoginResult::IncorrectPassword)]
    #[case(Some("secret"), &["error: Connect to server failed; check $P4PORT."], 1, LoginResult::Failed)]
    #[tokio::test]
    async fn login_outcomes(
        #[case] password: Option<&str>,
        #[case] lines: &[&str],
        #[case] exit_code: i32,
        #[case] expected: LoginResult,
    ) {
        let client = scripted_client([Reply::lines(lines).exit(exit_code)]);

        assert_eq!(client.login(password).await.unwrap(), expected);
    }

    #[tokio::test]
    async fn password_is_written_to_stdin() {
        let client = scripted_client([Reply::lines(&["info: User bob logged in."])]);

        client.login(Some("secret")).await.unwrap();

        assert_eq!(client.runner().invocations()[0].stdin.as_deref(), Some("secret\n"));
    }

    #[rstest]
    #[case(&["info: User bob ticket expires in 11 hours 59 minutes."], 0, true)]
    #[case(&["error: Perforce password (P4PASSWD) invalid or unset."], 1, false)]
    #[case(&["error: Your session has expired, please login again."], 1, false)]
    #[tokio::test]
    async fn logged_in_state_answers(#[case] lines: &[&str], #[case] exit_code: i32, #[case] expected: bool) {
        let client = scripted_client([Reply::lines(lines).exit(exit_code)]);

        assert_eq!(client.logged_in_state().await.unwrap(), expected);
        assert_eq!(client.runner().last_command(), vec!["login", "-s"]);
    }

    #[tokio::test]
    async fn logged_in_state_fails_for_unrelated_errors() {
        let client = scripted_client([Reply::lines(&["error: Connect to server failed; check $P4PORT."]).exit(1)]);

        let error = client.logged_in_state().await.unwrap_err();

        assert!(error.to_string().contains("Connect to server failed"));
    }

    #[tokio::test]
    async fn logout_runs_logout() {
        let client = scripted_client([Reply::lines(&["info: User bob logged out."])]);

        client.logout().await.unwrap();

        assert_eq!(client.runner().last_command(), vec!["logout"]);
    }
}
