use secrecy::SecretString;
use url::Url;

/// Jira instance location and basic-auth credentials.
#[derive(Debug, Clone)]
pub struct JiraConfig {
    /// Instance root, e.g. `https://acme.atlassian.net`.
    pub base_url: Url,
    /// Account identifier used as the basic-auth user.
    pub email: String,
    pub api_token: SecretString,
}
