//! CLI argument parsing and action input resolution.
//!
//! Every setting can be passed as a flag. Blank flags fall back to the
//! matching action input (`INPUT_<NAME>`) and then to a conventional
//! environment variable, so the binary runs unchanged as a GitHub Action
//! step or from a shell.
use clap::Parser;
use secrecy::SecretString;
use std::{path::PathBuf, time::Duration};
use url::Url;

use crate::{
    action::{self, EVENT_PATH_VAR, RUNNER_DEBUG_VAR},
    error::{Result, SyncError},
    forge::{config::DEFAULT_GITHUB_API_URL, manager::DEFAULT_REQUEST_TIMEOUT},
    repo::DEFAULT_REMOTE,
    tracker::config::JiraConfig,
};

/// Sync a pull request with its Jira issue and guard its base branch.
#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, default_value = "")]
    /// GitHub token. Falls back to INPUT_GITHUB-TOKEN, then GITHUB_TOKEN.
    pub github_token: String,

    #[arg(long, default_value = "")]
    /// GitHub REST API root. Falls back to GITHUB_API_URL.
    pub github_api_url: String,

    #[arg(long, default_value = "")]
    /// Jira instance URL. Falls back to INPUT_JIRA-BASE-URL, then JIRA_BASE_URL.
    pub jira_base_url: String,

    #[arg(long, default_value = "")]
    /// Jira account email. Falls back to INPUT_JIRA-EMAIL, then JIRA_EMAIL.
    pub jira_email: String,

    #[arg(long, default_value = "")]
    /// Jira API token. Falls back to INPUT_JIRA-API-TOKEN, then JIRA_API_TOKEN.
    pub jira_api_token: String,

    #[arg(long, default_value = "")]
    /// Branch pull requests must target. Defaults to the repository default branch.
    pub intended_base: String,

    #[arg(long, default_value = "")]
    /// Event payload file. Falls back to GITHUB_EVENT_PATH.
    pub event_path: String,

    #[arg(long, default_value = "")]
    /// Repository checkout. Falls back to GITHUB_WORKSPACE, then ".".
    pub workspace: String,

    #[arg(long, default_value = "")]
    /// Remote whose tracking branches hold the base branch tip (default origin).
    pub remote: String,

    #[arg(long)]
    /// Per-request timeout in seconds (default 30).
    pub timeout_secs: Option<u64>,

    #[arg(long, default_value_t = false)]
    /// Fetch the base branch before checking freshness.
    pub fetch_base: bool,

    #[arg(long, default_value_t = false)]
    /// Perform reads and checks only; log mutations instead of sending them.
    pub dry_run: bool,

    #[arg(long, default_value_t = false)]
    /// Enable debug logging.
    pub debug: bool,
}

/// GitHub connection settings.
#[derive(Debug, Clone)]
pub struct GithubSettings {
    pub token: SecretString,
    pub api_url: Url,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct ActionConfig {
    pub github: GithubSettings,
    pub jira: JiraConfig,
    /// Explicit intended base; `None` means the repository default branch.
    pub intended_base: Option<String>,
    pub event_path: PathBuf,
    pub workspace: PathBuf,
    pub remote: String,
    pub timeout: Duration,
    pub fetch_base: bool,
    pub dry_run: bool,
}

/// Value from the flag, then the action input, then `env_var`.
fn resolve(
    flag: &str,
    input: &str,
    env_var: Option<&str>,
    lookup: &dyn Fn(&str) -> Option<String>,
) -> Option<String> {
    if !flag.trim().is_empty() {
        return Some(flag.trim().to_string());
    }

    if let Some(value) = action::get_input(lookup, input) {
        return Some(value);
    }

    env_var
        .and_then(lookup)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(
    flag: &str,
    input: &str,
    env_var: &str,
    lookup: &dyn Fn(&str) -> Option<String>,
) -> Result<String> {
    resolve(flag, input, Some(env_var), lookup).ok_or_else(|| {
        SyncError::configuration(format!(
            "missing required input {input}: pass --{input} or set {} or {env_var}",
            action::input_var(input)
        ))
    })
}

fn parse_url(value: &str, input: &str) -> Result<Url> {
    let url = Url::parse(value).map_err(|e| {
        SyncError::configuration(format!("invalid {input} '{value}': {e}"))
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(SyncError::configuration(format!(
            "invalid {input} '{value}': unsupported scheme {scheme}"
        ))),
    }
}

fn flag_or_input(
    flag: bool,
    input: &str,
    lookup: &dyn Fn(&str) -> Option<String>,
) -> Result<bool> {
    if flag {
        return Ok(true);
    }
    match action::get_input(lookup, input) {
        None => Ok(false),
        Some(value) => action::parse_bool(&value).ok_or_else(|| {
            SyncError::configuration(format!(
                "input {input} must be true or false, got '{value}'"
            ))
        }),
    }
}

impl Args {
    /// Whether debug logging was requested here or by the runner.
    pub fn debug_enabled(
        &self,
        lookup: &dyn Fn(&str) -> Option<String>,
    ) -> bool {
        self.debug || lookup(RUNNER_DEBUG_VAR).is_some_and(|v| v == "1")
    }

    /// Resolve settings against the process environment.
    pub fn action_config(&self) -> Result<ActionConfig> {
        self.resolve_with(&|name: &str| std::env::var(name).ok())
    }

    /// Resolve settings using `lookup` for environment variables.
    pub fn resolve_with(
        &self,
        lookup: &dyn Fn(&str) -> Option<String>,
    ) -> Result<ActionConfig> {
        let github_token =
            required(&self.github_token, "github-token", "GITHUB_TOKEN", lookup)?;

        let api_url = resolve(
            &self.github_api_url,
            "github-api-url",
            Some("GITHUB_API_URL"),
            lookup,
        )
        .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string());

        let jira_base_url = required(
            &self.jira_base_url,
            "jira-base-url",
            "JIRA_BASE_URL",
            lookup,
        )?;
        let jira_email =
            required(&self.jira_email, "jira-email", "JIRA_EMAIL", lookup)?;
        let jira_api_token = required(
            &self.jira_api_token,
            "jira-api-token",
            "JIRA_API_TOKEN",
            lookup,
        )?;

        let event_path = required(
            &self.event_path,
            "event-path",
            EVENT_PATH_VAR,
            lookup,
        )?;

        let workspace = resolve(
            &self.workspace,
            "workspace",
            Some("GITHUB_WORKSPACE"),
            lookup,
        )
        .unwrap_or_else(|| ".".to_string());

        let timeout = match self.timeout_secs {
            Some(secs) => Duration::from_secs(secs),
            None => match action::get_input(lookup, "timeout-secs") {
                Some(value) => {
                    Duration::from_secs(value.parse().map_err(|_| {
                        SyncError::configuration(format!(
                            "input timeout-secs must be a number of seconds, got '{value}'"
                        ))
                    })?)
                }
                None => DEFAULT_REQUEST_TIMEOUT,
            },
        };

        if timeout.is_zero() {
            return Err(SyncError::configuration(
                "timeout-secs must be greater than zero",
            ));
        }

        Ok(ActionConfig {
            github: GithubSettings {
                token: SecretString::from(github_token),
                api_url: parse_url(&api_url, "github-api-url")?,
            },
            jira: JiraConfig {
                base_url: parse_url(&jira_base_url, "jira-base-url")?,
                email: jira_email,
                api_token: SecretString::from(jira_api_token),
            },
            intended_base: resolve(
                &self.intended_base,
                "intended-base",
                None,
                lookup,
            ),
            event_path: PathBuf::from(event_path),
            workspace: PathBuf::from(workspace),
            remote: resolve(&self.remote, "remote", None, lookup)
                .unwrap_or_else(|| DEFAULT_REMOTE.to_string()),
            timeout,
            fetch_base: flag_or_input(self.fetch_base, "fetch-base", lookup)?,
            dry_run: flag_or_input(self.dry_run, "dry-run", lookup)?,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for CLI argument parsing and input resolution.
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn runner_env() -> HashMap<String, String> {
        HashMap::from([
            ("INPUT_GITHUB-TOKEN".into(), "gh-token".into()),
            ("INPUT_JIRA-BASE-URL".into(), "https://acme.atlassian.net".into()),
            ("INPUT_JIRA-EMAIL".into(), "dev@example.com".into()),
            ("INPUT_JIRA-API-TOKEN".into(), "jira-token".into()),
            ("GITHUB_EVENT_PATH".into(), "/tmp/event.json".into()),
            ("GITHUB_WORKSPACE".into(), "/home/runner/work/widgets".into()),
        ])
    }

    fn args() -> Args {
        Args::default()
    }

    /// Test resolution from the inputs the runner injects.
    #[test]
    fn resolves_action_inputs() {
        let env = runner_env();
        let config = args().resolve_with(&|k: &str| env.get(k).cloned()).unwrap();

        assert_eq!(config.github.token.expose_secret(), "gh-token");
        assert_eq!(config.github.api_url.as_str(), "https://api.github.com/");
        assert_eq!(config.jira.email, "dev@example.com");
        assert_eq!(config.jira.api_token.expose_secret(), "jira-token");
        assert_eq!(config.event_path, PathBuf::from("/tmp/event.json"));
        assert_eq!(
            config.workspace,
            PathBuf::from("/home/runner/work/widgets")
        );
        assert_eq!(config.remote, "origin");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.intended_base.is_none());
        assert!(!config.dry_run);
        assert!(!config.fetch_base);
    }

    /// Test that flags take precedence over inputs.
    #[test]
    fn flags_override_inputs() {
        let env = runner_env();
        let args = Args {
            github_token: "flag-token".into(),
            intended_base: "develop".into(),
            timeout_secs: Some(5),
            dry_run: true,
            ..args()
        };

        let config = args.resolve_with(&|k: &str| env.get(k).cloned()).unwrap();

        assert_eq!(config.github.token.expose_secret(), "flag-token");
        assert_eq!(config.intended_base.as_deref(), Some("develop"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.dry_run);
    }

    /// Test fallback to plain environment variables outside of Actions.
    #[test]
    fn falls_back_to_plain_env_vars() {
        let env: HashMap<String, String> = HashMap::from([
            ("GITHUB_TOKEN".into(), "gh-token".into()),
            ("JIRA_BASE_URL".into(), "https://jira.example.com/jira".into()),
            ("JIRA_EMAIL".into(), "dev@example.com".into()),
            ("JIRA_API_TOKEN".into(), "jira-token".into()),
            ("GITHUB_EVENT_PATH".into(), "event.json".into()),
        ]);

        let config = args().resolve_with(&|k: &str| env.get(k).cloned()).unwrap();

        assert_eq!(
            config.jira.base_url.as_str(),
            "https://jira.example.com/jira"
        );
        assert_eq!(config.workspace, PathBuf::from("."));
    }

    #[test]
    fn reads_boolean_and_intended_base_inputs() {
        let mut env = runner_env();
        env.insert("INPUT_DRY-RUN".into(), "true".into());
        env.insert("INPUT_FETCH-BASE".into(), "false".into());
        env.insert("INPUT_INTENDED-BASE".into(), "develop".into());
        env.insert("INPUT_TIMEOUT-SECS".into(), "12".into());

        let config = args().resolve_with(&|k: &str| env.get(k).cloned()).unwrap();

        assert!(config.dry_run);
        assert!(!config.fetch_base);
        assert_eq!(config.intended_base.as_deref(), Some("develop"));
        assert_eq!(config.timeout, Duration::from_secs(12));
    }

    #[test]
    fn missing_required_input_is_configuration_error() {
        let mut env = runner_env();
        env.remove("INPUT_JIRA-API-TOKEN");

        let err = args()
            .resolve_with(&|k: &str| env.get(k).cloned())
            .unwrap_err();

        assert!(matches!(err, SyncError::Configuration(_)));
        assert!(err.to_string().contains("jira-api-token"));
    }

    #[test]
    fn rejects_invalid_boolean_input() {
        let mut env = runner_env();
        env.insert("INPUT_DRY-RUN".into(), "maybe".into());

        let err = args()
            .resolve_with(&|k: &str| env.get(k).cloned())
            .unwrap_err();
        assert!(matches!(err, SyncError::Configuration(_)));
    }

    /// Test that only HTTP and HTTPS schemes are supported for URLs.
    #[test]
    fn only_supports_http_and_https_schemes() {
        let mut env = runner_env();
        env.insert("INPUT_JIRA-BASE-URL".into(), "ftp://jira.example.com".into());

        let result = args().resolve_with(&|k: &str| env.get(k).cloned());
        assert!(result.is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        let env = runner_env();
        let args = Args {
            timeout_secs: Some(0),
            ..args()
        };

        assert!(args.resolve_with(&|k: &str| env.get(k).cloned()).is_err());
    }

    #[test]
    fn runner_debug_enables_debug_logging() {
        let env = HashMap::from([("RUNNER_DEBUG".to_string(), "1".to_string())]);
        assert!(args().debug_enabled(&|k: &str| env.get(k).cloned()));
        assert!(!args().debug_enabled(&|_| None));
    }
}
