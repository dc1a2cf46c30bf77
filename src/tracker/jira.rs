//! Implements the IssueTracker trait for Jira
use async_trait::async_trait;
use base64::{Engine, prelude::BASE64_STANDARD};
use log::*;
use reqwest::{
    Client, Url,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue},
};
use secrecy::ExposeSecret;
use std::time::Duration;

use crate::{
    branch::IssueKey,
    error::{Result, SyncError},
    tracker::{
        config::JiraConfig,
        traits::IssueTracker,
        types::{IssueRecord, JiraIssue},
    },
};

/// Only the fields the sync consumes are requested.
const ISSUE_FIELDS: &str = "summary,parent,components";

/// Jira client using reqwest with basic authentication.
pub struct Jira {
    base_url: Url,
    client: Client,
}

impl Jira {
    /// Create a Jira client whose every request carries the basic-auth
    /// header and gives up after `timeout`.
    pub fn new(config: JiraConfig, timeout: Duration) -> Result<Self> {
        let credentials = format!(
            "{}:{}",
            config.email,
            config.api_token.expose_secret()
        );
        let mut auth_value = HeaderValue::from_str(&format!(
            "Basic {}",
            BASE64_STANDARD.encode(credentials)
        ))?;
        auth_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.append(AUTHORIZATION, auth_value);
        headers.append(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        // join() replaces the last path segment unless it ends with a slash
        let mut base_url = config.base_url;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { base_url, client })
    }

    fn issue_url(&self, key: &IssueKey) -> Result<Url> {
        let mut url = self.base_url.join(&format!("rest/api/2/issue/{key}"))?;
        url.query_pairs_mut().append_pair("fields", ISSUE_FIELDS);
        Ok(url)
    }
}

#[async_trait]
impl IssueTracker for Jira {
    async fn fetch_issue(&self, key: IssueKey) -> Result<IssueRecord> {
        let url = self.issue_url(&key)?;
        debug!("fetching jira issue: {url}");

        let request = self.client.get(url).build()?;
        let response = self.client.execute(request).await?;

        let status = response.status();
        if !status.is_success() {
            error!("jira returned {status} for issue {key}");
            return Err(SyncError::from_status(
                status.as_u16(),
                format!("jira issue {key}"),
            ));
        }

        let content = response.text().await?;
        let issue: JiraIssue = serde_json::from_str(&content).map_err(|e| {
            error!("jira issue {key} response is not an issue: {e}");
            SyncError::configuration(format!(
                "jira issue {key}: response from {} is not a Jira issue, check jira-base-url: {e}",
                self.base_url
            ))
        })?;
        info!("found jira issue: {}", issue.key);

        Ok(issue.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, method, path, query_param},
    };

    fn create_jira(base_url: &str) -> Jira {
        Jira::new(
            JiraConfig {
                base_url: Url::parse(base_url).unwrap(),
                email: "dev@example.com".into(),
                api_token: SecretString::from("secret".to_string()),
            },
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn key(value: &str) -> IssueKey {
        IssueKey::from_branch(value).unwrap()
    }

    #[tokio::test]
    async fn fetches_issue_with_basic_auth() {
        let server = MockServer::start().await;
        let expected_auth =
            format!("Basic {}", BASE64_STANDARD.encode("dev@example.com:secret"));

        Mock::given(method("GET"))
            .and(path("/rest/api/2/issue/PROJ-42"))
            .and(query_param("fields", ISSUE_FIELDS))
            .and(header("authorization", expected_auth.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({
                    "key": "PROJ-42",
                    "fields": {
                        "summary": "Fix login",
                        "parent": { "key": "PROJ-1" },
                        "components": [{ "name": "backend" }]
                    }
                }),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let jira = create_jira(&server.uri());
        let record = jira.fetch_issue(key("PROJ-42")).await.unwrap();

        assert_eq!(record.summary, "Fix login");
        assert_eq!(record.parent_key.as_deref(), Some("PROJ-1"));
        assert_eq!(record.component_names, vec!["backend".to_string()]);
    }

    #[tokio::test]
    async fn keeps_base_url_path_prefix() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/jira/rest/api/2/issue/OPS-3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({ "key": "OPS-3", "fields": {} }),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let jira = create_jira(&format!("{}/jira", server.uri()));
        let record = jira.fetch_issue(key("OPS-3")).await.unwrap();

        assert_eq!(record.key, "OPS-3");
    }

    #[tokio::test]
    async fn missing_issue_is_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let jira = create_jira(&server.uri());
        let err = jira.fetch_issue(key("PROJ-404")).await.unwrap_err();

        assert!(matches!(err, SyncError::NotFound(_)));
    }

    #[tokio::test]
    async fn rejected_credentials_are_authentication_errors() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let jira = create_jira(&server.uri());
        let err = jira.fetch_issue(key("PROJ-42")).await.unwrap_err();

        assert!(matches!(err, SyncError::Authentication(_)));
    }

    #[tokio::test]
    async fn non_issue_body_is_configuration_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/api/2/issue/PROJ-1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<html>login</html>", "text/html"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let jira = create_jira(&server.uri());
        let err = jira.fetch_issue(key("PROJ-1")).await.unwrap_err();

        assert!(matches!(err, SyncError::Configuration(_)));
        let message = err.to_string();
        assert!(message.contains("jira issue PROJ-1"));
        assert!(message.contains(&server.uri()));
        assert!(message.contains("jira-base-url"));
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        let jira = create_jira("http://127.0.0.1:9");
        let err = jira.fetch_issue(key("PROJ-42")).await.unwrap_err();

        assert!(matches!(err, SyncError::Network(_)));
    }
}
