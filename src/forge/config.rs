//! Configuration for forge platform connections.
use secrecy::SecretString;
use url::Url;

/// Default REST endpoint for github.com.
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Remote repository connection configuration for authenticating and
/// interacting with the forge.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// REST API root (e.g., "https://api.github.com").
    pub api_url: Url,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Access token for authentication.
    pub token: SecretString,
}
