//! The GraphQL request capability used by the query runner, plus a client
//! for GitHub's GraphQL API.

mod api_client;
pub mod requests;
pub mod responses;

use futures::future::LocalBoxFuture;
use secrecy::SecretString;
use serde_json::Value;

pub use api_client::{ClientError, GitHubClient, decode_body, ok_body};
pub use responses::GraphQLError;

/// Variables for a GraphQL operation. Keys are unique by construction.
pub type Variables = serde_json::Map<String, Value>;

pub const DEFAULT_ENDPOINT: &str = "https://api.github.com/graphql";

/// Something that can execute a GraphQL operation.
///
/// Futures are not required to be `Send`: in the browser everything runs on
/// the single JS thread.
pub trait GraphQLClient {
    type Error;

    fn request(
        &self,
        query: &str,
        variables: &Variables,
    ) -> LocalBoxFuture<'static, Result<Value, Self::Error>>;
}

/// Where to send GraphQL requests and how to authenticate them.
#[derive(Debug)]
pub struct ClientConfig {
    pub endpoint: String,
    /// Personal access token, sent as a bearer token when present.
    pub token: Option<SecretString>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token: None,
        }
    }
}

impl ClientConfig {
    /// Build from optional raw values. Blank values count as unset, so the
    /// endpoint falls back to [`DEFAULT_ENDPOINT`].
    pub fn from_values(endpoint: Option<&str>, token: Option<&str>) -> Self {
        Self {
            endpoint: endpoint
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(DEFAULT_ENDPOINT)
                .to_string(),
            token: token
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| SecretString::from(s.to_string())),
        }
    }

    /// Read `GITHUB_GRAPHQL_URL` and `GITHUB_TOKEN` from the environment.
    pub fn from_env() -> Self {
        use std::env::var;

        let endpoint = var("GITHUB_GRAPHQL_URL").ok();
        let token = var("GITHUB_TOKEN").ok();
        Self::from_values(endpoint.as_deref(), token.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn blank_endpoint_falls_back_to_github() {
        let config = ClientConfig::from_values(Some(""), None);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        let config = ClientConfig::from_values(Some("  "), None);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn explicit_endpoint_and_token_are_kept() {
        let config = ClientConfig::from_values(
            Some("http://localhost:4000/graphql"),
            Some("s3cret"),
        );
        assert_eq!(config.endpoint, "http://localhost:4000/graphql");
        assert_eq!(config.token.unwrap().expose_secret(), "s3cret");
    }

    #[test]
    fn blank_token_is_unset() {
        assert!(ClientConfig::from_values(None, Some("")).token.is_none());
    }
}
