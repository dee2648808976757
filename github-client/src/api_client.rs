use futures::FutureExt;
use futures::future::LocalBoxFuture;
use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use crate::{
    ClientConfig, GraphQLClient, Variables, requests::GraphQLRequest,
    responses::{GraphQLError, GraphQLResponse},
};

/// A GraphQL client for GitHub's v4 API.
pub struct GitHubClient {
    pub endpoint: String,
    token: Option<SecretString>,
    pub inner_client: reqwest::Client,
}

impl GitHubClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            endpoint: config.endpoint,
            token: config.token,
            inner_client: build_inner_client(),
        }
    }

    fn post(&self, body: &GraphQLRequest) -> reqwest::RequestBuilder {
        let mut request = self.inner_client.post(&self.endpoint).json(body);

        if let Some(token) = &self.token {
            request = request
                .header(AUTHORIZATION, format!("bearer {}", token.expose_secret()));
        }

        request
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_inner_client() -> reqwest::Client {
    // GitHub rejects requests without a user agent. Browsers set their own.
    reqwest::Client::builder()
        .user_agent(concat!("github-client/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_default()
}

#[cfg(target_arch = "wasm32")]
fn build_inner_client() -> reqwest::Client {
    reqwest::Client::new()
}

impl GraphQLClient for GitHubClient {
    type Error = ClientError;

    fn request(
        &self,
        query: &str,
        variables: &Variables,
    ) -> LocalBoxFuture<'static, Result<Value, ClientError>> {
        let body = GraphQLRequest::new(query, variables.clone());
        let request = self.post(&body);

        async move {
            tracing::debug!("POST graphql operation");
            let response = request.send().await?;
            ok_body(response).await
        }
        .boxed_local()
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    /// An unhandled API error to display, containing response text.
    #[error("{1}")]
    APIError(StatusCode, String),
    #[error("Network error. Please check your connection.")]
    Network(String),
    /// The server answered but reported errors for the operation.
    #[error("{}", join_messages(.0))]
    GraphQL(Vec<GraphQLError>),
    #[error("Malformed response: {0}")]
    Decode(String),
    #[error("Response contained neither data nor errors")]
    MissingData,
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        tracing::warn!("graphql transport error: {e}");
        Self::Network(e.to_string())
    }
}

fn join_messages(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Decode a GraphQL response into its `data`, or return an appropriate error.
pub async fn ok_body(response: reqwest::Response) -> Result<Value, ClientError> {
    let status = response.status();
    let text = response.text().await?;
    decode_body(status, &text)
}

/// Any entry in `errors` fails the whole operation, even when partial data
/// came back with it.
pub fn decode_body(status: StatusCode, body: &str) -> Result<Value, ClientError> {
    if !status.is_success() {
        return Err(ClientError::APIError(status, body.to_string()));
    }

    let response: GraphQLResponse = serde_json::from_str(body)
        .map_err(|e| ClientError::Decode(e.to_string()))?;

    if !response.errors.is_empty() {
        return Err(ClientError::GraphQL(response.errors));
    }

    response.data.ok_or(ClientError::MissingData)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn data_is_returned_on_success() {
        let body = r#"{"data": {"viewer": {"login": "octocat"}}}"#;
        let data = decode_body(StatusCode::OK, body).unwrap();
        assert_eq!(data, json!({"viewer": {"login": "octocat"}}));
    }

    #[test]
    fn non_success_status_keeps_response_text() {
        let err = decode_body(StatusCode::UNAUTHORIZED, "Bad credentials")
            .unwrap_err();
        assert_eq!(
            err,
            ClientError::APIError(
                StatusCode::UNAUTHORIZED,
                "Bad credentials".into()
            )
        );
        assert_eq!(err.to_string(), "Bad credentials");
    }

    #[test]
    fn graphql_errors_fail_even_with_partial_data() {
        let body = r#"{
            "data": {"viewer": null},
            "errors": [
                {"message": "first", "path": ["viewer"]},
                {"message": "second"}
            ]
        }"#;
        let err = decode_body(StatusCode::OK, body).unwrap_err();
        match &err {
            ClientError::GraphQL(errors) => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].path, vec![json!("viewer")]);
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(err.to_string(), "first; second");
    }

    #[test]
    fn null_errors_is_success() {
        let body = r#"{"data": {"viewer": {"login": "octocat"}}, "errors": null}"#;
        let data = decode_body(StatusCode::OK, body).unwrap();
        assert_eq!(data, json!({"viewer": {"login": "octocat"}}));
    }

    #[test]
    fn empty_errors_is_success() {
        let body = r#"{"data": {"viewer": {"login": "octocat"}}, "errors": []}"#;
        assert!(decode_body(StatusCode::OK, body).is_ok());
    }

    #[test]
    fn null_path_and_locations_still_fail_as_graphql() {
        let body = r#"{
            "data": null,
            "errors": [{"message": "boom", "path": null, "locations": null}]
        }"#;
        let err = decode_body(StatusCode::OK, body).unwrap_err();
        match err {
            ClientError::GraphQL(errors) => {
                assert_eq!(errors[0].message, "boom");
                assert!(errors[0].path.is_empty());
                assert!(errors[0].locations.is_empty());
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn empty_envelope_is_missing_data() {
        let err = decode_body(StatusCode::OK, "{}").unwrap_err();
        assert_eq!(err, ClientError::MissingData);
    }

    #[test]
    fn garbage_body_is_a_decode_error() {
        let err = decode_body(StatusCode::OK, "<html>").unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn empty_variables_are_not_serialized() {
        let request = GraphQLRequest::new("{ viewer { login } }", Variables::new());
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body, json!({"query": "{ viewer { login } }"}));

        let mut variables = Variables::new();
        variables.insert("login".into(), json!("octocat"));
        let request = GraphQLRequest::new("query($login: String!) { x }", variables);
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["variables"], json!({"login": "octocat"}));
    }

    #[test]
    fn bearer_token_is_attached() {
        let client = GitHubClient::new(ClientConfig {
            endpoint: "http://localhost/graphql".into(),
            token: Some(SecretString::from("s3cret".to_string())),
        });
        let request = client
            .post(&GraphQLRequest::new("{ viewer { login } }", Variables::new()))
            .build()
            .unwrap();
        assert_eq!(
            request.headers().get(AUTHORIZATION).unwrap(),
            "bearer s3cret"
        );
    }
}
