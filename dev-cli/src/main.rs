//! Run a GraphQL query through the query runner against GitHub.
//!
//! Environment variables can be set directly or loaded from a .env file in
//! the project root:
//! - GITHUB_TOKEN: personal access token (required by api.github.com)
//! - GITHUB_GRAPHQL_URL: endpoint (optional, defaults to api.github.com)
//!
//! Usage: cargo run -p dev-cli -- '{ viewer { login } }' --select /viewer
//!        cargo run -p dev-cli -- 'query($login: String!) { user(login: $login) { name } }' '{"login": "octocat"}'

use std::rc::Rc;

use anyhow::Result;
use clap::Parser;
use dev_cli::{
    Cli, run_query, state_json,
    telemetry::{get_subscriber, init_subscriber, log_error},
};
use github_client::{ClientConfig, GitHubClient};
use tokio::task::LocalSet;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let subscriber = get_subscriber("info".into());
    init_subscriber(subscriber)?;

    let mut config = ClientConfig::from_env();
    if let Some(endpoint) = cli.endpoint.clone() {
        config.endpoint = endpoint;
    }
    if config.token.is_none() {
        tracing::warn!("GITHUB_TOKEN is not set, requests are unauthenticated");
    }
    tracing::info!(endpoint = %config.endpoint, "running query");

    let client = Rc::new(GitHubClient::new(config));
    let state = LocalSet::new()
        .run_until(run_query(client, cli.params(), cli.select.clone()))
        .await;

    println!("{}", serde_json::to_string_pretty(&state_json(&state))?);

    if let Some(error) = state.error {
        log_error(error.clone());
        return Err(error.into());
    }
    Ok(())
}
