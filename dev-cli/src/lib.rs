//! Run a single GraphQL query through a [`QueryRunner`] from the terminal.

pub mod telemetry;

use std::any::Any;
use std::fmt::Display;
use std::rc::Rc;

use clap::Parser;
use futures::StreamExt;
use futures::channel::mpsc;
use futures::future::LocalBoxFuture;
use github_client::{GraphQLClient, Variables};
use query::{FetchState, QueryParams, QueryRunner};
use serde_json::{Value, json};

#[derive(Debug, Parser, Clone)]
#[command(
    name = "dev-cli",
    version,
    about = "Run a GraphQL query and print how its fetch state evolves"
)]
pub struct Cli {
    /// The GraphQL document to run
    pub query: String,

    /// Variables as a JSON object
    #[arg(value_parser = parse_variables)]
    pub variables: Option<Variables>,

    /// JSON pointer applied to the response data, e.g. `/viewer`
    #[arg(long)]
    pub select: Option<String>,

    /// Overrides the endpoint from the environment
    #[arg(long, env = "GITHUB_GRAPHQL_URL")]
    pub endpoint: Option<String>,
}

impl Cli {
    pub fn params(&self) -> QueryParams {
        QueryParams::new(
            self.query.clone(),
            self.variables.clone().unwrap_or_default(),
        )
    }
}

pub fn parse_variables(s: &str) -> Result<Variables, String> {
    match serde_json::from_str::<Value>(s).map_err(|e| e.to_string())? {
        Value::Object(map) => Ok(map),
        other => Err(format!("variables must be a JSON object, got {other}")),
    }
}

/// Normalizer picking the value at `pointer`, or `null` when absent.
pub fn select(pointer: Option<String>) -> impl Fn(Value) -> Value + 'static {
    move |raw| match &pointer {
        Some(pointer) => raw.pointer(pointer).cloned().unwrap_or(Value::Null),
        None => raw,
    }
}

enum Event {
    Changed,
    Panicked(Box<dyn Any + Send>),
}

/// Run one query to completion, logging every state change.
///
/// Must be called from within a [`tokio::task::LocalSet`].
pub async fn run_query<C>(
    client: Rc<C>,
    params: QueryParams,
    pointer: Option<String>,
) -> FetchState<Value, C::Error>
where
    C: GraphQLClient + 'static,
    C::Error: Clone + Display + 'static,
{
    run_query_with(client, params, select(pointer)).await
}

/// [`run_query`] with an arbitrary normalizer. A panic in `normalize` is
/// resumed on the caller.
pub async fn run_query_with<C>(
    client: Rc<C>,
    params: QueryParams,
    normalize: impl Fn(Value) -> Value + 'static,
) -> FetchState<Value, C::Error>
where
    C: GraphQLClient + 'static,
    C::Error: Clone + Display + 'static,
{
    let (events, mut received) = mpsc::unbounded();

    let spawner = {
        let events = events.clone();
        move |task: LocalBoxFuture<'static, ()>| {
            let handle = tokio::task::spawn_local(task);
            let events = events.clone();
            tokio::task::spawn_local(async move {
                if let Err(e) = handle.await
                    && e.is_panic()
                {
                    let _ = events.unbounded_send(Event::Panicked(e.into_panic()));
                }
            });
        }
    };
    let mut runner = QueryRunner::builder(client, spawner)
        .normalize(normalize)
        .on_change(move || {
            let _ = events.unbounded_send(Event::Changed);
        })
        .build();

    runner.sync(&params);

    while let Some(event) = received.next().await {
        if let Event::Panicked(payload) = event {
            std::panic::resume_unwind(payload);
        }
        let state = runner.state();
        tracing::info!(
            loaded = state.loaded,
            fetching = state.fetching,
            has_data = state.data.is_some(),
            error = ?state.error.as_ref().map(ToString::to_string),
            "state changed"
        );
        if !state.fetching {
            return state;
        }
    }

    runner.state()
}

/// The state as printed on stdout. Errors are rendered as their message.
pub fn state_json<E: Display>(state: &FetchState<Value, E>) -> Value {
    json!({
        "loaded": state.loaded,
        "fetching": state.fetching,
        "data": state.data,
        "error": state.error.as_ref().map(ToString::to_string),
    })
}
