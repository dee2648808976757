use dev_cli::{run_query, run_query_with, state_json};
use query::QueryParams;
use serde_json::json;
use test_helpers::{MockClient, init_test_logging};
use tokio::task::LocalSet;

#[tokio::test]
async fn resolves_viewer_scenario() {
    init_test_logging();
    let client =
        MockClient::resolving(json!({"viewer": {"login": "octocat"}}));

    let state = LocalSet::new()
        .run_until(run_query(
            client.clone(),
            QueryParams::from_query("{ viewer { login } }"),
            Some("/viewer".into()),
        ))
        .await;

    assert_eq!(
        state_json(&state),
        json!({
            "loaded": true,
            "fetching": false,
            "data": {"login": "octocat"},
            "error": null,
        })
    );
    assert_eq!(client.request_count(), 1);
}

#[tokio::test]
async fn reports_network_error() {
    init_test_logging();
    let client = MockClient::rejecting("network error");

    let state = LocalSet::new()
        .run_until(run_query(
            client,
            QueryParams::from_query("{ viewer { login } }"),
            Some("/viewer".into()),
        ))
        .await;

    assert_eq!(
        state_json(&state),
        json!({
            "loaded": false,
            "fetching": false,
            "data": null,
            "error": "network error",
        })
    );
}

#[tokio::test]
#[should_panic(expected = "unexpected response shape")]
async fn normalizer_panic_reaches_the_caller() {
    init_test_logging();
    let client = MockClient::resolving(json!({"viewer": null}));

    LocalSet::new()
        .run_until(run_query_with(
            client,
            QueryParams::from_query("{ viewer { login } }"),
            |_| panic!("unexpected response shape"),
        ))
        .await;
}
