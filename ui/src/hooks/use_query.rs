use github_client::ClientError;
use query::{FetchState, QueryParams, QueryRunner};
use serde_json::Value;
use yew::prelude::*;

use crate::contexts::use_client;

/// State of a query whose response is kept as raw JSON.
pub type QueryState = FetchState<Value, ClientError>;

/// Run a GraphQL query and re-render as its state changes.
///
/// The query is sent after the first render and again after any render
/// whose `params` differ structurally from the previous render's. The
/// response passes through `normalize` before being stored; the most recent
/// `normalize` is the one applied.
///
/// Responses arriving after the component unmounts, or for params that have
/// since changed, are discarded.
///
/// # Example
///
/// ```rust,ignore
/// #[function_component]
/// fn Login() -> Html {
///     let state = use_query(
///         QueryParams::from_query("{ viewer { login } }"),
///         Callback::from(|raw: Value| raw["viewer"]["login"].clone()),
///     );
///     match &state.data {
///         Some(login) => html! { <span>{login.to_string()}</span> },
///         None => html! {},
///     }
/// }
/// ```
#[hook]
pub fn use_query<T>(
    params: QueryParams,
    normalize: Callback<Value, T>,
) -> FetchState<T, ClientError>
where
    T: Clone + 'static,
{
    let client = use_client();
    let force_update = use_force_update();

    let latest_normalize = use_mut_ref(|| normalize.clone());
    *latest_normalize.borrow_mut() = normalize;

    let runner = {
        let latest_normalize = latest_normalize.clone();
        use_mut_ref(move || {
            QueryRunner::builder(client, |task| yew::platform::spawn_local(task))
                .normalize(move |raw| latest_normalize.borrow().emit(raw))
                .on_change(move || force_update.force_update())
                .build()
        })
    };

    // Compare and fetch after each render, like an effect without deps.
    {
        let runner = runner.clone();
        use_effect(move || {
            runner.borrow_mut().sync(&params);
        });
    }

    {
        let liveness = runner.borrow().liveness();
        use_effect_with((), move |_| move || liveness.teardown());
    }

    runner.borrow().state()
}
