use github_client::Variables;
use query::QueryParams;
use serde_json::Value;
use yew::prelude::*;

use crate::hooks::{QueryState, use_query};

/// Runs a GraphQL query and hands its state to `children` for rendering.
///
/// # Example
///
/// ```rust,ignore
/// html! {
///     <Query
///         query="{ viewer { login } }"
///         normalize={Callback::from(|raw: Value| raw["viewer"].clone())}
///         children={Callback::from(|state: QueryState| match state.data {
///             Some(viewer) => html! { <p>{viewer["login"].to_string()}</p> },
///             None => html! { <p>{"Loading..."}</p> },
///         })}
///     />
/// }
/// ```
#[derive(Properties, PartialEq)]
pub struct QueryProps {
    pub query: AttrValue,
    #[prop_or_default]
    pub variables: Variables,
    /// Renders the current state.
    pub children: Callback<QueryState, Html>,
    /// Applied to every successful response. Defaults to identity.
    #[prop_or_default]
    pub normalize: Option<Callback<Value, Value>>,
}

#[function_component]
pub fn Query(props: &QueryProps) -> Html {
    let normalize = props
        .normalize
        .clone()
        .unwrap_or_else(|| Callback::from(|raw: Value| raw));
    let params = QueryParams::new(props.query.as_str(), props.variables.clone());

    let state = use_query(params, normalize);

    props.children.emit(state)
}
