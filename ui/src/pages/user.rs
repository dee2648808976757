use github_client::Variables;
use query::QueryParams;
use serde_json::{Value, json};
use yew::prelude::*;

use crate::hooks::use_query;

const USER_QUERY: &str = r"
    query($login: String!) {
      user(login: $login) {
        login
        name
        bio
        followers { totalCount }
      }
    }
";

#[derive(Properties, PartialEq)]
pub struct UserPageProps {
    pub login: AttrValue,
}

/// A public profile. Navigating to another login re-runs the query; staying
/// on the same one does not.
#[function_component]
pub fn UserPage(props: &UserPageProps) -> Html {
    let mut variables = Variables::new();
    variables.insert("login".into(), json!(props.login.as_str()));

    let state = use_query(
        QueryParams::new(USER_QUERY, variables),
        Callback::from(|raw: Value| raw["user"].clone()),
    );

    let refreshing = state.fetching && state.loaded;

    html! {
        <div class="space-y-2">
            if state.is_initial_loading() {
                <p class="text-neutral-600 dark:text-neutral-400">
                    {format!("Loading {}...", props.login)}
                </p>
            }
            if let Some(error) = &state.error {
                <p class="text-sm text-red-700 dark:text-red-400">
                    {format!("Error loading {}: {error}", props.login)}
                </p>
            }
            if let Some(user) = &state.data {
                <h1 class="text-2xl font-bold">
                    {user["name"].as_str().unwrap_or(props.login.as_str()).to_string()}
                </h1>
                <p>{user["bio"].as_str().unwrap_or_default().to_string()}</p>
                <p class="text-sm">
                    {format!("{} followers", user["followers"]["totalCount"])}
                </p>
            }
            if refreshing {
                <span class="text-xs text-neutral-500">{"Refreshing..."}</span>
            }
        </div>
    }
}
