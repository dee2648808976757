use serde_json::Value;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::components::Query;
use crate::hooks::QueryState;

const VIEWER_QUERY: &str = "{ viewer { login name } }";

/// The signed-in user, resolved from the configured token.
#[function_component]
pub fn ViewerPage() -> Html {
    let normalize = Callback::from(|raw: Value| raw["viewer"].clone());
    let render = Callback::from(|state: QueryState| {
        if state.is_initial_loading() {
            return html! {
                <p class="text-neutral-600 dark:text-neutral-400">{"Loading viewer..."}</p>
            };
        }
        if let Some(error) = &state.error {
            return html! {
                <div class="p-4 rounded-md bg-red-50 dark:bg-red-900/20 border border-red-200 dark:border-red-800">
                    <p class="text-sm text-red-700 dark:text-red-400">
                        {format!("Error loading viewer: {error}")}
                    </p>
                </div>
            };
        }
        match state.data {
            Some(viewer) => {
                let login = viewer["login"].as_str().unwrap_or_default().to_string();
                html! {
                    <div class="space-y-2">
                        <h1 class="text-2xl font-bold">{format!("Signed in as {login}")}</h1>
                        <Link<Route> to={Route::User { login: login.clone() }}
                            classes={classes!("text-blue-600", "dark:text-blue-400", "underline")}>
                            {"View public profile"}
                        </Link<Route>>
                    </div>
                }
            }
            None => html! {},
        }
    });

    html! {
        <Query query={VIEWER_QUERY} normalize={normalize} children={render} />
    }
}
