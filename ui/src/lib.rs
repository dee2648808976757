use github_client::{ClientConfig, GitHubClient};
use yew::prelude::*;
use yew_router::prelude::*;

pub mod components;
pub mod contexts;
pub mod hooks;
mod logs;
mod pages;

use contexts::{ClientContext, ClientProvider};
use pages::{NotFoundPage, UserPage, ViewerPage};

/// Client configuration, fixed at build time.
///
/// `GITHUB_GRAPHQL_URL` overrides the public endpoint and `GITHUB_TOKEN`
/// authenticates requests.
pub fn client_config() -> ClientConfig {
    ClientConfig::from_values(
        option_env!("GITHUB_GRAPHQL_URL"),
        option_env!("GITHUB_TOKEN"),
    )
}

#[function_component]
pub fn App() -> Html {
    logs::init_logging();
    let client = use_memo((), |_| GitHubClient::new(client_config()));

    html! {
        <ClientProvider client={ClientContext(client)}>
            <BrowserRouter>
                <div class="min-h-screen bg-white dark:bg-gray-900 text-gray-900 dark:text-gray-100 transition-colors">
                    <Switch<Route> render={switch} />
                </div>
            </BrowserRouter>
        </ClientProvider>
    }
}

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Viewer,
    #[at("/users/:login")]
    User { login: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    let page = match routes {
        Route::Viewer => html! { <ViewerPage /> },
        Route::User { login } => html! { <UserPage login={login} /> },
        Route::NotFound => html! { <NotFoundPage /> },
    };

    html! {
        <main class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
            {page}
        </main>
    }
}
