use std::rc::Rc;

use github_client::GitHubClient;
use yew::prelude::*;

/// The GraphQL client shared by every query below a [`ClientProvider`].
#[derive(Clone)]
pub struct ClientContext(pub Rc<GitHubClient>);

impl PartialEq for ClientContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Properties, PartialEq)]
pub struct ClientProviderProps {
    pub client: ClientContext,
    pub children: Children,
}

#[function_component]
pub fn ClientProvider(props: &ClientProviderProps) -> Html {
    html! {
        <ContextProvider<ClientContext> context={props.client.clone()}>
            {props.children.clone()}
        </ContextProvider<ClientContext>>
    }
}

#[hook]
pub fn use_client() -> Rc<GitHubClient> {
    use_context::<ClientContext>()
        .expect("use_client must be used within a ClientProvider")
        .0
}
