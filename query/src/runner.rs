use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use github_client::GraphQLClient;
use serde_json::Value;

use crate::{FetchState, QueryParams, StateUpdate};

/// Runs a request continuation on the host's task queue.
pub type Spawner = Rc<dyn Fn(LocalBoxFuture<'static, ()>)>;

/// Turns the raw response into whatever the caller wants to render.
pub type Normalize<T> = Rc<dyn Fn(Value) -> T>;

/// What to do with a response whose params have since been replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StaleResponses {
    /// Drop it. Only the most recently issued request may update state.
    #[default]
    Ignore,
    /// Apply it. Whichever request resolves last wins.
    Apply,
}

/// Whether the owning component instance still exists.
///
/// Clones share the flag. Once torn down it never comes back.
#[derive(Debug, Clone)]
pub struct Liveness(Rc<Cell<bool>>);

impl Default for Liveness {
    fn default() -> Self {
        Self(Rc::new(Cell::new(true)))
    }
}

impl Liveness {
    pub fn is_alive(&self) -> bool {
        self.0.get()
    }

    pub fn teardown(&self) {
        self.0.set(false);
    }
}

/// State reachable from in-flight request continuations.
struct Shared<T, E> {
    state: RefCell<FetchState<T, E>>,
    liveness: Liveness,
    generation: Cell<u64>,
    on_change: RefCell<Option<Rc<dyn Fn()>>>,
}

impl<T, E> Shared<T, E> {
    fn new(on_change: Option<Rc<dyn Fn()>>) -> Self {
        Self {
            state: RefCell::new(FetchState::default()),
            liveness: Liveness::default(),
            generation: Cell::new(0),
            on_change: RefCell::new(on_change),
        }
    }

    fn apply(&self, update: StateUpdate<T, E>) {
        self.state.borrow_mut().merge(update);
        let on_change = self.on_change.borrow().clone();
        if let Some(on_change) = on_change {
            on_change();
        }
    }

    fn resolve(
        &self,
        generation: u64,
        policy: StaleResponses,
        update: StateUpdate<T, E>,
    ) {
        if !self.liveness.is_alive() {
            tracing::debug!(generation, "query owner gone, dropping response");
            return;
        }
        if policy == StaleResponses::Ignore
            && generation != self.generation.get()
        {
            tracing::debug!(
                generation,
                current = self.generation.get(),
                "dropping response for superseded query"
            );
            return;
        }
        tracing::debug!(generation, "query resolved");
        self.apply(update);
    }
}

/// Configures a [`QueryRunner`] before it sees any params.
pub struct QueryRunnerBuilder<C, T> {
    client: Rc<C>,
    spawner: Spawner,
    normalize: Normalize<T>,
    stale_responses: StaleResponses,
    on_change: Option<Rc<dyn Fn()>>,
}

impl<C, T> QueryRunnerBuilder<C, T>
where
    C: GraphQLClient + 'static,
    C::Error: 'static,
    T: 'static,
{
    /// Replace the normalizer. The default stores raw responses unchanged.
    pub fn normalize<U: 'static>(
        self,
        normalize: impl Fn(Value) -> U + 'static,
    ) -> QueryRunnerBuilder<C, U> {
        QueryRunnerBuilder {
            client: self.client,
            spawner: self.spawner,
            normalize: Rc::new(normalize),
            stale_responses: self.stale_responses,
            on_change: self.on_change,
        }
    }

    pub fn stale_responses(mut self, policy: StaleResponses) -> Self {
        self.stale_responses = policy;
        self
    }

    /// Called after every state change, e.g. to schedule a re-render.
    pub fn on_change(mut self, on_change: impl Fn() + 'static) -> Self {
        self.on_change = Some(Rc::new(on_change));
        self
    }

    pub fn build(self) -> QueryRunner<C, T> {
        QueryRunner {
            client: self.client,
            spawner: self.spawner,
            normalize: self.normalize,
            stale_responses: self.stale_responses,
            shared: Rc::new(Shared::new(self.on_change)),
            previous: None,
        }
    }
}

/// Tracks one component's query: issues a request whenever the params
/// change and publishes loading/success/failure as a [`FetchState`].
pub struct QueryRunner<C: GraphQLClient, T> {
    client: Rc<C>,
    spawner: Spawner,
    normalize: Normalize<T>,
    stale_responses: StaleResponses,
    shared: Rc<Shared<T, C::Error>>,
    previous: Option<QueryParams>,
}

impl<C> QueryRunner<C, Value>
where
    C: GraphQLClient + 'static,
    C::Error: 'static,
{
    /// A runner that stores raw responses unchanged.
    pub fn new(
        client: Rc<C>,
        spawner: impl Fn(LocalBoxFuture<'static, ()>) + 'static,
    ) -> Self {
        Self::builder(client, spawner).build()
    }

    pub fn builder(
        client: Rc<C>,
        spawner: impl Fn(LocalBoxFuture<'static, ()>) + 'static,
    ) -> QueryRunnerBuilder<C, Value> {
        QueryRunnerBuilder {
            client,
            spawner: Rc::new(spawner),
            normalize: Rc::new(|raw: Value| raw),
            stale_responses: StaleResponses::default(),
            on_change: None,
        }
    }
}

impl<C, T> QueryRunner<C, T>
where
    C: GraphQLClient + 'static,
    C::Error: 'static,
    T: 'static,
{
    /// Replace the change listener. Requests already in flight report to the
    /// new one.
    pub fn set_on_change(&self, on_change: impl Fn() + 'static) {
        *self.shared.on_change.borrow_mut() = Some(Rc::new(on_change));
    }

    /// Fetch if `params` differ from those of the previous render, then
    /// render the current state through `children`.
    pub fn render<R>(
        &mut self,
        params: &QueryParams,
        children: impl FnOnce(&FetchState<T, C::Error>) -> R,
    ) -> R {
        self.sync(params);
        let state = self.shared.state.borrow();
        children(&state)
    }

    /// Issue a request if `params` differ from those seen last time.
    ///
    /// Returns whether a request went out.
    pub fn sync(&mut self, params: &QueryParams) -> bool {
        if self.previous.as_ref() == Some(params) {
            return false;
        }
        self.previous = Some(params.clone());

        if !self.shared.liveness.is_alive() {
            tracing::debug!("query owner gone, not fetching");
            return false;
        }

        let generation = self.shared.generation.get() + 1;
        self.shared.generation.set(generation);
        tracing::debug!(generation, query = %params.query, "issuing query");

        self.shared.apply(StateUpdate::started());
        let request = self.client.request(&params.query, &params.variables);

        let shared = Rc::clone(&self.shared);
        let normalize = Rc::clone(&self.normalize);
        let policy = self.stale_responses;
        (self.spawner)(
            async move {
                let update = match request.await {
                    Ok(raw) => StateUpdate::succeeded(normalize(raw)),
                    Err(error) => StateUpdate::failed(error),
                };
                shared.resolve(generation, policy, update);
            }
            .boxed_local(),
        );

        true
    }

    /// Borrow the current state.
    pub fn state_ref(&self) -> Ref<'_, FetchState<T, C::Error>> {
        self.shared.state.borrow()
    }

    /// The flag checked before every asynchronous state change.
    pub fn liveness(&self) -> Liveness {
        self.shared.liveness.clone()
    }

    /// Stop publishing state. Requests already in flight still complete but
    /// their outcomes are discarded.
    pub fn teardown(&self) {
        self.shared.liveness.teardown();
    }
}

impl<C, T> QueryRunner<C, T>
where
    C: GraphQLClient + 'static,
    C::Error: Clone + 'static,
    T: Clone + 'static,
{
    pub fn state(&self) -> FetchState<T, C::Error> {
        self.shared.state.borrow().clone()
    }
}

impl<C: GraphQLClient, T> Drop for QueryRunner<C, T> {
    fn drop(&mut self) {
        self.shared.liveness.teardown();
    }
}
