//! Fetch-on-change state tracking for a single GraphQL query.
//!
//! A [`QueryRunner`] is owned by one UI component instance. Every render
//! hands it the current [`QueryParams`]; when those differ (structurally)
//! from the previous render it issues one request and publishes the outcome
//! as a [`FetchState`].

mod fetch_state;
mod params;
mod runner;

pub use fetch_state::{FetchState, StateUpdate};
pub use params::{QueryParams, values_equal};
pub use runner::{
    Liveness, Normalize, QueryRunner, QueryRunnerBuilder, Spawner, StaleResponses,
};
