pub mod use_query;

pub use use_query::{QueryState, use_query};
