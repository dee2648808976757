pub mod query;

pub use query::{Query, QueryProps};
