use serde::{Deserialize, Serialize};

use crate::Variables;

/// Body of a GraphQL-over-HTTP POST.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQLRequest {
    pub query: String,
    #[serde(default, skip_serializing_if = "Variables::is_empty")]
    pub variables: Variables,
}

impl GraphQLRequest {
    pub fn new(query: impl Into<String>, variables: Variables) -> Self {
        Self {
            query: query.into(),
            variables,
        }
    }
}
