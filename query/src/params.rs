use github_client::Variables;
use serde_json::Value;

/// The inputs that decide whether a new request is needed.
///
/// Two params are equal when their query strings match and their variables
/// are structurally equal. Object key order is irrelevant and numbers
/// compare by value, so `1` and `1.0` are the same variable.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    pub query: String,
    pub variables: Variables,
}

impl QueryParams {
    pub fn new(query: impl Into<String>, variables: Variables) -> Self {
        Self {
            query: query.into(),
            variables,
        }
    }

    /// A query with no variables. Absent variables and an empty mapping are
    /// the same thing.
    pub fn from_query(query: impl Into<String>) -> Self {
        Self::new(query, Variables::new())
    }
}

impl PartialEq for QueryParams {
    fn eq(&self, other: &Self) -> bool {
        self.query == other.query
            && maps_equal(&self.variables, &other.variables)
    }
}

fn maps_equal(a: &Variables, b: &Variables) -> bool {
    a.len() == b.len()
        && a.iter().all(|(key, value)| {
            b.get(key).is_some_and(|other| values_equal(value, other))
        })
}

/// Deep structural equality between two JSON values.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if x.is_f64() || y.is_f64() {
                x.as_f64() == y.as_f64()
            } else {
                x == y
            }
        }
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len()
                && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(x), Value::Object(y)) => maps_equal(x, y),
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vars(value: Value) -> Variables {
        match value {
            Value::Object(map) => map,
            _ => panic!("variables must be an object"),
        }
    }

    #[test]
    fn same_query_and_variables_are_equal() {
        let a = QueryParams::new(
            "query($login: String!) { user(login: $login) { name } }",
            vars(json!({"login": "octocat", "first": 10})),
        );
        let b = QueryParams::new(
            "query($login: String!) { user(login: $login) { name } }",
            vars(json!({"first": 10, "login": "octocat"})),
        );
        assert_eq!(a, b);
    }

    #[test]
    fn fresh_copies_of_nested_values_are_equal() {
        let make = || {
            QueryParams::new(
                "{ search }",
                vars(json!({"filter": {"labels": ["bug", "ui"], "open": true}})),
            )
        };
        assert_eq!(make(), make());
    }

    #[test]
    fn different_query_is_unequal() {
        assert_ne!(
            QueryParams::from_query("{ viewer { login } }"),
            QueryParams::from_query("{ viewer { name } }"),
        );
    }

    #[test]
    fn nested_difference_is_unequal() {
        let a = QueryParams::new("{ q }", vars(json!({"f": {"labels": ["bug"]}})));
        let b = QueryParams::new("{ q }", vars(json!({"f": {"labels": ["ui"]}})));
        assert_ne!(a, b);
    }

    #[test]
    fn array_order_matters() {
        assert!(!values_equal(&json!([1, 2]), &json!([2, 1])));
    }

    #[test]
    fn extra_key_is_unequal() {
        let a = QueryParams::new("{ q }", vars(json!({"a": 1})));
        let b = QueryParams::new("{ q }", vars(json!({"a": 1, "b": null})));
        assert_ne!(a, b);
        assert_ne!(b, a);
    }

    #[test]
    fn integers_and_floats_compare_by_value() {
        assert!(values_equal(&json!(1), &json!(1.0)));
        assert!(!values_equal(&json!(1), &json!(1.5)));
        assert!(!values_equal(&json!(1), &json!("1")));
    }
}
