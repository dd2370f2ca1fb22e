//! Demo logger: renders a ChainedError through tracing

use chainerr_outcome::ChainedError;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Log a failure with its formatted chain and the well-known annotations
pub fn report(error: &ChainedError) {
    let user_id = error.get("user_id").map(Value::to_string);
    let operation = error.get_as::<String>("operation");

    tracing::error!(
        user_id = user_id.as_deref().unwrap_or("-"),
        operation = operation.as_deref().unwrap_or("-"),
        "{}",
        error.fmt_err(None)
    );
}

/// Every annotation visible from `error`, resolved the same way `get` does
pub fn annotations(error: &ChainedError) -> Map<String, Value> {
    let keys: BTreeSet<&str> = error
        .chain()
        .filter_map(|link| link.context())
        .flat_map(|store| store.keys().map(String::as_str))
        .collect();

    keys.into_iter()
        .filter_map(|key| error.get(key).map(|value| (key.to_string(), value.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainerr_outcome::err;
    use serde_json::json;

    #[test]
    fn test_annotations_deepest_wins() {
        let inner = ChainedError::new("query failed")
            .with_value("operation", "select")
            .with_value("table", "users");
        let outer = err("failed to load user", inner)
            .with_value("operation", "lookup")
            .with_value("user_id", 7);

        let map = annotations(&outer);
        assert_eq!(map.get("operation"), Some(&json!("select")));
        assert_eq!(map.get("table"), Some(&json!("users")));
        assert_eq!(map.get("user_id"), Some(&json!(7)));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_annotations_empty() {
        assert!(annotations(&err("plain", "text")).is_empty());
    }

    #[test]
    fn test_report_does_not_panic_without_subscriber() {
        report(&ChainedError::new("nobody listening").with_value("user_id", 1));
    }
}
