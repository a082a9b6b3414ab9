//! Custom Tera filters available to all layouts.

use std::collections::HashMap;

use tera::{Tera, Value};

pub(super) fn register(tera: &mut Tera) {
    tera.register_filter("limit", limit);
}

/// Slice an array starting at `start` (default 0).
///
/// Returns one extra item past `count` so templates can detect whether
/// more entries follow.
fn limit(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let arr = value
        .as_array()
        .ok_or_else(|| tera::Error::msg("limit filter expects an array"))?;

    let count = args
        .get("count")
        .and_then(Value::as_u64)
        .ok_or_else(|| tera::Error::msg("limit filter needs a numeric `count` argument"))?
        as usize;

    let start = args.get("start").and_then(Value::as_u64).unwrap_or(0) as usize;

    let mut out = Vec::new();
    let mut pushed = 0;
    let mut index = start;
    while index < arr.len() && pushed < count + 1 {
        out.push(arr[index].clone());
        pushed += 1;
        index += 1;
    }

    Ok(Value::Array(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_limit_returns_one_extra() {
        let value = json!([1, 2, 3, 4, 5]);
        let result = limit(&value, &args(&[("count", json!(2))])).unwrap();
        assert_eq!(result, json!([1, 2, 3]));
    }

    #[test]
    fn test_limit_covers_whole_array() {
        let value = json!([1, 2]);
        let result = limit(&value, &args(&[("count", json!(10))])).unwrap();
        assert_eq!(result, json!([1, 2]));
    }

    #[test]
    fn test_limit_with_start() {
        let value = json!([1, 2, 3, 4, 5]);
        let result = limit(&value, &args(&[("count", json!(2)), ("start", json!(2))])).unwrap();
        assert_eq!(result, json!([3, 4, 5]));
    }

    #[test]
    fn test_limit_start_beyond_len() {
        let value = json!([1, 2]);
        let result = limit(&value, &args(&[("count", json!(2)), ("start", json!(9))])).unwrap();
        assert_eq!(result, json!([]));
    }

    #[test]
    fn test_limit_rejects_non_array() {
        let value = json!("not an array");
        assert!(limit(&value, &args(&[("count", json!(2))])).is_err());
    }

    #[test]
    fn test_limit_requires_count_arg() {
        let value = json!([1, 2, 3]);
        assert!(limit(&value, &args(&[])).is_err());
    }
}
