//! Redaction masking
//!
//! Replaces values at dot-notation paths (array segments as `[n]`) with a
//! fixed placeholder. Operates on a clone; the stored record is never
//! mutated. Paths that do not resolve are ignored.

use serde_json::Value;

/// Fixed placeholder shown in place of every redacted value
pub const MASK_PLACEHOLDER: &str = "***";

/// Clone `value` and mask every resolvable path in `paths`.
pub fn mask_json(value: &Value, paths: &[String]) -> Value {
    let mut cloned = value.clone();
    for path in paths {
        mask_path(&mut cloned, path);
    }
    cloned
}

fn mask_path(value: &mut Value, path: &str) {
    if path.is_empty() {
        return;
    }
    let segments: Vec<&str> = path.split('.').collect();
    let (last, parents) = match segments.split_last() {
        Some(split) => split,
        None => return,
    };

    let mut current = value;
    for segment in parents {
        current = match descend(current, segment) {
            Some(next) => next,
            None => return,
        };
    }

    if let Some(target) = descend(current, last) {
        *target = Value::String(MASK_PLACEHOLDER.to_string());
    }
}

/// Resolve one path segment: an object key, or `[n]` for an array index.
fn descend<'a>(value: &'a mut Value, segment: &str) -> Option<&'a mut Value> {
    if let Some(index) = array_index(segment) {
        value.as_array_mut()?.get_mut(index)
    } else {
        value.as_object_mut()?.get_mut(segment)
    }
}

fn array_index(segment: &str) -> Option<usize> {
    segment
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .and_then(|s| s.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_masks_nested_path() {
        let value = json!({ "payer": { "ip": { "address": "203.0.113.7" } } });
        let masked = mask_json(&value, &["payer.ip.address".to_string()]);
        assert_eq!(masked["payer"]["ip"]["address"], MASK_PLACEHOLDER);
        // The literal never appears anywhere in the rendered output.
        assert!(!masked.to_string().contains("203.0.113.7"));
        // The source is untouched.
        assert_eq!(value["payer"]["ip"]["address"], "203.0.113.7");
    }

    #[test]
    fn test_masks_array_element() {
        let value = json!({ "cards": ["4111111111111111", "tok_abc"] });
        let masked = mask_json(&value, &["cards.[0]".to_string()]);
        assert_eq!(masked["cards"][0], MASK_PLACEHOLDER);
        assert_eq!(masked["cards"][1], "tok_abc");
    }

    #[test]
    fn test_missing_path_is_noop() {
        let value = json!({ "a": 1 });
        let masked = mask_json(&value, &["b.c".to_string()]);
        assert_eq!(masked, value);
    }

    #[test]
    fn test_top_level_key() {
        let value = json!({ "ssn": "123-45-6789", "tier": "gold" });
        let masked = mask_json(&value, &["ssn".to_string()]);
        assert_eq!(masked["ssn"], MASK_PLACEHOLDER);
        assert_eq!(masked["tier"], "gold");
    }
}
