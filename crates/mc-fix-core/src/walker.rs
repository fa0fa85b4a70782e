//! Depth-first traversal of a JSON document with a per-field hook.

use serde_json::Value;

/// Maximum nesting depth the walker descends to.
///
/// Documents coming from text are bounded earlier: `serde_json` refuses
/// input nested deeper than 128 levels, and [`crate::normalize`] passes
/// such input through unchanged. This limit covers trees built in code.
pub const MAX_DEPTH: usize = 512;

/// Intercepts object fields during a [`walk`].
pub trait FieldHook {
    /// Called for every field of every object reached by the walk, before
    /// the walker descends into it.
    ///
    /// Return `Some(changed)` to take over the field (the walker will not
    /// recurse into it), or `None` to let the walker recurse generically.
    fn visit_field(&mut self, key: &str, value: &mut Value, depth: usize) -> Option<bool>;
}

/// Walk `value` depth-first, offering each object field to `hook`.
///
/// Returns whether anything in the tree was changed. Primitives end the
/// recursion; object fields and array elements are visited in order.
pub fn walk<H: FieldHook + ?Sized>(value: &mut Value, hook: &mut H, depth: usize) -> bool {
    if depth > MAX_DEPTH {
        return false;
    }

    match value {
        Value::Object(fields) => {
            let mut changed = false;
            for (key, child) in fields.iter_mut() {
                changed |= match hook.visit_field(key, child, depth) {
                    Some(hooked) => hooked,
                    None => walk(child, hook, depth + 1),
                };
            }
            changed
        }
        Value::Array(items) => {
            let mut changed = false;
            for item in items.iter_mut() {
                changed |= walk(item, hook, depth + 1);
            }
            changed
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Upper-cases every string stored under `key`.
    struct Shout {
        key: &'static str,
        seen: usize,
    }

    impl FieldHook for Shout {
        fn visit_field(&mut self, key: &str, value: &mut Value, _depth: usize) -> Option<bool> {
            if key != self.key {
                return None;
            }
            self.seen += 1;
            match value {
                Value::String(s) => {
                    let upper = s.to_uppercase();
                    let changed = upper != *s;
                    *s = upper;
                    Some(changed)
                }
                _ => Some(false),
            }
        }
    }

    #[test]
    fn hook_reaches_nested_fields() {
        let mut doc = json!({
            "text": "a",
            "extra": [{ "text": "b" }, { "nested": { "text": "c" } }, 5, null]
        });
        let mut hook = Shout { key: "text", seen: 0 };
        assert!(walk(&mut doc, &mut hook, 0));
        assert_eq!(hook.seen, 3);
        assert_eq!(
            doc,
            json!({
                "text": "A",
                "extra": [{ "text": "B" }, { "nested": { "text": "C" } }, 5, null]
            })
        );
    }

    #[test]
    fn hooked_field_is_not_walked_again() {
        // The hook claims "text" but leaves non-strings untouched, so an
        // object under "text" must not be recursed into.
        let mut doc = json!({ "text": { "text": "inner" } });
        let mut hook = Shout { key: "text", seen: 0 };
        assert!(!walk(&mut doc, &mut hook, 0));
        assert_eq!(hook.seen, 1);
        assert_eq!(doc, json!({ "text": { "text": "inner" } }));
    }

    #[test]
    fn primitives_report_unchanged() {
        let mut hook = Shout { key: "text", seen: 0 };
        for mut doc in [json!(null), json!(true), json!(1.5), json!("text")] {
            assert!(!walk(&mut doc, &mut hook, 0));
        }
        assert_eq!(hook.seen, 0);
    }

    #[test]
    fn stops_past_max_depth() {
        let mut doc = json!({ "text": "deep" });
        for _ in 0..MAX_DEPTH + 1 {
            doc = Value::Array(vec![doc]);
        }
        let mut hook = Shout { key: "text", seen: 0 };
        assert!(!walk(&mut doc, &mut hook, 0));
        assert_eq!(hook.seen, 0);
    }
}
