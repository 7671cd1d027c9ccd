//! The field merge policy.

use serde_json::Value;

/// Merge an incoming section value into an existing one.
///
/// When both values are mappings the result is a SHALLOW union: incoming
/// top-level keys overwrite existing ones of the same name, existing keys
/// absent from the incoming value are kept. Nested sub-structures are NOT
/// recursively merged: a new value for a nested key replaces the old nested
/// value wholesale. This looks like a deep merge on single-level data and is
/// easy to mistake for one; the shallow semantics is deliberate and must be
/// preserved for compatibility.
///
/// When either side is not a mapping, the incoming value replaces the
/// existing one.
///
/// # Examples
///
/// ```
/// use curator_capture::merge_section;
/// use serde_json::json;
///
/// let existing = json!({"subject_id": "4528", "sex": "Male"});
/// let incoming = json!({"sex": "Female"});
/// assert_eq!(
///     merge_section(Some(&existing), &incoming),
///     json!({"subject_id": "4528", "sex": "Female"})
/// );
/// ```
pub fn merge_section(existing: Option<&Value>, incoming: &Value) -> Value {
    match (existing, incoming) {
        (Some(Value::Object(existing)), Value::Object(incoming)) => {
            let mut merged = existing.clone();
            for (key, value) in incoming {
                merged.insert(key.clone(), value.clone());
            }
            Value::Object(merged)
        }
        _ => incoming.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_union_keeps_existing_keys() {
        let existing = json!({"subject_id": "553429", "sex": "Male"});
        let incoming = json!({"species": {"name": "Mus musculus"}});
        let merged = merge_section(Some(&existing), &incoming);
        assert_eq!(
            merged,
            json!({
                "subject_id": "553429",
                "sex": "Male",
                "species": {"name": "Mus musculus"},
            })
        );
    }

    #[test]
    fn test_incoming_wins_on_same_key() {
        let existing = json!({"sex": "Male"});
        let incoming = json!({"sex": "Female"});
        assert_eq!(
            merge_section(Some(&existing), &incoming),
            json!({"sex": "Female"})
        );
    }

    #[test]
    fn test_nested_values_are_replaced_not_merged() {
        // The shallow policy replaces a nested structure wholesale; "strain"
        // does not survive. A deep merge here would be a behavior change.
        let existing = json!({"species": {"name": "Mus musculus", "strain": "C57BL/6J"}});
        let incoming = json!({"species": {"name": "Homo sapiens"}});
        assert_eq!(
            merge_section(Some(&existing), &incoming),
            json!({"species": {"name": "Homo sapiens"}})
        );
    }

    #[test]
    fn test_non_mapping_existing_is_replaced() {
        let existing = Value::String("{broken".to_string());
        let incoming = json!({"subject_id": "553429"});
        assert_eq!(merge_section(Some(&existing), &incoming), incoming);
    }

    #[test]
    fn test_no_existing_value() {
        let incoming = json!({"subject_id": "553429"});
        assert_eq!(merge_section(None, &incoming), incoming);
    }
}
