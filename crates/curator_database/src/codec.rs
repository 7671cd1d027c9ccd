//! Serialization guard for section payloads.
//!
//! Callers sometimes pre-serialize section values, so a string payload may
//! already be encoded JSON. Storing such a string with a fresh encode would
//! wrap it in an extra layer of quoting; the guard stores it verbatim
//! instead, so every column holds exactly-once-encoded text.

use crate::DatabaseResult;
use serde_json::Value;

/// Encode a section value for storage, exactly once.
///
/// A string that parses as JSON is stored verbatim; a string that does not
/// parse is treated as an opaque string and freshly encoded; any other value
/// is freshly encoded.
///
/// # Examples
///
/// ```
/// use curator_database::codec::encode_value;
/// use serde_json::json;
///
/// let pre_encoded = json!("{\"subject_id\":\"4528\"}");
/// assert_eq!(encode_value(&pre_encoded).unwrap(), "{\"subject_id\":\"4528\"}");
///
/// let structured = json!({"subject_id": "4528"});
/// assert_eq!(encode_value(&structured).unwrap(), "{\"subject_id\":\"4528\"}");
/// ```
pub fn encode_value(value: &Value) -> DatabaseResult<String> {
    if let Value::String(text) = value
        && serde_json::from_str::<Value>(text).is_ok()
    {
        return Ok(text.clone());
    }
    Ok(serde_json::to_string(value)?)
}

/// Decode stored text, best-effort.
///
/// Malformed stored text is passed through as a raw string rather than
/// failing the whole record read, so one corrupt column cannot block a
/// listing.
pub fn decode_text(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
