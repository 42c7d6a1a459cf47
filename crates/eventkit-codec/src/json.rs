//! JSON codec.

use eventkit_core::CodecError;
use serde_json::Value;

pub const CONTENT_TYPE: &str = "application/json";

/// Decode a JSON document.
///
/// Empty input decodes to `null`. A JSON string whose content is itself an
/// object or array (double-encoded payload) is unwrapped one level.
pub fn decode(source: &[u8]) -> Result<Value, CodecError> {
    if source.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    let value: Value = serde_json::from_slice(source)?;
    if let Value::String(inner) = &value {
        let trimmed = inner.trim_start();
        if trimmed.starts_with('{') || trimmed.starts_with('[') {
            return Ok(serde_json::from_str(inner)?);
        }
    }
    Ok(value)
}

pub fn encode(source: &Value) -> Result<Vec<u8>, CodecError> {
    Ok(serde_json::to_vec(source)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn round_trip() {
        let v = json!({"id": 7, "tags": ["a", "b"], "nested": {"ok": true}});
        assert_eq!(decode(&encode(&v).unwrap()).unwrap(), v);
    }

    #[test]
    fn empty_is_null() {
        assert_eq!(decode(b"").unwrap(), Value::Null);
        assert_eq!(decode(b"  \n").unwrap(), Value::Null);
    }

    #[test]
    fn double_encoded_object_is_unwrapped() {
        let v = decode(br#""{\"a\":1}""#).unwrap();
        assert_eq!(v, json!({"a": 1}));
    }

    #[test]
    fn plain_string_stays_a_string() {
        assert_eq!(decode(br#""hello""#).unwrap(), json!("hello"));
    }

    #[test]
    fn malformed_input_is_a_json_error() {
        assert!(matches!(decode(b"{oops").unwrap_err(), CodecError::Json(_)));
    }
}
