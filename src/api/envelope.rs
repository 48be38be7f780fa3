//! Normalizing adapter for the backend's response envelope.
//!
//! Endpoints wrap their payload as `{"success": bool, "message": str,
//! "data": ...}`, but not consistently: some return the payload at the top
//! level, some under `data`, and `data` may be null for bodyless
//! operations. All unwrapping happens here so the rest of the client works
//! with plain typed payloads.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;

/// Extract the typed payload from a response body.
///
/// A `success: false` envelope becomes [`ApiError::Api`] carrying the
/// backend message. Otherwise the payload is taken from `data` when the
/// field is present and non-null, and from the whole body when it is not.
pub fn unwrap_payload<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    let payload = normalize(body)?;
    serde_json::from_value(payload).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Check the envelope status and strip the wrapper, without deserializing
/// into a concrete type. Used by mutations that carry no payload.
pub fn check_status(body: Value) -> Result<(), ApiError> {
    normalize(body).map(|_| ())
}

fn normalize(body: Value) -> Result<Value, ApiError> {
    if let Value::Object(ref map) = body {
        if let Some(Value::Bool(false)) = map.get("success") {
            let message = map
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            return Err(ApiError::Api { message });
        }
        match map.get("data") {
            Some(Value::Null) | None => {}
            Some(data) => return Ok(data.clone()),
        }
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize, Debug)]
    struct Users {
        users: Vec<String>,
    }

    #[test]
    fn payload_under_data() {
        let body = json!({"success": true, "data": {"users": ["a", "b"]}});
        let users: Users = unwrap_payload(body).unwrap();
        assert_eq!(users.users, vec!["a", "b"]);
    }

    #[test]
    fn payload_at_top_level() {
        let body = json!({"users": ["a"]});
        let users: Users = unwrap_payload(body).unwrap();
        assert_eq!(users.users, vec!["a"]);
    }

    #[test]
    fn null_data_falls_back_to_top_level() {
        let body = json!({"success": true, "data": null, "users": []});
        let users: Users = unwrap_payload(body).unwrap();
        assert!(users.users.is_empty());
    }

    #[test]
    fn failure_envelope_carries_backend_message() {
        let body = json!({"success": false, "message": "kb not found"});
        let err = unwrap_payload::<Users>(body).unwrap_err();
        match err {
            ApiError::Api { message } => assert_eq!(message, "kb not found"),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn failure_envelope_without_message() {
        let body = json!({"success": false});
        let err = check_status(body).unwrap_err();
        match err {
            ApiError::Api { message } => assert!(message.is_empty()),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn status_check_accepts_bodyless_success() {
        assert!(check_status(json!({"success": true, "data": null})).is_ok());
        assert!(check_status(json!({})).is_ok());
    }

    #[test]
    fn mismatched_payload_is_a_decode_error() {
        let body = json!({"data": {"users": "not-a-list"}});
        let err = unwrap_payload::<Users>(body).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
