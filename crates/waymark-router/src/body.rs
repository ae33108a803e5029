//! Request body decoding.

use serde_json::Value;

use crate::error::DecodeError;
use crate::request::Request;

/// Best-effort request body decoder.
///
/// An external collaborator from the router's point of view: the dispatcher
/// never surfaces a decode failure, it substitutes an empty object.
pub trait BodyDecoder: Send + Sync {
    /// Decodes the request payload into a structured value.
    fn decode(&self, request: &Request) -> Result<Value, DecodeError>;
}

/// The default decoder: parses the raw body bytes as JSON.
///
/// An empty body is a decode failure like any other malformed payload; the
/// dispatcher turns both into `{}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl BodyDecoder for JsonDecoder {
    fn decode(&self, request: &Request) -> Result<Value, DecodeError> {
        Ok(serde_json::from_slice(&request.body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decodes_json_body() {
        let request = Request::post("/items").body(r#"{"name":"widget"}"#);
        let value = JsonDecoder.decode(&request).unwrap();
        assert_eq!(value, json!({"name": "widget"}));
    }

    #[test]
    fn test_rejects_malformed_body() {
        let request = Request::post("/items").body("not json");
        assert!(JsonDecoder.decode(&request).is_err());
    }

    #[test]
    fn test_rejects_empty_body() {
        let request = Request::post("/items");
        assert!(JsonDecoder.decode(&request).is_err());
    }
}
