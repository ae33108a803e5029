//! Response type and the transport-facing sink capability.

use serde_json::Value;

/// A status code plus JSON payload, the only response shape the router
/// produces.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// JSON payload.
    pub body: Value,
}

impl Response {
    /// Creates a response with the given status and payload.
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Creates a 200 OK response.
    pub fn ok(body: Value) -> Self {
        Self::new(200, body)
    }
}

/// The capability to transmit exactly one response.
///
/// Transport is out of scope for the router; the embedding application
/// supplies whatever writes the status code and payload to the wire. The
/// dispatcher consults `headers_sent` before sending so a request never
/// produces a second response.
pub trait ResponseSink: Send {
    /// Transmits a response. Implementations must ignore calls made after a
    /// response has already been sent.
    fn send(&mut self, status: u16, body: Value);

    /// Whether a response has already been transmitted.
    fn headers_sent(&self) -> bool;
}

/// An in-memory sink that records the response instead of transmitting it.
///
/// Used by embedders that marshal the response themselves, and throughout
/// the dispatcher tests.
#[derive(Debug, Default)]
pub struct ResponseBuffer {
    sent: Option<Response>,
}

impl ResponseBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded response, if one was sent.
    pub fn sent(&self) -> Option<&Response> {
        self.sent.as_ref()
    }

    /// The recorded status code.
    pub fn status(&self) -> Option<u16> {
        self.sent.as_ref().map(|r| r.status)
    }

    /// The recorded payload.
    pub fn body(&self) -> Option<&Value> {
        self.sent.as_ref().map(|r| &r.body)
    }

    /// Consumes the buffer, yielding the recorded response.
    pub fn into_response(self) -> Option<Response> {
        self.sent
    }
}

impl ResponseSink for ResponseBuffer {
    fn send(&mut self, status: u16, body: Value) {
        if self.sent.is_none() {
            self.sent = Some(Response::new(status, body));
        }
    }

    fn headers_sent(&self) -> bool {
        self.sent.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_is_200() {
        let response = Response::ok(json!({}));
        assert_eq!(response.status, 200);
    }

    #[test]
    fn test_buffer_records_first_send() {
        let mut buffer = ResponseBuffer::new();
        assert!(!buffer.headers_sent());
        assert!(buffer.sent().is_none());

        buffer.send(200, json!({"ok": true}));
        assert!(buffer.headers_sent());
        assert_eq!(buffer.status(), Some(200));
        assert_eq!(buffer.body(), Some(&json!({"ok": true})));
    }

    #[test]
    fn test_buffer_ignores_second_send() {
        let mut buffer = ResponseBuffer::new();
        buffer.send(200, json!({"first": true}));
        buffer.send(500, json!({"second": true}));

        let response = buffer.into_response().unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, json!({"first": true}));
    }
}
