//! Handler chain building blocks.

use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::{Map, Value};

use crate::error::HandlerError;
use crate::request::{PathParams, Request};
use crate::response::Response;

/// What a chain function resolved to.
#[derive(Debug)]
pub enum Outcome {
    /// A partial payload, shallow-merged into the accumulating response
    /// body (later keys overwrite earlier ones). The chain continues.
    Partial(Map<String, Value>),
    /// The final response. The dispatcher sends it and stops the chain;
    /// no later function runs and no second response is sent.
    Respond(Response),
}

impl Outcome {
    /// A partial that contributes nothing.
    pub fn empty() -> Self {
        Self::Partial(Map::new())
    }

    /// A partial built from a JSON object; any other value contributes
    /// nothing.
    pub fn partial(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::Partial(map),
            _ => Self::empty(),
        }
    }

    /// A direct response with the given status and payload.
    pub fn respond(status: u16, body: Value) -> Self {
        Self::Respond(Response::new(status, body))
    }
}

/// What every chain function returns.
pub type HandlerResult = Result<Outcome, HandlerError>;

/// A boxed async chain function.
pub type Handler = Arc<dyn Fn(Context) -> BoxFuture<'static, HandlerResult> + Send + Sync>;

/// Boxes an async function as a chain handler.
pub fn into_handler<F, Fut>(f: F) -> Handler
where
    F: Fn(Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    Arc::new(move |ctx| Box::pin(f(ctx)))
}

/// The per-request bundle passed to every chain function.
///
/// Created by the dispatcher for each invocation and dropped when the
/// request completes; nothing in it survives across requests.
#[derive(Debug, Clone)]
pub struct Context {
    /// The incoming request.
    pub request: Arc<Request>,
    /// Parameters extracted from the matched path pattern.
    pub params: Arc<PathParams>,
    /// The decoded request body, or an empty object when decoding failed.
    pub request_body: Arc<Value>,
    /// Snapshot of the response body accumulated by earlier chain
    /// functions.
    pub response_body: Map<String, Value>,
}

impl Context {
    /// Gets a path parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_from_non_object_is_empty() {
        let Outcome::Partial(map) = Outcome::partial(json!("not an object")) else {
            panic!("expected a partial outcome");
        };
        assert!(map.is_empty());
    }

    #[test]
    fn test_respond_carries_status_and_body() {
        let Outcome::Respond(response) = Outcome::respond(401, json!({"message": "nope"})) else {
            panic!("expected a direct response");
        };
        assert_eq!(response.status, 401);
        assert_eq!(response.body, json!({"message": "nope"}));
    }
}
