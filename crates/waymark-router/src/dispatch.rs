//! Per-request dispatch: lookup, chain execution, response sending.

use std::sync::Arc;

use serde_json::{json, Map, Value};
use tracing::debug;

use crate::body::{BodyDecoder, JsonDecoder};
use crate::diag::Diagnostics;
use crate::error::HandlerError;
use crate::handler::{Context, Outcome};
use crate::request::Request;
use crate::response::ResponseSink;
use crate::table::{MatchedRoute, RouteTable};

/// Executes handler chains against a compiled route table.
///
/// Invoked once per incoming request; sends exactly one response through
/// the sink, whatever happens inside the chain.
pub struct Dispatcher {
    table: RouteTable,
    decoder: Box<dyn BodyDecoder>,
    diagnostics: Diagnostics,
}

impl Dispatcher {
    /// Creates a dispatcher over a compiled table, with JSON body decoding
    /// and diagnostics disabled.
    pub fn new(table: RouteTable) -> Self {
        Self {
            table,
            decoder: Box::new(JsonDecoder),
            diagnostics: Diagnostics::Disabled,
        }
    }

    /// Replaces the body decoder.
    #[must_use]
    pub fn decoder(mut self, decoder: impl BodyDecoder + 'static) -> Self {
        self.decoder = Box::new(decoder);
        self
    }

    /// Sets the diagnostics switch.
    #[must_use]
    pub fn diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// The compiled route table.
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Handles one request, sending the response through `sink`.
    ///
    /// - no route matches: 404 with `{message}` and nothing else runs;
    /// - the chain completes: 200 with the merged response body;
    /// - a chain function responds directly: that response, nothing more;
    /// - a chain function fails: its `status_code` (500 by default) with
    ///   `{message, stack, code}`.
    pub async fn handle<S: ResponseSink>(&self, request: Request, sink: &mut S) {
        let Some(matched) = self.table.lookup(&request.path, &request.method) else {
            let message = format!("{} {} not found", request.method, request.path);
            if self.diagnostics.is_enabled() {
                debug!("{message}");
            }
            sink.send(404, json!({ "message": message }));
            return;
        };

        let request_body = self.decoder.decode(&request).unwrap_or_else(|err| {
            if self.diagnostics.is_enabled() {
                debug!(error = %err, "request body ignored");
            }
            Value::Object(Map::new())
        });

        match self.run_chain(request, &matched, request_body, sink).await {
            Ok(Some(response_body)) => {
                if !sink.headers_sent() {
                    sink.send(200, Value::Object(response_body));
                }
            }
            // A chain function already produced the response.
            Ok(None) => {}
            Err(err) => {
                let code = err.status_code.unwrap_or(500);
                if self.diagnostics.is_enabled() {
                    debug!(error = %err, code, "handler chain failed");
                }
                if !sink.headers_sent() {
                    sink.send(
                        code,
                        json!({ "message": err.message, "stack": err.stack, "code": code }),
                    );
                }
            }
        }
    }

    /// Runs the chain strictly in order, each function awaited to
    /// completion before the next starts.
    ///
    /// Returns the accumulated response body, or `None` when a function
    /// responded directly. The first failure aborts the whole chain; there
    /// is no per-function recovery.
    async fn run_chain<S: ResponseSink>(
        &self,
        request: Request,
        matched: &MatchedRoute<'_>,
        request_body: Value,
        sink: &mut S,
    ) -> Result<Option<Map<String, Value>>, HandlerError> {
        let request = Arc::new(request);
        let params = Arc::new(matched.params.clone());
        let request_body = Arc::new(request_body);
        let mut response_body = Map::new();

        for func in matched.route().funcs() {
            let ctx = Context {
                request: Arc::clone(&request),
                params: Arc::clone(&params),
                request_body: Arc::clone(&request_body),
                response_body: response_body.clone(),
            };

            match func(ctx).await? {
                Outcome::Partial(partial) => response_body.extend(partial),
                Outcome::Respond(response) => {
                    sink.send(response.status, response.body);
                    return Ok(None);
                }
            }

            // Backstop for sinks written to outside the outcome channel.
            if sink.headers_sent() {
                return Ok(None);
            }
        }

        Ok(Some(response_body))
    }
}
