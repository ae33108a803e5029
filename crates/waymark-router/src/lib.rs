//! # waymark-router
//!
//! A minimal request-routing layer for HTTP-style handlers.
//!
//! This crate provides:
//! - Path pattern matching with `:name` parameters and `*rest` wildcards
//! - Method-based routing with first-match-wins lookup
//! - Sequential handler chains (pre-handlers, main handler, post-handlers)
//! - A merged JSON response body threaded through the chain
//! - A single error boundary per request
//!
//! Transport is out of scope: the embedding application supplies a
//! [`ResponseSink`] and the router sends exactly one response through it
//! per request.
//!
//! ## Quick Start
//!
//! ```ignore
//! use serde_json::json;
//! use waymark_router::{
//!     Context, Diagnostics, Dispatcher, HandlerResult, Outcome, Request,
//!     ResponseBuffer, Route, RouteTable,
//! };
//!
//! async fn fetch_item(ctx: Context) -> HandlerResult {
//!     let id = ctx.param("id").unwrap_or_default().to_string();
//!     Ok(Outcome::partial(json!({ "id": id })))
//! }
//!
//! let table = RouteTable::compile(
//!     vec![Route::new("/items/:id").method("GET").handler(fetch_item)],
//!     Diagnostics::Disabled,
//! )?;
//! let dispatcher = Dispatcher::new(table);
//!
//! // Per incoming request:
//! let mut sink = ResponseBuffer::new();
//! dispatcher.handle(Request::get("/items/7"), &mut sink).await;
//! assert_eq!(sink.status(), Some(200));
//! ```
//!
//! ## Handler chains
//!
//! Each route runs its pre-handlers, then the main handler, then its
//! post-handlers, strictly in declaration order, each awaited to completion
//! before the next starts. Every function receives the full per-request
//! [`Context`] and returns an [`Outcome`]:
//!
//! - `Outcome::Partial` is shallow-merged into the accumulating response
//!   body (later keys win); the chain continues and ends in a 200 with the
//!   merged body.
//! - `Outcome::Respond` is sent as-is and stops the chain.
//! - An [`HandlerError`] aborts the chain and is mapped onto
//!   `{message, stack, code}` with the error's status code (500 by default).

mod body;
mod diag;
mod dispatch;
mod error;
mod handler;
mod path;
mod request;
mod response;
mod table;

pub use body::{BodyDecoder, JsonDecoder};
pub use diag::Diagnostics;
pub use dispatch::Dispatcher;
pub use error::{ConfigError, DecodeError, HandlerError};
pub use handler::{into_handler, Context, Handler, HandlerResult, Outcome};
pub use path::{PathPattern, PathSegment};
pub use request::{Method, PathParams, Request};
pub use response::{Response, ResponseBuffer, ResponseSink};
pub use table::{CompiledRoute, MatchedRoute, Route, RouteTable};
