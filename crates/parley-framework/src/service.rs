//! Tower integration for the pipeline.
//!
//! [`Pipeline`] implements `tower::Service<ParseRequest>`, so middleware can
//! wrap parsing like any other service:
//!
//! ```rust,ignore
//! use tower::ServiceBuilder;
//!
//! let service = ServiceBuilder::new()
//!     .map_request(|line: String| ParseRequest::new(line, Context::default()))
//!     .service(pipeline);
//! ```
//!
//! Parsing is synchronous, so the returned future is always ready.

use std::task::{Context as TaskContext, Poll};

use futures::future::{Ready, ready};
use parley_core::{Context, ParseError, ParseResult};
use tower::Service;

use crate::pipeline::Pipeline;

/// One line to parse, with the context it should be parsed against.
#[derive(Debug, Clone)]
pub struct ParseRequest {
    pub line: String,
    pub context: Context,
}

impl ParseRequest {
    pub fn new(line: impl Into<String>, context: Context) -> Self {
        Self {
            line: line.into(),
            context,
        }
    }
}

impl Service<ParseRequest> for Pipeline {
    type Response = ParseResult;
    type Error = ParseError;
    type Future = Ready<Result<ParseResult, ParseError>>;

    fn poll_ready(&mut self, _cx: &mut TaskContext<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: ParseRequest) -> Self::Future {
        ready(self.parse(&request.line, &request.context))
    }
}
