//! Dispatcher: builds the execution context the inner handler expects and
//! invokes it exactly once per event.

use anyhow::Result;
use lambda_runtime::tracing::debug;
use std::collections::BTreeMap;

use crate::models::{AdapterError, CanonicalRequest, CanonicalResponse, Headers};

/// Status used when the handler produces a body without ever reporting one.
const DEFAULT_STATUS: u16 = 200;

/// Borrowed view of the canonical request handed to the inner handler: the
/// execution environment its calling convention requires.
#[derive(Debug, Clone, Copy)]
pub struct ExecutionContext<'a> {
    pub method: &'a str,
    pub path: &'a str,
    pub query_string: &'a str,
    pub headers: &'a Headers,
    pub body: &'a str,
    pub content_length: usize,
}

impl<'a> ExecutionContext<'a> {
    #[must_use]
    pub fn from_request(request: &'a CanonicalRequest) -> Self {
        Self {
            method: &request.method,
            path: &request.path,
            query_string: &request.query_string,
            headers: &request.headers,
            body: &request.body,
            content_length: request.content_length(),
        }
    }

    /// Convenience lookup for the request content type; empty if unset.
    #[must_use]
    pub fn content_type(&self) -> &'a str {
        self.headers.get("content-type").unwrap_or_default()
    }
}

/// Collects the status line and header list the handler must report before or
/// atomically with its body chunks.
#[derive(Debug, Default)]
pub struct ResponseStarter {
    status: Option<u16>,
    headers: Vec<(String, String)>,
}

impl ResponseStarter {
    /// Reports the response status and headers. A second call replaces the
    /// first; the last report before the body is returned wins.
    pub fn start(&mut self, status: u16, headers: Vec<(String, String)>) {
        self.status = Some(status);
        self.headers = headers;
    }

    fn into_parts(self) -> (Option<u16>, Vec<(String, String)>) {
        (self.status, self.headers)
    }
}

/// The inner handler seam: a synchronous, stateless request handler owning
/// all routing and business logic. The adapter only carries bytes, headers,
/// and status codes across the gateway boundary for it.
pub trait RequestHandler {
    /// Handles one request, reporting status and headers through `respond`
    /// and returning zero or more body chunks for the dispatcher to
    /// concatenate.
    ///
    /// # Errors
    ///
    /// Any error surfaces at the failure boundary as a `HandlerFault`; the
    /// adapter never retries.
    fn handle(
        &self,
        ctx: &ExecutionContext<'_>,
        respond: &mut ResponseStarter,
    ) -> Result<Vec<String>>;
}

impl<F> RequestHandler for F
where
    F: Fn(&ExecutionContext<'_>, &mut ResponseStarter) -> Result<Vec<String>>,
{
    fn handle(
        &self,
        ctx: &ExecutionContext<'_>,
        respond: &mut ResponseStarter,
    ) -> Result<Vec<String>> {
        self(ctx, respond)
    }
}

/// Invokes the inner handler exactly once for the given request, blocking
/// until it completes, and captures its output as a [`CanonicalResponse`].
///
/// Body chunks are fully drained and concatenated; the invocation model has
/// no chunked delivery back to the gateway. A handler that never reports a
/// status gets [`DEFAULT_STATUS`].
///
/// # Errors
///
/// Returns [`AdapterError::HandlerFault`] if the handler fails or reports a
/// status outside `100..=599`. Faults are not retried here: the handler may
/// have partially mutated external state, so blind retry is unsafe.
pub fn dispatch<H: RequestHandler + ?Sized>(
    handler: &H,
    request: &CanonicalRequest,
) -> Result<CanonicalResponse, AdapterError> {
    let ctx = ExecutionContext::from_request(request);
    let mut respond = ResponseStarter::default();

    let chunks = handler
        .handle(&ctx, &mut respond)
        .map_err(|e| AdapterError::HandlerFault(format!("{e:#}")))?;

    let (status, headers) = respond.into_parts();
    let status_code = status.unwrap_or(DEFAULT_STATUS);
    if !(100..=599).contains(&status_code) {
        return Err(AdapterError::HandlerFault(format!(
            "handler reported status {status_code} outside the valid 100-599 range"
        )));
    }

    debug!(status = status_code, chunks = chunks.len(), "Handler completed");

    Ok(CanonicalResponse {
        status_code,
        headers: headers.into_iter().collect::<BTreeMap<_, _>>(),
        body: chunks.concat(),
    })
}
