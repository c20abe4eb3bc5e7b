//! The failure boundary wrapping the full request cycle, and the Lambda
//! runtime wiring.
//!
//! Cycle per invocation: normalize → preflight check → dispatch → marshal.
//! Every fault from any stage is caught exactly once here and converted into
//! an error envelope; the invocation itself never raises past this boundary.

use lambda_runtime::tracing::{debug, error, info};
use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::config::AdapterConfig;
use crate::dispatch::{RequestHandler, dispatch};
use crate::marshal::{ALLOWED_HEADERS, ALLOWED_METHODS, error_envelope, marshal};
use crate::models::{AdapterError, CanonicalResponse, GatewayResponseEnvelope};
use crate::normalizer::normalize;
use crate::preflight::is_preflight;

/// Carries one gateway event through the full cycle around an inner handler.
///
/// Holds no mutable state: concurrent invocations are independent, and
/// correctness under concurrency is entirely the inner handler's concern.
#[derive(Debug)]
pub struct Adapter<H> {
    handler: H,
    config: AdapterConfig,
}

impl<H: RequestHandler> Adapter<H> {
    #[must_use]
    pub const fn new(handler: H, config: AdapterConfig) -> Self {
        Self { handler, config }
    }

    /// Handles one invocation event, always yielding a structurally valid
    /// gateway envelope, never an error.
    #[must_use]
    pub fn handle_event(&self, event: &Value) -> Value {
        let envelope = match self.process(event) {
            Ok(envelope) => envelope,
            Err(fault) => {
                error!(kind = fault.kind(), error = %fault, "Request cycle failed");
                error_envelope(&fault, &self.config)
            }
        };

        match serde_json::to_value(&envelope) {
            Ok(value) => value,
            Err(e) => {
                // Defensive: the envelope shape is fixed, so this arm should
                // be unreachable. Still, the boundary guarantee holds.
                let fault = AdapterError::MarshalFault(e.to_string());
                error!(error = %fault, "Envelope serialization failed");
                serde_json::to_value(error_envelope(&fault, &self.config))
                    .unwrap_or_else(|_| self.literal_error_envelope())
            }
        }
    }

    fn process(&self, event: &Value) -> Result<GatewayResponseEnvelope, AdapterError> {
        let request = normalize(event)?;
        info!(method = %request.method, path = %request.path, "Handling request");

        let response = if is_preflight(&request) {
            debug!("CORS preflight; inner handler not invoked");
            CanonicalResponse::preflight()
        } else {
            dispatch(&self.handler, &request)?
        };

        Ok(marshal(response, &self.config))
    }

    /// Last-resort envelope built without going through serde.
    fn literal_error_envelope(&self) -> Value {
        json!({
            "statusCode": 500,
            "headers": {
                "Content-Type": "application/json",
                "Access-Control-Allow-Origin": self.config.allow_origin.clone(),
                "Access-Control-Allow-Headers": ALLOWED_HEADERS,
                "Access-Control-Allow-Methods": ALLOWED_METHODS,
            },
            "body": "{\"error\":\"response marshaling failed\",\"type\":\"MarshalFault\"}",
        })
    }
}

/// Runs the adapter on the Lambda runtime around the given inner handler.
///
/// Initializes the runtime's tracing subscriber and serves events until the
/// runtime shuts the function down.
///
/// # Errors
///
/// Returns an error only if the runtime itself fails; individual invocations
/// never error (see [`Adapter::handle_event`]).
pub async fn run<H>(handler: H, config: AdapterConfig) -> Result<(), Error>
where
    H: RequestHandler + Send + Sync + 'static,
{
    lambda_runtime::tracing::init_default_subscriber();

    let adapter = Arc::new(Adapter::new(handler, config));
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let adapter = Arc::clone(&adapter);
        async move { Ok::<Value, Error>(adapter.handle_event(&event.payload)) }
    }))
    .await
}
