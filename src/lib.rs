//! HTTP-over-Lambda adapter for API Gateway proxy events.
//!
//! The adapter receives an invocation event describing one inbound HTTP
//! request, in either the REST (v1.0) or HTTP API (v2.0) proxy envelope,
//! reconstructs a canonical request, invokes a synchronous inner
//! [`RequestHandler`](dispatch::RequestHandler) exactly once, and marshals
//! its output back into the envelope the gateway expects, with CORS headers
//! always attached. CORS `OPTIONS` preflights are answered without touching
//! the handler, and any fault at any stage still yields a well-formed
//! envelope.
//!
//! Core modules:
//! - [`normalizer`]: gateway format detection and canonical request extraction
//! - [`preflight`]: CORS preflight interception
//! - [`dispatch`]: the inner handler seam and its execution context
//! - [`marshal`]: outbound envelope construction, CORS header enforcement
//! - [`adapter`]: the failure boundary and Lambda runtime wiring
//!
//! The deploying application implements the handler and hands it to [`run`]:
//!
//! ```no_run
//! use lambda_http_adapter::{AdapterConfig, ExecutionContext, ResponseStarter, run};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), lambda_runtime::Error> {
//!     let handler = |ctx: &ExecutionContext<'_>,
//!                    respond: &mut ResponseStarter|
//!      -> anyhow::Result<Vec<String>> {
//!         respond.start(200, vec![("X-Served-By".to_string(), "demo".to_string())]);
//!         Ok(vec![format!("{{\"path\":\"{}\"}}", ctx.path)])
//!     };
//!
//!     run(handler, AdapterConfig::from_env()).await
//! }
//! ```

pub mod adapter;
pub mod config;
pub mod dispatch;
pub mod marshal;
pub mod models;
pub mod normalizer;
pub mod preflight;

pub use adapter::{Adapter, run};
pub use config::AdapterConfig;
pub use dispatch::{ExecutionContext, RequestHandler, ResponseStarter};
pub use models::{
    AdapterError, CanonicalRequest, CanonicalResponse, EventFormat, GatewayResponseEnvelope,
    Headers,
};
