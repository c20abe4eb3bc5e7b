//! Adapter fault taxonomy.
//!
//! Every fault in the request cycle is one of these three kinds. All of them
//! are caught exactly once, at the failure boundary, and converted into an
//! error envelope carrying the message and the kind tag.

use std::fmt;

/// Faults the adapter can raise while carrying a request across the gateway
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    /// The inbound event matches neither known gateway format, or a required
    /// field (the HTTP method) is missing.
    MalformedEvent(String),
    /// The inner handler raised during execution or never produced a valid
    /// status code.
    HandlerFault(String),
    /// The response envelope could not be serialized. Defensive only; the
    /// envelope shape is fixed, so this should not occur.
    MarshalFault(String),
}

impl AdapterError {
    /// The kind tag reported in the `type` field of error envelopes.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MalformedEvent(_) => "MalformedEventError",
            Self::HandlerFault(_) => "HandlerFault",
            Self::MarshalFault(_) => "MarshalFault",
        }
    }
}

impl fmt::Display for AdapterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedEvent(msg) | Self::HandlerFault(msg) | Self::MarshalFault(msg) => {
                write!(f, "{msg}")
            }
        }
    }
}

impl std::error::Error for AdapterError {}
