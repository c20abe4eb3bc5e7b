pub mod error;
pub mod event;
pub mod request;
pub mod response;

pub use error::AdapterError;
pub use event::{EventFormat, HttpApiEvent, RestApiEvent};
pub use request::{CanonicalRequest, Headers};
pub use response::{CanonicalResponse, GatewayResponseEnvelope};
