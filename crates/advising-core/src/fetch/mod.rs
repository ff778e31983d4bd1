//! Fetch contract for the REST backend.
//!
//! # Module Structure
//!
//! - `transport`: the wire seam (`Transport`) and its request/response types
//! - `endpoint`: the backend routes the pages call
//! - `envelope`: decoding of the `{success, message, ...}` response envelope
//! - `error`: the failure taxonomy every page renders inline
//! - `rest`: `RestFetcher`, one transport call per fetch

mod endpoint;
mod envelope;
mod error;
mod rest;
mod transport;

pub use endpoint::Endpoint;
pub use envelope::{ApiPayload, Reply, decode_response};
pub use error::{FetchError, NETWORK_ERROR_MESSAGE, SESSION_EXPIRED_MESSAGE, is_auth_status};
pub use rest::RestFetcher;
pub use transport::{ApiRequest, Method, RawResponse, Transport, TransportError};
