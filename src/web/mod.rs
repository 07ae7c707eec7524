//! Typed web request descriptors
//!
//! A descriptor says *what* to call: the endpoint, an optional body and the
//! type the response decodes into. [`client::WebClient`] says *how*: it is the
//! only place that touches the network, attaches credentials and applies the
//! post-decode conversion.
//!
//! Descriptors never fail. When they cannot be built (a missing or malformed
//! tag, a blank payload) they return `None`, and the client reports that as a
//! [`BuildError`] before any I/O happens.

pub mod client;
pub mod endpoint;
pub mod error;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub use client::WebClient;
pub use endpoint::Endpoint;
pub use error::{ApiErrorBody, BuildError, FetchError};

/// Post-decode transformation of a freshly deserialized value.
///
/// Wire models implement this to resolve raw codes (badge ids, rarity levels,
/// compact timestamps) into their domain form. The client calls it exactly
/// once, after decoding and before handing the value out.
pub trait DecodeConvertible: Sized {
    fn convert(self) -> Self {
        self
    }
}

impl<T: DecodeConvertible> DecodeConvertible for Vec<T> {
    fn convert(self) -> Self {
        self.into_iter().map(DecodeConvertible::convert).collect()
    }
}

impl<T: DecodeConvertible> DecodeConvertible for Option<T> {
    fn convert(self) -> Self {
        self.map(DecodeConvertible::convert)
    }
}

/// Header treatment required by an endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeaderMode {
    /// Public endpoint, no `Authorization` header
    None,
    /// Requires the user session token
    Authenticated,
}

impl HeaderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderMode::None => "none",
            HeaderMode::Authenticated => "authenticated",
        }
    }
}

/// A GET endpoint with a fixed response type.
pub trait WebGettable {
    type Response: DeserializeOwned + Serialize + DecodeConvertible;

    /// Fully formed URL, or `None` when required inputs are missing or invalid.
    fn url_string(&self) -> Option<String>;
}

/// A POST endpoint with a fixed response type, payload type and header mode.
pub trait WebPostable {
    type Response: DeserializeOwned + Serialize + DecodeConvertible;
    type Postable: Serialize;

    /// Header mode shared by every request of this kind.
    const HEADER_MODE: HeaderMode;

    /// Body to send; `None` sends a body-less request.
    fn postable_value(&self) -> Option<Self::Postable>;

    /// Fully formed URL, or `None` when required inputs are missing or invalid.
    fn url_string(&self) -> Option<String>;
}
