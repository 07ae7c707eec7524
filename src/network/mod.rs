//! Network layer - background execution of API queries
//!
//! The Network actor receives fetch commands and sends back exactly one
//! response per request id.

pub mod actor;
pub mod fetch;

pub use actor::NetworkActor;
pub use fetch::{execute_query, Endpoints};
