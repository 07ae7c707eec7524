//! # Royale Stats
//!
//! Client library for a Clash Royale stats companion: player profiles,
//! battle history, decks, clans and leaderboards from the official web API,
//! plus a deck wallet backed by a companion user API.
//!
//! ## Request descriptors
//! Every endpoint is a small value implementing [`WebGettable`] or
//! [`WebPostable`]. It knows its URL, its optional body and the type its
//! response decodes into. [`WebClient`] executes any descriptor.
//!
//! ## Architecture
//! Actor-based with channels:
//! - App Layer (state container, menu actions)
//! - Network Layer (Tokio runtime, de-duplicated in-flight queries)

pub mod api;
pub mod app;
pub mod config;
pub mod constants;
pub mod messages;
pub mod models;
pub mod network;
pub mod storage;
pub mod web;

// Re-export commonly used types
pub use config::ClientConfig;
pub use web::{DecodeConvertible, FetchError, HeaderMode, WebClient, WebGettable, WebPostable};
pub use messages::{ApiPayload, ApiQuery, NetworkCommand, NetworkResponse, RenderState, UiEvent};
pub use app::{AppActor, AppState};
pub use network::NetworkActor;
pub use storage::Storage;
