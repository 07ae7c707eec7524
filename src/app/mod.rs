//! App layer - central state management and command processing
//!
//! The App actor receives UI events and network responses,
//! updates state, and emits network commands and render state.

pub mod state;
pub mod actor;
pub mod commands;
pub mod menu;

pub use state::AppState;
pub use actor::AppActor;
pub use menu::{deck_context_menu, player_context_menu, MenuAction, MenuItem};
