//! Application constants
//!
//! Centralized location for endpoints and configuration defaults.

/// Base URL of the official game API
pub const DEFAULT_API_BASE: &str = "https://api.clashroyale.com/v1";

/// Base URL of the companion user API (deck wallet, sessions)
pub const DEFAULT_USER_API_BASE: &str = "https://api.royalestats.app/v1";

/// Deep link host used by the game client
pub const GAME_LINK_BASE: &str = "https://link.clashroyale.com";

/// Request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Cards per deck; duel battlers carry several decks back to back
pub const DECK_SIZE: usize = 8;

/// Recent searches kept in settings
pub const MAX_RECENT_SEARCHES: usize = 20;

/// Environment variable holding the game API token
pub const ENV_API_TOKEN: &str = "ROYALE_API_TOKEN";
pub const ENV_API_BASE: &str = "ROYALE_API_BASE";
pub const ENV_USER_API_BASE: &str = "ROYALE_USER_API_BASE";
pub const ENV_TIMEOUT_SECS: &str = "ROYALE_TIMEOUT_SECS";

/// Application name
pub const APP_NAME: &str = "Royale Stats";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
