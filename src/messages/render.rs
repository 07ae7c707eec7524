//! Render state - data structure sent from App layer to UI for rendering

use crate::app::state::ShareItem;
use crate::messages::ui_events::{AppTab, SearchTarget};
use crate::models::{Card, Clan, ClanSummary, Player, PlayerBattle, PlayerRanking, SavedDeck};

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    pub active_tab: AppTab,

    // Stats
    pub search: Option<SearchTarget>,
    pub player: Option<Player>,
    pub battles: Vec<PlayerBattle>,
    pub clan: Option<Clan>,
    pub clan_results: Vec<ClanSummary>,

    // Leaderboards
    pub rankings: Vec<PlayerRanking>,
    pub cards: Vec<Card>,

    // Deck wallet
    pub saved_decks: Vec<SavedDeck>,
    pub signed_in: bool,
    pub add_deck_menu_visible: bool,
    pub add_deck_menu_cards: Vec<u32>,

    // Sheets and hand-offs
    pub share_sheet_presented: bool,
    pub share_sheet_items: Vec<ShareItem>,
    pub opened_link: Option<String>,
    pub clipboard: Option<String>,

    // Requests
    pub is_loading: bool,
    /// Total requests sent so far; lets a front-end tell "idle" from "not started"
    pub requests_issued: u64,
    pub last_error: Option<String>,
    pub last_time_ms: u64,
}
