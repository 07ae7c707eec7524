//! App state - pure data structure with no I/O logic
//!
//! This is the shared UI-state container: views read it, menu actions and
//! network responses write it.

use std::collections::HashMap;

use chrono::Utc;

use crate::messages::ui_events::{AppTab, SearchTarget};
use crate::messages::{ApiPayload, ApiQuery, NetworkCommand, NetworkResponse, RenderState};
use crate::models::{
    Card, Clan, ClanSummary, Player, PlayerBattle, PlayerRanking, SavedDeck, UserSession,
};
use crate::storage::Storage;

/// An entry in the share sheet
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareItem {
    pub name: String,
    pub url: String,
}

/// Main application state - pure data, no I/O
pub struct AppState {
    // Tab navigation
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
    pub session: Option<UserSession>,
    /// Deck wallet calls held back until an expired session is refreshed
    pub awaiting_session: Vec<ApiQuery>,
    pub add_deck_menu_cards: Vec<u32>,
    pub add_deck_menu_visible: bool,

    // Platform hand-offs, consumed by the front-end
    pub share_sheet_items: Vec<ShareItem>,
    pub share_sheet_presented: bool,
    pub opened_link: Option<String>,
    pub clipboard: Option<String>,

    // Requests
    pub next_request_id: u64,
    pub pending: HashMap<u64, ApiQuery>,
    pub requests_issued: u64,
    pub last_error: Option<String>,
    pub last_time_ms: u64,

    // Storage (persisted data)
    pub storage: Storage,
}

impl AppState {
    pub fn new(storage: Storage) -> Self {
        AppState {
            active_tab: storage.settings.tab_selection,
            search: None,
            player: None,
            battles: Vec::new(),
            clan: None,
            clan_results: Vec::new(),
            rankings: Vec::new(),
            cards: Vec::new(),
            session: storage.settings.session.clone(),
            awaiting_session: Vec::new(),
            add_deck_menu_cards: Vec::new(),
            add_deck_menu_visible: false,
            share_sheet_items: Vec::new(),
            share_sheet_presented: false,
            opened_link: None,
            clipboard: None,
            next_request_id: 1,
            pending: HashMap::new(),
            requests_issued: 0,
            last_error: None,
            last_time_ms: 0,
            storage,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub fn is_loading(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn saved_decks(&self) -> &[SavedDeck] {
        &self.storage.settings.saved_decks
    }

    pub fn session_expired(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.is_expired(Utc::now()))
    }

    /// Apply a response from the network layer, returning any follow-up commands
    pub fn handle_response(&mut self, response: NetworkResponse) -> Vec<NetworkCommand> {
        let Some(query) = self.pending.remove(&response.id()) else {
            // Stale: cancelled or superseded
            return Vec::new();
        };

        let succeeded = matches!(response, NetworkResponse::Success { .. });
        match response {
            NetworkResponse::Success { payload, time_ms, .. } => {
                self.last_time_ms = time_ms;
                self.last_error = None;
                self.apply_payload(payload);
            }
            NetworkResponse::Error { error, time_ms, .. } => {
                self.last_time_ms = time_ms;
                self.last_error = Some(match &query {
                    ApiQuery::Player { tag } | ApiQuery::BattleLog { tag } if error.is_not_found() => {
                        format!("no player with tag {tag}")
                    }
                    ApiQuery::Clan { tag } if error.is_not_found() => format!("no clan with tag {tag}"),
                    _ => format!("{}: {}", query.label(), error),
                });
            }
            NetworkResponse::Cancelled { .. } => {}
        }

        if query != ApiQuery::RefreshSession {
            return Vec::new();
        }
        let held = std::mem::take(&mut self.awaiting_session);
        if succeeded {
            held.into_iter().map(|q| self.request(q)).collect()
        } else {
            Vec::new()
        }
    }

    fn apply_payload(&mut self, payload: ApiPayload) {
        match payload {
            ApiPayload::Player(player) => self.player = Some(*player),
            ApiPayload::BattleLog(battles) => self.battles = battles,
            ApiPayload::Clan(clan) => self.clan = Some(*clan),
            ApiPayload::ClanSearch(page) => self.clan_results = page.items,
            ApiPayload::Rankings(rankings) => self.rankings = rankings.items,
            ApiPayload::Cards(page) => self.cards = page.items,
            ApiPayload::Session(session) => {
                self.session = Some(session.clone());
                self.storage.set_session(Some(session));
            }
            ApiPayload::Deck(deck) => {
                self.add_deck_menu_visible = false;
                self.add_deck_menu_cards.clear();
                self.storage.remember_deck(deck);
            }
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            active_tab: self.active_tab,
            search: self.search.clone(),
            player: self.player.clone(),
            battles: self.battles.clone(),
            clan: self.clan.clone(),
            clan_results: self.clan_results.clone(),
            rankings: self.rankings.clone(),
            cards: self.cards.clone(),
            saved_decks: self.saved_decks().to_vec(),
            signed_in: self.session.is_some(),
            add_deck_menu_visible: self.add_deck_menu_visible,
            add_deck_menu_cards: self.add_deck_menu_cards.clone(),
            share_sheet_presented: self.share_sheet_presented,
            share_sheet_items: self.share_sheet_items.clone(),
            opened_link: self.opened_link.clone(),
            clipboard: self.clipboard.clone(),
            is_loading: self.is_loading(),
            requests_issued: self.requests_issued,
            last_error: self.last_error.clone(),
            last_time_ms: self.last_time_ms,
        }
    }
}
