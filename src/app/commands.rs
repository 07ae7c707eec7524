//! Command handlers - business logic for processing UI events
//!
//! Handlers mutate [`AppState`] and return the network commands to send.

use crate::api::RankingLocation;
use crate::app::menu::MenuAction;
use crate::app::state::ShareItem;
use crate::app::AppState;
use crate::messages::ui_events::{AppTab, SearchTarget};
use crate::messages::{ApiQuery, NetworkCommand};
use crate::models::Tag;

const CLAN_SEARCH_LIMIT: u32 = 25;

impl AppState {
    // ========================
    // Requests
    // ========================

    pub(crate) fn request(&mut self, query: ApiQuery) -> NetworkCommand {
        let id = self.next_id();
        self.pending.insert(id, query.clone());
        self.requests_issued += 1;
        NetworkCommand::Fetch { id, query }
    }

    /// Issue a call that needs a live session, refreshing an expired one first
    fn authenticated(&mut self, query: ApiQuery) -> Vec<NetworkCommand> {
        if !self.session_expired() {
            return vec![self.request(query)];
        }
        self.awaiting_session.push(query);
        let refreshing = self.pending.values().any(|q| *q == ApiQuery::RefreshSession);
        if refreshing {
            Vec::new()
        } else {
            vec![self.request(ApiQuery::RefreshSession)]
        }
    }

    /// Cancel pending requests matching `predicate`
    fn cancel_where(&mut self, predicate: impl Fn(&ApiQuery) -> bool) -> Vec<NetworkCommand> {
        let ids: Vec<u64> = self
            .pending
            .iter()
            .filter(|(_, query)| predicate(query))
            .map(|(id, _)| *id)
            .collect();
        ids.into_iter()
            .map(|id| {
                self.pending.remove(&id);
                NetworkCommand::Cancel(id)
            })
            .collect()
    }

    // ========================
    // Navigation
    // ========================

    pub fn switch_tab(&mut self, tab: AppTab) {
        self.active_tab = tab;
        self.storage.set_tab(tab);
    }

    /// The visible view went away: stop waiting on everything it asked for
    pub fn dismiss_view(&mut self) -> Vec<NetworkCommand> {
        self.awaiting_session.clear();
        self.cancel_where(|_| true)
    }

    // ========================
    // Stats
    // ========================

    /// Show a player or clan on the Stats tab
    pub fn search(&mut self, target: SearchTarget) -> Vec<NetworkCommand> {
        let mut commands = self.cancel_where(|q| {
            matches!(
                q,
                ApiQuery::Player { .. } | ApiQuery::BattleLog { .. } | ApiQuery::Clan { .. }
            )
        });

        self.switch_tab(AppTab::Stats);
        self.storage.add_recent_search(target.clone());
        self.last_error = None;

        let tag = target.tag().to_string();
        match &target {
            SearchTarget::Player(_) => {
                self.player = None;
                self.battles.clear();
                commands.push(self.request(ApiQuery::Player { tag: tag.clone() }));
                commands.push(self.request(ApiQuery::BattleLog { tag }));
            }
            SearchTarget::Clan(_) => {
                self.clan = None;
                commands.push(self.request(ApiQuery::Clan { tag }));
            }
        }
        self.search = Some(target);
        commands
    }

    /// Fetch only a player's profile, without touching the Stats search
    pub fn load_player(&mut self, tag: Tag) -> Vec<NetworkCommand> {
        let mut commands = self.cancel_where(|q| matches!(q, ApiQuery::Player { .. }));
        self.player = None;
        self.last_error = None;
        commands.push(self.request(ApiQuery::Player { tag: tag.to_string() }));
        commands
    }

    /// Re-run the current search
    pub fn refresh(&mut self) -> Vec<NetworkCommand> {
        match self.search.clone() {
            Some(target) => self.search(target),
            None => Vec::new(),
        }
    }

    pub fn search_clans(&mut self, name: String) -> Vec<NetworkCommand> {
        let mut commands = self.cancel_where(|q| matches!(q, ApiQuery::SearchClans { .. }));
        commands.push(self.request(ApiQuery::SearchClans {
            name,
            limit: CLAN_SEARCH_LIMIT,
        }));
        commands
    }

    // ========================
    // Leaderboards
    // ========================

    pub fn load_rankings(&mut self, location: RankingLocation, limit: Option<u32>) -> Vec<NetworkCommand> {
        self.switch_tab(AppTab::Leaderboards);
        vec![self.request(ApiQuery::PlayerRankings { location, limit })]
    }

    pub fn load_cards(&mut self) -> Vec<NetworkCommand> {
        vec![self.request(ApiQuery::Cards)]
    }

    // ========================
    // Deck wallet
    // ========================

    pub fn register(&mut self, device_id: String) -> Vec<NetworkCommand> {
        vec![self.request(ApiQuery::Register { device_id })]
    }

    pub fn refresh_session(&mut self) -> Vec<NetworkCommand> {
        vec![self.request(ApiQuery::RefreshSession)]
    }

    pub fn save_deck(&mut self, name: String, cards: Vec<u32>) -> Vec<NetworkCommand> {
        self.authenticated(ApiQuery::SaveDeck { name, cards })
    }

    pub fn remove_deck(&mut self, deck_id: String) -> Vec<NetworkCommand> {
        self.authenticated(ApiQuery::RemoveDeck { deck_id })
    }

    pub fn dismiss_add_deck_menu(&mut self) {
        self.add_deck_menu_visible = false;
        self.add_deck_menu_cards.clear();
    }

    // ========================
    // Menus and sheets
    // ========================

    pub fn apply_menu_action(&mut self, action: MenuAction) -> Vec<NetworkCommand> {
        match action {
            MenuAction::ShowPlayer(tag) => return self.search(SearchTarget::Player(tag)),
            MenuAction::ShowClan(tag) => return self.search(SearchTarget::Clan(tag)),
            MenuAction::OpenLink(url) => self.opened_link = Some(url),
            MenuAction::Copy(text) => self.clipboard = Some(text),
            MenuAction::SaveDeckToWallet(cards) => {
                self.add_deck_menu_cards = cards;
                self.add_deck_menu_visible = true;
            }
            MenuAction::ShareLink { name, url } => {
                self.share_sheet_items = vec![ShareItem { name, url }];
                self.share_sheet_presented = true;
            }
        }
        Vec::new()
    }

    pub fn dismiss_share_sheet(&mut self) {
        self.share_sheet_presented = false;
        self.share_sheet_items.clear();
    }
}
