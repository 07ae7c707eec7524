//! Network messages - communication between App and Network layers

use crate::api::RankingLocation;
use crate::models::{
    Card, Clan, ClanSummary, Paged, Player, PlayerBattle, PlayerRankings, SavedDeck, UserSession,
};
use crate::web::FetchError;

/// One logical call against the game or user API.
///
/// Two equal queries in flight at the same time share a single HTTP call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ApiQuery {
    Player { tag: String },
    BattleLog { tag: String },
    Clan { tag: String },
    SearchClans { name: String, limit: u32 },
    PlayerRankings { location: RankingLocation, limit: Option<u32> },
    Cards,
    Register { device_id: String },
    SaveDeck { name: String, cards: Vec<u32> },
    RemoveDeck { deck_id: String },
    RefreshSession,
}

impl ApiQuery {
    pub fn label(&self) -> &'static str {
        match self {
            ApiQuery::Player { .. } => "player",
            ApiQuery::BattleLog { .. } => "battle log",
            ApiQuery::Clan { .. } => "clan",
            ApiQuery::SearchClans { .. } => "clan search",
            ApiQuery::PlayerRankings { .. } => "rankings",
            ApiQuery::Cards => "cards",
            ApiQuery::Register { .. } => "register",
            ApiQuery::SaveDeck { .. } => "save deck",
            ApiQuery::RemoveDeck { .. } => "remove deck",
            ApiQuery::RefreshSession => "refresh session",
        }
    }
}

/// Decoded result of an [`ApiQuery`]
#[derive(Debug, Clone)]
pub enum ApiPayload {
    Player(Box<Player>),
    BattleLog(Vec<PlayerBattle>),
    Clan(Box<Clan>),
    ClanSearch(Paged<ClanSummary>),
    Rankings(PlayerRankings),
    Cards(Paged<Card>),
    Session(UserSession),
    Deck(SavedDeck),
}

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Run a query in the background
    Fetch { id: u64, query: ApiQuery },
    /// Stop waiting for a query, e.g. when its view is dismissed
    Cancel(u64),
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer.
///
/// Every fetched id receives exactly one of these.
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    Success {
        id: u64,
        payload: ApiPayload,
        time_ms: u64,
    },
    Error {
        id: u64,
        error: FetchError,
        time_ms: u64,
    },
    Cancelled {
        id: u64,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Success { id, .. } => *id,
            NetworkResponse::Error { id, .. } => *id,
            NetworkResponse::Cancelled { id } => *id,
        }
    }
}
