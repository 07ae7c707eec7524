//! Official game API descriptors (GET)

use reqwest::Url;

use crate::models::{
    Card, Clan, ClanSummary, Paged, Player, PlayerBattle, PlayerRankings, Tag,
};
use crate::web::{Endpoint, WebGettable};

/// Minimum clan name length accepted by clan search
const MIN_CLAN_SEARCH_LEN: usize = 3;

fn tagged_url(base: &Endpoint, collection: &str, raw_tag: &str, suffix: &str) -> Option<String> {
    let tag = Tag::parse(raw_tag)?;
    Some(base.join(&format!("/{}/{}{}", collection, tag.url_encoded(), suffix)))
}

/// Player profile
#[derive(Clone, Debug)]
pub struct PlayerRequest {
    base: Endpoint,
    pub tag: String,
}

impl PlayerRequest {
    pub fn new(tag: impl Into<String>) -> Self {
        PlayerRequest {
            base: Endpoint::game_api(),
            tag: tag.into(),
        }
    }

    pub fn at(mut self, base: &Endpoint) -> Self {
        self.base = base.clone();
        self
    }
}

impl WebGettable for PlayerRequest {
    type Response = Player;

    fn url_string(&self) -> Option<String> {
        tagged_url(&self.base, "players", &self.tag, "")
    }
}

/// Recent battles of a player, newest first
#[derive(Clone, Debug)]
pub struct BattleLogRequest {
    base: Endpoint,
    pub tag: String,
}

impl BattleLogRequest {
    pub fn new(tag: impl Into<String>) -> Self {
        BattleLogRequest {
            base: Endpoint::game_api(),
            tag: tag.into(),
        }
    }

    pub fn at(mut self, base: &Endpoint) -> Self {
        self.base = base.clone();
        self
    }
}

impl WebGettable for BattleLogRequest {
    type Response = Vec<PlayerBattle>;

    fn url_string(&self) -> Option<String> {
        tagged_url(&self.base, "players", &self.tag, "/battlelog")
    }
}

/// Clan profile with member list
#[derive(Clone, Debug)]
pub struct ClanRequest {
    base: Endpoint,
    pub tag: String,
}

impl ClanRequest {
    pub fn new(tag: impl Into<String>) -> Self {
        ClanRequest {
            base: Endpoint::game_api(),
            tag: tag.into(),
        }
    }

    pub fn at(mut self, base: &Endpoint) -> Self {
        self.base = base.clone();
        self
    }
}

impl WebGettable for ClanRequest {
    type Response = Clan;

    fn url_string(&self) -> Option<String> {
        tagged_url(&self.base, "clans", &self.tag, "")
    }
}

/// Clan search by name
#[derive(Clone, Debug)]
pub struct ClanSearchRequest {
    base: Endpoint,
    pub name: String,
    pub limit: u32,
}

impl ClanSearchRequest {
    pub fn new(name: impl Into<String>, limit: u32) -> Self {
        ClanSearchRequest {
            base: Endpoint::game_api(),
            name: name.into(),
            limit,
        }
    }

    pub fn at(mut self, base: &Endpoint) -> Self {
        self.base = base.clone();
        self
    }
}

impl WebGettable for ClanSearchRequest {
    type Response = Paged<ClanSummary>;

    fn url_string(&self) -> Option<String> {
        let name = self.name.trim();
        if name.chars().count() < MIN_CLAN_SEARCH_LEN || self.limit == 0 {
            return None;
        }
        let mut url = Url::parse(&self.base.join("/clans")).ok()?;
        url.query_pairs_mut()
            .append_pair("name", name)
            .append_pair("limit", &self.limit.to_string());
        Some(url.into())
    }
}

/// Leaderboard scope
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RankingLocation {
    Global,
    Id(u32),
}

impl RankingLocation {
    /// Parse `global` or a numeric location id
    pub fn parse(raw: &str) -> Option<RankingLocation> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("global") {
            Some(RankingLocation::Global)
        } else {
            raw.parse().ok().map(RankingLocation::Id)
        }
    }

    fn path_segment(&self) -> String {
        match self {
            RankingLocation::Global => "global".to_string(),
            RankingLocation::Id(id) => id.to_string(),
        }
    }
}

/// Trophy leaderboard for a location
#[derive(Clone, Debug)]
pub struct PlayerRankingsRequest {
    base: Endpoint,
    pub location: RankingLocation,
    pub limit: Option<u32>,
}

impl PlayerRankingsRequest {
    pub fn new(location: RankingLocation, limit: Option<u32>) -> Self {
        PlayerRankingsRequest {
            base: Endpoint::game_api(),
            location,
            limit,
        }
    }

    pub fn at(mut self, base: &Endpoint) -> Self {
        self.base = base.clone();
        self
    }
}

impl WebGettable for PlayerRankingsRequest {
    type Response = PlayerRankings;

    fn url_string(&self) -> Option<String> {
        let path = format!("/locations/{}/rankings/players", self.location.path_segment());
        match self.limit {
            Some(0) => None,
            Some(limit) => Some(format!("{}?limit={}", self.base.join(&path), limit)),
            None => Some(self.base.join(&path)),
        }
    }
}

/// Every card in the game
#[derive(Clone, Debug)]
pub struct CardsRequest {
    base: Endpoint,
}

impl CardsRequest {
    pub fn new() -> Self {
        CardsRequest {
            base: Endpoint::game_api(),
        }
    }

    pub fn at(mut self, base: &Endpoint) -> Self {
        self.base = base.clone();
        self
    }
}

impl Default for CardsRequest {
    fn default() -> Self {
        Self::new()
    }
}

impl WebGettable for CardsRequest {
    type Response = Paged<Card>;

    fn url_string(&self) -> Option<String> {
        Some(self.base.join("/cards"))
    }
}
