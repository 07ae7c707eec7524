use serde::{Deserialize, Serialize};

use crate::models::{Arena, ClanRef, Paging};
use crate::web::DecodeConvertible;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRanking {
    pub tag: String,
    pub name: String,
    #[serde(default)]
    pub exp_level: u32,
    #[serde(default)]
    pub trophies: u32,
    pub rank: u32,
    #[serde(default)]
    pub previous_rank: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clan: Option<ClanRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arena: Option<Arena>,
}

impl PlayerRanking {
    /// Whether the player is new to the board (API reports -1 or 0)
    pub fn is_new_entry(&self) -> bool {
        self.previous_rank <= 0
    }
}

impl DecodeConvertible for PlayerRanking {
    fn convert(mut self) -> Self {
        self.clan = self.clan.convert();
        self
    }
}

/// A leaderboard page, ordered by rank
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRankings {
    pub items: Vec<PlayerRanking>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging: Option<Paging>,
}

impl DecodeConvertible for PlayerRankings {
    fn convert(mut self) -> Self {
        self.items = self.items.convert();
        self.items.sort_by_key(|r| r.rank);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rankings_are_ordered_by_rank() {
        let json = r##"{
            "items": [
                {"tag": "#8UQ2", "name": "second", "trophies": 9100, "rank": 2, "previousRank": 1},
                {"tag": "#2PP", "name": "first", "trophies": 9200, "rank": 1, "previousRank": -1,
                 "clan": {"tag": "#9VJ2GV", "name": "Royal Guard", "badgeId": 16000001}}
            ],
            "paging": {"cursors": {"after": "eyJwb3MiOjJ9"}}
        }"##;
        let rankings = serde_json::from_str::<PlayerRankings>(json).unwrap().convert();
        assert_eq!(rankings.items[0].name, "first");
        assert!(rankings.items[0].is_new_entry());
        assert!(!rankings.items[1].is_new_entry());
        assert_eq!(rankings.items[0].clan.as_ref().unwrap().badge_name, "badge_001");
        assert_eq!(
            rankings.paging.unwrap().cursors.after.as_deref(),
            Some("eyJwb3MiOjJ9")
        );
    }
}
