use serde::{Deserialize, Serialize};

use crate::models::{Arena, Location};
use crate::web::DecodeConvertible;

/// Badge asset shown for players without a clan
pub const NO_CLAN_BADGE: &str = "no_clan";

/// First badge id issued by the game; ids count up from here
const BADGE_ID_BASE: u32 = 16_000_000;

/// Resolve a numeric badge id into its asset name
pub fn badge_name(badge_id: u32) -> String {
    match badge_id.checked_sub(BADGE_ID_BASE) {
        Some(index) if index < 1_000 => format!("badge_{index:03}"),
        _ => NO_CLAN_BADGE.to_string(),
    }
}

/// Clan as embedded in players, battlers and rankings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClanRef {
    pub tag: String,
    pub name: String,
    #[serde(default)]
    pub badge_id: u32,
    #[serde(skip)]
    pub badge_name: String,
}

impl DecodeConvertible for ClanRef {
    fn convert(mut self) -> Self {
        self.badge_name = badge_name(self.badge_id);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClanRole {
    Member,
    Elder,
    CoLeader,
    Leader,
    #[serde(other)]
    Unknown,
}

impl ClanRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClanRole::Member => "Member",
            ClanRole::Elder => "Elder",
            ClanRole::CoLeader => "Co-leader",
            ClanRole::Leader => "Leader",
            ClanRole::Unknown => "-",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClanMember {
    pub tag: String,
    pub name: String,
    pub role: ClanRole,
    #[serde(default)]
    pub exp_level: u32,
    #[serde(default)]
    pub trophies: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arena: Option<Arena>,
    #[serde(default)]
    pub clan_rank: u32,
    #[serde(default)]
    pub previous_clan_rank: u32,
    #[serde(default)]
    pub donations: u32,
    #[serde(default)]
    pub donations_received: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<String>,
}

impl ClanMember {
    /// Positive when the member climbed since the last reset
    pub fn rank_change(&self) -> i64 {
        if self.previous_clan_rank == 0 {
            return 0;
        }
        i64::from(self.previous_clan_rank) - i64::from(self.clan_rank)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clan {
    pub tag: String,
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub clan_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub badge_id: u32,
    #[serde(skip)]
    pub badge_name: String,
    #[serde(default)]
    pub clan_score: u32,
    #[serde(default)]
    pub clan_war_trophies: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default)]
    pub required_trophies: u32,
    #[serde(default)]
    pub donations_per_week: u32,
    #[serde(default)]
    pub members: u32,
    #[serde(default)]
    pub member_list: Vec<ClanMember>,
}

impl DecodeConvertible for Clan {
    fn convert(mut self) -> Self {
        self.badge_name = badge_name(self.badge_id);
        self.member_list.sort_by_key(|m| m.clan_rank);
        self
    }
}

impl Clan {
    pub fn leader(&self) -> Option<&ClanMember> {
        self.member_list.iter().find(|m| m.role == ClanRole::Leader)
    }
}

/// Clan as returned by search
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClanSummary {
    pub tag: String,
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub clan_type: Option<String>,
    #[serde(default)]
    pub badge_id: u32,
    #[serde(skip)]
    pub badge_name: String,
    #[serde(default)]
    pub clan_score: u32,
    #[serde(default)]
    pub members: u32,
    #[serde(default)]
    pub required_trophies: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl DecodeConvertible for ClanSummary {
    fn convert(mut self) -> Self {
        self.badge_name = badge_name(self.badge_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLAN_FIXTURE: &str = r##"{
        "tag": "#9VJ2GV",
        "name": "Royal Guard",
        "type": "inviteOnly",
        "description": "Active daily",
        "badgeId": 16000043,
        "clanScore": 61234,
        "clanWarTrophies": 2890,
        "location": {"id": 57000000, "name": "Europe", "isCountry": false},
        "requiredTrophies": 6000,
        "donationsPerWeek": 4200,
        "members": 3,
        "memberList": [
            {"tag": "#P0LYJC8C", "name": "beta", "role": "elder", "expLevel": 50, "trophies": 7100, "clanRank": 2, "previousClanRank": 1, "donations": 200, "donationsReceived": 180},
            {"tag": "#2PP", "name": "alpha", "role": "leader", "expLevel": 55, "trophies": 8300, "clanRank": 1, "previousClanRank": 3, "donations": 420, "donationsReceived": 90},
            {"tag": "#8UQ2", "name": "gamma", "role": "founder", "expLevel": 30, "trophies": 5000, "clanRank": 3, "previousClanRank": 0}
        ]
    }"##;

    #[test]
    fn test_convert_resolves_badge_and_orders_members() {
        let clan: Clan = serde_json::from_str::<Clan>(CLAN_FIXTURE).unwrap().convert();
        assert_eq!(clan.badge_name, "badge_043");
        let names: Vec<_> = clan.member_list.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["alpha", "beta", "gamma"]);
        assert_eq!(clan.leader().unwrap().name, "alpha");
        assert_eq!(clan.member_list[2].role, ClanRole::Unknown);
    }

    #[test]
    fn test_rank_change() {
        let clan: Clan = serde_json::from_str::<Clan>(CLAN_FIXTURE).unwrap().convert();
        assert_eq!(clan.member_list[0].rank_change(), 2);
        assert_eq!(clan.member_list[1].rank_change(), -1);
        assert_eq!(clan.member_list[2].rank_change(), 0);
    }

    #[test]
    fn test_fixture_round_trip() {
        let clan: Clan = serde_json::from_str::<Clan>(CLAN_FIXTURE).unwrap().convert();
        let encoded = serde_json::to_string(&clan).unwrap();
        let again: Clan = serde_json::from_str::<Clan>(&encoded).unwrap().convert();
        assert_eq!(clan, again);
    }

    #[test]
    fn test_badge_name_out_of_range() {
        assert_eq!(badge_name(0), NO_CLAN_BADGE);
        assert_eq!(badge_name(16_000_000), "badge_000");
    }
}
