//! Battle log entries

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::DECK_SIZE;
use crate::models::clan::NO_CLAN_BADGE;
use crate::models::{Arena, Card, ClanRef, GameMode};
use crate::web::DecodeConvertible;

/// Compact UTC timestamp used by the battle log, e.g. `20240305T181522.000Z`
const BATTLE_TIME_FORMAT: &str = "%Y%m%dT%H%M%S%.fZ";

pub fn parse_battle_time(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, BATTLE_TIME_FORMAT)
        .ok()
        .map(|t| t.and_utc())
}

/// Which half of a battle a battler belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BattlerSide {
    Team,
    Opponent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BattleOutcome {
    Victory,
    Defeat,
    Draw,
}

impl BattleOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            BattleOutcome::Victory => "Victory",
            BattleOutcome::Defeat => "Defeat",
            BattleOutcome::Draw => "Draw",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Battler {
    pub tag: String,
    pub name: String,
    #[serde(default)]
    pub crowns: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_trophies: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trophy_change: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub king_tower_hit_points: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clan: Option<ClanRef>,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl Battler {
    /// Badge asset for the battler's clan, or the no-clan badge
    pub fn badge_name(&self) -> &str {
        self.clan
            .as_ref()
            .map(|c| c.badge_name.as_str())
            .unwrap_or(NO_CLAN_BADGE)
    }

    pub fn clan_name(&self) -> &str {
        self.clan.as_ref().map(|c| c.name.as_str()).unwrap_or("")
    }
}

impl DecodeConvertible for Battler {
    fn convert(mut self) -> Self {
        self.clan = self.clan.convert();
        self.cards = self.cards.convert();
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerBattle {
    #[serde(rename = "type")]
    pub battle_type: String,
    pub battle_time: String,
    #[serde(skip)]
    pub played_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_ladder_tournament: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arena: Option<Arena>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_mode: Option<GameMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck_selection: Option<String>,
    #[serde(default)]
    pub team: Vec<Battler>,
    #[serde(default)]
    pub opponent: Vec<Battler>,
}

impl DecodeConvertible for PlayerBattle {
    fn convert(mut self) -> Self {
        self.played_at = parse_battle_time(&self.battle_time);
        self.team = self.team.convert();
        self.opponent = self.opponent.convert();
        self
    }
}

impl PlayerBattle {
    /// Duels carry one deck per round back to back in the card list
    pub fn is_duel(&self) -> bool {
        self.battle_type.to_lowercase().contains("duel")
    }

    pub fn side(&self, side: BattlerSide) -> &[Battler] {
        match side {
            BattlerSide::Team => &self.team,
            BattlerSide::Opponent => &self.opponent,
        }
    }

    pub fn battler(&self, side: BattlerSide, index: usize) -> Option<&Battler> {
        self.side(side).get(index)
    }

    /// Decks played by a battler: one per round for duels, otherwise one.
    pub fn decks(&self, side: BattlerSide, index: usize) -> Vec<&[Card]> {
        let Some(battler) = self.battler(side, index) else {
            return Vec::new();
        };
        if self.is_duel() {
            battler.cards.chunks(DECK_SIZE).collect()
        } else {
            vec![battler.cards.as_slice()]
        }
    }

    fn crowns(&self, side: BattlerSide) -> u8 {
        self.side(side).iter().map(|b| b.crowns).max().unwrap_or(0)
    }

    /// Outcome from the team's point of view
    pub fn outcome(&self) -> BattleOutcome {
        let team = self.crowns(BattlerSide::Team);
        let opponent = self.crowns(BattlerSide::Opponent);
        match team.cmp(&opponent) {
            std::cmp::Ordering::Greater => BattleOutcome::Victory,
            std::cmp::Ordering::Less => BattleOutcome::Defeat,
            std::cmp::Ordering::Equal => BattleOutcome::Draw,
        }
    }

    pub fn mode_name(&self) -> &str {
        self.game_mode
            .as_ref()
            .map(|m| m.name.as_str())
            .unwrap_or(&self.battle_type)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn cards(ids: std::ops::Range<u32>) -> String {
        let cards: Vec<String> = ids
            .map(|i| 26_000_000 + i)
            .map(|id| format!(r#"{{"id":{id},"name":"Card {id}","level":11,"maxLevel":14,"iconUrls":{{}}}}"#))
            .collect();
        format!("[{}]", cards.join(","))
    }

    pub(crate) fn battle_json(battle_type: &str, team_cards: usize) -> String {
        format!(
            r##"{{
                "type": "{battle_type}",
                "battleTime": "20240305T181522.000Z",
                "isLadderTournament": false,
                "arena": {{"id": 54000015, "name": "Legendary Arena"}},
                "gameMode": {{"id": 72000006, "name": "Ladder"}},
                "deckSelection": "collection",
                "team": [{{
                    "tag": "#2PP", "name": "alpha", "crowns": 3,
                    "startingTrophies": 7012, "trophyChange": 30,
                    "clan": {{"tag": "#9VJ2GV", "name": "Royal Guard", "badgeId": 16000043}},
                    "cards": {}
                }}],
                "opponent": [{{
                    "tag": "#8UQ2", "name": "beta", "crowns": 1,
                    "startingTrophies": 7030, "trophyChange": -30,
                    "cards": {}
                }}]
            }}"##,
            cards(0..team_cards as u32),
            cards(100..108),
        )
    }

    fn battle(battle_type: &str, team_cards: usize) -> PlayerBattle {
        serde_json::from_str::<PlayerBattle>(&battle_json(battle_type, team_cards))
            .unwrap()
            .convert()
    }

    #[test]
    fn test_battle_time_is_parsed() {
        let b = battle("PvP", 8);
        let at = b.played_at.unwrap();
        assert_eq!((at.year(), at.month(), at.day()), (2024, 3, 5));
        assert_eq!((at.hour(), at.minute(), at.second()), (18, 15, 22));
        assert!(parse_battle_time("yesterday").is_none());
    }

    #[test]
    fn test_duel_cards_split_into_decks() {
        let duel = battle("riverRaceDuel", 24);
        assert!(duel.is_duel());
        let decks = duel.decks(BattlerSide::Team, 0);
        assert_eq!(decks.len(), 3);
        assert!(decks.iter().all(|d| d.len() == DECK_SIZE));
        assert_eq!(decks[1][0].id, 26_000_008);
    }

    #[test]
    fn test_non_duel_has_single_deck() {
        let ladder = battle("PvP", 8);
        assert!(!ladder.is_duel());
        assert_eq!(ladder.decks(BattlerSide::Opponent, 0).len(), 1);
        assert!(ladder.decks(BattlerSide::Opponent, 3).is_empty());
    }

    #[test]
    fn test_outcome_and_badges() {
        let b = battle("PvP", 8);
        assert_eq!(b.outcome(), BattleOutcome::Victory);
        assert_eq!(b.team[0].badge_name(), "badge_043");
        assert_eq!(b.opponent[0].badge_name(), NO_CLAN_BADGE);
        assert_eq!(b.opponent[0].clan_name(), "");
        assert_eq!(b.mode_name(), "Ladder");
    }

    #[test]
    fn test_battle_log_round_trip() {
        let log: Vec<PlayerBattle> =
            serde_json::from_str::<Vec<PlayerBattle>>(&format!("[{}]", battle_json("PvP", 8)))
                .unwrap()
                .convert();
        let encoded = serde_json::to_string(&log).unwrap();
        let again = serde_json::from_str::<Vec<PlayerBattle>>(&encoded)
            .unwrap()
            .convert();
        assert_eq!(log, again);
    }
}
