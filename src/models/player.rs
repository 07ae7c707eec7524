use serde::{Deserialize, Serialize};

use crate::models::{Arena, Card, ClanRef};
use crate::web::DecodeConvertible;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub tag: String,
    pub name: String,
    #[serde(default)]
    pub exp_level: u32,
    #[serde(default)]
    pub trophies: u32,
    #[serde(default)]
    pub best_trophies: u32,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub battle_count: u32,
    #[serde(default)]
    pub three_crown_wins: u32,
    #[serde(default)]
    pub challenge_max_wins: u32,
    #[serde(default)]
    pub donations: u32,
    #[serde(default)]
    pub donations_received: u32,
    #[serde(default)]
    pub war_day_wins: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clan: Option<ClanRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arena: Option<Arena>,
    #[serde(default)]
    pub current_deck: Vec<Card>,
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_favourite_card: Option<Card>,
}

impl Player {
    /// Share of decided battles won, in percent
    pub fn win_rate(&self) -> Option<f32> {
        let decided = self.wins + self.losses;
        (decided > 0).then(|| self.wins as f32 * 100.0 / decided as f32)
    }
}

impl DecodeConvertible for Player {
    fn convert(mut self) -> Self {
        self.clan = self.clan.convert();
        self.current_deck = self.current_deck.convert();
        self.cards = self.cards.convert();
        self.current_favourite_card = self.current_favourite_card.convert();
        self
    }
}
