//! Wire models for the game API and the companion user API
//!
//! Every response type implements [`DecodeConvertible`]; the conversion fills
//! the `#[serde(skip)]` fields that are derived rather than sent.

pub mod battle;
pub mod card;
pub mod clan;
pub mod links;
pub mod player;
pub mod ranking;
pub mod tag;
pub mod user;

use serde::{Deserialize, Serialize};

use crate::web::DecodeConvertible;

pub use battle::{BattleOutcome, Battler, BattlerSide, PlayerBattle};
pub use card::{Card, Rarity};
pub use clan::{Clan, ClanMember, ClanRef, ClanRole, ClanSummary};
pub use player::Player;
pub use ranking::{PlayerRanking, PlayerRankings};
pub use tag::Tag;
pub use user::{SavedDeck, UserSession};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arena {
    pub id: u32,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMode {
    pub id: u32,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub is_country: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
    #[serde(default)]
    pub cursors: Cursors,
}

/// `{ items, paging }` envelope used by list endpoints
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paged<T> {
    pub items: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging: Option<Paging>,
}

impl<T: DecodeConvertible> DecodeConvertible for Paged<T> {
    fn convert(mut self) -> Self {
        self.items = self.items.convert();
        self
    }
}
