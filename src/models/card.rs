use serde::{Deserialize, Serialize};

use crate::web::DecodeConvertible;

/// Level cap every rarity is normalized against
const DISPLAY_MAX_LEVEL: u8 = 14;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
    Champion,
}

impl Rarity {
    /// Infer rarity from the per-rarity level cap reported by the API
    pub fn from_max_level(max_level: u8) -> Option<Rarity> {
        match max_level {
            14 => Some(Rarity::Common),
            12 => Some(Rarity::Rare),
            9 => Some(Rarity::Epic),
            6 => Some(Rarity::Legendary),
            4 => Some(Rarity::Champion),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
            Rarity::Champion => "Champion",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconUrls {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evolution_medium: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: u32,
    pub name: String,
    /// Level relative to the card's rarity (1 = lowest for that rarity)
    #[serde(default)]
    pub level: u8,
    #[serde(default)]
    pub max_level: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity: Option<Rarity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elixir_cost: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evolution_level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub star_level: Option<u8>,
    #[serde(default)]
    pub icon_urls: IconUrls,
    /// Level on the shared 1..=14 scale shown in game
    #[serde(skip)]
    pub display_level: u8,
}

impl Card {
    pub fn is_evolved(&self) -> bool {
        self.evolution_level.is_some_and(|l| l > 0)
    }

    /// Star-levelled cards use the golden artwork
    pub fn is_golden(&self) -> bool {
        self.star_level.is_some_and(|l| l > 0)
    }

    /// Placeholder the API sends for cards it cannot reveal
    pub fn is_unknown(&self) -> bool {
        self.id == 0 || self.name.is_empty()
    }

    /// Name and display level, marked when the card is evolved or golden
    pub fn label(&self) -> String {
        let mut label = format!("{} {}", self.name, self.display_level);
        if self.is_evolved() {
            label.push_str(" evo");
        }
        if self.is_golden() {
            label.push_str(" gold");
        }
        label
    }
}

impl DecodeConvertible for Card {
    fn convert(mut self) -> Self {
        if self.rarity.is_none() {
            self.rarity = Rarity::from_max_level(self.max_level);
        }
        self.display_level = if self.max_level == 0 || self.max_level > DISPLAY_MAX_LEVEL {
            self.level
        } else {
            self.level.saturating_add(DISPLAY_MAX_LEVEL - self.max_level)
        };
        self
    }
}

/// Average elixir of a deck, `None` when any cost is unknown
pub fn average_elixir(cards: &[Card]) -> Option<f32> {
    if cards.is_empty() {
        return None;
    }
    let total: Option<u32> = cards
        .iter()
        .map(|c| c.elixir_cost.map(u32::from))
        .sum();
    total.map(|t| t as f32 / cards.len() as f32)
}
