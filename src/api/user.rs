//! Companion user API descriptors (POST)

use std::collections::HashSet;

use serde::Serialize;

use crate::constants::DECK_SIZE;
use crate::models::{SavedDeck, UserSession};
use crate::web::{Endpoint, HeaderMode, WebPostable};

const DEFAULT_DECK_NAME: &str = "Untitled deck";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    pub device_id: String,
    pub app_version: &'static str,
}

/// Create an anonymous session for a device
#[derive(Clone, Debug)]
pub struct RegisterRequest {
    base: Endpoint,
    pub device_id: String,
}

impl RegisterRequest {
    pub fn new(device_id: impl Into<String>) -> Self {
        RegisterRequest {
            base: Endpoint::user_api(),
            device_id: device_id.into(),
        }
    }

    pub fn at(mut self, base: &Endpoint) -> Self {
        self.base = base.clone();
        self
    }
}

impl WebPostable for RegisterRequest {
    type Response = UserSession;
    type Postable = RegisterPayload;
    const HEADER_MODE: HeaderMode = HeaderMode::None;

    fn postable_value(&self) -> Option<RegisterPayload> {
        let device_id = self.device_id.trim();
        (!device_id.is_empty()).then(|| RegisterPayload {
            device_id: device_id.to_string(),
            app_version: crate::constants::APP_VERSION,
        })
    }

    fn url_string(&self) -> Option<String> {
        self.postable_value()
            .map(|_| self.base.join("/sessions/register"))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SaveDeckPayload {
    pub name: String,
    pub cards: Vec<u32>,
}

/// Add a deck to the deck wallet
#[derive(Clone, Debug)]
pub struct SaveDeckRequest {
    base: Endpoint,
    pub name: String,
    pub cards: Vec<u32>,
}

impl SaveDeckRequest {
    pub fn new(name: impl Into<String>, cards: Vec<u32>) -> Self {
        SaveDeckRequest {
            base: Endpoint::user_api(),
            name: name.into(),
            cards,
        }
    }

    pub fn at(mut self, base: &Endpoint) -> Self {
        self.base = base.clone();
        self
    }

    fn is_full_deck(&self) -> bool {
        let distinct: HashSet<u32> = self.cards.iter().copied().collect();
        self.cards.len() == DECK_SIZE && distinct.len() == DECK_SIZE
    }
}

impl WebPostable for SaveDeckRequest {
    type Response = SavedDeck;
    type Postable = SaveDeckPayload;
    const HEADER_MODE: HeaderMode = HeaderMode::Authenticated;

    fn postable_value(&self) -> Option<SaveDeckPayload> {
        if !self.is_full_deck() {
            return None;
        }
        let name = match self.name.trim() {
            "" => DEFAULT_DECK_NAME.to_string(),
            name => name.to_string(),
        };
        Some(SaveDeckPayload {
            name,
            cards: self.cards.clone(),
        })
    }

    fn url_string(&self) -> Option<String> {
        self.is_full_deck().then(|| self.base.join("/decks"))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveDeckPayload {
    pub deck_id: String,
}

/// Remove a deck from the deck wallet
#[derive(Clone, Debug)]
pub struct RemoveDeckRequest {
    base: Endpoint,
    pub deck_id: String,
}

impl RemoveDeckRequest {
    pub fn new(deck_id: impl Into<String>) -> Self {
        RemoveDeckRequest {
            base: Endpoint::user_api(),
            deck_id: deck_id.into(),
        }
    }

    pub fn at(mut self, base: &Endpoint) -> Self {
        self.base = base.clone();
        self
    }
}

impl WebPostable for RemoveDeckRequest {
    type Response = SavedDeck;
    type Postable = RemoveDeckPayload;
    const HEADER_MODE: HeaderMode = HeaderMode::Authenticated;

    fn postable_value(&self) -> Option<RemoveDeckPayload> {
        let deck_id = self.deck_id.trim();
        (!deck_id.is_empty()).then(|| RemoveDeckPayload {
            deck_id: deck_id.to_string(),
        })
    }

    fn url_string(&self) -> Option<String> {
        self.postable_value().map(|_| self.base.join("/decks/remove"))
    }
}

/// Extend the current session; sends no body
#[derive(Clone, Debug)]
pub struct RefreshSessionRequest {
    base: Endpoint,
}

impl RefreshSessionRequest {
    pub fn new() -> Self {
        RefreshSessionRequest {
            base: Endpoint::user_api(),
        }
    }

    pub fn at(mut self, base: &Endpoint) -> Self {
        self.base = base.clone();
        self
    }
}

impl Default for RefreshSessionRequest {
    fn default() -> Self {
        Self::new()
    }
}

impl WebPostable for RefreshSessionRequest {
    type Response = UserSession;
    type Postable = ();
    const HEADER_MODE: HeaderMode = HeaderMode::Authenticated;

    fn postable_value(&self) -> Option<()> {
        None
    }

    fn url_string(&self) -> Option<String> {
        Some(self.base.join("/sessions/refresh"))
    }
}
