//! Companion user API models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::web::DecodeConvertible;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl UserSession {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

impl DecodeConvertible for UserSession {}

/// A deck stored in the user's deck wallet
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedDeck {
    pub id: String,
    pub name: String,
    pub cards: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub removed: bool,
}

impl DecodeConvertible for SavedDeck {
    fn convert(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_session_expiry() {
        let session: UserSession =
            serde_json::from_str(r#"{"token":"abc","expiresAt":"2026-01-01T00:00:00Z"}"#).unwrap();
        let before = Utc.with_ymd_and_hms(2025, 12, 31, 0, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap();
        assert!(!session.is_expired(before));
        assert!(session.is_expired(after));
    }

    #[test]
    fn test_saved_deck_round_trip() {
        let json = r#"{"id":"d1","name":" Hog 2.6 ","cards":[1,2,3,4,5,6,7,8],"createdAt":"2025-06-01T12:00:00Z"}"#;
        let deck = serde_json::from_str::<SavedDeck>(json).unwrap().convert();
        assert_eq!(deck.name, "Hog 2.6");
        let again = serde_json::from_str::<SavedDeck>(&serde_json::to_string(&deck).unwrap())
            .unwrap()
            .convert();
        assert_eq!(deck, again);
    }
}
