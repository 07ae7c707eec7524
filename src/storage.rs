use crate::constants::MAX_RECENT_SEARCHES;
use crate::messages::ui_events::{AppTab, SearchTarget};
use crate::models::{SavedDeck, UserSession};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;

const SETTINGS_FILE: &str = "settings.yaml";

/// A search the user ran, most recent first in [`Settings::recent_searches`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecentSearch {
    pub target: SearchTarget,
    pub at: DateTime<Utc>,
}

/// Everything persisted between runs
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tab_selection: AppTab,
    pub recent_searches: VecDeque<RecentSearch>,
    pub api_token: Option<String>,
    pub session: Option<UserSession>,
    pub saved_decks: Vec<SavedDeck>,
}

/// Manages persisted settings
pub struct Storage {
    pub settings: Settings,
    config_dir: Option<PathBuf>,
}

impl Storage {
    /// Storage under `~/.royale-stats`, loading whatever is already there
    pub fn new() -> Self {
        let config_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".royale-stats");
        Self::at(config_dir)
    }

    /// Storage under an explicit directory
    pub fn at(config_dir: impl Into<PathBuf>) -> Self {
        let mut storage = Storage {
            settings: Settings::default(),
            config_dir: Some(config_dir.into()),
        };

        if let Err(e) = storage.load() {
            tracing::warn!(error = %e, "Could not load settings, using defaults");
        }
        storage
    }

    /// Storage that never touches disk
    pub fn in_memory() -> Self {
        Storage {
            settings: Settings::default(),
            config_dir: None,
        }
    }

    fn settings_path(&self) -> Option<PathBuf> {
        self.config_dir.as_ref().map(|d| d.join(SETTINGS_FILE))
    }

    /// Load settings from disk; a missing file keeps the defaults
    pub fn load(&mut self) -> Result<()> {
        let Some(path) = self.settings_path() else {
            return Ok(());
        };
        if !path.exists() {
            return Ok(());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        self.settings = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(())
    }

    /// Write settings to disk
    pub fn save(&self) -> Result<()> {
        let (Some(dir), Some(path)) = (self.config_dir.as_ref(), self.settings_path()) else {
            return Ok(());
        };
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }
        let content = serde_yaml::to_string(&self.settings)?;
        fs::write(&path, content).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            tracing::warn!(error = %e, "Could not save settings");
        }
    }

    pub fn set_tab(&mut self, tab: AppTab) {
        if self.settings.tab_selection != tab {
            self.settings.tab_selection = tab;
            self.persist();
        }
    }

    /// Record a search, moving repeats to the front
    pub fn add_recent_search(&mut self, target: SearchTarget) {
        let recent = &mut self.settings.recent_searches;
        recent.retain(|r| r.target != target);
        if recent.len() >= MAX_RECENT_SEARCHES {
            recent.pop_back();
        }
        recent.push_front(RecentSearch {
            target,
            at: Utc::now(),
        });
        self.persist();
    }

    pub fn set_session(&mut self, session: Option<UserSession>) {
        self.settings.session = session;
        self.persist();
    }

    /// Insert or replace a deck in the local wallet mirror
    pub fn remember_deck(&mut self, deck: SavedDeck) {
        let decks = &mut self.settings.saved_decks;
        if deck.removed {
            decks.retain(|d| d.id != deck.id);
        } else if let Some(existing) = decks.iter_mut().find(|d| d.id == deck.id) {
            *existing = deck;
        } else {
            decks.push(deck);
        }
        self.persist();
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tag;

    fn player(tag: &str) -> SearchTarget {
        SearchTarget::Player(Tag::parse(tag).unwrap())
    }

    #[test]
    fn test_settings_survive_reload() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = Storage::at(dir.path());
        storage.set_tab(AppTab::Leaderboards);
        storage.add_recent_search(player("#2PP"));
        storage.remember_deck(SavedDeck {
            id: "d1".into(),
            name: "Hog".into(),
            cards: (1..=8).collect(),
            created_at: None,
            removed: false,
        });

        let reloaded = Storage::at(dir.path());
        assert_eq!(reloaded.settings, storage.settings);
        assert_eq!(reloaded.settings.tab_selection, AppTab::Leaderboards);
        assert_eq!(reloaded.settings.saved_decks.len(), 1);
    }

    #[test]
    fn test_recent_searches_are_deduplicated_and_bounded() {
        let mut storage = Storage::in_memory();
        storage.add_recent_search(player("#2PP"));
        storage.add_recent_search(player("#8UQ2"));
        storage.add_recent_search(player("#2PP"));
        let tags: Vec<_> = storage
            .settings
            .recent_searches
            .iter()
            .map(|r| r.target.clone())
            .collect();
        assert_eq!(tags, [player("#2PP"), player("#8UQ2")]);

        let alphabet: Vec<char> = crate::models::tag::TAG_ALPHABET.chars().collect();
        for i in 0..(MAX_RECENT_SEARCHES + 5) {
            let tag = format!("#{}{}PP", alphabet[i % 14], alphabet[(i / 14) % 14]);
            storage.add_recent_search(player(&tag));
        }
        assert!(storage.settings.recent_searches.len() <= MAX_RECENT_SEARCHES);
    }

    #[test]
    fn test_removed_deck_is_dropped() {
        let mut storage = Storage::in_memory();
        let deck = SavedDeck {
            id: "d1".into(),
            name: "Hog".into(),
            cards: (1..=8).collect(),
            created_at: None,
            removed: false,
        };
        storage.remember_deck(deck.clone());
        storage.remember_deck(SavedDeck {
            removed: true,
            ..deck
        });
        assert!(storage.settings.saved_decks.is_empty());
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILE), ": not yaml : [").unwrap();
        let storage = Storage::at(dir.path());
        assert_eq!(storage.settings, Settings::default());
    }
}
