//! UI events - messages from UI layer to App layer

use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};

use crate::api::RankingLocation;
use crate::app::menu::MenuAction;
use crate::models::Tag;

/// Application tabs
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum AppTab {
    DeckWallet,
    #[default]
    Stats,
    Leaderboards,
    Settings,
}

/// What the Stats tab is showing
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchTarget {
    Player(Tag),
    Clan(Tag),
}

impl SearchTarget {
    pub fn tag(&self) -> &Tag {
        match self {
            SearchTarget::Player(tag) | SearchTarget::Clan(tag) => tag,
        }
    }
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone)]
pub enum UiEvent {
    // Navigation
    SwitchTab(AppTab),

    // Stats
    Search(SearchTarget),
    /// Profile only, outside the Stats search history
    LoadPlayer(Tag),
    Refresh,
    SearchClans(String),

    // Leaderboards
    LoadRankings {
        location: RankingLocation,
        limit: Option<u32>,
    },
    LoadCards,

    // Deck wallet
    Register { device_id: String },
    SaveDeck { name: String, cards: Vec<u32> },
    RemoveDeck { deck_id: String },
    RefreshSession,

    // Context menus and sheets
    Menu(MenuAction),
    DismissShareSheet,
    DismissAddDeckMenu,

    /// The current view went away; stop waiting for its requests
    DismissView,

    // System
    Quit,
}

fn tag_arg(args: &[String], what: &str) -> Result<Tag> {
    let raw = args.first().ok_or_else(|| anyhow!("missing {what} tag"))?;
    Tag::parse(raw).ok_or_else(|| anyhow!("`{raw}` is not a valid {what} tag"))
}

/// Convert command-line arguments to the event that starts the command
pub fn command_to_ui_event(args: &[String]) -> Result<UiEvent> {
    let Some((command, rest)) = args.split_first() else {
        bail!("missing command");
    };

    let event = match command.as_str() {
        "player" | "battles" => UiEvent::Search(SearchTarget::Player(tag_arg(rest, "player")?)),
        "deck-link" => UiEvent::LoadPlayer(tag_arg(rest, "player")?),
        "clan" => UiEvent::Search(SearchTarget::Clan(tag_arg(rest, "clan")?)),
        "search-clans" => {
            let name = rest.join(" ");
            if name.trim().is_empty() {
                bail!("missing clan name");
            }
            UiEvent::SearchClans(name)
        }
        "rankings" => {
            let location = match rest.first() {
                Some(raw) => RankingLocation::parse(raw)
                    .ok_or_else(|| anyhow!("`{raw}` is not `global` or a location id"))?,
                None => RankingLocation::Global,
            };
            let limit = match rest.get(1) {
                Some(raw) => Some(raw.parse().map_err(|_| anyhow!("`{raw}` is not a number"))?),
                None => Some(25),
            };
            UiEvent::LoadRankings { location, limit }
        }
        "cards" => UiEvent::LoadCards,
        other => bail!("unknown command `{other}`"),
    };

    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_player_commands_search_player() {
        for line in ["player #2pp", "battles 2PP"] {
            match command_to_ui_event(&args(line)).unwrap() {
                UiEvent::Search(SearchTarget::Player(tag)) => assert_eq!(tag.as_str(), "2PP"),
                other => panic!("unexpected event for `{line}`: {other:?}"),
            }
        }
    }

    #[test]
    fn test_deck_link_loads_profile_only() {
        match command_to_ui_event(&args("deck-link #2PP")).unwrap() {
            UiEvent::LoadPlayer(tag) => assert_eq!(tag.as_str(), "2PP"),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_rankings_defaults() {
        match command_to_ui_event(&args("rankings")).unwrap() {
            UiEvent::LoadRankings { location, limit } => {
                assert_eq!(location, RankingLocation::Global);
                assert_eq!(limit, Some(25));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_bad_arguments_are_rejected() {
        assert!(command_to_ui_event(&[]).is_err());
        assert!(command_to_ui_event(&args("player")).is_err());
        assert!(command_to_ui_event(&args("clan #XYZ")).is_err());
        assert!(command_to_ui_event(&args("rankings moon")).is_err());
        assert!(command_to_ui_event(&args("search-clans")).is_err());
        assert!(command_to_ui_event(&args("dance")).is_err());
    }

    #[test]
    fn test_search_clans_joins_words() {
        match command_to_ui_event(&args("search-clans Royal Guard")).unwrap() {
            UiEvent::SearchClans(name) => assert_eq!(name, "Royal Guard"),
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
