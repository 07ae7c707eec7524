//! Context menus on battlers and decks
//!
//! Menus are plain data: a list of titled actions. Applying an action only
//! mutates [`AppState`](crate::app::AppState); opening links, the clipboard and
//! the share sheet are left to whatever front-end reads the state.

use crate::constants::DECK_SIZE;
use crate::models::links::{clan_link, deck_link_for, profile_link};
use crate::models::{Battler, Card, Tag};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuAction {
    /// Jump to the Stats tab searching this player
    ShowPlayer(Tag),
    /// Jump to the Stats tab searching this clan
    ShowClan(Tag),
    /// Open a deep link in the game client
    OpenLink(String),
    /// Put text on the clipboard
    Copy(String),
    /// Show the "add to deck wallet" sheet pre-filled with these cards
    SaveDeckToWallet(Vec<u32>),
    /// Present the share sheet with a single named link
    ShareLink { name: String, url: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub title: String,
    pub icon: &'static str,
    pub action: MenuAction,
}

impl MenuItem {
    fn new(title: impl Into<String>, icon: &'static str, action: MenuAction) -> Self {
        MenuItem {
            title: title.into(),
            icon,
            action,
        }
    }
}

/// Actions offered on a battler's header
pub fn player_context_menu(battler: &Battler) -> Vec<MenuItem> {
    let mut items = Vec::new();

    if let Some(tag) = Tag::parse(&battler.tag) {
        items.push(MenuItem::new(
            "Player profile",
            "arrowshape.turn.up.right",
            MenuAction::ShowPlayer(tag.clone()),
        ));
        items.push(MenuItem::new(
            "Open player in game",
            "square.and.arrow.up",
            MenuAction::OpenLink(profile_link(&tag)),
        ));
    }
    items.push(MenuItem::new(
        format!("Player: {}", battler.tag),
        "doc.on.doc",
        MenuAction::Copy(battler.tag.clone()),
    ));

    let clan_tag = battler.clan.as_ref().map(|c| c.tag.as_str()).unwrap_or("");
    if !clan_tag.is_empty() {
        if let Some(tag) = Tag::parse(clan_tag) {
            items.push(MenuItem::new(
                "Clan profile",
                "arrowshape.turn.up.right",
                MenuAction::ShowClan(tag.clone()),
            ));
            items.push(MenuItem::new(
                "Open clan in game",
                "square.and.arrow.up",
                MenuAction::OpenLink(clan_link(&tag)),
            ));
        }
        items.push(MenuItem::new(
            format!("Clan: {}", clan_tag),
            "doc.on.doc",
            MenuAction::Copy(clan_tag.to_string()),
        ));
    }

    items
}

/// Actions offered on a deck; only complete decks get a menu
pub fn deck_context_menu(cards: &[Card]) -> Vec<MenuItem> {
    if cards.len() != DECK_SIZE {
        return Vec::new();
    }

    let mut items = Vec::new();
    if !cards.iter().any(Card::is_unknown) {
        items.push(MenuItem::new(
            "Save to Deck Wallet",
            "square.and.arrow.down",
            MenuAction::SaveDeckToWallet(cards.iter().map(|c| c.id).collect()),
        ));
    }
    if let Some(link) = deck_link_for(cards) {
        items.push(MenuItem::new(
            "Copy deck in game",
            "square.and.arrow.up",
            MenuAction::OpenLink(link.clone()),
        ));
        items.push(MenuItem::new(
            "Share deck link",
            "square.and.arrow.up",
            MenuAction::ShareLink {
                name: "Deck link".to_string(),
                url: link,
            },
        ));
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::battle::tests::battle_json;
    use crate::models::PlayerBattle;
    use crate::web::DecodeConvertible;

    fn battle() -> PlayerBattle {
        serde_json::from_str::<PlayerBattle>(&battle_json("PvP", 8))
            .unwrap()
            .convert()
    }

    fn titles(items: &[MenuItem]) -> Vec<&str> {
        items.iter().map(|i| i.title.as_str()).collect()
    }

    #[test]
    fn test_battler_with_clan_gets_clan_actions() {
        let b = battle();
        let items = player_context_menu(&b.team[0]);
        assert_eq!(
            titles(&items),
            [
                "Player profile",
                "Open player in game",
                "Player: #2PP",
                "Clan profile",
                "Open clan in game",
                "Clan: #9VJ2GV",
            ]
        );
        assert_eq!(
            items[3].action,
            MenuAction::ShowClan(Tag::parse("9VJ2GV").unwrap())
        );
    }

    #[test]
    fn test_battler_without_clan_gets_player_actions_only() {
        let b = battle();
        let items = player_context_menu(&b.opponent[0]);
        assert_eq!(items.len(), 3);
        assert_eq!(items[2].action, MenuAction::Copy("#8UQ2".into()));
    }

    #[test]
    fn test_deck_menu_requires_full_known_deck() {
        let b = battle();
        let mut cards = b.team[0].cards.clone();
        let items = deck_context_menu(&cards);
        assert_eq!(
            titles(&items),
            ["Save to Deck Wallet", "Copy deck in game", "Share deck link"]
        );

        cards[0].name.clear();
        assert_eq!(
            titles(&deck_context_menu(&cards)),
            ["Copy deck in game", "Share deck link"]
        );
        assert!(deck_context_menu(&cards[..7]).is_empty());
    }
}
