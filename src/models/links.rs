//! Deep links understood by the game client

use crate::constants::{DECK_SIZE, GAME_LINK_BASE};
use crate::models::{Card, Tag};

/// Link that opens a player's profile in game
pub fn profile_link(tag: &Tag) -> String {
    format!("{}/?playerInfo?id={}", GAME_LINK_BASE, tag.as_str())
}

/// Link that opens a clan in game
pub fn clan_link(tag: &Tag) -> String {
    format!("{}/?clanInfo?id={}", GAME_LINK_BASE, tag.as_str())
}

/// Copy-deck link; only full decks can be copied
pub fn deck_link(card_ids: &[u32]) -> Option<String> {
    if card_ids.len() != DECK_SIZE {
        return None;
    }
    let ids: Vec<String> = card_ids.iter().map(u32::to_string).collect();
    Some(format!("{}/deck/en?deck={}", GAME_LINK_BASE, ids.join(";")))
}

pub fn deck_link_for(cards: &[Card]) -> Option<String> {
    let ids: Vec<u32> = cards.iter().map(|c| c.id).collect();
    deck_link(&ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_and_clan_links() {
        let tag = Tag::parse("#2pp").unwrap();
        assert_eq!(profile_link(&tag), "https://link.clashroyale.com/?playerInfo?id=2PP");
        assert_eq!(clan_link(&tag), "https://link.clashroyale.com/?clanInfo?id=2PP");
    }

    #[test]
    fn test_deck_link_requires_full_deck() {
        let ids: Vec<u32> = (26000000..26000008).collect();
        let link = deck_link(&ids).unwrap();
        assert!(link.ends_with("deck=26000000;26000001;26000002;26000003;26000004;26000005;26000006;26000007"));
        assert!(deck_link(&ids[..7]).is_none());
    }
}
