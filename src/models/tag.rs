//! Player and clan tags

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Characters the game uses when issuing tags
pub const TAG_ALPHABET: &str = "0289PYLQGRJCUV";

/// A normalized game tag, stored without the leading `#`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tag(String);

impl Tag {
    /// Normalize and validate user input.
    ///
    /// Accepts an optional `#`, surrounding whitespace, lowercase letters and
    /// the letter `O` typed for the digit `0`.
    pub fn parse(raw: &str) -> Option<Tag> {
        static TAG_PATTERN: OnceLock<Regex> = OnceLock::new();
        let pattern = TAG_PATTERN.get_or_init(|| Regex::new(r"^[0289PYLQGRJCUV]{3,14}$").unwrap());

        let normalized: String = raw
            .trim()
            .trim_start_matches('#')
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| match c.to_ascii_uppercase() {
                'O' => '0',
                other => other,
            })
            .collect();

        pattern.is_match(&normalized).then_some(Tag(normalized))
    }

    /// Tag without `#`
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Tag as a URL path segment (`%23` + tag)
    pub fn url_encoded(&self) -> String {
        format!("%23{}", self.0)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl TryFrom<String> for Tag {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Tag::parse(&value).ok_or_else(|| format!("invalid tag `{value}`"))
    }
}

impl From<Tag> for String {
    fn from(tag: Tag) -> Self {
        tag.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_input() {
        let tag = Tag::parse("  #2pp0o ").unwrap();
        assert_eq!(tag.as_str(), "2PP00");
        assert_eq!(tag.to_string(), "#2PP00");
        assert_eq!(tag.url_encoded(), "%232PP00");
    }

    #[test]
    fn test_parse_rejects_invalid_tags() {
        assert!(Tag::parse("").is_none());
        assert!(Tag::parse("#").is_none());
        assert!(Tag::parse("#2P").is_none());
        assert!(Tag::parse("#ABCDEF").is_none());
        assert!(Tag::parse("#2PP0000000000000").is_none());
    }

    #[test]
    fn test_serde_uses_hash_prefixed_form() {
        let tag: Tag = serde_json::from_str(r##""#9CQ2U8QJ""##).unwrap();
        assert_eq!(tag.as_str(), "9CQ2U8QJ");
        assert_eq!(serde_json::to_string(&tag).unwrap(), r##""#9CQ2U8QJ""##);
    }
}
