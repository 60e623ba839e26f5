use serde::{Deserialize, Serialize};
use std::fmt;

/// Physical condition grade of an owned card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CardCondition {
    #[default]
    #[serde(rename = "NM")]
    NearMint,
    #[serde(rename = "LP")]
    LightlyPlayed,
    #[serde(rename = "MP")]
    ModeratelyPlayed,
    #[serde(rename = "HP")]
    HeavilyPlayed,
    #[serde(rename = "DMG")]
    Damaged,
}

impl CardCondition {
    /// Returns the short grading code (e.g., "NM", "LP")
    pub fn code(&self) -> &'static str {
        match self {
            CardCondition::NearMint => "NM",
            CardCondition::LightlyPlayed => "LP",
            CardCondition::ModeratelyPlayed => "MP",
            CardCondition::HeavilyPlayed => "HP",
            CardCondition::Damaged => "DMG",
        }
    }

    /// Returns the full name of the grade (e.g., "Near Mint")
    pub fn display_name(&self) -> &'static str {
        match self {
            CardCondition::NearMint => "Near Mint",
            CardCondition::LightlyPlayed => "Lightly Played",
            CardCondition::ModeratelyPlayed => "Moderately Played",
            CardCondition::HeavilyPlayed => "Heavily Played",
            CardCondition::Damaged => "Damaged",
        }
    }

    /// Parse a grading code (e.g., "nm", "DMG") into a condition
    pub fn from_code(code: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|c| c.code().eq_ignore_ascii_case(code.trim()))
    }

    /// Parse a full grade name (e.g., "lightly played") into a condition
    pub fn from_display_name(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|c| c.display_name().eq_ignore_ascii_case(name.trim()))
    }

    /// Parse either a grading code or full name into a condition
    pub fn parse(s: &str) -> Option<Self> {
        Self::from_code(s).or_else(|| Self::from_display_name(s))
    }

    /// Returns all grades, best first
    pub fn all() -> &'static [CardCondition] {
        &[
            CardCondition::NearMint,
            CardCondition::LightlyPlayed,
            CardCondition::ModeratelyPlayed,
            CardCondition::HeavilyPlayed,
            CardCondition::Damaged,
        ]
    }
}

impl fmt::Display for CardCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_near_mint() {
        assert_eq!(CardCondition::default(), CardCondition::NearMint);
    }

    #[test]
    fn test_codes() {
        let codes: Vec<&str> = CardCondition::all().iter().map(|c| c.code()).collect();
        assert_eq!(codes, vec!["NM", "LP", "MP", "HP", "DMG"]);
    }

    #[test]
    fn test_parse_code_case_insensitive() {
        assert_eq!(CardCondition::parse("nm"), Some(CardCondition::NearMint));
        assert_eq!(CardCondition::parse("Dmg"), Some(CardCondition::Damaged));
        assert_eq!(CardCondition::parse(" hp "), Some(CardCondition::HeavilyPlayed));
    }

    #[test]
    fn test_parse_display_name() {
        assert_eq!(
            CardCondition::parse("moderately played"),
            Some(CardCondition::ModeratelyPlayed)
        );
        assert_eq!(CardCondition::parse("mint"), None);
    }

    #[test]
    fn test_serde_uses_codes() {
        let json = serde_json::to_string(&CardCondition::LightlyPlayed).unwrap();
        assert_eq!(json, "\"LP\"");

        let parsed: CardCondition = serde_json::from_str("\"DMG\"").unwrap();
        assert_eq!(parsed, CardCondition::Damaged);
    }

    #[test]
    fn test_display() {
        assert_eq!(CardCondition::NearMint.to_string(), "Near Mint");
    }
}
