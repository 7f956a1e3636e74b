use crate::consts::CARD_PAGE_BASE;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::hash::{Hash, Hasher};

/// A single Netrunner card.
///
/// Cards are identified by their `code`; every other field is descriptive.
/// Equality, hashing and ordering only ever look at the code, so two copies
/// of the same card fetched at different times are interchangeable even if
/// the card text has since been errata'd.
///
/// The serialized form doubles as the card cache record, so field names are
/// part of the on-disk schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    /// Unique card code, e.g. `"01001"`
    pub code: String,
    pub title: String,
    #[serde(default)]
    pub stripped_title: Option<String>,
    pub faction_code: String,
    /// `"corp"` or `"runner"`
    pub side_code: String,
    #[serde(default)]
    pub type_code: Option<String>,
    #[serde(default)]
    pub cost: Option<i32>,
    #[serde(default)]
    pub deck_limit: Option<u32>,
    /// Raw keyword line, e.g. `"Code Gate - Deflector"`
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}
impl Card {
    /// Public card page on NetrunnerDB.
    pub fn page_url(&self) -> String {
        format!("{CARD_PAGE_BASE}/{}", self.code)
    }
}
impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}
impl Eq for Card {}
impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}
impl Ord for Card {
    fn cmp(&self, other: &Self) -> Ordering {
        self.code.cmp(&other.code)
    }
}
impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Display for Card {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.stripped_title.as_deref().unwrap_or(&self.title))
    }
}

#[cfg(test)]
pub(crate) fn card(code: &str, title: &str) -> Card {
    Card {
        code: code.to_string(),
        title: title.to_string(),
        stripped_title: None,
        faction_code: "neutral-corp".to_string(),
        side_code: "corp".to_string(),
        type_code: None,
        cost: None,
        deck_limit: None,
        keywords: None,
        text: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_identity_is_code() {
        let original = card("01001", "Noise: Hacker Extraordinaire");
        let mut errata = original.clone();
        errata.title = "Noise".to_string();
        errata.text = Some("Updated text".to_string());
        assert_eq!(original, errata);
        let set: HashSet<_> = [original, errata].into_iter().collect();
        assert_eq!(set.len(), 1);
        assert_ne!(card("01001", "Same"), card("01002", "Same"));
    }

    #[test]
    fn test_deserialize_remote_record() {
        let json = r#"{
            "code": "30077",
            "title": "Hedge Fund",
            "stripped_title": "Hedge Fund",
            "faction_code": "neutral-corp",
            "side_code": "corp",
            "type_code": "operation",
            "cost": 5,
            "deck_limit": 3,
            "keywords": "Transaction",
            "text": "Gain 9[credit].",
            "illustrator": "Ed Mattinian",
            "pack_code": "sg"
        }"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.code, "30077");
        assert_eq!(card.cost, Some(5));
        assert_eq!(card.keywords.as_deref(), Some("Transaction"));
    }

    #[test]
    fn test_page_url() {
        assert_eq!(card("30077", "Hedge Fund").page_url(), "https://netrunnerdb.com/en/card/30077");
    }
}
