use crate::Side;
use crate::de::{non_empty, opt_u32_lenient, opt_u64_lenient};
use serde::Deserialize;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::hash::{Hash, Hasher};

/// How an entrant is told apart from every other entrant of an event.
///
/// Registered players are keyed by their user ID. Players imported from
/// pairing software without an account only have the name they were imported
/// under, which is normalized before comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntrantIdentity {
    User(u64),
    Imported(Option<String>),
}

/// A single entrant in a tournament.
#[derive(Debug, Clone, Deserialize)]
pub struct Entry {
    #[serde(default, deserialize_with = "opt_u64_lenient")]
    pub user_id: Option<u64>,
    #[serde(default, deserialize_with = "non_empty")]
    pub user_name: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub user_import_name: Option<String>,
    #[serde(default, deserialize_with = "opt_u32_lenient")]
    pub rank_swiss: Option<u32>,
    #[serde(default, deserialize_with = "opt_u32_lenient")]
    pub rank_top: Option<u32>,
    #[serde(default, deserialize_with = "non_empty")]
    pub corp_deck_url: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub corp_deck_title: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub corp_deck_identity_title: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub corp_deck_identity_faction: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub runner_deck_url: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub runner_deck_title: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub runner_deck_identity_title: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub runner_deck_identity_faction: Option<String>,
}
impl Entry {
    /// Two-tier identity: user ID when known, otherwise the normalized
    /// import name. An entrant with a user ID never matches one without.
    pub fn identity(&self) -> EntrantIdentity {
        match self.user_id {
            Some(id) => EntrantIdentity::User(id),
            None => EntrantIdentity::Imported(self.user_import_name.as_deref().map(normalize_name)),
        }
    }

    pub fn deck_url(&self, side: Side) -> Option<&str> {
        match side {
            Side::Corp => self.corp_deck_url.as_deref(),
            Side::Runner => self.runner_deck_url.as_deref(),
        }
    }

    /// The swiss placement, if the entrant has a valid (1-based) one.
    pub fn placement(&self) -> Option<u32> {
        self.rank_swiss.filter(|rank| *rank >= 1)
    }
}
impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}
impl Eq for Entry {}
impl Hash for Entry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}
impl Display for Entry {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = self.user_name.as_deref().or(self.user_import_name.as_deref()).unwrap_or("(anonymous)");
        write!(f, "{name}")
    }
}

fn normalize_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

#[cfg(test)]
pub(crate) fn entry(user_id: Option<u64>, import_name: Option<&str>, rank: Option<u32>) -> Entry {
    Entry {
        user_id,
        user_name: None,
        user_import_name: import_name.map(str::to_string),
        rank_swiss: rank,
        rank_top: None,
        corp_deck_url: None,
        corp_deck_title: None,
        corp_deck_identity_title: None,
        corp_deck_identity_faction: None,
        runner_deck_url: None,
        runner_deck_title: None,
        runner_deck_identity_title: None,
        runner_deck_identity_faction: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;
    use std::hash::DefaultHasher;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[rstest]
    // Both registered: user ID decides, names are irrelevant.
    #[case(entry(Some(1), Some("Alice"), None), entry(Some(1), Some("Bob"), None), true)]
    #[case(entry(Some(1), Some("Alice"), None), entry(Some(2), Some("Alice"), None), false)]
    // Neither registered: normalized import name decides.
    #[case(entry(None, Some("Alice"), None), entry(None, Some("  alice "), None), true)]
    #[case(entry(None, Some("Alice  Smith"), None), entry(None, Some("alice smith"), None), true)]
    #[case(entry(None, Some("Alice"), None), entry(None, Some("Bob"), None), false)]
    #[case(entry(None, None, None), entry(None, None, None), true)]
    // Mixed: never equal, even with identical names.
    #[case(entry(Some(1), Some("Alice"), None), entry(None, Some("Alice"), None), false)]
    fn test_identity(#[case] a: Entry, #[case] b: Entry, #[case] equal: bool) {
        assert_eq!(a == b, equal);
        assert_eq!(b == a, equal);
        if equal {
            assert_eq!(hash_of(&a), hash_of(&b));
        }
    }

    #[test]
    fn test_hash_set_deduplicates() {
        let entries: HashSet<_> = [
            entry(Some(1), Some("Alice"), Some(1)),
            entry(Some(1), Some("Alice"), Some(1)),
            entry(None, Some("Bob"), Some(2)),
            entry(None, Some("BOB"), Some(2)),
            entry(None, Some("Carol"), Some(3)),
        ]
        .into_iter()
        .collect();
        assert_eq!(entries.len(), 3);
    }

    #[test]
    fn test_deserialize_remote_record() {
        let json = r#"{
            "user_id": null,
            "user_name": null,
            "user_import_name": "Imported Player",
            "rank_swiss": "4",
            "rank_top": null,
            "runner_deck_title": "",
            "runner_deck_url": "",
            "corp_deck_title": "Tithe Tax",
            "corp_deck_url": "https://netrunnerdb.com/en/decklist/80000/tithe-tax",
            "corp_deck_identity_id": "33001"
        }"#;
        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.user_id, None);
        assert_eq!(entry.placement(), Some(4));
        assert_eq!(entry.deck_url(Side::Runner), None);
        assert_eq!(entry.deck_url(Side::Corp), Some("https://netrunnerdb.com/en/decklist/80000/tithe-tax"));
        assert_eq!(entry.to_string(), "Imported Player");
    }

    #[test]
    fn test_placement_rejects_zero() {
        assert_eq!(entry(Some(1), None, Some(0)).placement(), None);
        assert_eq!(entry(Some(1), None, None).placement(), None);
        assert_eq!(entry(Some(1), None, Some(1)).placement(), Some(1));
    }
}
