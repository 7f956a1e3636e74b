use metagame_model::{DeckId, Side};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Corp and runner deck IDs submitted for one placement.
pub type DeckPair = (Option<DeckId>, Option<DeckId>);

/// Which decks finished where in one tournament.
///
/// Keyed by swiss placement (1-based). Serialized as
/// `{"id": 4120, "name": "...", "decks": {"1": [corp, runner], ...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentRecord {
    pub id: u64,
    pub name: String,
    pub decks: BTreeMap<u32, DeckPair>,
}
impl TournamentRecord {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            decks: BTreeMap::new(),
        }
    }

    /// Number of placements on record. Entrants without a swiss placement
    /// are not recorded, so this can be less than the event's entrant count.
    pub fn placements(&self) -> usize {
        self.decks.len()
    }

    pub fn deck(&self, placement: u32, side: Side) -> Option<DeckId> {
        let (corp, runner) = self.decks.get(&placement)?;
        match side {
            Side::Corp => *corp,
            Side::Runner => *runner,
        }
    }

    /// Fold newly observed placements into this record.
    ///
    /// Placements seen for the first time are added. For a known placement,
    /// each side is replaced only by a newly observed ID; an unresolved side
    /// never erases what is already recorded. Placements missing from
    /// `observed` are kept as they are.
    pub fn merge(&mut self, observed: impl IntoIterator<Item = (u32, DeckPair)>) {
        for (placement, (corp, runner)) in observed {
            let slot = self.decks.entry(placement).or_insert((None, None));
            if corp.is_some() {
                slot.0 = corp;
            }
            if runner.is_some() {
                slot.1 = runner;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(decks: impl IntoIterator<Item = (u32, DeckPair)>) -> TournamentRecord {
        let mut record = TournamentRecord::new(1, "GNK");
        record.merge(decks);
        record
    }

    #[test]
    fn test_merge_adds_new_placements() {
        let mut cached = record([(1, (Some(DeckId(10)), Some(DeckId(11))))]);
        cached.merge([(2, (Some(DeckId(20)), None))]);
        assert_eq!(cached.placements(), 2);
        assert_eq!(cached.deck(2, Side::Corp), Some(DeckId(20)));
        assert_eq!(cached.deck(2, Side::Runner), None);
    }

    #[test]
    fn test_merge_never_erases() {
        let mut cached = record([(1, (Some(DeckId(10)), Some(DeckId(11)))), (2, (Some(DeckId(20)), None))]);
        cached.merge([(1, (None, None))]);
        assert_eq!(cached.decks[&1], (Some(DeckId(10)), Some(DeckId(11))));
        // Unobserved placement survives
        assert_eq!(cached.decks[&2], (Some(DeckId(20)), None));
    }

    #[test]
    fn test_merge_overwrites_with_new_ids() {
        let mut cached = record([(1, (Some(DeckId(10)), None))]);
        cached.merge([(1, (Some(DeckId(12)), Some(DeckId(13))))]);
        assert_eq!(cached.decks[&1], (Some(DeckId(12)), Some(DeckId(13))));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let observed = [(1, (Some(DeckId(10)), Some(DeckId(11)))), (3, (None, Some(DeckId(31))))];
        let mut once = TournamentRecord::new(1, "GNK");
        once.merge(observed);
        let mut twice = once.clone();
        twice.merge(observed);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_serialized_shape() {
        let cached = record([(1, (Some(DeckId(10)), None))]);
        let json = serde_json::to_value(&cached).unwrap();
        assert_eq!(json, serde_json::json!({"id": 1, "name": "GNK", "decks": {"1": [10, null]}}));
        let back: TournamentRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, cached);
    }
}
