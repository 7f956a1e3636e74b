use metagame_model::{Card, Decklist};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Every distinct card across `decks`, ordered by title and then by code.
pub fn build_index<'a>(decks: impl IntoIterator<Item = &'a Decklist>) -> Vec<Card> {
    let distinct: BTreeSet<&Card> = decks.into_iter().flat_map(|deck| deck.cards.keys()).collect();
    let mut cards: Vec<Card> = distinct.into_iter().cloned().collect();
    cards.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.code.cmp(&b.code)));
    cards
}

/// A fixed card ordering that decklists are projected onto.
///
/// Position `i` of every vector produced by [`vectorize`](Self::vectorize)
/// holds the quantity of `cards()[i]`.
#[derive(Debug, Clone, Default)]
pub struct CardIndex {
    cards: Vec<Card>,
    positions: HashMap<String, usize>,
}
impl CardIndex {
    pub fn new(cards: Vec<Card>) -> Self {
        let positions = cards.iter().enumerate().map(|(i, card)| (card.code.clone(), i)).collect();
        Self { cards, positions }
    }

    /// Index covering every card in `decks`.
    pub fn build<'a>(decks: impl IntoIterator<Item = &'a Decklist>) -> Self {
        Self::new(build_index(decks))
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn position(&self, code: &str) -> Option<usize> {
        self.positions.get(code).copied()
    }

    /// Dense quantity vector of `deck`. Cards outside the index are ignored.
    pub fn vectorize(&self, deck: &Decklist) -> Vec<u32> {
        let mut vector = vec![0; self.cards.len()];
        for (card, quantity) in &deck.cards {
            if let Some(position) = self.position(&card.code) {
                vector[position] = *quantity;
            }
        }
        vector
    }

    /// Card quantities from the nonzero positions of a vector.
    pub fn reconstruct(&self, vector: &[u32]) -> BTreeMap<Card, u32> {
        self.cards
            .iter()
            .zip(vector)
            .filter(|(_, quantity)| **quantity > 0)
            .map(|(card, quantity)| (card.clone(), *quantity))
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use metagame_model::{DeckId, DecklistRecord};

    pub(crate) fn card(code: &str, title: &str) -> Card {
        Card {
            code: code.to_string(),
            title: title.to_string(),
            stripped_title: None,
            faction_code: "neutral-runner".to_string(),
            side_code: "runner".to_string(),
            type_code: None,
            cost: None,
            deck_limit: None,
            keywords: None,
            text: None,
        }
    }

    /// A deck whose card titles equal their codes.
    pub(crate) fn deck(id: u64, cards: &[(&str, u32)]) -> Decklist {
        let catalog: HashMap<String, Card> =
            cards.iter().map(|(code, _)| (code.to_string(), card(code, code))).collect();
        let record = DecklistRecord::new(
            DeckId(id),
            format!("uuid-{id}"),
            format!("Deck {id}"),
            cards.iter().map(|(code, quantity)| (code.to_string(), *quantity)),
        );
        Decklist::hydrate(record, &catalog)
    }

    #[test]
    fn test_index_is_sorted_by_title_then_code() {
        let catalog: HashMap<String, Card> = [
            card("03", "Sure Gamble"),
            card("02", "Dirty Laundry"),
            card("01", "Sure Gamble"),
            card("04", "Aesop's Pawnshop"),
        ]
        .into_iter()
        .map(|c| (c.code.clone(), c))
        .collect();
        let a = Decklist::hydrate(
            DecklistRecord::new(DeckId(1), "", "A", [("03".to_string(), 3), ("02".to_string(), 2)]),
            &catalog,
        );
        let b = Decklist::hydrate(
            DecklistRecord::new(DeckId(2), "", "B", [("01".to_string(), 1), ("04".to_string(), 1)]),
            &catalog,
        );
        let codes: Vec<_> = build_index([&a, &b]).into_iter().map(|c| c.code).collect();
        assert_eq!(codes, vec!["04", "02", "01", "03"]);
        // Input order doesn't matter.
        let reversed: Vec<_> = build_index([&b, &a]).into_iter().map(|c| c.code).collect();
        assert_eq!(codes, reversed);
    }

    #[test]
    fn test_vectorize() {
        let a = deck(1, &[("A", 3), ("C", 1)]);
        let b = deck(2, &[("B", 2)]);
        let index = CardIndex::build([&a, &b]);
        assert_eq!(index.len(), 3);
        assert_eq!(index.vectorize(&a), vec![3, 0, 1]);
        assert_eq!(index.vectorize(&b), vec![0, 2, 0]);
    }

    #[test]
    fn test_vectorize_round_trip() {
        let decks = [deck(1, &[("A", 3), ("C", 1)]), deck(2, &[("B", 2), ("C", 3)]), deck(3, &[])];
        let index = CardIndex::build(&decks);
        for deck in &decks {
            assert_eq!(index.reconstruct(&index.vectorize(deck)), deck.cards);
        }
    }

    #[test]
    fn test_cards_outside_index_are_ignored() {
        let index = CardIndex::build([&deck(1, &[("A", 1)])]);
        assert_eq!(index.vectorize(&deck(2, &[("A", 2), ("Z", 3)])), vec![2]);
        assert!(CardIndex::default().vectorize(&deck(3, &[("A", 1)])).is_empty());
    }
}
