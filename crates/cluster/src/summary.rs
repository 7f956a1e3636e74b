use metagame_model::{Card, Decklist};
use std::collections::HashMap;

pub const DEFAULT_TOP_CARDS: usize = 10;

/// The `n` most played cards across `decks`, by total copies.
///
/// Sorted by descending quantity. Ties keep the order in which the cards
/// were first encountered (decks in order, cards within a deck by code).
/// Returns fewer than `n` entries only when there are fewer distinct cards.
pub fn most_common<'a>(decks: impl IntoIterator<Item = &'a Decklist>, n: usize) -> Vec<(Card, u32)> {
    let mut totals: Vec<(Card, u32)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for deck in decks {
        for (card, quantity) in &deck.cards {
            match positions.get(card.code.as_str()) {
                Some(&position) => totals[position].1 += quantity,
                None => {
                    positions.insert(card.code.as_str(), totals.len());
                    totals.push((card.clone(), *quantity));
                },
            }
        }
    }
    // `sort_by` is stable, which is what keeps ties in encounter order.
    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals.truncate(n);
    totals
}
