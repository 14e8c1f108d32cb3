use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Card, CardId, DeckError, STANDARD_PAIRS};

/// Index of a card in the current [`PlayDeck`], the unit that flips address.
pub type Position = usize;

/// Returns a copy of `items` in a uniformly random order.
///
/// This is the backward Fisher–Yates shuffle, so every permutation is
/// equally likely. The input is left untouched.
pub fn shuffle<T: Clone, R: Rng>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut data = items.to_vec();
    for i in (1..data.len()).rev() {
        let j = rng.gen_range(0..=i);
        data.swap(i, j);
    }
    data
}

/// Finds the first two items that share a key.
///
/// Scanning goes by the earlier item first, then by its earliest partner, so
/// for the keys `foo bar foo baz baz` the two `foo` items are returned.
pub fn search_for_pair<T, K, F>(items: &[T], key: F) -> Option<(&T, &T)>
where
    K: PartialEq + ?Sized,
    F: Fn(&T) -> &K,
{
    for (i, first) in items.iter().enumerate() {
        let first_key = key(first);
        for second in &items[i + 1..] {
            if key(second) == first_key {
                return Some((first, second));
            }
        }
    }
    None
}

/// The immutable source list of cards, which is shuffled into a fresh
/// [`PlayDeck`] for every game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Card>", into = "Vec<Card>")]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Checks that the cards form a playable deck: at least one pair, every
    /// name on exactly two cards, and no id used twice.
    pub fn new(cards: Vec<Card>) -> Result<Self, DeckError> {
        if cards.len() < 2 {
            return Err(DeckError::TooFewCards { len: cards.len() });
        }
        if cards.len() % 2 != 0 {
            return Err(DeckError::OddNumberOfCards { len: cards.len() });
        }

        let mut ids = BTreeSet::new();
        let mut name_counts = BTreeMap::<&str, usize>::new();
        for card in &cards {
            if !ids.insert(card.id) {
                return Err(DeckError::DuplicateId { id: card.id });
            }
            *name_counts.entry(card.name.as_str()).or_default() += 1;
        }
        if let Some((name, &count)) = name_counts.iter().find(|(_, count)| **count != 2) {
            return Err(DeckError::NotAPair {
                name: String::from(*name),
                count,
            });
        }

        Ok(Self { cards })
    }

    /// The built-in deck: two cards for each of the [`STANDARD_PAIRS`].
    pub fn standard() -> Self {
        let cards = STANDARD_PAIRS
            .iter()
            .enumerate()
            .flat_map(|(i, name)| {
                let illustration = format!("--img-{}", name);
                let first_id = 2 * i as u32 + 1;
                [
                    Card::new(first_id, name, &illustration),
                    Card::new(first_id + 1, name, &illustration),
                ]
            })
            .collect();
        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn num_pairs(&self) -> usize {
        self.cards.len() / 2
    }

    /// Produces the deck for a new game. Without `shuffle_cards` the source
    /// order is kept.
    pub fn deal<R: Rng>(&self, rng: &mut R, shuffle_cards: bool) -> PlayDeck {
        if shuffle_cards {
            PlayDeck(shuffle(&self.cards, rng))
        } else {
            PlayDeck(self.cards.clone())
        }
    }
}

impl TryFrom<Vec<Card>> for Deck {
    type Error = DeckError;

    fn try_from(cards: Vec<Card>) -> Result<Self, Self::Error> {
        Deck::new(cards)
    }
}

impl From<Deck> for Vec<Card> {
    fn from(deck: Deck) -> Self {
        deck.cards
    }
}

/// The cards of one game, in table order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlayDeck(Vec<Card>);

impl PlayDeck {
    pub fn get(&self, position: Position) -> Option<&Card> {
        self.0.get(position)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn num_pairs(&self) -> usize {
        self.0.len() / 2
    }

    pub fn cards(&self) -> &[Card] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.0.iter()
    }

    pub fn positions(&self) -> std::ops::Range<Position> {
        0..self.0.len()
    }

    pub fn position_of(&self, id: CardId) -> Option<Position> {
        self.0.iter().position(|card| card.id == id)
    }

    pub fn ids(&self) -> Vec<CardId> {
        self.0.iter().map(|card| card.id).collect()
    }
}

impl<'a> IntoIterator for &'a PlayDeck {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::card;

    quickcheck! {
        fn shuffle_is_permutation(items: Vec<u16>, seed: u64) -> bool {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut shuffled = shuffle(&items, &mut rng);
            let mut sorted = items.clone();
            sorted.sort();
            shuffled.sort();
            shuffled == sorted
        }
    }

    #[test]
    fn shuffle_leaves_input_untouched() {
        let mut rng = StdRng::seed_from_u64(1);
        let items = vec![1, 2, 3, 4, 5];
        let _ = shuffle(&items, &mut rng);
        assert_eq!(items, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn shuffle_positions_are_uniform() {
        const N: usize = 4;
        const TRIALS: usize = 24_000;
        let mut rng = StdRng::seed_from_u64(7);
        let mut counts = [[0usize; N]; N];
        for _ in 0..TRIALS {
            let shuffled = shuffle(&[0, 1, 2, 3], &mut rng);
            for (position, &item) in shuffled.iter().enumerate() {
                counts[item][position] += 1;
            }
        }
        // Each item lands on each position with probability 1/4, so 6000
        // times on average. The standard deviation is about 67.
        for row in counts {
            for count in row {
                assert!((5600..=6400).contains(&count), "count {} out of range", count);
            }
        }
    }

    #[test]
    fn search_for_pair_returns_first_pair() {
        let data = ["foo", "bar", "foo", "baz", "baz"];
        let result = search_for_pair(&data, |v| *v);
        assert_eq!(result, Some((&"foo", &"foo")));
        let (first, second) = result.unwrap();
        assert!(std::ptr::eq(first, &data[0]));
        assert!(std::ptr::eq(second, &data[2]));
    }

    #[test]
    fn search_for_pair_without_match() {
        let data = ["foo", "bar", "baz"];
        assert_eq!(search_for_pair(&data, |v| *v), None);
        assert_eq!(search_for_pair(&[] as &[&str], |v| *v), None);
    }

    #[test]
    fn standard_deck_is_valid() {
        let deck = Deck::standard();
        assert_eq!(deck.len(), 16);
        assert_eq!(Deck::new(deck.cards().to_vec()), Ok(deck));
    }

    #[test]
    fn deck_validation() {
        assert_eq!(Deck::new(vec![]), Err(DeckError::TooFewCards { len: 0 }));
        assert_eq!(
            Deck::new(vec![card!(1, "apple")]),
            Err(DeckError::TooFewCards { len: 1 })
        );
        assert_eq!(
            Deck::new(vec![card!(1, "apple"), card!(2, "apple"), card!(3, "pear")]),
            Err(DeckError::OddNumberOfCards { len: 3 })
        );
        assert_eq!(
            Deck::new(vec![card!(1, "apple"), card!(1, "apple")]),
            Err(DeckError::DuplicateId { id: CardId(1) })
        );
        assert_eq!(
            Deck::new(vec![
                card!(1, "apple"),
                card!(2, "apple"),
                card!(3, "apple"),
                card!(4, "pear"),
            ]),
            Err(DeckError::NotAPair {
                name: String::from("apple"),
                count: 3
            })
        );
    }

    #[test]
    fn deck_from_json_is_validated() {
        let json = r#"[
            {"id": 1, "name": "apple", "illustration": "a"},
            {"id": 2, "name": "apple", "illustration": "a"}
        ]"#;
        let deck: Deck = serde_json::from_str(json).unwrap();
        assert_eq!(deck.num_pairs(), 1);

        let odd = r#"[{"id": 1, "name": "apple", "illustration": "a"}]"#;
        assert!(serde_json::from_str::<Deck>(odd).is_err());
    }

    #[test]
    fn deal_without_shuffle_keeps_order() {
        let deck = Deck::standard();
        let mut rng = StdRng::seed_from_u64(3);
        let play_deck = deck.deal(&mut rng, false);
        assert_eq!(play_deck.cards(), deck.cards());
        assert_eq!(play_deck.position_of(CardId(5)), Some(4));
    }
}
