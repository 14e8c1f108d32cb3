use crate::{Card, Deck, STANDARD_PAIRS};

/// A valid deck with between 1 and 8 pairs, in arbitrary order.
#[derive(Clone, Debug)]
pub struct SmallDeck(pub Deck);

impl quickcheck::Arbitrary for SmallDeck {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let num_pairs = usize::from(u8::arbitrary(g) % 8) + 1;
        let mut cards = Vec::with_capacity(2 * num_pairs);
        for (i, name) in STANDARD_PAIRS.iter().take(num_pairs).enumerate() {
            let id = 2 * i as u32 + 1;
            cards.push(Card::new(id, name, name));
            cards.push(Card::new(id + 1, name, name));
        }
        // Ids must not follow the table order, so mix the cards up
        for i in (1..cards.len()).rev() {
            let j = usize::arbitrary(g) % (i + 1);
            cards.swap(i, j);
        }
        SmallDeck(Deck::new(cards).expect("generated deck is valid"))
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        // Drop the last pair, keeping the order of the remaining cards
        let cards = self.0.cards();
        if cards.len() <= 2 {
            return quickcheck::empty_shrinker();
        }
        let Some(last_name) = STANDARD_PAIRS.get(cards.len() / 2 - 1) else {
            return quickcheck::empty_shrinker();
        };
        let fewer: Vec<Card> = cards
            .iter()
            .filter(|card| card.name != *last_name)
            .cloned()
            .collect();
        match Deck::new(fewer) {
            Ok(deck) => quickcheck::single_shrinker(SmallDeck(deck)),
            Err(_) => quickcheck::empty_shrinker(),
        }
    }
}

/// Which simulated human plays against the computer in property tests.
#[derive(Clone, Copy, Debug)]
pub enum HumanPlay {
    /// Flips uniformly random face-down cards.
    Random,
    /// Plays the same heuristic as the computer.
    Memory,
}

impl quickcheck::Arbitrary for HumanPlay {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&[HumanPlay::Random, HumanPlay::Memory]).unwrap()
    }
}
