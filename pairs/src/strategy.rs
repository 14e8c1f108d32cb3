use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::{Discovery, Flipped, Knowledge, Position};

/// Decides which cards the computer flips.
///
/// The engine calls `first_flip()` once per computer turn, reveals that card,
/// and then asks `second_flip()` for the partner. Returning `None` or a
/// position that cannot be flipped makes the engine fall back to the first
/// flippable position.
pub trait Strategy {
    fn first_flip(&mut self, knowledge: &Knowledge, rng: &mut StdRng) -> Option<Position>;
    fn second_flip(
        &mut self,
        knowledge: &Knowledge,
        first: &Flipped,
        rng: &mut StdRng,
    ) -> Option<Position>;
}

/// A player with perfect memory and no foresight.
///
/// If two remembered cards match, they are taken. Otherwise a random unknown
/// card is flipped; if it matches a card that was remembered *before* this
/// flip, that card is taken as the second one, else a second random unknown
/// card is flipped.
#[derive(Clone, Debug, Default)]
pub struct MemoryStrategy {
    plan: Plan,
}

#[derive(Clone, Debug, Default)]
enum Plan {
    #[default]
    Idle,
    KnownPair {
        second: Position,
    },
    Explore {
        /// The discovered cards as they were before the first flip.
        snapshot: Vec<Discovery>,
    },
}

fn random_unknown(knowledge: &Knowledge, rng: &mut StdRng) -> Option<Position> {
    knowledge.unknowns().choose(rng).copied()
}

impl Strategy for MemoryStrategy {
    fn first_flip(&mut self, knowledge: &Knowledge, rng: &mut StdRng) -> Option<Position> {
        if let Some((first, second)) = knowledge.known_pair() {
            self.plan = Plan::KnownPair {
                second: second.position,
            };
            return Some(first.position);
        }
        self.plan = Plan::Explore {
            snapshot: knowledge.discovered().to_vec(),
        };
        random_unknown(knowledge, rng)
    }

    fn second_flip(
        &mut self,
        knowledge: &Knowledge,
        first: &Flipped,
        rng: &mut StdRng,
    ) -> Option<Position> {
        match std::mem::take(&mut self.plan) {
            Plan::KnownPair { second } => Some(second),
            Plan::Explore { snapshot } => snapshot
                .iter()
                .find(|d| d.name == first.card.name && d.position != first.position)
                .map(|d| d.position)
                .or_else(|| random_unknown(knowledge, rng)),
            Plan::Idle => random_unknown(knowledge, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::{card, Deck, PlayDeck};

    fn play_deck() -> PlayDeck {
        let deck = Deck::new(vec![
            card!(1, "bar"),
            card!(2, "foo"),
            card!(3, "baz"),
            card!(4, "foo"),
            card!(5, "bar"),
            card!(6, "baz"),
        ])
        .unwrap();
        deck.deal(&mut StdRng::seed_from_u64(0), false)
    }

    fn flipped(play_deck: &PlayDeck, position: Position) -> Flipped {
        Flipped {
            position,
            card: play_deck.get(position).unwrap().clone(),
        }
    }

    #[test]
    fn known_pair_is_taken_without_exploring() {
        let deck = play_deck();
        let mut knowledge = Knowledge::new(&deck);
        knowledge.record_discovery(1, deck.get(1).unwrap());
        knowledge.record_discovery(3, deck.get(3).unwrap());

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut strategy = MemoryStrategy::default();
            let first = strategy.first_flip(&knowledge, &mut rng);
            assert_eq!(first, Some(1));
            let second = strategy.second_flip(&knowledge, &flipped(&deck, 1), &mut rng);
            assert_eq!(second, Some(3));
        }
    }

    #[test]
    fn exploration_completes_pair_from_snapshot() {
        let deck = play_deck();
        let mut knowledge = Knowledge::new(&deck);
        knowledge.record_discovery(0, deck.get(0).unwrap()); // bar
        knowledge.record_discovery(1, deck.get(1).unwrap()); // foo
        knowledge.record_discovery(2, deck.get(2).unwrap()); // baz

        let mut rng = StdRng::seed_from_u64(5);
        let mut strategy = MemoryStrategy::default();
        let first = strategy.first_flip(&knowledge, &mut rng).unwrap();
        assert!([3, 4, 5].contains(&first));

        knowledge.record_discovery(first, deck.get(first).unwrap());
        let second = strategy
            .second_flip(&knowledge, &flipped(&deck, first), &mut rng)
            .unwrap();
        // Every unknown card has its partner among the first three
        let expected = match first {
            3 => 1,
            4 => 0,
            _ => 2,
        };
        assert_eq!(second, expected);
    }

    #[test]
    fn exploration_without_match_flips_another_unknown() {
        let deck = play_deck();
        let mut knowledge = Knowledge::new(&deck);
        let mut rng = StdRng::seed_from_u64(9);
        let mut strategy = MemoryStrategy::default();

        let first = strategy.first_flip(&knowledge, &mut rng).unwrap();
        knowledge.record_discovery(first, deck.get(first).unwrap());
        let second = strategy
            .second_flip(&knowledge, &flipped(&deck, first), &mut rng)
            .unwrap();
        assert_ne!(first, second);
        assert!(knowledge.is_unknown(second));
    }

    #[test]
    fn card_found_by_first_flip_is_not_matched_against_itself() {
        let deck = play_deck();
        let mut knowledge = Knowledge::new(&deck);
        // Only foo@1 is known; the snapshot is taken before the flip
        knowledge.record_discovery(1, deck.get(1).unwrap());
        let mut strategy = MemoryStrategy {
            plan: Plan::Explore {
                snapshot: knowledge.discovered().to_vec(),
            },
        };
        knowledge.record_discovery(0, deck.get(0).unwrap()); // bar, no partner known
        let mut rng = StdRng::seed_from_u64(2);
        let second = strategy
            .second_flip(&knowledge, &flipped(&deck, 0), &mut rng)
            .unwrap();
        assert!([2, 3, 4, 5].contains(&second));
    }
}
