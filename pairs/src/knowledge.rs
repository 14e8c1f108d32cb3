use serde::{Deserialize, Serialize};

use crate::{search_for_pair, Card, CardId, PlayDeck, Position};

/// A card that has been seen face up and is still on the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discovery {
    pub position: Position,
    pub name: String,
    pub id: CardId,
}

/// What the computer player remembers about the table.
///
/// Every position that is still in play is either discovered or unknown,
/// never both. A position stops being unknown the first time either player
/// flips it, and stops being discovered once its pair has been taken.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Knowledge {
    /// In the order the cards were first seen.
    discovered: Vec<Discovery>,
    /// In ascending position order.
    unknowns: Vec<Position>,
}

impl Knowledge {
    pub fn new(play_deck: &PlayDeck) -> Self {
        let mut knowledge = Self::default();
        knowledge.reset(play_deck);
        knowledge
    }

    /// Forgets everything: all positions of the deck become unknown.
    pub fn reset(&mut self, play_deck: &PlayDeck) {
        self.discovered.clear();
        self.unknowns = play_deck.positions().collect();
    }

    /// Remembers the card at `position`. Does nothing if the position was
    /// already discovered.
    pub fn record_discovery(&mut self, position: Position, card: &Card) {
        if self.is_discovered(position) {
            return;
        }
        self.discovered.push(Discovery {
            position,
            name: card.name.clone(),
            id: card.id,
        });
        self.unknowns.retain(|&p| p != position);
    }

    /// Forgets the card with this id because it left the table.
    ///
    /// Returns the removed entry, or `None` if the card was not known.
    pub fn remove_from_discovered(&mut self, id: CardId) -> Option<Discovery> {
        let idx = self.discovered.iter().position(|d| d.id == id)?;
        Some(self.discovered.remove(idx))
    }

    pub fn discovered(&self) -> &[Discovery] {
        &self.discovered
    }

    pub fn unknowns(&self) -> &[Position] {
        &self.unknowns
    }

    pub fn is_discovered(&self, position: Position) -> bool {
        self.discovered.iter().any(|d| d.position == position)
    }

    pub fn is_unknown(&self, position: Position) -> bool {
        self.unknowns.contains(&position)
    }

    /// The first two discovered cards with the same name, by discovery order.
    pub fn known_pair(&self) -> Option<(&Discovery, &Discovery)> {
        search_for_pair(&self.discovered, |d| d.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::{card, Deck};

    fn play_deck() -> PlayDeck {
        let deck = Deck::new(vec![
            card!(1, "foo"),
            card!(2, "bar"),
            card!(3, "foo"),
            card!(4, "bar"),
        ])
        .unwrap();
        deck.deal(&mut StdRng::seed_from_u64(0), false)
    }

    #[test]
    fn reset_makes_everything_unknown() {
        let deck = play_deck();
        let mut knowledge = Knowledge::new(&deck);
        knowledge.record_discovery(2, deck.get(2).unwrap());
        knowledge.reset(&deck);
        assert!(knowledge.discovered().is_empty());
        assert_eq!(knowledge.unknowns(), &[0, 1, 2, 3]);
    }

    #[test]
    fn discovery_moves_position_out_of_unknowns() {
        let deck = play_deck();
        let mut knowledge = Knowledge::new(&deck);
        knowledge.record_discovery(2, deck.get(2).unwrap());
        assert_eq!(
            knowledge.discovered(),
            &[Discovery {
                position: 2,
                name: String::from("foo"),
                id: CardId(3)
            }]
        );
        assert_eq!(knowledge.unknowns(), &[0, 1, 3]);
        assert!(knowledge.is_discovered(2));
        assert!(!knowledge.is_unknown(2));
    }

    #[test]
    fn discovery_is_idempotent() {
        let deck = play_deck();
        let mut once = Knowledge::new(&deck);
        once.record_discovery(1, deck.get(1).unwrap());
        let mut twice = once.clone();
        twice.record_discovery(1, deck.get(1).unwrap());
        assert_eq!(once, twice);
    }

    #[test]
    fn removing_unknown_card_is_a_no_op() {
        let deck = play_deck();
        let mut knowledge = Knowledge::new(&deck);
        knowledge.record_discovery(0, deck.get(0).unwrap());
        let before = knowledge.clone();
        assert_eq!(knowledge.remove_from_discovered(CardId(99)), None);
        assert_eq!(knowledge, before);

        let removed = knowledge.remove_from_discovered(CardId(1)).unwrap();
        assert_eq!(removed.position, 0);
        assert!(knowledge.discovered().is_empty());
        // A card that left the table does not become unknown again
        assert_eq!(knowledge.unknowns(), &[1, 2, 3]);
    }

    #[test]
    fn known_pair_follows_discovery_order() {
        let deck = play_deck();
        let mut knowledge = Knowledge::new(&deck);
        for position in [1, 2, 3, 0] {
            knowledge.record_discovery(position, deck.get(position).unwrap());
        }
        // bar@1 was seen first, so the bar pair wins over the foo pair
        let (first, second) = knowledge.known_pair().unwrap();
        assert_eq!((first.position, second.position), (1, 3));
    }
}
