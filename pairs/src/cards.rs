use serde::{Deserialize, Serialize};

/// Identifies one physical card. Unique within a [`Deck`](crate::Deck).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u32);

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single card of a memory deck.
///
/// Two cards are a pair if and only if they have the same `name`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    /// The key that makes two cards a pair.
    pub name: String,
    /// An opaque token that the presentation layer uses to draw the face of
    /// the card. The engine never looks at it.
    pub illustration: String,
}

impl Card {
    pub fn new(id: u32, name: &str, illustration: &str) -> Self {
        Self {
            id: CardId(id),
            name: String::from(name),
            illustration: String::from(illustration),
        }
    }

    /// Whether `other` is the partner of this card: same name, different card.
    pub fn is_pair_of(&self, other: &Card) -> bool {
        self.name == other.name && self.id != other.id
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Names of the pairs in the [standard deck](crate::Deck::standard).
pub static STANDARD_PAIRS: [&str; 8] = [
    "apple",
    "banana",
    "cherry",
    "grape",
    "lemon",
    "orange",
    "pear",
    "strawberry",
];

/// Shorthand for creating a card in tests and small fixtures.
///
/// The illustration token is derived from the name.
/// ```
/// # use pairs::{card, Card, CardId};
/// let c = card!(3, "pear");
/// assert_eq!(c.id, CardId(3));
/// assert_eq!(c.illustration, "--img-pear");
/// ```
#[macro_export]
macro_rules! card {
    ($id:literal, $name:literal) => {
        $crate::Card::new($id, $name, concat!("--img-", $name))
    };
}
// Makes the macro reachable as `crate::card` from sibling modules
#[allow(unused_imports)]
pub(crate) use card;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_needs_same_name_and_different_id() {
        let a1 = card!(1, "apple");
        let a2 = card!(2, "apple");
        let b = card!(3, "banana");
        assert!(a1.is_pair_of(&a2));
        assert!(a2.is_pair_of(&a1));
        assert!(!a1.is_pair_of(&a1));
        assert!(!a1.is_pair_of(&b));
    }

    #[test]
    fn card_serialization() {
        let json = serde_json::to_string(&card!(7, "lemon")).unwrap();
        assert_eq!(
            json,
            r#"{"id":7,"name":"lemon","illustration":"--img-lemon"}"#
        );
    }
}
