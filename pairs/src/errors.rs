use crate::{CardId, Position};

/// The error type for [`Deck::new()`](crate::Deck::new).
///
/// A deck that fails these checks can never be played, so no engine is built from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeckError {
    TooFewCards { len: usize },
    OddNumberOfCards { len: usize },
    DuplicateId { id: CardId },
    NotAPair { name: String, count: usize },
}

impl std::error::Error for DeckError {}

impl std::fmt::Display for DeckError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeckError::TooFewCards { len } => {
                write!(f, "A deck needs at least 2 cards, but this one has {}", len)
            }
            DeckError::OddNumberOfCards { len } => {
                write!(f, "A deck needs an even number of cards, but this one has {}", len)
            }
            DeckError::DuplicateId { id } => write!(f, "The card id {} is used more than once", id),
            DeckError::NotAPair { name, count } => write!(
                f,
                "Every name must appear on exactly two cards, but '{}' appears on {}",
                name, count
            ),
        }
    }
}

/// The error type for [`Engine::flip()`](crate::Engine::flip).
///
/// A rejected flip never changes the game state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvalidFlip {
    NoGame,
    NotAcceptingInput,
    OutOfRange { position: Position, len: usize },
    AlreadySelected { position: Position },
    AlreadyCleared { position: Position },
}

impl std::error::Error for InvalidFlip {}

impl std::fmt::Display for InvalidFlip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidFlip::NoGame => write!(f, "No game has been started"),
            InvalidFlip::NotAcceptingInput => {
                write!(f, "Cards can only be flipped during the human player's turn")
            }
            InvalidFlip::OutOfRange { position, len } => write!(
                f,
                "Position {} is out of range for a deck of {} cards",
                position, len
            ),
            InvalidFlip::AlreadySelected { position } => {
                write!(f, "The card at position {} is already face up", position)
            }
            InvalidFlip::AlreadyCleared { position } => write!(
                f,
                "The card at position {} has already been matched and removed",
                position
            ),
        }
    }
}

/// Returned when an operation needs the table to be free but a game is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameInProgress;

impl std::error::Error for GameInProgress {}

impl std::fmt::Display for GameInProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "A game is in progress")
    }
}
