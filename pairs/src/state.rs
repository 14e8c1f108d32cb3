use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{Card, Knowledge, PlayDeck, Position};

/// Identifies one game of an [`Engine`](crate::Engine).
///
/// Every call to `new_game()` produces a new id, and delayed work that was
/// scheduled under an older id is dropped.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GameId(pub u64);

impl GameId {
    pub fn next(self) -> Self {
        GameId(self.0 + 1)
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Human,
    Computer,
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::Human => write!(f, "human"),
            Player::Computer => write!(f, "computer"),
        }
    }
}

/// How a finished game ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    HumanWins,
    ComputerWins,
    Draw,
}

impl Outcome {
    /// The message shown to the human at the end of the game.
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::HumanWins => "Congrats, you win!",
            Outcome::ComputerWins => "You lose, better luck next time!",
            Outcome::Draw => "Draw!",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Number of pairs each player has taken.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub human: u32,
    pub computer: u32,
}

impl Score {
    pub fn get(&self, player: Player) -> u32 {
        match player {
            Player::Human => self.human,
            Player::Computer => self.computer,
        }
    }

    /// Adds a pair for `player` and returns the new score of that player.
    pub fn increment(&mut self, player: Player) -> u32 {
        let score = match player {
            Player::Human => &mut self.human,
            Player::Computer => &mut self.computer,
        };
        *score += 1;
        *score
    }

    pub fn total(&self) -> u32 {
        self.human + self.computer
    }

    pub fn outcome(&self) -> Outcome {
        match self.human.cmp(&self.computer) {
            Ordering::Greater => Outcome::HumanWins,
            Ordering::Less => Outcome::ComputerWins,
            Ordering::Equal => Outcome::Draw,
        }
    }
}

/// A card that was turned face up in the current turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flipped {
    pub position: Position,
    pub card: Card,
}

/// The cards turned face up in the current turn: at most two.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection(Vec<Flipped>);

impl Selection {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.0.len() == 2
    }

    pub fn contains(&self, position: Position) -> bool {
        self.0.iter().any(|flipped| flipped.position == position)
    }

    pub fn first(&self) -> Option<&Flipped> {
        self.0.first()
    }

    /// Both cards, once two have been flipped.
    pub fn pair(&self) -> Option<(&Flipped, &Flipped)> {
        match self.0.as_slice() {
            [first, second] => Some((first, second)),
            _ => None,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Flipped> {
        self.0.iter()
    }

    pub(crate) fn push(&mut self, flipped: Flipped) {
        debug_assert!(!self.is_full(), "selection already holds two cards");
        self.0.push(flipped);
    }

    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }
}

/// Everything that changes during one game.
///
/// Only the [`Engine`](crate::Engine) mutates it; everyone else gets a shared reference.
#[derive(Clone, Debug, Serialize)]
pub struct GameState {
    pub(crate) id: GameId,
    pub(crate) is_human_turn: bool,
    pub(crate) play_deck: PlayDeck,
    pub(crate) selection: Selection,
    pub(crate) knowledge: Knowledge,
    pub(crate) score: Score,
    /// Positions whose pair has been taken.
    pub(crate) cleared: BTreeSet<Position>,
}

impl GameState {
    pub(crate) fn new(id: GameId, play_deck: PlayDeck, human_starts: bool) -> Self {
        Self {
            id,
            is_human_turn: human_starts,
            knowledge: Knowledge::new(&play_deck),
            play_deck,
            selection: Selection::default(),
            score: Score::default(),
            cleared: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn is_human_turn(&self) -> bool {
        self.is_human_turn
    }

    pub fn active_player(&self) -> Player {
        if self.is_human_turn {
            Player::Human
        } else {
            Player::Computer
        }
    }

    pub fn play_deck(&self) -> &PlayDeck {
        &self.play_deck
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn knowledge(&self) -> &Knowledge {
        &self.knowledge
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn total_pairs(&self) -> u32 {
        self.play_deck.num_pairs() as u32
    }

    /// The game ends exactly when all pairs have been taken, no matter by whom.
    pub fn is_finished(&self) -> bool {
        self.score.total() == self.total_pairs()
    }

    pub fn is_cleared(&self, position: Position) -> bool {
        self.cleared.contains(&position)
    }

    pub fn is_in_play(&self, position: Position) -> bool {
        position < self.play_deck.len() && !self.is_cleared(position)
    }

    /// Positions that may be flipped right now: on the table and face down.
    pub fn flippable_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.play_deck
            .positions()
            .filter(|&position| self.is_in_play(position) && !self.selection.contains(position))
    }
}
