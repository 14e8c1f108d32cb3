use pairs::{GameState, MemoryStrategy, Position, Strategy};
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use serde::{Deserialize, Serialize};

/// How the simulated human chooses cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HumanModel {
    /// Flips random face-down cards and remembers nothing.
    Random,
    /// Remembers every card seen so far, like the computer does.
    Memory,
}

/// Stands in for the human player in simulated games.
pub struct SimulatedHuman {
    pub model: HumanModel,
    strategy: MemoryStrategy,
    rng: StdRng,
}

impl SimulatedHuman {
    pub fn new(model: HumanModel, rng: StdRng) -> Self {
        Self {
            model,
            strategy: MemoryStrategy::default(),
            rng,
        }
    }

    /// Picks the next card to flip, or `None` if nothing can be flipped.
    pub fn choose_flip(&mut self, state: &GameState) -> Option<Position> {
        let choice = match (self.model, state.selection().first()) {
            (HumanModel::Random, _) => None,
            (HumanModel::Memory, None) => self.strategy.first_flip(state.knowledge(), &mut self.rng),
            (HumanModel::Memory, Some(first)) => {
                self.strategy
                    .second_flip(state.knowledge(), first, &mut self.rng)
            }
        };
        choice
            .filter(|&position| state.is_in_play(position) && !state.selection().contains(position))
            .or_else(|| state.flippable_positions().choose(&mut self.rng))
    }
}
