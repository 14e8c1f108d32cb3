pub use cards::*;
pub use config::*;
pub use deck::*;
pub use engine::*;
pub use errors::*;
pub use knowledge::*;
pub use presentation::*;
pub use state::*;
pub use strategy::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod cards;
mod config;
mod deck;
mod engine;
mod errors;
mod knowledge;
mod presentation;
mod scheduler;
mod state;
mod strategy;
mod visualization;
