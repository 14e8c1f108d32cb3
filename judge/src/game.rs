use std::time::Duration;

use pairs::{visualize_table, Engine, GameId, Outcome, Phase, Recording, Score, Strategy};
use serde::Serialize;
use tracing::trace;

use crate::player::SimulatedHuman;
use crate::recording::Recorder;

/// More flips than any game of the largest sensible deck needs.
const MAX_HUMAN_FLIPS: usize = 100_000;

const TABLE_COLUMNS: usize = 4;

#[derive(Clone, Debug, Serialize)]
pub struct GameSummary {
    pub game: GameId,
    pub outcome: Outcome,
    pub score: Score,
    pub human_flips: usize,
    /// Time on the engine's clock from the deal to the end of the game.
    #[serde(serialize_with = "serialize_millis")]
    pub duration: Duration,
}

fn serialize_millis<S: serde::Serializer>(duration: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u128(duration.as_millis())
}

/// Plays one game to the end, flipping for the human whenever the engine waits for input.
///
/// Returns an error only if the game does not come to an end.
pub fn play_game<S: Strategy>(
    engine: &mut Engine<Recording, S>,
    human: &mut SimulatedHuman,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<GameSummary> {
    engine.presenter_mut().take_events();
    let started_at = engine.now();
    let game = engine.new_game();
    let mut human_flips = 0;

    loop {
        engine.run_until_idle();
        let Some(state) = engine.state() else {
            anyhow::bail!("Game {} disappeared", game);
        };
        match engine.phase() {
            Phase::GameOver => break,
            Phase::HumanTurn => {
                if human_flips >= MAX_HUMAN_FLIPS {
                    anyhow::bail!("Game {} did not end after {} human flips", game, human_flips);
                }
                let Some(position) = human.choose_flip(state) else {
                    anyhow::bail!("Game {}: no card left for the human to flip", game);
                };
                engine.flip(position)?;
                human_flips += 1;
                if let Some(state) = engine.state() {
                    trace!("\n{}", visualize_table(state, TABLE_COLUMNS));
                }
            }
            phase => anyhow::bail!("Game {} stalled in phase {:?}", game, phase),
        }
    }

    let score = engine.state().map(|state| state.score()).unwrap_or_default();
    let summary = GameSummary {
        game,
        outcome: score.outcome(),
        score,
        human_flips,
        duration: engine.now() - started_at,
    };

    if let Some(rec) = recorder {
        let events = engine.presenter_mut().take_events();
        rec.write_game_recording(&summary, events)?;
    }

    Ok(summary)
}
