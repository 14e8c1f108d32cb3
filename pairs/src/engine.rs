use std::time::Duration;

use rand::rngs::StdRng;
use tracing::{debug, info, trace, warn};

use crate::scheduler::{Scheduled, Scheduler, Task};
use crate::{
    Deck, EngineConfig, Flipped, GameId, GameInProgress, GameState, InvalidFlip, MemoryStrategy,
    PlayDeck, Player, Position, Presenter, Strategy,
};

/// Where the engine is in the turn cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No game has been started yet.
    Idle,
    /// The cards of a new game are still moving into place.
    Dealing,
    /// Waiting for the human to flip a card.
    HumanTurn,
    ComputerTurn,
    /// Two cards are face up and are being compared.
    Comparing,
    GameOver,
}

impl Phase {
    pub fn is_in_game(&self) -> bool {
        matches!(
            self,
            Phase::Dealing | Phase::HumanTurn | Phase::ComputerTurn | Phase::Comparing
        )
    }
}

/// Runs games of pairs between a human and the computer.
///
/// The engine is a cooperative state machine. Pauses (the reveal of two
/// non-matching cards, the computer "thinking", ...) are tasks on a virtual
/// clock that the host moves forward with [`advance()`](Self::advance) or
/// [`run_until_idle()`](Self::run_until_idle). Each task belongs to the game
/// that scheduled it and is dropped if another game has been started since.
pub struct Engine<P, S = MemoryStrategy> {
    deck: Deck,
    config: EngineConfig,
    presenter: P,
    strategy: S,
    rng: StdRng,
    scheduler: Scheduler,
    phase: Phase,
    last_game_id: GameId,
    game: Option<GameState>,
    /// The deck currently drawn on screen, if any.
    on_screen: Option<PlayDeck>,
}

impl<P: Presenter> Engine<P, MemoryStrategy> {
    pub fn new(deck: Deck, config: EngineConfig, presenter: P, rng: StdRng) -> Self {
        Self::with_strategy(deck, config, presenter, MemoryStrategy::default(), rng)
    }
}

impl<P: Presenter, S: Strategy> Engine<P, S> {
    pub fn with_strategy(
        deck: Deck,
        config: EngineConfig,
        presenter: P,
        strategy: S,
        rng: StdRng,
    ) -> Self {
        Self {
            deck,
            config,
            presenter,
            strategy,
            rng,
            scheduler: Scheduler::default(),
            phase: Phase::Idle,
            last_game_id: GameId::default(),
            game: None,
            on_screen: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The current game, if one has been started.
    pub fn state(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    pub fn current_game(&self) -> Option<GameId> {
        self.game.as_ref().map(|game| game.id)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Time on the engine's clock.
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// When the next pending task is due, or `None` if the engine is waiting
    /// for input (or has nothing left to do).
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    pub fn is_accepting_input(&self) -> bool {
        self.phase == Phase::HumanTurn
    }

    /// Deals a deck and shows it face up, without starting a game.
    pub fn present_deck_face_up(&mut self) -> Result<(), GameInProgress> {
        if self.phase.is_in_game() {
            return Err(GameInProgress);
        }
        let play_deck = self.deck.deal(&mut self.rng, self.config.shuffle);
        self.presenter.render_deck_face_up(&play_deck);
        self.on_screen = Some(play_deck);
        Ok(())
    }

    /// Starts a new game, abandoning the current one if there is any.
    pub fn new_game(&mut self) -> GameId {
        let id = self.last_game_id.next();
        self.last_game_id = id;

        self.presenter.hide_end_game_status();
        self.presenter.set_play_control_enabled(false);

        let play_deck = self.deck.deal(&mut self.rng, self.config.shuffle);
        let previous = self.on_screen.replace(play_deck.clone());
        let game = self
            .game
            .insert(GameState::new(id, play_deck, self.config.human_starts));
        for player in [Player::Human, Player::Computer] {
            self.presenter.update_score_display(player, 0);
        }
        debug!(game = %id, cards = game.play_deck.len(), "New game");

        let settle = match previous {
            Some(previous) => self
                .presenter
                .animate_reposition(&previous, &game.play_deck),
            None => Duration::ZERO,
        };
        if settle.is_zero() {
            self.start_play();
        } else {
            self.phase = Phase::Dealing;
            self.scheduler.schedule(id, settle, Task::StartPlay);
        }
        id
    }

    /// Flips the card at `position` for the human player.
    ///
    /// Only possible during the human's turn. A rejected flip changes nothing.
    pub fn flip(&mut self, position: Position) -> Result<(), InvalidFlip> {
        let result = if self.game.is_none() {
            Err(InvalidFlip::NoGame)
        } else if self.phase != Phase::HumanTurn {
            Err(InvalidFlip::NotAcceptingInput)
        } else {
            self.flip_card(position)
        };
        if let Err(err) = &result {
            trace!(position, %err, "Flip rejected");
        }
        result
    }

    /// Moves the clock forward by `elapsed` and runs every task that became due.
    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.scheduler.now() + elapsed;
        while let Some(scheduled) = self.scheduler.pop_due(until) {
            self.run(scheduled);
        }
        self.scheduler.set_now(until);
    }

    /// Runs pending tasks, moving the clock as needed, until none are left.
    ///
    /// Afterwards the engine is waiting for the human, or the game is over.
    pub fn run_until_idle(&mut self) {
        while let Some(scheduled) = self.scheduler.pop_due(Duration::MAX) {
            self.run(scheduled);
        }
    }

    fn run(&mut self, scheduled: Scheduled) {
        if self.current_game() != Some(scheduled.game) {
            trace!(game = %scheduled.game, task = ?scheduled.task, "Dropping task of a previous game");
            return;
        }
        match scheduled.task {
            Task::StartPlay => self.start_play(),
            Task::NewTurn => self.new_turn(),
            Task::FlipBack => self.flip_back(),
            Task::ComputerFlip => self.computer_flip(),
            Task::HideEndGameStatus => self.presenter.hide_end_game_status(),
        }
    }

    fn schedule(&mut self, delay: Duration, task: Task) {
        if let Some(id) = self.current_game() {
            self.scheduler.schedule(id, delay, task);
        }
    }

    fn start_play(&mut self) {
        let Some(game) = self.game.as_ref() else {
            return;
        };
        self.presenter.render_deck_face_down(&game.play_deck);
        self.new_turn();
    }

    fn new_turn(&mut self) {
        let Some(game) = self.game.as_mut() else {
            return;
        };
        game.selection.clear();
        if game.is_finished() {
            self.game_over();
        } else if game.is_human_turn {
            debug!(game = %game.id, "Human turn");
            self.phase = Phase::HumanTurn;
        } else {
            debug!(game = %game.id, "Computer turn");
            self.phase = Phase::ComputerTurn;
            let think = self.config.delays.think(&mut self.rng);
            self.schedule(think, Task::ComputerFlip);
        }
    }

    fn computer_flip(&mut self) {
        if self.phase != Phase::ComputerTurn {
            return;
        }
        let Some(game) = self.game.as_ref() else {
            return;
        };
        let choice = match game.selection.first() {
            None => self.strategy.first_flip(&game.knowledge, &mut self.rng),
            Some(first) => self
                .strategy
                .second_flip(&game.knowledge, first, &mut self.rng),
        };
        let position = match choice {
            Some(position) if game.is_in_play(position) && !game.selection.contains(position) => {
                position
            }
            _ => {
                warn!(game = %game.id, ?choice, "Strategy chose no flippable card");
                match game.flippable_positions().next() {
                    Some(position) => position,
                    None => return,
                }
            }
        };

        if let Err(err) = self.flip_card(position) {
            warn!(position, %err, "Computer flip rejected");
            return;
        }
        // Still waiting for the second card
        if self.phase == Phase::ComputerTurn {
            let think = self.config.delays.think(&mut self.rng);
            self.schedule(think, Task::ComputerFlip);
        }
    }

    /// Turns a card face up for whoever's turn it is.
    fn flip_card(&mut self, position: Position) -> Result<(), InvalidFlip> {
        let Some(game) = self.game.as_mut() else {
            return Err(InvalidFlip::NoGame);
        };
        let Some(card) = game.play_deck.get(position).cloned() else {
            return Err(InvalidFlip::OutOfRange {
                position,
                len: game.play_deck.len(),
            });
        };
        if game.is_cleared(position) {
            return Err(InvalidFlip::AlreadyCleared { position });
        }
        if game.selection.contains(position) {
            return Err(InvalidFlip::AlreadySelected { position });
        }

        debug!(game = %game.id, player = %game.active_player(), position, %card, "Flip");
        game.knowledge.record_discovery(position, &card);
        self.presenter.show_card(position, &card);
        game.selection.push(Flipped { position, card });

        if game.selection.is_full() {
            self.phase = Phase::Comparing;
            self.compare();
        }
        Ok(())
    }

    fn compare(&mut self) {
        let Some(game) = self.game.as_mut() else {
            return;
        };
        let Some((first, second)) = game.selection.pair() else {
            return;
        };
        let player = game.active_player();

        if first.card.name == second.card.name {
            let ids = [first.card.id, second.card.id];
            let positions = [first.position, second.position];
            for id in ids {
                game.knowledge.remove_from_discovered(id);
            }
            game.cleared.extend(positions);
            let score = game.score.increment(player);
            debug!(game = %game.id, %player, score, ?positions, "Match");
            self.presenter.update_score_display(player, score);
            game.selection.clear();
            self.schedule(self.config.delays.between_turns(), Task::NewTurn);
        } else {
            debug!(game = %game.id, %player, "No match");
            self.schedule(self.config.delays.reveal(), Task::FlipBack);
        }
    }

    fn flip_back(&mut self) {
        let Some(game) = self.game.as_mut() else {
            return;
        };
        for flipped in game.selection.iter() {
            self.presenter.hide_card(flipped.position);
        }
        game.selection.clear();
        game.is_human_turn = !game.is_human_turn;
        self.schedule(self.config.delays.between_turns(), Task::NewTurn);
    }

    fn game_over(&mut self) {
        let Some(game) = self.game.as_ref() else {
            return;
        };
        let score = game.score;
        let outcome = score.outcome();
        info!(
            game = %game.id,
            human = score.human,
            computer = score.computer,
            %outcome,
            "Game over"
        );
        self.phase = Phase::GameOver;
        self.presenter.show_end_game_status(outcome);
        self.presenter.set_play_control_enabled(true);
        self.schedule(self.config.delays.end_game_status(), Task::HideEndGameStatus);
    }
}
