use std::time::Duration;

use pairs::{Card, Outcome, PlayDeck, Player, Position, Presenter};

/// How long the cards take to move to their new places on screen.
const REPOSITION_SETTLE: Duration = Duration::from_millis(500);

/// What the terminal shows. The engine writes it through [`Presenter`], the
/// UI reads it when drawing.
#[derive(Debug, Default)]
pub struct TuiPresenter {
    /// `Some` for face-up cards.
    pub cards: Vec<Option<Card>>,
    pub human_score: u32,
    pub computer_score: u32,
    pub status: Option<Outcome>,
    pub play_enabled: bool,
    pub shuffling: bool,
}

impl TuiPresenter {
    pub fn new() -> Self {
        Self {
            play_enabled: true,
            ..Self::default()
        }
    }
}

impl Presenter for TuiPresenter {
    fn render_deck_face_down(&mut self, deck: &PlayDeck) {
        self.cards = vec![None; deck.len()];
        self.shuffling = false;
    }

    fn render_deck_face_up(&mut self, deck: &PlayDeck) {
        self.cards = deck.iter().cloned().map(Some).collect();
        self.shuffling = false;
    }

    fn animate_reposition(&mut self, _previous: &PlayDeck, next: &PlayDeck) -> Duration {
        // Cards are turned over while they move, so nobody can follow them
        self.cards = vec![None; next.len()];
        self.shuffling = true;
        REPOSITION_SETTLE
    }

    fn show_card(&mut self, position: Position, card: &Card) {
        if let Some(slot) = self.cards.get_mut(position) {
            *slot = Some(card.clone());
        }
    }

    fn hide_card(&mut self, position: Position) {
        if let Some(slot) = self.cards.get_mut(position) {
            *slot = None;
        }
    }

    fn update_score_display(&mut self, player: Player, score: u32) {
        match player {
            Player::Human => self.human_score = score,
            Player::Computer => self.computer_score = score,
        }
    }

    fn show_end_game_status(&mut self, outcome: Outcome) {
        self.status = Some(outcome);
    }

    fn hide_end_game_status(&mut self) {
        self.status = None;
    }

    fn set_play_control_enabled(&mut self, enabled: bool) {
        self.play_enabled = enabled;
    }
}
