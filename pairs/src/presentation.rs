use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Card, CardId, Outcome, PlayDeck, Player, Position};

/// What the engine needs from whatever draws the table.
///
/// The engine calls these; a presenter never changes the game.
pub trait Presenter {
    fn render_deck_face_down(&mut self, deck: &PlayDeck);
    fn render_deck_face_up(&mut self, deck: &PlayDeck);
    /// Moves the cards on screen from their old to their new positions.
    ///
    /// Returns how long the animation takes to settle. The first turn starts
    /// once that time has passed.
    fn animate_reposition(&mut self, previous: &PlayDeck, next: &PlayDeck) -> Duration;
    fn show_card(&mut self, position: Position, card: &Card);
    fn hide_card(&mut self, position: Position);
    fn update_score_display(&mut self, player: Player, score: u32);
    fn show_end_game_status(&mut self, outcome: Outcome);
    fn hide_end_game_status(&mut self);
    fn set_play_control_enabled(&mut self, enabled: bool);
}

/// One call to a [`Presenter`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PresentationEvent {
    RenderDeckFaceDown { cards: Vec<CardId> },
    RenderDeckFaceUp { cards: Vec<CardId> },
    AnimateReposition { previous: Vec<CardId>, next: Vec<CardId> },
    ShowCard { position: Position, card: CardId },
    HideCard { position: Position },
    UpdateScore { player: Player, score: u32 },
    ShowEndGameStatus { outcome: Outcome },
    HideEndGameStatus,
    SetPlayControlEnabled { enabled: bool },
}

/// A presenter that draws nothing and writes down every call.
#[derive(Clone, Debug, Default)]
pub struct Recording {
    pub events: Vec<PresentationEvent>,
    /// What `animate_reposition()` reports as its settle time.
    pub settle: Duration,
}

impl Recording {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settle(settle: Duration) -> Self {
        Self {
            events: Vec::new(),
            settle,
        }
    }

    /// Returns the events recorded so far and starts over.
    pub fn take_events(&mut self) -> Vec<PresentationEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Presenter for Recording {
    fn render_deck_face_down(&mut self, deck: &PlayDeck) {
        self.events
            .push(PresentationEvent::RenderDeckFaceDown { cards: deck.ids() });
    }

    fn render_deck_face_up(&mut self, deck: &PlayDeck) {
        self.events
            .push(PresentationEvent::RenderDeckFaceUp { cards: deck.ids() });
    }

    fn animate_reposition(&mut self, previous: &PlayDeck, next: &PlayDeck) -> Duration {
        self.events.push(PresentationEvent::AnimateReposition {
            previous: previous.ids(),
            next: next.ids(),
        });
        self.settle
    }

    fn show_card(&mut self, position: Position, card: &Card) {
        self.events.push(PresentationEvent::ShowCard {
            position,
            card: card.id,
        });
    }

    fn hide_card(&mut self, position: Position) {
        self.events.push(PresentationEvent::HideCard { position });
    }

    fn update_score_display(&mut self, player: Player, score: u32) {
        self.events
            .push(PresentationEvent::UpdateScore { player, score });
    }

    fn show_end_game_status(&mut self, outcome: Outcome) {
        self.events
            .push(PresentationEvent::ShowEndGameStatus { outcome });
    }

    fn hide_end_game_status(&mut self) {
        self.events.push(PresentationEvent::HideEndGameStatus);
    }

    fn set_play_control_enabled(&mut self, enabled: bool) {
        self.events
            .push(PresentationEvent::SetPlayControlEnabled { enabled });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_serialization() {
        let json = serde_json::to_string(&PresentationEvent::ShowCard {
            position: 3,
            card: CardId(8),
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"ShowCard","position":3,"card":8}"#);

        let json = serde_json::to_string(&PresentationEvent::ShowEndGameStatus {
            outcome: Outcome::ComputerWins,
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"ShowEndGameStatus","outcome":"computer_wins"}"#);
    }
}
