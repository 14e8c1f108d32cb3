use crate::GameState;

const CELL_WIDTH: usize = 10;

/// Draws the table as text, `columns` cards per row.
///
/// Face-up cards show their name, face-down cards `🂠` and taken cards `·`.
pub fn visualize_table(state: &GameState, columns: usize) -> String {
    let columns = columns.max(1);
    let mut result = String::from("╭");
    result += &"─".repeat(columns * CELL_WIDTH);
    result += "╮\n";

    let cards = state.play_deck().cards();
    for (row_idx, row) in cards.chunks(columns).enumerate() {
        result += "│";
        for (col_idx, card) in row.iter().enumerate() {
            let position = row_idx * columns + col_idx;
            let label = if state.selection().contains(position) {
                card.name.chars().take(CELL_WIDTH - 4).collect::<String>()
            } else if state.is_cleared(position) {
                String::from("·")
            } else {
                String::from("🂠")
            };
            result += &format!("{:>2} {:<width$}", position, label, width = CELL_WIDTH - 3);
        }
        for _ in row.len()..columns {
            result += &" ".repeat(CELL_WIDTH);
        }
        result += "│\n";
    }

    result += "╰";
    result += &"─".repeat(columns * CELL_WIDTH);
    result += "╯";
    result
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::{card, Deck, Engine, EngineConfig, Recording};

    #[test]
    fn table_shows_face_up_cards_by_name() {
        let deck = Deck::new(vec![
            card!(1, "fig"),
            card!(2, "fig"),
            card!(3, "kiwi"),
            card!(4, "kiwi"),
        ])
        .unwrap();
        let config = EngineConfig {
            shuffle: false,
            ..EngineConfig::default()
        };
        let mut engine = Engine::new(deck, config, Recording::new(), StdRng::seed_from_u64(0));
        engine.new_game();
        engine.flip(2).unwrap();

        let text = visualize_table(engine.state().unwrap(), 3);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].contains(" 0 🂠"));
        assert!(lines[1].contains(" 2 kiwi"));
        assert!(lines[2].contains(" 3 🂠"));
    }
}
