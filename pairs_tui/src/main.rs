mod presenter;

use std::fs::File;
use std::io::{stdout, BufReader};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use pairs::{Card, Deck, Engine, EngineConfig, Phase};
use presenter::TuiPresenter;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{
    crossterm::{
        event::{self, Event, KeyCode},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    },
    prelude::*,
    widgets::*,
};

#[derive(Parser)]
struct Args {
    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Path to a deck JSON file (an array of cards)
    #[arg(short, long)]
    deck: Option<PathBuf>,

    /// Let the computer take the first turn
    #[arg(long, default_value_t = false)]
    computer_starts: bool,

    /// Cards per row
    #[arg(long, default_value_t = 4)]
    columns: u16,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let deck = match &args.deck {
        Some(path) => serde_json::from_reader(BufReader::new(File::open(path)?))?,
        None => Deck::standard(),
    };
    let config = EngineConfig {
        human_starts: !args.computer_starts,
        ..EngineConfig::default()
    };
    let mut engine = Engine::new(
        deck,
        config,
        TuiPresenter::new(),
        StdRng::seed_from_u64(seed),
    );
    engine.present_deck_face_up()?;

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    let mut app = App {
        engine,
        cursor: 0,
        columns: args.columns.max(1),
    };

    let mut last_tick = Instant::now();
    let mut should_quit = false;
    while !should_quit {
        terminal.draw(|frame| app.ui(frame))?;
        should_quit = app.handle_events()?;
        let now = Instant::now();
        app.engine.advance(now - last_tick);
        last_tick = now;
    }

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

struct App {
    engine: Engine<TuiPresenter>,
    cursor: usize,
    columns: u16,
}

const CARD_WIDTH: u16 = 14;
const CARD_HEIGHT: u16 = 3;

impl App {
    fn handle_events(&mut self) -> std::io::Result<bool> {
        if !event::poll(Duration::from_millis(16))? {
            return Ok(false);
        }
        let Event::Key(key) = event::read()? else {
            return Ok(false);
        };
        if key.kind != event::KeyEventKind::Press {
            return Ok(false);
        }

        let num_cards = self.engine.presenter().cards.len();
        let columns = usize::from(self.columns);
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Left | KeyCode::Char('h') => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right | KeyCode::Char('l') => {
                self.cursor = (self.cursor + 1).min(num_cards.saturating_sub(1))
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.checked_sub(columns).unwrap_or(self.cursor)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor + columns < num_cards {
                    self.cursor += columns;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                // Rejected flips are simply ignored
                let _ = self.engine.flip(self.cursor);
            }
            KeyCode::Char('n') => {
                if self.engine.presenter().play_enabled {
                    self.engine.new_game();
                }
            }
            _ => {}
        }
        Ok(false)
    }

    fn ui(&self, frame: &mut Frame) {
        let main_layout = Layout::new(
            Direction::Vertical,
            [
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ],
        )
        .split(frame.size());

        frame.render_widget(self.header(), main_layout[0]);

        let view = self.engine.presenter();
        let cleared: Vec<bool> = (0..view.cards.len())
            .map(|position| {
                self.engine
                    .state()
                    .is_some_and(|state| state.is_cleared(position))
            })
            .collect();
        frame.render_widget(
            TableWidget {
                cards: &view.cards,
                cleared: &cleared,
                cursor: self.cursor,
                columns: self.columns,
            },
            main_layout[1],
        );

        let new_game_style = if view.play_enabled {
            Style::new()
        } else {
            Style::new().fg(Color::DarkGray)
        };
        let help = Line::from(vec![
            Span::raw(" ←↑↓→ move   ⏎ flip   "),
            Span::styled("n new game", new_game_style),
            Span::raw("   q quit"),
        ]);
        frame.render_widget(Paragraph::new(help), main_layout[2]);

        if let Some(outcome) = view.status {
            let area = centered(frame.size(), 40, 3);
            frame.render_widget(Clear, area);
            frame.render_widget(
                Paragraph::new(outcome.message())
                    .alignment(Alignment::Center)
                    .block(
                        Block::new()
                            .border_type(BorderType::Rounded)
                            .borders(Borders::all()),
                    ),
                area,
            );
        }
    }

    fn header(&self) -> Paragraph<'static> {
        let view = self.engine.presenter();
        let turn = if view.shuffling {
            "Shuffling…"
        } else {
            match self.engine.phase() {
                Phase::Idle => "Press n to start",
                Phase::Dealing => "Shuffling…",
                Phase::HumanTurn => "Your turn",
                Phase::ComputerTurn => "Computer's turn",
                Phase::Comparing => "",
                Phase::GameOver => "Game over, press n to play again",
            }
        };
        Paragraph::new(Line::from(vec![
            Span::styled(format!("You: {}", view.human_score), Style::new().bold()),
            Span::raw("   "),
            Span::styled(
                format!("Computer: {}", view.computer_score),
                Style::new().bold(),
            ),
            Span::raw(format!("   {}", turn)),
        ]))
        .block(
            Block::new()
                .border_type(BorderType::Rounded)
                .borders(Borders::all())
                .title(" Pairs "),
        )
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

struct TableWidget<'a> {
    cards: &'a [Option<Card>],
    cleared: &'a [bool],
    cursor: usize,
    columns: u16,
}

impl Widget for TableWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (position, card) in self.cards.iter().enumerate() {
            let row = position as u16 / self.columns;
            let col = position as u16 % self.columns;
            let x = area.x + col * CARD_WIDTH;
            let y = area.y + row * CARD_HEIGHT;
            if x + CARD_WIDTH > area.right() || y + CARD_HEIGHT > area.bottom() {
                continue;
            }

            let border_style = if position == self.cursor {
                Style::new().fg(Color::Yellow)
            } else {
                Style::new()
            };
            Block::new()
                .border_type(BorderType::Rounded)
                .borders(Borders::all())
                .border_style(border_style)
                .render(
                    Rect {
                        x,
                        y,
                        width: CARD_WIDTH,
                        height: CARD_HEIGHT,
                    },
                    buf,
                );

            let cleared = self.cleared.get(position).copied().unwrap_or(false);
            let (label, style) = match card {
                Some(card) if cleared => (card.name.clone(), Style::new().fg(Color::DarkGray)),
                Some(card) => (card.name.clone(), Style::new().fg(Color::Green).bold()),
                None => (String::from("░░░░"), Style::new()),
            };
            let label: String = label.chars().take(usize::from(CARD_WIDTH - 2)).collect();
            buf.set_string(x + 1, y + 1, label, style);
        }
    }
}
