//! Interactive grid browser.
//!
//! Arrow keys move focus, Enter opens the focused entry, digits 1-9 select
//! a cell directly, Esc dismisses the detail (or exits from the grid), `q`
//! quits. Run with `cargo run --example grid_browser`.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};

use gridnav::{
    EngineConfig, GridEntry, GridNavigationEngine, InputAction, ItemId, NavEvent, map_key, view,
};

const CELL_WIDTH: usize = 12;
const FRAME_INTERVAL: Duration = Duration::from_millis(40);

#[derive(Debug, Clone)]
struct Card {
    id: String,
    blurb: String,
}

impl Card {
    fn new(id: &str, blurb: &str) -> Self {
        Self {
            id: id.to_string(),
            blurb: blurb.to_string(),
        }
    }
}

impl GridEntry for Card {
    fn entry_id(&self) -> ItemId {
        self.id.clone()
    }
}

fn library() -> Vec<Card> {
    vec![
        Card::new("nebula", "Dust cloud panorama"),
        Card::new("quasar", "Deep field timelapse"),
        Card::new("pulsar", "Radio sweep capture"),
        Card::new("aurora", "Polar light session"),
        Card::new("transit", "Exoplanet dip curve"),
        Card::new("eclipse", "Totality composite"),
        Card::new("meteor", "Shower long exposure"),
        Card::new("comet", "Tail evolution series"),
        Card::new("occult", "Lunar graze recording"),
    ]
}

fn main() -> io::Result<()> {
    let config = EngineConfig {
        column_count: 3,
        ..EngineConfig::default()
    };
    let mut engine: GridNavigationEngine<Card> =
        GridNavigationEngine::new(config).map_err(io::Error::other)?;

    let mut stdout = io::stdout();
    enter(&mut stdout)?;
    let result = run(&mut engine, &mut stdout);
    exit(&mut stdout);
    result
}

fn run(engine: &mut GridNavigationEngine<Card>, stdout: &mut impl Write) -> io::Result<()> {
    engine.handle_event(NavEvent::Appeared).ok();
    engine
        .handle_event(NavEvent::ItemsReplaced(library()))
        .map_err(io::Error::other)?;

    loop {
        draw(engine, stdout)?;

        if event::poll(FRAME_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if let crossterm::event::KeyCode::Char('q') = key.code {
                    break;
                }
                if let Some(action) = map_key(&key) {
                    if action == InputAction::Back && !engine.is_detail_open() {
                        break;
                    }
                    engine.handle_event(action.into_event()).ok();
                }
            }
        }

        engine
            .handle_event(NavEvent::Tick {
                elapsed: FRAME_INTERVAL,
            })
            .ok();
    }

    Ok(())
}

fn draw(engine: &GridNavigationEngine<Card>, stdout: &mut impl Write) -> io::Result<()> {
    execute!(stdout, MoveTo(0, 0), Clear(ClearType::All))?;

    let snapshot = engine.snapshot();
    if snapshot.detail_open {
        write!(stdout, "{}", restore_newlines(&view::render_detail(&snapshot)))?;
        if let Some(card) = engine.selected() {
            write!(stdout, "\r\n  {}\r\n", card.blurb)?;
        }
    } else {
        let grid = view::render_grid(
            engine.entries(),
            snapshot.focused,
            engine.column_count(),
            CELL_WIDTH,
        );
        write!(stdout, "{}", restore_newlines(&grid))?;
        write!(
            stdout,
            "\r\narrows move · Enter opens · 1-9 select · Esc back · q quits\r\n"
        )?;
    }

    stdout.flush()
}

// Raw mode needs explicit carriage returns.
fn restore_newlines(text: &str) -> String {
    text.replace('\n', "\r\n")
}

fn enter(stdout: &mut impl Write) -> io::Result<()> {
    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
    Ok(())
}

fn exit(stdout: &mut impl Write) {
    execute!(stdout, Show, LeaveAlternateScreen).ok();
    terminal::disable_raw_mode().ok();
}
