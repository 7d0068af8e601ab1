//! Replays a canned navigation session and prints the grid after each step.
//!
//! Run with `cargo run --example scripted_walkthrough`. No terminal takeover;
//! every step's output is appended to stdout so the whole session is
//! scrollable afterwards.

use std::time::Duration;

use gridnav::{Direction, EngineConfig, GridNavigationEngine, NavEvent, view};

const CELL_WIDTH: usize = 9;

fn tick() -> NavEvent<String> {
    NavEvent::Tick {
        elapsed: Duration::from_millis(0),
    }
}

fn main() -> gridnav::Result<()> {
    let config = EngineConfig {
        column_count: 3,
        settle_delay: Duration::ZERO,
        ..EngineConfig::default()
    };
    let mut engine: GridNavigationEngine<String> = GridNavigationEngine::new(config)?;

    let items: Vec<String> = [
        "alpha", "bravo", "charlie", "delta", "echo", "foxtrot", "golf", "hotel",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    let steps: Vec<(&str, NavEvent<String>)> = vec![
        ("grid appears", NavEvent::Appeared),
        ("items load", NavEvent::ItemsReplaced(items)),
        ("settle", tick()),
        ("move right", NavEvent::Direction(Direction::Right)),
        ("move down", NavEvent::Direction(Direction::Down)),
        ("move right", NavEvent::Direction(Direction::Right)),
        ("open the focused entry", NavEvent::Activate),
        ("press back", NavEvent::DetailDismissed),
        ("settle", tick()),
        ("pointer-select cell 7", NavEvent::Select { index: 6 }),
        ("press back", NavEvent::DetailDismissed),
        ("settle", tick()),
    ];

    for (label, event) in steps {
        engine.handle_event(event)?;
        let snapshot = engine.snapshot();
        println!("== {label}");
        if snapshot.detail_open {
            print!("{}", view::render_detail(&snapshot));
        } else {
            print!(
                "{}",
                view::render_grid(
                    engine.entries(),
                    snapshot.focused,
                    engine.column_count(),
                    CELL_WIDTH,
                )
            );
        }
        println!(
            "   focused={:?} detail_open={} selected={:?}",
            snapshot.focused, snapshot.detail_open, snapshot.selected_id
        );
        println!();
    }

    Ok(())
}
