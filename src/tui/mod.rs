// File: src/tui/mod.rs
pub mod action;
pub mod view;

use crate::app::App;
use crate::runtime::Runtime;
use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;

/// Runs the terminal UI until the user quits.
pub async fn run(runtime: Runtime, mut app: App) -> Result<()> {
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &runtime, &mut app).await;
    ratatui::restore();
    result
}

async fn event_loop(
    terminal: &mut DefaultTerminal,
    runtime: &Runtime,
    app: &mut App,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut input = EventStream::new();

    runtime.spawn_all(app.start(), &tx);

    while !app.should_quit {
        terminal.draw(|f| view::draw(f, app))?;

        tokio::select! {
            maybe_event = input.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if let Some(event) = action::map_key(app, key) {
                        runtime.spawn_all(app.update(event), &tx);
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            Some(event) = rx.recv() => {
                runtime.spawn_all(app.update(event), &tx);
            }
        }
    }
    Ok(())
}
