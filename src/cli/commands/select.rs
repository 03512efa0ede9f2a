//! Interactive menu driver.
//!
//! Feeds terminal input into [`session::update`] and carries out the effects
//! it returns. All menu behavior lives in the session; this module only owns
//! the terminal.

use std::collections::VecDeque;
use std::io;

use anyhow::{bail, Context, Result};
use console::{Key, Term};
use tracing::{debug, info};

use crate::adapters::process::TokioProcessRunner;
use crate::adapters::prompt::ConsolePrompt;
use crate::cli::display::styled_report;
use crate::cli::session::{self, Effect, Event, KeyInput, Selection, Session};
use crate::cli::view;
use crate::domain::models::Config;
use crate::services::ExecutionCoordinator;

type MenuCoordinator = ExecutionCoordinator<TokioProcessRunner, ConsolePrompt>;

pub async fn execute(config: &Config) -> Result<()> {
    let term = Term::stdout();
    if !term.is_term() {
        bail!("The interactive menu needs a terminal; use `bcp run` instead");
    }

    let coordinator = ExecutionCoordinator::new(
        TokioProcessRunner::with_config(config.runner.clone()),
        ConsolePrompt::new(),
    );

    term.hide_cursor().context("Failed to hide cursor")?;
    let result = event_loop(&term, &coordinator, Session::new(config)).await;
    term.show_cursor().context("Failed to restore cursor")?;
    result
}

async fn event_loop(term: &Term, coordinator: &MenuCoordinator, mut session: Session) -> Result<()> {
    let mut width = terminal_width(term);
    let mut pending = VecDeque::from([Event::Resize { width }]);

    loop {
        let event = match pending.pop_front() {
            Some(event) => event,
            None => {
                let current = terminal_width(term);
                if current != width {
                    width = current;
                    pending.push_back(Event::Key(read_input(term).await?));
                    Event::Resize { width }
                } else {
                    Event::Key(read_input(term).await?)
                }
            }
        };

        let (next, effects) = session::update(session, event);
        session = next;

        for effect in effects {
            match effect {
                Effect::Render => draw(term, &session)?,
                Effect::RunBatch(selection) => {
                    let report = run_batch(coordinator, selection).await;
                    pending.push_back(Event::ReportReady(report));
                }
                Effect::Quit => {
                    info!("menu closed");
                    return Ok(());
                }
            }
        }
    }
}

async fn run_batch(coordinator: &MenuCoordinator, selection: Selection) -> String {
    debug!(
        clusters = selection.clusters.len(),
        templates = selection.templates.len(),
        "running menu selection"
    );
    let report = coordinator
        .run(&selection.clusters, &selection.templates)
        .await;
    styled_report(&report)
}

fn draw(term: &Term, session: &Session) -> Result<()> {
    term.clear_screen().context("Failed to clear screen")?;
    term.write_line(&view::render(session))
        .context("Failed to draw menu")?;
    Ok(())
}

fn terminal_width(term: &Term) -> usize {
    usize::from(term.size().1)
}

/// Block on the next key that maps to a menu action.
async fn read_input(term: &Term) -> Result<KeyInput> {
    loop {
        let reader = term.clone();
        let key = tokio::task::spawn_blocking(move || reader.read_key())
            .await
            .context("Key reader task failed")?;

        match key {
            Ok(key) => {
                if let Some(input) = map_key(&key) {
                    return Ok(input);
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => return Ok(KeyInput::Quit),
            Err(e) => return Err(e).context("Failed to read key"),
        }
    }
}

/// Menu action for a key press, if any.
pub fn map_key(key: &Key) -> Option<KeyInput> {
    match key {
        Key::ArrowUp | Key::Char('k') => Some(KeyInput::Up),
        Key::ArrowDown | Key::Char('j') => Some(KeyInput::Down),
        Key::Char(' ') | Key::Char('x') => Some(KeyInput::Toggle),
        Key::Char('A') => Some(KeyInput::ToggleAll),
        Key::Tab => Some(KeyInput::NextField),
        Key::Escape | Key::BackTab => Some(KeyInput::PrevField),
        Key::Enter => Some(KeyInput::Confirm),
        Key::Char('q') | Key::Char('\u{3}') => Some(KeyInput::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(map_key(&Key::ArrowUp), Some(KeyInput::Up));
        assert_eq!(map_key(&Key::Char('j')), Some(KeyInput::Down));
        assert_eq!(map_key(&Key::Char(' ')), Some(KeyInput::Toggle));
        assert_eq!(map_key(&Key::Char('A')), Some(KeyInput::ToggleAll));
        assert_eq!(map_key(&Key::Char('a')), None);
        assert_eq!(map_key(&Key::Tab), Some(KeyInput::NextField));
        assert_eq!(map_key(&Key::Escape), Some(KeyInput::PrevField));
        assert_eq!(map_key(&Key::Enter), Some(KeyInput::Confirm));
        assert_eq!(map_key(&Key::Char('\u{3}')), Some(KeyInput::Quit));
    }
}
