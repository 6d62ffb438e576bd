use crate::sim::{Control, Pacer};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

pub(crate) fn is_quit(k: &KeyEvent) -> bool {
    match k.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => k.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Sleeps the frame delay while watching the keyboard, so a quit key lands between
/// generations instead of after the next one.
pub(crate) struct KeyboardPacer {
    pub(crate) delay: Duration,
}

/// `Stop` for a quit key press, `None` for anything else.
pub(crate) fn control_for(ev: &Event) -> Option<Control> {
    match ev {
        Event::Key(k) if k.kind == KeyEventKind::Press && is_quit(k) => Some(Control::Stop),
        _ => None,
    }
}

impl Pacer for KeyboardPacer {
    fn pause(&mut self) -> anyhow::Result<Control> {
        let end = Instant::now() + self.delay;
        // a zero delay still polls once, so quit keys are seen with no time budget
        loop {
            let left = end.saturating_duration_since(Instant::now());
            if !event::poll(left)? {
                return Ok(Control::Continue);
            }
            if let Some(c) = control_for(&event::read()?) {
                return Ok(c);
            }
        }
    }
}

/// Blocks until any key is pressed.
pub(crate) fn wait_for_key() -> anyhow::Result<()> {
    loop {
        if let Event::Key(k) = event::read()? {
            if k.kind == KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}
