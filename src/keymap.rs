use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use lap_core::{Command, Controls};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Action {
    /// Start, Stop or Resume depending on the phase.
    RightButton,
    /// Lap or Reset depending on the phase.
    LeftButton,
    ScrollUp,
    ScrollDown,
    Quit,
}

pub fn action_for(key: &KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('s') => Some(Action::RightButton),
        KeyCode::Char('l') | KeyCode::Char('r') => Some(Action::LeftButton),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::ScrollUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::ScrollDown),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// The command behind a button press, or `None` if that button is disabled.
pub fn command_for(action: Action, controls: &Controls) -> Option<Command> {
    let control = match action {
        Action::LeftButton => controls.left,
        Action::RightButton => controls.right,
        _ => return None,
    };
    control.enabled.then_some(control.command)
}
