use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::game::{Action, Direction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    GameAction(Action),
    Quit,
    None,
}

/// Pointer gestures that rotate the cube
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    Grab { column: u16, row: u16 },
    Drag { column: u16, row: u16 },
    Release,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::GameAction(Action::Turn(Direction::Up)),
            KeyCode::Down => KeyAction::GameAction(Action::Turn(Direction::Down)),
            KeyCode::Left => KeyAction::GameAction(Action::Turn(Direction::Left)),
            KeyCode::Right => KeyAction::GameAction(Action::Turn(Direction::Right)),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => {
                KeyAction::GameAction(Action::Turn(Direction::Up))
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                KeyAction::GameAction(Action::Turn(Direction::Down))
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                KeyAction::GameAction(Action::Turn(Direction::Left))
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                KeyAction::GameAction(Action::Turn(Direction::Right))
            }

            // Controls
            KeyCode::Char(' ') | KeyCode::Enter => KeyAction::GameAction(Action::StartOrPause),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }

    pub fn handle_mouse_event(&self, mouse: MouseEvent) -> MouseAction {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => MouseAction::Grab {
                column: mouse.column,
                row: mouse.row,
            },
            MouseEventKind::Drag(MouseButton::Left) => MouseAction::Drag {
                column: mouse.column,
                row: mouse.row,
            },
            MouseEventKind::Up(MouseButton::Left) => MouseAction::Release,
            _ => MouseAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
