use iced::keyboard::{key::Named, Key};

/// The closed set of inputs the launcher reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Enter,
    PageUp,
    PageDown,
    Escape,
}

impl Action {
    pub fn from_key(key: Key<&str>) -> Option<Self> {
        match key {
            Key::Named(Named::ArrowUp) => Some(Action::Up),
            Key::Named(Named::ArrowDown) => Some(Action::Down),
            Key::Named(Named::ArrowLeft) => Some(Action::Left),
            Key::Named(Named::ArrowRight) => Some(Action::Right),
            Key::Named(Named::Enter) => Some(Action::Enter),
            Key::Named(Named::PageUp) => Some(Action::PageUp),
            Key::Named(Named::PageDown) => Some(Action::PageDown),
            Key::Named(Named::Escape) => Some(Action::Escape),
            _ => None,
        }
    }

    /// Directional actions repeat while a gamepad button is held.
    pub fn repeats(self) -> bool {
        !matches!(self, Action::Enter | Action::Escape)
    }
}
