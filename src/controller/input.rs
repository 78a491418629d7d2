//! Platform-agnostic input handling system
use std::collections::HashSet;
use std::fmt;

use serde::Deserialize;

/// Named movement actions, decoupled from physical keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveRight,
    MoveLeft,
    MoveDown,
    MoveUp,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::MoveRight,
        Action::MoveLeft,
        Action::MoveDown,
        Action::MoveUp,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Action::MoveRight => "move_right",
            Action::MoveLeft => "move_left",
            Action::MoveDown => "move_down",
            Action::MoveUp => "move_up",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Anything that can answer "is this action held right now".
pub trait ActionSource {
    fn is_action_pressed(&self, action: Action) -> bool;
}

/// A plain list of held actions, handy for scripted input.
impl ActionSource for [Action] {
    fn is_action_pressed(&self, action: Action) -> bool {
        self.contains(&action)
    }
}

/// Platform-independent input events
#[derive(Debug, Clone)]
pub enum InputEvent {
    KeyDown(String),
    KeyUp(String),
    FocusLost,
    VisibilityChanged { visible: bool },
}

/// Currently held keys, fed by platform events
#[derive(Debug, Default, Clone)]
pub struct InputState {
    pub pressed_keys: HashSet<String>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process an input event and update state
    pub fn process_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                self.pressed_keys.insert(normalize_key(key));
            }
            InputEvent::KeyUp(key) => {
                self.pressed_keys.remove(&normalize_key(key));
            }
            // Releases are lost while unfocused or hidden
            InputEvent::FocusLost | InputEvent::VisibilityChanged { .. } => {
                self.clear_keys();
            }
        }
    }

    pub fn is_key_pressed(&self, key: &str) -> bool {
        self.pressed_keys.contains(&normalize_key(key))
    }

    pub fn clear_keys(&mut self) {
        self.pressed_keys.clear();
    }
}

/// Single characters are stored lowercase so Shift+D still counts as "d".
fn normalize_key(key: &str) -> String {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.to_lowercase().collect(),
        _ => key.to_string(),
    }
}

/// Key mapping configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub right: String,
    pub left: String,
    pub down: String,
    pub up: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            right: "d".to_string(),
            left: "a".to_string(),
            down: "s".to_string(),
            up: "w".to_string(),
        }
    }
}

/// Maps held keys to actions; arrow keys always work alongside the bindings.
#[derive(Debug, Clone, Default)]
pub struct InputProcessor {
    bindings: KeyBindings,
}

impl InputProcessor {
    pub fn new(bindings: KeyBindings) -> Self {
        Self { bindings }
    }

    pub fn is_action_pressed(&self, input: &InputState, action: Action) -> bool {
        let (bound, arrow) = match action {
            Action::MoveRight => (&self.bindings.right, "ArrowRight"),
            Action::MoveLeft => (&self.bindings.left, "ArrowLeft"),
            Action::MoveDown => (&self.bindings.down, "ArrowDown"),
            Action::MoveUp => (&self.bindings.up, "ArrowUp"),
        };
        input.is_key_pressed(bound) || input.is_key_pressed(arrow)
    }

    /// Whether the key drives movement, so hosts can swallow its default behaviour.
    pub fn is_movement_key(&self, key: &str) -> bool {
        let key = normalize_key(key);
        matches!(key.as_str(), "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight")
            || [
                &self.bindings.right,
                &self.bindings.left,
                &self.bindings.down,
                &self.bindings.up,
            ]
            .into_iter()
            .any(|b| normalize_key(b) == key)
    }

    /// Borrow the processor together with a snapshot of input state.
    pub fn view<'a>(&'a self, input: &'a InputState) -> ActionView<'a> {
        ActionView { processor: self, input }
    }
}

/// Input state read through a set of key bindings.
#[derive(Clone, Copy)]
pub struct ActionView<'a> {
    processor: &'a InputProcessor,
    input: &'a InputState,
}

impl ActionSource for ActionView<'_> {
    fn is_action_pressed(&self, action: Action) -> bool {
        self.processor.is_action_pressed(self.input, action)
    }
}

pub mod wasm {
    use super::*;
    use web_sys::KeyboardEvent;

    pub fn keyboard_event_to_input(e: &KeyboardEvent, is_down: bool) -> InputEvent {
        let key = e.key();
        if is_down {
            InputEvent::KeyDown(key)
        } else {
            InputEvent::KeyUp(key)
        }
    }
}
