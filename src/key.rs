//! Type-safe key bindings.
//!
//! A [`Binding`] pairs the key combinations that trigger an action with
//! the help text shown for it. Components keep their bindings in a key
//! map struct so applications can rebind keys wholesale.

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A single key combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key itself.
    pub code: KeyCode,
    /// Required modifier state.
    pub modifiers: KeyModifiers,
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, modifiers): (KeyCode, KeyModifiers)) -> Self {
        Self { code, modifiers }
    }
}

/// An action's key combinations plus its help entry.
#[derive(Debug, Clone)]
pub struct Binding {
    /// The combinations that trigger the action.
    pub keys: Vec<KeyPress>,
    /// Short key label for help lines, e.g. `"↑/k"`.
    pub help: String,
    /// What the action does.
    pub description: String,
}

impl Binding {
    /// Creates a binding with no help text.
    pub fn new<K: Into<KeyPress>>(keys: Vec<K>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            help: String::new(),
            description: String::new(),
        }
    }

    /// Sets the help label and description.
    pub fn with_help(mut self, help: impl Into<String>, description: impl Into<String>) -> Self {
        self.help = help.into();
        self.description = description.into();
        self
    }

    /// Whether the key message matches any of the bound combinations.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        self.keys
            .iter()
            .any(|k| k.code == msg.key && k.modifiers == msg.modifiers)
    }
}

/// Help entries for a component's key map, used when rendering inline help.
pub trait KeyMap {
    /// The bindings to show in a one-line help view.
    fn short_help(&self) -> Vec<&Binding>;
}
