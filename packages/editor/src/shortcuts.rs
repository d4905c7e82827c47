//! Keyboard shortcuts
//!
//! Combos are written `mod+shift+z`. `mod` is Ctrl or Cmd, whichever the
//! platform uses; it matches either.

use std::fmt;
use std::str::FromStr;

use crate::errors::EditorError;

/// A key press as the host reports it
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyEvent {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    key: String,
    modifier: bool,
    shift: bool,
    alt: bool,
}

impl Shortcut {
    pub fn parse(combo: &str) -> Result<Self, EditorError> {
        let mut shortcut = Shortcut {
            key: String::new(),
            modifier: false,
            shift: false,
            alt: false,
        };

        for part in combo.split('+').map(|p| p.trim().to_lowercase()) {
            match part.as_str() {
                "mod" | "ctrl" | "cmd" | "meta" => shortcut.modifier = true,
                "shift" => shortcut.shift = true,
                "alt" => shortcut.alt = true,
                "" => return Err(EditorError::Config(format!("empty key in shortcut `{combo}`"))),
                _ if shortcut.key.is_empty() => shortcut.key = part,
                _ => {
                    return Err(EditorError::Config(format!(
                        "shortcut `{combo}` names more than one key"
                    )))
                }
            }
        }

        if shortcut.key.is_empty() {
            return Err(EditorError::Config(format!("shortcut `{combo}` has no key")));
        }
        Ok(shortcut)
    }

    /// Exact match: extra modifiers on the event do not match
    pub fn matches(&self, event: &KeyEvent) -> bool {
        event.key.to_lowercase() == self.key
            && (event.ctrl || event.meta) == self.modifier
            && event.shift == self.shift
            && event.alt == self.alt
    }
}

impl FromStr for Shortcut {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Shortcut::parse(s)
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifier {
            f.write_str("mod+")?;
        }
        if self.shift {
            f.write_str("shift+")?;
        }
        if self.alt {
            f.write_str("alt+")?;
        }
        f.write_str(&self.key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    Undo,
    Redo,
    Save,
}

/// Shortcut to command table
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: Vec<(Shortcut, EditorCommand)>,
}

impl Keymap {
    pub fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    pub fn bind(&mut self, combo: &str, command: EditorCommand) -> Result<(), EditorError> {
        let shortcut = Shortcut::parse(combo)?;
        self.bindings.retain(|(existing, _)| *existing != shortcut);
        self.bindings.push((shortcut, command));
        Ok(())
    }

    pub fn lookup(&self, event: &KeyEvent) -> Option<EditorCommand> {
        self.bindings
            .iter()
            .find(|(shortcut, _)| shortcut.matches(event))
            .map(|(_, command)| *command)
    }
}

impl Default for Keymap {
    fn default() -> Self {
        let shortcut = |key: &str, shift: bool| Shortcut {
            key: key.to_string(),
            modifier: true,
            shift,
            alt: false,
        };
        Self {
            bindings: vec![
                (shortcut("z", false), EditorCommand::Undo),
                (shortcut("z", true), EditorCommand::Redo),
                (shortcut("y", false), EditorCommand::Redo),
                (shortcut("s", false), EditorCommand::Save),
            ],
        }
    }
}
