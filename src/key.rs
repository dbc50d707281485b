//! Type-safe key bindings for the table components.
//!
//! A [`Binding`] groups one or more key presses under a single action and carries
//! the short help text shown in the table's help line. Bindings are built with the
//! option helpers:
//!
//! ```rust
//! use bubbletea_datatable::key;
//!
//! let next = key::new_binding(vec![
//!     key::with_keys_str(&["pgdown", "right", "l"]),
//!     key::with_help("→/l", "next page"),
//! ]);
//! assert_eq!(next.help().key, "→/l");
//! assert_eq!(next.keys().len(), 3);
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A single key press: a key code plus the modifiers held with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key that was pressed.
    pub code: KeyCode,
    /// Modifiers held while pressing the key.
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

/// Help text attached to a binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Short rendering of the keys, e.g. `"←/h"`.
    pub key: String,
    /// What the binding does, e.g. `"prev page"`.
    pub desc: String,
}

/// A set of key presses bound to one action.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    disabled: bool,
}

/// Option applied by [`new_binding`].
pub type BindingOpt = Box<dyn FnOnce(&mut Binding)>;

/// Builds a binding from a list of options.
pub fn new_binding(opts: Vec<BindingOpt>) -> Binding {
    let mut binding = Binding::default();
    for opt in opts {
        opt(&mut binding);
    }
    binding
}

/// Sets the key presses of a binding.
pub fn with_keys(keys: Vec<KeyPress>) -> BindingOpt {
    Box::new(move |b: &mut Binding| b.keys = keys)
}

/// Sets the key presses of a binding from their string names.
///
/// Unknown names are skipped. See [`parse_key`] for the accepted spellings.
pub fn with_keys_str(keys: &[&str]) -> BindingOpt {
    let presses: Vec<KeyPress> = keys.iter().filter_map(|k| parse_key(k)).collect();
    with_keys(presses)
}

/// Sets the help text of a binding.
pub fn with_help(key: &str, desc: &str) -> BindingOpt {
    let help = Help {
        key: key.to_string(),
        desc: desc.to_string(),
    };
    Box::new(move |b: &mut Binding| b.help = help)
}

/// Creates the binding in a disabled state.
pub fn with_disabled() -> BindingOpt {
    Box::new(|b: &mut Binding| b.disabled = true)
}

/// Parses a key name such as `"pgup"`, `"shift+tab"`, `"ctrl+u"` or `"G"`.
pub fn parse_key(name: &str) -> Option<KeyPress> {
    let (modifiers, rest) = if let Some(rest) = name.strip_prefix("ctrl+") {
        (KeyModifiers::CONTROL, rest)
    } else if let Some(rest) = name.strip_prefix("alt+") {
        (KeyModifiers::ALT, rest)
    } else if name == "shift+tab" {
        return Some(KeyCode::BackTab.into());
    } else {
        (KeyModifiers::NONE, name)
    };

    let code = match rest {
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "pgup" => KeyCode::PageUp,
        "pgdown" => KeyCode::PageDown,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "enter" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "space" | " " => KeyCode::Char(' '),
        s => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        }
    };
    Some(KeyPress { code, modifiers })
}

impl Binding {
    /// Creates an enabled binding for the given keys.
    ///
    /// ```rust
    /// use bubbletea_datatable::key::Binding;
    /// use crossterm::event::{KeyCode, KeyModifiers};
    ///
    /// let top = Binding::new(vec![KeyCode::Home, KeyCode::Char('g')]).with_help("g/home", "first page");
    /// let save = Binding::new(vec![(KeyCode::Char('s'), KeyModifiers::CONTROL)]);
    /// assert_eq!(top.keys().len(), 2);
    /// assert!(save.enabled());
    /// ```
    pub fn new<K: Into<KeyPress>>(keys: Vec<K>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            help: Help::default(),
            disabled: false,
        }
    }

    /// Sets the help text (builder pattern).
    pub fn with_help(mut self, key: &str, desc: &str) -> Self {
        self.help = Help {
            key: key.to_string(),
            desc: desc.to_string(),
        };
        self
    }

    /// The key presses that trigger this binding.
    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    /// The help text of this binding.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Whether the binding is enabled and has at least one key.
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }

    /// Enables or disables the binding.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Reports whether `msg` triggers this binding.
    ///
    /// Shift is ignored for character keys and back-tab since terminals report
    /// `G` and `shift+tab` both with and without it.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        if !self.enabled() {
            return false;
        }
        self.keys.iter().any(|press| {
            if press.code != msg.key {
                return false;
            }
            match press.code {
                KeyCode::Char(_) | KeyCode::BackTab => {
                    let mut held = msg.modifiers;
                    held.remove(KeyModifiers::SHIFT);
                    press.modifiers == held
                }
                _ => press.modifiers == msg.modifiers,
            }
        })
    }
}

/// Reports whether `msg` triggers any of `bindings`.
pub fn matches(msg: &KeyMsg, bindings: &[&Binding]) -> bool {
    bindings.iter().any(|b| b.matches(msg))
}

/// Components that expose their bindings for the help line.
pub trait KeyMap {
    /// Bindings shown in the single-line help.
    fn short_help(&self) -> Vec<&Binding>;

    /// Bindings grouped into columns for the expanded help.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_parse_key_names() {
        assert_eq!(parse_key("pgup").map(|k| k.code), Some(KeyCode::PageUp));
        assert_eq!(parse_key("shift+tab").map(|k| k.code), Some(KeyCode::BackTab));
        assert_eq!(
            parse_key("ctrl+u"),
            Some(KeyPress {
                code: KeyCode::Char('u'),
                modifiers: KeyModifiers::CONTROL
            })
        );
        assert_eq!(parse_key("G").map(|k| k.code), Some(KeyCode::Char('G')));
        assert_eq!(parse_key("bogus"), None);
    }

    #[test]
    fn test_binding_matches() {
        let b = new_binding(vec![
            with_keys_str(&["right", "l"]),
            with_help("→/l", "next page"),
        ]);
        assert!(b.matches(&key(KeyCode::Right)));
        assert!(b.matches(&key(KeyCode::Char('l'))));
        assert!(!b.matches(&key(KeyCode::Left)));
        assert_eq!(b.help().desc, "next page");
    }

    #[test]
    fn test_shift_ignored_for_chars() {
        let b = new_binding(vec![with_keys_str(&["G"])]);
        let msg = KeyMsg {
            key: KeyCode::Char('G'),
            modifiers: KeyModifiers::SHIFT,
        };
        assert!(b.matches(&msg));
    }

    #[test]
    fn test_disabled_binding_never_matches() {
        let mut b = new_binding(vec![with_keys_str(&["enter"]), with_disabled()]);
        assert!(!b.matches(&key(KeyCode::Enter)));
        b.set_enabled(true);
        assert!(b.matches(&key(KeyCode::Enter)));
        assert!(matches(&key(KeyCode::Enter), &[&b]));
    }
}
