//! Key input: mapping terminal keys to commands, and delivering signals to
//! whichever lists are currently listening.
//!
//! The App owns one `InputSource`. A list that becomes active takes an
//! `InputSubscription` from it and drops the subscription when it is
//! deactivated or destroyed, so no handler outlives its list.

use std::fmt;
use std::str::FromStr;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use select_core::config::KeysConfig;
use select_core::Signal;
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{trace, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    #[error("empty key binding")]
    Empty,
    #[error("unknown modifier {0:?} in key binding")]
    UnknownModifier(String),
    #[error("unknown key name {0:?}")]
    UnknownKey(String),
}

/// One physical key, e.g. `Down` or `Ctrl+c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn matches(&self, key: &KeyEvent) -> bool {
        if key.code != self.code {
            return false;
        }
        // Terminals disagree on whether an upper-case char or BackTab
        // carries SHIFT.
        let ignore = if matches!(self.code, KeyCode::Char(_) | KeyCode::BackTab) {
            KeyModifiers::SHIFT
        } else {
            KeyModifiers::NONE
        };
        key.modifiers.difference(ignore) == self.modifiers.difference(ignore)
    }
}

impl FromStr for KeyBinding {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(KeyParseError::Empty);
        }
        // A lone "+", or one after a separator ("Ctrl++"), is the plus key.
        let (mods, key) = if s == "+" {
            (None, s)
        } else if let Some(mods) = s.strip_suffix("++") {
            (Some(mods), "+")
        } else {
            match s.rsplit_once('+') {
                Some((mods, key)) if !key.is_empty() => (Some(mods), key),
                _ => (None, s),
            }
        };

        let mut modifiers = KeyModifiers::NONE;
        for part in mods.into_iter().flat_map(|m| m.split('+')) {
            modifiers |= match part.trim().to_ascii_lowercase().as_str() {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "alt" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                _ => return Err(KeyParseError::UnknownModifier(part.to_string())),
            };
        }

        let mut code = parse_key_code(key)?;
        // Terminals report Shift+Tab as BackTab.
        if code == KeyCode::Tab && modifiers.contains(KeyModifiers::SHIFT) {
            code = KeyCode::BackTab;
            modifiers.remove(KeyModifiers::SHIFT);
        }
        Ok(Self { code, modifiers })
    }
}

fn parse_key_code(name: &str) -> Result<KeyCode, KeyParseError> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }
    let code = match name.to_ascii_lowercase().as_str() {
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "backspace" => KeyCode::Backspace,
        "space" => KeyCode::Char(' '),
        other => match other.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
            Some(n) if (1..=12).contains(&n) => KeyCode::F(n),
            _ => return Err(KeyParseError::UnknownKey(name.to_string())),
        },
    };
    Ok(code)
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            write!(f, "Ctrl+")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            write!(f, "Alt+")?;
        }
        match self.code {
            KeyCode::Up => write!(f, "↑"),
            KeyCode::Down => write!(f, "↓"),
            KeyCode::Char(' ') => write!(f, "Space"),
            KeyCode::Left => write!(f, "←"),
            KeyCode::Right => write!(f, "→"),
            KeyCode::Home => write!(f, "Home"),
            KeyCode::End => write!(f, "End"),
            KeyCode::PageUp => write!(f, "PgUp"),
            KeyCode::PageDown => write!(f, "PgDn"),
            KeyCode::Enter => write!(f, "Enter"),
            KeyCode::Esc => write!(f, "Esc"),
            KeyCode::Tab => write!(f, "Tab"),
            KeyCode::BackTab => write!(f, "Shift+Tab"),
            KeyCode::Backspace => write!(f, "Backspace"),
            KeyCode::F(n) => write!(f, "F{}", n),
            KeyCode::Char(c) => write!(f, "{}", c),
            other => write!(f, "{:?}", other),
        }
    }
}

/// What a key press means to the App.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Signal(Signal),
    ToggleActive,
    Quit,
}

#[derive(Debug, Clone, Default)]
pub struct KeyMap {
    bindings: Vec<(KeyBinding, KeyCommand)>,
}

impl KeyMap {
    /// # Errors
    /// The first binding in `keys` that does not parse.
    pub fn from_config(keys: &KeysConfig) -> Result<Self, KeyParseError> {
        let groups: [(&[String], KeyCommand); 7] = [
            (keys.next.as_slice(), KeyCommand::Signal(Signal::FocusNext)),
            (keys.previous.as_slice(), KeyCommand::Signal(Signal::FocusPrevious)),
            (keys.first.as_slice(), KeyCommand::Signal(Signal::FocusFirst)),
            (keys.last.as_slice(), KeyCommand::Signal(Signal::FocusLast)),
            (keys.commit.as_slice(), KeyCommand::Signal(Signal::Commit)),
            (keys.toggle.as_slice(), KeyCommand::ToggleActive),
            (keys.quit.as_slice(), KeyCommand::Quit),
        ];
        let mut bindings = Vec::new();
        for (names, command) in groups {
            for name in names {
                bindings.push((name.parse::<KeyBinding>()?, command));
            }
        }
        Ok(Self { bindings })
    }

    /// First command bound to `key`. Key releases never match.
    pub fn lookup(&self, key: &KeyEvent) -> Option<KeyCommand> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        self.bindings
            .iter()
            .find(|(binding, _)| binding.matches(key))
            .map(|(_, command)| *command)
    }

    /// One-line help such as `↑/k up  ↓/j down  Enter select  q quit`.
    pub fn hint(&self) -> String {
        let labels = [
            (KeyCommand::Signal(Signal::FocusPrevious), "up"),
            (KeyCommand::Signal(Signal::FocusNext), "down"),
            (KeyCommand::Signal(Signal::FocusFirst), "first"),
            (KeyCommand::Signal(Signal::FocusLast), "last"),
            (KeyCommand::Signal(Signal::Commit), "select"),
            (KeyCommand::ToggleActive, "enable/disable"),
            (KeyCommand::Quit, "quit"),
        ];
        labels
            .iter()
            .filter_map(|(command, label)| {
                let keys: Vec<String> = self
                    .bindings
                    .iter()
                    .filter(|(_, c)| c == command)
                    .map(|(b, _)| b.to_string())
                    .collect();
                (!keys.is_empty()).then(|| format!("{} {}", keys.join("/"), label))
            })
            .collect::<Vec<_>>()
            .join("  ")
    }
}

/// Fan-out point for key signals.
#[derive(Debug, Clone)]
pub struct InputSource {
    tx: broadcast::Sender<Signal>,
}

impl InputSource {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Deliver `signal` to every live subscription. Returns how many
    /// received it; zero when every list is disabled.
    pub fn publish(&self, signal: Signal) -> usize {
        match self.tx.send(signal) {
            Ok(n) => n,
            Err(_) => {
                trace!("no subscribers for {:?}", signal);
                0
            }
        }
    }

    pub fn subscribe(&self) -> InputSubscription {
        InputSubscription {
            rx: self.tx.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for InputSource {
    fn default() -> Self {
        Self::new(64)
    }
}

/// A live registration with an `InputSource`. Dropping it unregisters.
#[derive(Debug)]
pub struct InputSubscription {
    rx: broadcast::Receiver<Signal>,
}

impl InputSubscription {
    /// Everything published since the last drain, in order.
    pub fn drain(&mut self) -> Vec<Signal> {
        let mut signals = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(signal) => signals.push(signal),
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    warn!("input subscription lagged by {} signals", n);
                }
                Err(_) => break,
            }
        }
        signals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_parse_bindings() {
        let down: KeyBinding = "Down".parse().unwrap();
        assert_eq!(down.code, KeyCode::Down);
        assert_eq!(down.modifiers, KeyModifiers::NONE);

        let ctrl_c: KeyBinding = "Ctrl+c".parse().unwrap();
        assert_eq!(ctrl_c.code, KeyCode::Char('c'));
        assert_eq!(ctrl_c.modifiers, KeyModifiers::CONTROL);

        let plus: KeyBinding = "+".parse().unwrap();
        assert_eq!(plus.code, KeyCode::Char('+'));

        let ctrl_plus: KeyBinding = "Ctrl++".parse().unwrap();
        assert_eq!(ctrl_plus.code, KeyCode::Char('+'));
        assert_eq!(ctrl_plus.modifiers, KeyModifiers::CONTROL);

        let ctrl_alt_plus: KeyBinding = "Ctrl+Alt++".parse().unwrap();
        assert_eq!(ctrl_alt_plus.code, KeyCode::Char('+'));
        assert_eq!(ctrl_alt_plus.modifiers, KeyModifiers::CONTROL | KeyModifiers::ALT);

        assert_eq!("F5".parse::<KeyBinding>().unwrap().code, KeyCode::F(5));
        assert_eq!("space".parse::<KeyBinding>().unwrap().code, KeyCode::Char(' '));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<KeyBinding>(), Err(KeyParseError::Empty));
        assert_eq!(
            "Hyper+x".parse::<KeyBinding>(),
            Err(KeyParseError::UnknownModifier("Hyper".to_string()))
        );
        assert_eq!(
            "Banana".parse::<KeyBinding>(),
            Err(KeyParseError::UnknownKey("Banana".to_string()))
        );
    }

    #[test]
    fn test_char_match_ignores_shift() {
        let big_g: KeyBinding = "G".parse().unwrap();
        assert!(big_g.matches(&key(KeyCode::Char('G'), KeyModifiers::SHIFT)));
        assert!(big_g.matches(&key(KeyCode::Char('G'), KeyModifiers::NONE)));
        assert!(!big_g.matches(&key(KeyCode::Char('g'), KeyModifiers::NONE)));

        let ctrl_c: KeyBinding = "Ctrl+c".parse().unwrap();
        assert!(!ctrl_c.matches(&key(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(ctrl_c.matches(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn test_shift_tab_is_backtab() {
        let shift_tab: KeyBinding = "Shift+Tab".parse().unwrap();
        assert_eq!(shift_tab.code, KeyCode::BackTab);
        assert_eq!(shift_tab.modifiers, KeyModifiers::NONE);
        assert_eq!(shift_tab, "BackTab".parse().unwrap());
        assert_eq!(shift_tab.to_string(), "Shift+Tab");

        // Some terminals add SHIFT to BackTab, some do not.
        assert!(shift_tab.matches(&key(KeyCode::BackTab, KeyModifiers::SHIFT)));
        assert!(shift_tab.matches(&key(KeyCode::BackTab, KeyModifiers::NONE)));
        assert!(!shift_tab.matches(&key(KeyCode::Tab, KeyModifiers::NONE)));

        let tab: KeyBinding = "Tab".parse().unwrap();
        assert!(!tab.matches(&key(KeyCode::BackTab, KeyModifiers::SHIFT)));
    }

    #[test]
    fn test_default_keymap() {
        let map = KeyMap::from_config(&KeysConfig::default()).unwrap();
        assert_eq!(
            map.lookup(&key(KeyCode::Down, KeyModifiers::NONE)),
            Some(KeyCommand::Signal(Signal::FocusNext))
        );
        assert_eq!(
            map.lookup(&key(KeyCode::Char('k'), KeyModifiers::NONE)),
            Some(KeyCommand::Signal(Signal::FocusPrevious))
        );
        assert_eq!(
            map.lookup(&key(KeyCode::Enter, KeyModifiers::NONE)),
            Some(KeyCommand::Signal(Signal::Commit))
        );
        assert_eq!(
            map.lookup(&key(KeyCode::Tab, KeyModifiers::NONE)),
            Some(KeyCommand::ToggleActive)
        );
        assert_eq!(
            map.lookup(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyCommand::Quit)
        );
        assert_eq!(map.lookup(&key(KeyCode::Char('x'), KeyModifiers::NONE)), None);

        let mut release = key(KeyCode::Down, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(map.lookup(&release), None);
    }

    #[test]
    fn test_bad_config_is_reported() {
        let keys = KeysConfig {
            commit: vec!["Enter".into(), "Nope".into()],
            ..KeysConfig::default()
        };
        assert_eq!(
            KeyMap::from_config(&keys).unwrap_err(),
            KeyParseError::UnknownKey("Nope".to_string())
        );
    }

    #[test]
    fn test_hint_lists_bound_keys() {
        let map = KeyMap::from_config(&KeysConfig::default()).unwrap();
        let hint = map.hint();
        assert!(hint.starts_with("↑/k up  ↓/j down  Home/g first  End/G last  Enter select"));
        assert!(hint.ends_with("Esc/q/Ctrl+c quit"));

        let keys = KeysConfig {
            first: vec![],
            ..KeysConfig::default()
        };
        let hint = KeyMap::from_config(&keys).unwrap().hint();
        assert!(!hint.contains("first"));
        assert!(hint.contains("End/G last"));
    }

    #[test]
    fn test_subscription_lifecycle() {
        let source = InputSource::default();
        assert_eq!(source.publish(Signal::FocusNext), 0);

        let mut sub = source.subscribe();
        assert_eq!(source.subscriber_count(), 1);
        // Published before subscribing: not seen.
        assert!(sub.drain().is_empty());

        assert_eq!(source.publish(Signal::FocusNext), 1);
        assert_eq!(source.publish(Signal::Commit), 1);
        assert_eq!(sub.drain(), vec![Signal::FocusNext, Signal::Commit]);
        assert!(sub.drain().is_empty());

        drop(sub);
        assert_eq!(source.subscriber_count(), 0);
        assert_eq!(source.publish(Signal::FocusNext), 0);
    }
}
