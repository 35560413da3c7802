//! Action enum — user intents and widget notifications.

use select_core::Signal;

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ── Navigation ───────────────────────────────────────────────────────────
    /// A logical key signal, fanned out to subscribed lists.
    Signal(Signal),
    /// Focus moved to the option with this value.
    FocusChanged { value: String, position: usize },
    /// The option with this value was committed.
    Selected { value: String, position: usize },
    /// Commit on the option that was already selected. Nothing changed, but
    /// the user confirmed it.
    Confirmed { value: String, position: usize },

    // ── UI toggles ───────────────────────────────────────────────────────────
    ToggleActive,

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
    Resize(u16, u16),
    Noop,
}
