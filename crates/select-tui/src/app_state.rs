//! AppState — shared read-only data passed to components during render/event.
//!
//! The App event-loop is the only thing that writes to AppState.

use select_core::config::UiConfig;

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub ui: UiConfig,
    /// Last value committed in this session.
    pub last_selected: Option<String>,
    /// Short hint line under the list, e.g. the key help.
    pub hint: String,
}

impl AppState {
    pub fn new(ui: UiConfig, hint: String) -> Self {
        Self {
            ui,
            last_selected: None,
            hint,
        }
    }
}
