//! Component trait — the interface every UI panel implements.
//!
//! - Components own their state and render themselves.
//! - Components receive `AppState` (read-only) for data they don't own.
//! - Components produce `Vec<Action>`; the App event-loop dispatches them.

use ratatui::{layout::Rect, Frame};

use crate::action::Action;
use crate::app_state::AppState;

pub trait Component {
    /// Called once per loop iteration, before drawing. Components that
    /// receive input from a channel drain it here.
    fn tick(&mut self, _state: &AppState) -> Vec<Action> {
        Vec::new()
    }

    /// Receive an action dispatched by the App.
    fn on_action(&mut self, action: &Action, state: &AppState) -> Vec<Action>;

    /// Render the component into `area`.
    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState);
}
