//! SelectList component — a single-select list driven by key signals.

use std::fmt::Display;

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};
use select_core::{IndexedOption, SelectEvent, SelectItem, SelectionController, Signal};
use tracing::{debug, info};
use unicode_width::UnicodeWidthStr;

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    input::{InputSource, InputSubscription},
    theme::{
        option_style, style_description, style_muted, OptionState, C_MUTED, FOCUS_POINTER,
        SELECTED_TICK,
    },
    widgets::pane_chrome::{pane_chrome, Badge},
};

pub struct SelectList<T: SelectItem> {
    controller: SelectionController<T>,
    source: InputSource,
    /// Present exactly while the list is active.
    subscription: Option<InputSubscription>,
    list_state: ListState,
}

impl<T> SelectList<T>
where
    T: SelectItem,
    T::Key: Display,
{
    pub fn with_controller(
        controller: SelectionController<T>,
        source: InputSource,
        active: bool,
    ) -> Self {
        let mut list = Self {
            controller,
            source,
            subscription: None,
            list_state: ListState::default(),
        };
        list.set_active(active);
        list
    }

    pub fn controller(&self) -> &SelectionController<T> {
        &self.controller
    }

    pub fn is_active(&self) -> bool {
        self.subscription.is_some()
    }

    /// Subscribe to input when becoming active; drop the subscription when
    /// becoming disabled. Signals published while disabled are never seen.
    pub fn set_active(&mut self, active: bool) {
        if active == self.is_active() {
            return;
        }
        self.subscription = if active {
            Some(self.source.subscribe())
        } else {
            None
        };
        info!(
            "select list {} ({} listening)",
            if active { "active" } else { "disabled" },
            self.source.subscriber_count()
        );
    }

    /// Apply one signal and report what changed. A commit on the option
    /// that is already selected is reported as `Confirmed`.
    pub fn handle_signal(&mut self, signal: Signal) -> Vec<Action> {
        if let Some(event) = self.controller.apply(signal) {
            return vec![event_action(event)];
        }
        debug!("{:?}: no change", signal);
        match (signal, self.controller.focused()) {
            (Signal::Commit, Some(node)) if self.controller.is_selected(node.key()) => {
                vec![Action::Confirmed {
                    value: node.key().to_string(),
                    position: node.position(),
                }]
            }
            _ => vec![],
        }
    }

    fn row(&self, node: &IndexedOption<T>, label_width: usize, indicators: bool) -> Line<'static> {
        let state = OptionState {
            is_focused: self.controller.is_focused(node.key()),
            is_selected: self.controller.is_selected(node.key()),
        };
        let style = option_style(state);
        let gap = " ".repeat(style.gap as usize);

        let mut spans = vec![Span::raw(" ".repeat(style.indent as usize))];
        if indicators && state.is_focused {
            spans.push(Span::styled(FOCUS_POINTER, style.focus_indicator));
            spans.push(Span::raw(gap.clone()));
        }

        let label = node.label().to_string();
        let pad = label_width.saturating_sub(label.width());
        spans.push(Span::styled(label, style.label));

        if indicators && state.is_selected {
            spans.push(Span::raw(gap.clone()));
            spans.push(Span::styled(SELECTED_TICK, style.selected_indicator));
        } else if indicators {
            spans.push(Span::raw(" ".repeat(style.gap as usize + SELECTED_TICK.width())));
        }

        if let Some(description) = node.option().description() {
            spans.push(Span::raw(" ".repeat(pad + 2)));
            spans.push(Span::styled(description.to_string(), style_description()));
        }

        Line::from(spans)
    }
}

fn event_action<K: Display>(event: SelectEvent<K>) -> Action {
    match event {
        SelectEvent::FocusChanged { key, position } => Action::FocusChanged {
            value: key.to_string(),
            position,
        },
        SelectEvent::Selected { key, position } => Action::Selected {
            value: key.to_string(),
            position,
        },
    }
}

impl<T> Component for SelectList<T>
where
    T: SelectItem,
    T::Key: Display,
{
    fn tick(&mut self, _state: &AppState) -> Vec<Action> {
        let signals = match self.subscription.as_mut() {
            Some(sub) => sub.drain(),
            None => return vec![],
        };
        signals
            .into_iter()
            .flat_map(|signal| self.handle_signal(signal))
            .collect()
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if let Action::ToggleActive = action {
            let active = !self.is_active();
            self.set_active(active);
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let active = self.is_active();
        let badge = (!active).then_some(Badge {
            text: "disabled",
            color: C_MUTED,
        });
        let block = pane_chrome(&state.ui.title, active, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let index = self.controller.index().clone();
        if index.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("  no options", style_muted())),
                inner,
            );
            return;
        }

        let label_width = index.iter().map(|n| n.label().width()).max().unwrap_or(0);
        let items: Vec<ListItem> = index
            .iter()
            .map(|node| ListItem::new(self.row(node, label_width, state.ui.show_indicators)))
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default())
            .highlight_symbol("");
        self.list_state
            .select(self.controller.focused().map(IndexedOption::position));
        frame.render_stateful_widget(list, inner, &mut self.list_state);
    }
}
