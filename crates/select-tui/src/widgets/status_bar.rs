//! Status bar — bottom line with input mode, last selection and keybindings.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::{C_FOCUS, C_MUTED, C_SECONDARY, C_SELECTED};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Active,
    Disabled,
}

impl InputMode {
    pub fn from_active(active: bool) -> Self {
        if active {
            Self::Active
        } else {
            Self::Disabled
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Disabled => "DISABLED",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Self::Active => C_FOCUS,
            Self::Disabled => C_MUTED,
        }
    }
}

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(
    frame: &mut Frame,
    area: Rect,
    mode: InputMode,
    last_selected: Option<&str>,
    hint: &str,
) {
    let mut spans = vec![Span::styled(
        format!(" {} ", mode.label()),
        Style::default()
            .fg(mode.color())
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(value) = last_selected {
        spans.push(Span::styled("✔ ", Style::default().fg(C_SELECTED)));
        spans.push(Span::styled(value, Style::default().fg(C_SECONDARY)));
        spans.push(Span::raw("  "));
    }
    spans.push(Span::styled(hint, Style::default().fg(C_MUTED)));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
