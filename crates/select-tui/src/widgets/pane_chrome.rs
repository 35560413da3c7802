//! PaneChrome — bordered pane with active/disabled styling and badges.

use crate::theme::{style_focused_border, style_title, style_unfocused_border};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
};

/// A badge shown in the top-right of the pane header (e.g. "disabled").
pub struct Badge<'a> {
    pub text: &'a str,
    pub color: Color,
}

pub fn pane_chrome<'a>(title: &'a str, active: bool, badge: Option<Badge<'a>>) -> Block<'a> {
    let border_style = if active {
        style_focused_border()
    } else {
        style_unfocused_border()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Line::from(Span::styled(title, style_title(active))));

    if let Some(b) = badge {
        block.title_top(
            Line::from(Span::styled(
                format!(" {} ", b.text),
                Style::default().fg(b.color).add_modifier(Modifier::BOLD),
            ))
            .right_aligned(),
        )
    } else {
        block
    }
}
