//! Color palette and style lookup for the select list.
//!
//! `option_style` is the only thing the renderer asks per row. It depends on
//! nothing but its argument, so a redraw can always be derived from the
//! controller's current focus and selection.

use ratatui::style::{Color, Modifier, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_FOCUS: Color = Color::Blue;
pub const C_SELECTED: Color = Color::Green;
pub const C_PRIMARY: Color = Color::Rgb(210, 210, 225);
pub const C_SECONDARY: Color = Color::Rgb(115, 115, 138);
pub const C_MUTED: Color = Color::Rgb(72, 72, 88);
pub const C_PANEL_BORDER: Color = Color::Rgb(40, 40, 52);
pub const C_PANEL_BORDER_FOCUSED: Color = Color::Rgb(120, 100, 200);

pub const FOCUS_POINTER: &str = "❯";
pub const SELECTED_TICK: &str = "✔";

/// Indent for rows that are not focused; the focused row spends these
/// columns on the pointer instead.
pub const UNFOCUSED_INDENT: u16 = 2;
/// Columns between an indicator and the label.
pub const OPTION_GAP: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OptionState {
    pub is_focused: bool,
    pub is_selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionStyle {
    pub indent: u16,
    pub gap: u16,
    pub label: Style,
    pub focus_indicator: Style,
    pub selected_indicator: Style,
}

/// Style for one option row.
pub fn option_style(state: OptionState) -> OptionStyle {
    OptionStyle {
        indent: if state.is_focused { 0 } else { UNFOCUSED_INDENT },
        gap: OPTION_GAP,
        label: label_style(state),
        focus_indicator: Style::default().fg(C_FOCUS),
        selected_indicator: Style::default().fg(C_SELECTED),
    }
}

fn label_style(state: OptionState) -> Style {
    // Focus wins over selection when both apply.
    let color = if state.is_focused {
        Some(C_FOCUS)
    } else if state.is_selected {
        Some(C_SELECTED)
    } else {
        None
    };
    match color {
        Some(c) => Style::default().fg(c),
        None => Style::default(),
    }
}

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_description() -> Style {
    Style::default().fg(C_SECONDARY)
}

pub fn style_muted() -> Style {
    Style::default().fg(C_MUTED)
}

pub fn style_focused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER_FOCUSED)
}

pub fn style_unfocused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}

pub fn style_title(active: bool) -> Style {
    if active {
        Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(C_MUTED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(is_focused: bool, is_selected: bool) -> OptionState {
        OptionState {
            is_focused,
            is_selected,
        }
    }

    #[test]
    fn test_indent_follows_focus() {
        assert_eq!(option_style(state(true, false)).indent, 0);
        assert_eq!(option_style(state(false, false)).indent, 2);
        assert_eq!(option_style(state(false, true)).indent, 2);
    }

    #[test]
    fn test_label_colour() {
        assert_eq!(option_style(state(false, false)).label, Style::default());
        assert_eq!(option_style(state(false, true)).label.fg, Some(C_SELECTED));
        assert_eq!(option_style(state(true, false)).label.fg, Some(C_FOCUS));
        assert_eq!(option_style(state(true, true)).label.fg, Some(C_FOCUS));
    }

    #[test]
    fn test_indicator_colours_are_fixed() {
        for s in [state(false, false), state(true, true)] {
            let style = option_style(s);
            assert_eq!(style.focus_indicator.fg, Some(C_FOCUS));
            assert_eq!(style.selected_indicator.fg, Some(C_SELECTED));
            assert_eq!(style.gap, 1);
        }
    }

    #[test]
    fn test_same_input_same_output() {
        let s = state(true, false);
        assert_eq!(option_style(s), option_style(s));
    }
}
