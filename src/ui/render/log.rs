use super::Frame;
use crate::state::State;
use crate::ui::theme::Theme;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

/// Render the log view listing captured log entries.
///
pub fn log(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let block = Block::default()
        .title("Log (j/k: navigate, y: copy, d: back)")
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(theme));

    let items: Vec<ListItem> = state
        .get_debug_entries()
        .iter()
        .map(|entry| {
            ListItem::new(Line::from(Span::styled(
                entry.clone(),
                entry_style(entry, theme),
            )))
        })
        .collect();

    let list = List::new(items)
        .style(styling::normal_text_style(theme))
        .highlight_style(styling::highlight_style(theme))
        .block(block);

    let mut list_state = ListState::default();
    if !state.get_debug_entries().is_empty() {
        list_state.select(Some(state.get_debug_index()));
    }
    frame.render_stateful_widget(list, size, &mut list_state);
}

/// Style a log entry by its level marker.
///
fn entry_style(entry: &str, theme: &Theme) -> Style {
    if entry.contains(" ERROR ") {
        styling::error_text_style(theme)
    } else if entry.contains(" WARN ") {
        Style::default().fg(theme.warning.to_color())
    } else if entry.contains(" INFO ") {
        Style::default().fg(theme.info.to_color())
    } else {
        styling::muted_text_style(theme)
    }
}
