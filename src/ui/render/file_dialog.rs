use super::Frame;
use crate::state::{FileTypeChoice, Overlay, State};
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

/// Render the active file overlay (type choice dialog or file picker).
///
pub fn overlay(frame: &mut Frame, size: Rect, state: &State) {
    match state.overlay() {
        Some(Overlay::FileTypeDialog { index }) => {
            render_type_dialog(frame, size, state, *index);
        }
        Some(Overlay::FilePicker {
            accept,
            entries,
            index,
        }) => {
            render_picker(frame, size, state, *accept, entries, *index);
        }
        None => {}
    }
}

/// Render the file type choice dialog.
///
fn render_type_dialog(frame: &mut Frame, size: Rect, state: &State, index: usize) {
    let theme = state.get_theme();
    let area = centered_rect(40, 7, size);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(theme))
        .title("Choose file type")
        .title_style(styling::active_block_title_style());

    let items: Vec<ListItem> = FileTypeChoice::ALL
        .iter()
        .map(|choice| {
            ListItem::new(Line::from(Span::styled(
                format!("{} ({})", choice.label(), choice.accept()),
                styling::normal_text_style(theme),
            )))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(styling::highlight_style(theme));
    let mut list_state = ListState::default();
    list_state.select(Some(index));
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Render the file picker listing entries matching the accept filter.
///
fn render_picker(
    frame: &mut Frame,
    size: Rect,
    state: &State,
    accept: FileTypeChoice,
    entries: &[crate::state::FileHandle],
    index: usize,
) {
    let theme = state.get_theme();
    let area = centered_rect(60, 14, size);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style(theme))
        .title(format!("Select file ({})", accept.accept()))
        .title_style(styling::active_block_title_style());

    if entries.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No matching files found",
            styling::muted_text_style(theme),
        )))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            ListItem::new(Line::from(Span::styled(
                format!("{} ({} bytes)", entry.file_name(), entry.size),
                styling::normal_text_style(theme),
            )))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(styling::highlight_style(theme));
    let mut list_state = ListState::default();
    list_state.select(Some(index));
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Return a rectangle of the given width and height centered in `r`,
/// clamped to fit.
///
fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y + (r.height - height) / 2,
        width,
        height,
    }
}
