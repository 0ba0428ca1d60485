use super::Frame;
use crate::state::{FieldId, Overlay, State, View};
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

/// Render the footer hint line plus validation status.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &State) {
    let theme = state.get_theme();
    let mut spans = vec![Span::styled(hints(state), styling::muted_text_style(theme))];

    if state.get_submitted().is_some() {
        spans.push(Span::styled(
            "  Form data is valid",
            styling::success_text_style(theme),
        ));
    } else if !state.get_errors().is_empty() {
        spans.push(Span::styled(
            format!("  {} field(s) need attention", state.get_errors().len()),
            styling::error_text_style(theme),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), size);
}

/// Return the keybinding hints for the current mode.
///
fn hints(state: &State) -> &'static str {
    match state.overlay() {
        Some(Overlay::FileTypeDialog { .. }) => " j/k: navigate, Enter: choose, Esc: close",
        Some(Overlay::FilePicker { .. }) => " j/k: navigate, Enter: select file, Esc: cancel",
        None => match state.current_view() {
            View::Log => " j/k: navigate, y: copy, d/Esc: back, q: quit",
            View::Form => {
                if state.is_field_editing_mode() {
                    match state.current_field() {
                        FieldId::Courses => " h/l: move, Space: toggle, Enter/Esc: done",
                        FieldId::Gender => " h/l or Space: switch, Enter/Esc: done",
                        FieldId::TimeZone => " h/l: change zone, Enter/Esc: done",
                        FieldId::Range => " h/l: adjust, Enter/Esc: done",
                        _ => " Type to edit, Backspace: delete, Enter/Esc: done",
                    }
                } else {
                    " j/k: navigate, Enter: edit, s: submit, r: reset, d: log, q: quit"
                }
            }
        },
    }
}
