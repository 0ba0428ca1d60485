use super::{file_dialog, footer, form, log, Frame};
use crate::state::{State, View};
use ratatui::layout::{Constraint, Direction, Layout};

/// Render the full interface according to state.
///
pub fn all(frame: &mut Frame, state: &State) {
    let size = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Current view
            Constraint::Length(1), // Footer
        ])
        .split(size);

    match state.current_view() {
        View::Form => form::form(frame, chunks[0], state),
        View::Log => log::log(frame, chunks[0], state),
    }

    footer::footer(frame, chunks[1], state);

    // Modal overlays render on top of everything
    if state.overlay().is_some() {
        file_dialog::overlay(frame, size, state);
    }
}
