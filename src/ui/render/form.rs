use super::Frame;
use crate::state::{FieldId, State, COURSE_OPTIONS, TIME_ZONES};
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Render the profile form view.
///
pub fn form(frame: &mut Frame, size: Rect, state: &State) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(1),    // Form fields
        ])
        .split(size);

    let theme = state.get_theme();
    let title_block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style(theme));
    let title = Paragraph::new("Profile Form")
        .style(styling::banner_style(theme))
        .block(title_block)
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    // Compute a visible window over the field rows so the focused field
    // always stays on screen
    let heights: Vec<u16> = FieldId::ALL
        .iter()
        .map(|field| row_height(*field, state))
        .collect();
    let current = FieldId::ALL
        .iter()
        .position(|field| *field == state.current_field())
        .unwrap_or(0);
    let (start, end) = visible_range(&heights, current, chunks[1].height);

    let constraints: Vec<Constraint> = heights[start..end]
        .iter()
        .map(|height| Constraint::Length(*height))
        .collect();
    let field_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(chunks[1]);

    for (chunk, field) in field_chunks.iter().zip(FieldId::ALL[start..end].iter()) {
        render_row(frame, *chunk, *field, state);
    }
}

/// Return the rendered height of a field row.
///
fn row_height(field: FieldId, state: &State) -> u16 {
    let mut height = 3;
    if field == FieldId::TimeZone {
        // Extra line for the zone-converted date-time display
        height += 1;
    }
    if state.error_for(field).is_some() {
        height += 1;
    }
    height
}

/// Select the window of rows to render: the current row plus as many
/// neighbors in both directions as fit the available height.
///
fn visible_range(heights: &[u16], current: usize, available: u16) -> (usize, usize) {
    if heights.is_empty() {
        return (0, 0);
    }
    let current = current.min(heights.len() - 1);
    let mut start = current;
    let mut end = current + 1;
    let mut used = heights[current];
    loop {
        let mut grew = false;
        if start > 0 && used + heights[start - 1] <= available {
            start -= 1;
            used += heights[start];
            grew = true;
        }
        if end < heights.len() && used + heights[end] <= available {
            used += heights[end];
            end += 1;
            grew = true;
        }
        if !grew {
            break;
        }
    }
    (start, end)
}

/// Render one field row with its label, value and any error message.
///
fn render_row(frame: &mut Frame, area: Rect, field: FieldId, state: &State) {
    let theme = state.get_theme();
    let focused = state.current_field() == field;
    let editing = focused && state.is_field_editing_mode();

    let border_style = if focused {
        styling::active_block_border_style(theme)
    } else {
        styling::normal_block_border_style(theme)
    };
    let title = row_title(field, state);
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);
    if focused {
        block = block.title_style(styling::active_block_title_style());
    }

    let mut lines = value_lines(field, state, editing);
    if let Some(message) = state.error_for(field) {
        lines.push(Line::from(Span::styled(
            message.to_string(),
            styling::error_text_style(theme),
        )));
    }

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

/// Return the block title for a field row.
///
fn row_title(field: FieldId, state: &State) -> String {
    match field {
        FieldId::File => match state.accept_filter() {
            Some(choice) => format!("{} ({})", field.label(), choice.accept()),
            None => field.label().to_string(),
        },
        _ => field.label().to_string(),
    }
}

/// Build the value line(s) for a field row.
///
fn value_lines<'a>(field: FieldId, state: &'a State, editing: bool) -> Vec<Line<'a>> {
    let theme = state.get_theme();
    let form = state.get_form();
    let value_style = if editing {
        styling::active_list_item_style(theme)
    } else {
        styling::value_text_style(theme)
    };

    match field {
        FieldId::Age => {
            vec![Line::from(Span::styled(form.age.to_string(), value_style))]
        }
        FieldId::Password => {
            let masked = "\u{2022}".repeat(form.password.chars().count());
            vec![Line::from(Span::styled(masked, value_style))]
        }
        FieldId::Courses => {
            let mut spans = vec![];
            for (index, course) in COURSE_OPTIONS.iter().enumerate() {
                let checked = form.courses.iter().any(|c| c == course);
                let text = format!("[{}] {}", if checked { "x" } else { " " }, course);
                let style = if editing && index == state.course_option_index() {
                    styling::highlight_style(theme)
                } else if checked {
                    styling::current_list_item_style(theme)
                } else {
                    value_style
                };
                spans.push(Span::styled(text, style));
                spans.push(Span::raw("  "));
            }
            vec![Line::from(spans)]
        }
        FieldId::Gender => {
            let mut spans = vec![];
            for gender in crate::state::Gender::ALL {
                let selected = form.gender == gender;
                let text = format!("({}) {}", if selected { "\u{2022}" } else { " " }, gender.as_str());
                let style = if selected {
                    styling::current_list_item_style(theme)
                } else {
                    value_style
                };
                spans.push(Span::styled(text, style));
                spans.push(Span::raw("  "));
            }
            vec![Line::from(spans)]
        }
        FieldId::File => match &form.file {
            Some(handle) => vec![Line::from(Span::styled(
                format!("{} ({} bytes)", handle.file_name(), handle.size),
                value_style,
            ))],
            None => vec![Line::from(Span::styled(
                "No file chosen (press Enter to choose)",
                styling::muted_text_style(theme),
            ))],
        },
        FieldId::Range => {
            let value: i64 = form.range_value.parse().unwrap_or(0);
            let filled = (value.clamp(0, 100) / 5) as usize;
            let bar = format!(
                "{}{}",
                "\u{25a0}".repeat(filled),
                "\u{00b7}".repeat(20 - filled)
            );
            vec![Line::from(vec![
                Span::styled(bar, value_style),
                // The percentage label reads the stored string directly
                Span::styled(
                    format!("  progress : {}%", form.range_value),
                    styling::muted_text_style(theme),
                ),
            ])]
        }
        FieldId::TimeZone => {
            let label = TIME_ZONES
                .iter()
                .find(|(id, _)| *id == form.time_zone)
                .map(|(_, label)| *label)
                .unwrap_or(form.time_zone.as_str());
            vec![
                Line::from(Span::styled(label.to_string(), value_style)),
                Line::from(Span::styled(
                    state.converted_date_time(),
                    styling::muted_text_style(theme),
                )),
            ]
        }
        _ => {
            let value = form.text_value(field).unwrap_or_default().to_string();
            let mut spans = vec![Span::styled(value, value_style)];
            if editing {
                spans.push(Span::styled(
                    "\u{2588}",
                    styling::active_list_item_style(theme),
                ));
            }
            vec![Line::from(spans)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_range_fits_all_when_room() {
        let heights = vec![3, 3, 3];
        assert_eq!(visible_range(&heights, 0, 20), (0, 3));
        assert_eq!(visible_range(&heights, 2, 20), (0, 3));
    }

    #[test]
    fn test_visible_range_keeps_current_visible() {
        let heights = vec![3; 14];
        let (start, end) = visible_range(&heights, 13, 9);
        assert!(start <= 13 && 13 < end);
        assert_eq!(end - start, 3);
    }

    #[test]
    fn test_visible_range_tight_space() {
        let heights = vec![3; 14];
        let (start, end) = visible_range(&heights, 5, 3);
        assert_eq!((start, end), (5, 6));
        // Even with less space than one row the current row is kept
        let (start, end) = visible_range(&heights, 5, 1);
        assert_eq!((start, end), (5, 6));
    }

    #[test]
    fn test_visible_range_empty() {
        assert_eq!(visible_range(&[], 0, 10), (0, 0));
    }
}
