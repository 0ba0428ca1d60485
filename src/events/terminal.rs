use crate::state::{FieldId, State, View};
use anyhow::Result;
use clipboard::{ClipboardContext, ClipboardProvider};
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use log::*;
use std::{sync::mpsc, thread, time::Duration};

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    _tx: mpsc::Sender<Event<KeyEvent>>,
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || loop {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            if event::poll(tick_rate).unwrap() {
                if let CrosstermEvent::Key(key) = event::read().unwrap() {
                    if key.kind != KeyEventKind::Release {
                        tx_clone.send(Event::Input(key)).unwrap();
                    }
                }
            }
            tx_clone.send(Event::Tick).unwrap();
        });
        Handler { rx, _tx: tx }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub fn handle_next(&self, state: &mut State) -> Result<bool> {
        match self.rx.recv()? {
            Event::Input(event) => {
                if event.code == KeyCode::Char('c')
                    && event.modifiers.contains(KeyModifiers::CONTROL)
                {
                    debug!("Processing exit terminal event '{:?}'...", event);
                    return Ok(false);
                }
                // Overlays capture all input while open
                if state.overlay().is_some() {
                    handle_overlay_key(event, state);
                } else if state.current_view() == View::Log {
                    return Ok(handle_log_key(event, state));
                } else if state.is_field_editing_mode() {
                    handle_editing_key(event, state);
                } else {
                    return Ok(handle_navigation_key(event, state));
                }
            }
            Event::Tick => {}
        }
        Ok(true)
    }
}

/// Handle input while a modal overlay is open.
///
fn handle_overlay_key(event: KeyEvent, state: &mut State) {
    match event.code {
        KeyCode::Esc => {
            debug!("Closing overlay...");
            state.close_overlay();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.overlay_move(true);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.overlay_move(false);
        }
        KeyCode::Enter => {
            state.overlay_confirm();
        }
        _ => {}
    }
}

/// Handle input in the log view. Returns false if exit was requested.
///
fn handle_log_key(event: KeyEvent, state: &mut State) -> bool {
    match event.code {
        KeyCode::Char('q') if event.modifiers.is_empty() => {
            debug!("Processing exit terminal event '{:?}'...", event);
            return false;
        }
        KeyCode::Char('d') | KeyCode::Esc => {
            state.pop_view();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.next_debug_entry();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.prev_debug_entry();
        }
        KeyCode::Char('y') => {
            copy_debug_entry(state);
        }
        _ => {}
    }
    true
}

/// Copy the selected log entry to the system clipboard.
///
fn copy_debug_entry(state: &State) {
    let entry = match state.current_debug_entry() {
        Some(entry) => entry.to_string(),
        None => return,
    };
    let context: Result<ClipboardContext, _> = ClipboardProvider::new();
    match context {
        Ok(mut ctx) => match ctx.set_contents(entry) {
            Ok(_) => info!("Log entry copied to clipboard"),
            Err(e) => warn!("Failed to copy to clipboard: {}", e),
        },
        Err(e) => warn!("Failed to initialize clipboard: {}", e),
    }
}

/// Handle input while actively editing the focused field.
///
fn handle_editing_key(event: KeyEvent, state: &mut State) {
    match event.code {
        KeyCode::Esc | KeyCode::Enter => {
            state.exit_field_editing();
        }
        KeyCode::Backspace => {
            state.backspace();
        }
        _ => handle_field_key(event, state),
    }
}

/// Route a key to the focused field according to its interaction kind.
///
fn handle_field_key(event: KeyEvent, state: &mut State) {
    match state.current_field() {
        FieldId::Courses => match event.code {
            KeyCode::Char('h') | KeyCode::Left => {
                state.prev_course_option();
            }
            KeyCode::Char('l') | KeyCode::Right => {
                state.next_course_option();
            }
            KeyCode::Char(' ') => {
                state.toggle_current_course();
            }
            _ => {}
        },
        FieldId::Gender => {
            if matches!(
                event.code,
                KeyCode::Char('h')
                    | KeyCode::Char('l')
                    | KeyCode::Char(' ')
                    | KeyCode::Left
                    | KeyCode::Right
            ) {
                state.cycle_gender();
            }
        }
        FieldId::TimeZone => match event.code {
            KeyCode::Char('h') | KeyCode::Left => {
                state.cycle_time_zone(false);
            }
            KeyCode::Char('l') | KeyCode::Right => {
                state.cycle_time_zone(true);
            }
            _ => {}
        },
        FieldId::Range => match event.code {
            KeyCode::Char('h') | KeyCode::Left => {
                state.adjust_range(-1);
            }
            KeyCode::Char('l') | KeyCode::Right => {
                state.adjust_range(1);
            }
            _ => {}
        },
        // The file field is driven by its picker dialog, not typed input
        FieldId::File => {}
        _ => {
            if let KeyCode::Char(c) = event.code {
                if event.modifiers.is_empty() || event.modifiers == KeyModifiers::SHIFT {
                    state.input_char(c);
                }
            }
        }
    }
}

/// Handle input while navigating between fields. Returns false if exit
/// was requested.
///
fn handle_navigation_key(event: KeyEvent, state: &mut State) -> bool {
    match event.code {
        KeyCode::Char('q') if event.modifiers.is_empty() => {
            debug!("Processing exit terminal event '{:?}'...", event);
            return false;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.next_field();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.prev_field();
        }
        KeyCode::Enter | KeyCode::Char('e') => {
            if state.current_field() == FieldId::File {
                debug!("Opening file type dialog...");
                state.open_file_type_dialog();
            } else {
                state.enter_field_editing();
            }
        }
        KeyCode::Char('s') if event.modifiers.is_empty() => {
            debug!("Processing submit event...");
            state.submit();
        }
        KeyCode::Char('r') if event.modifiers.is_empty() => {
            debug!("Processing reset event...");
            state.reset_form();
        }
        KeyCode::Char('d') if event.modifiers.is_empty() => {
            state.push_view(View::Log);
        }
        _ => {}
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{FileTypeChoice, Gender, Overlay};
    use crate::ui::Theme;
    use std::path::PathBuf;

    fn state() -> State {
        State::new(
            Theme::default(),
            PathBuf::from("."),
            "Asia/Kolkata".to_string(),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_navigation_moves_focus() {
        let mut state = state();
        assert!(handle_navigation_key(key(KeyCode::Char('j')), &mut state));
        assert_eq!(state.current_field(), FieldId::Age);
        assert!(handle_navigation_key(key(KeyCode::Char('k')), &mut state));
        assert_eq!(state.current_field(), FieldId::Name);
    }

    #[test]
    fn test_quit_requested() {
        let mut state = state();
        assert!(!handle_navigation_key(key(KeyCode::Char('q')), &mut state));
    }

    #[test]
    fn test_enter_begins_editing_and_escape_ends_it() {
        let mut state = state();
        handle_navigation_key(key(KeyCode::Enter), &mut state);
        assert!(state.is_field_editing_mode());
        handle_editing_key(key(KeyCode::Esc), &mut state);
        assert!(!state.is_field_editing_mode());
    }

    #[test]
    fn test_typing_reaches_focused_field() {
        let mut state = state();
        handle_navigation_key(key(KeyCode::Enter), &mut state);
        handle_editing_key(key(KeyCode::Char('H')), &mut state);
        handle_editing_key(key(KeyCode::Char('i')), &mut state);
        assert_eq!(state.get_form().name, "Hi");
        handle_editing_key(key(KeyCode::Backspace), &mut state);
        assert_eq!(state.get_form().name, "H");
    }

    #[test]
    fn test_enter_on_file_field_opens_dialog() {
        let mut state = state();
        while state.current_field() != FieldId::File {
            state.next_field();
        }
        handle_navigation_key(key(KeyCode::Enter), &mut state);
        assert!(matches!(
            state.overlay(),
            Some(Overlay::FileTypeDialog { .. })
        ));
        assert!(!state.is_field_editing_mode());
    }

    #[test]
    fn test_overlay_escape_closes() {
        let mut state = state();
        state.open_file_type_dialog();
        handle_overlay_key(key(KeyCode::Esc), &mut state);
        assert!(state.overlay().is_none());
    }

    #[test]
    fn test_overlay_selection_moves() {
        let mut state = state();
        state.open_file_type_dialog();
        handle_overlay_key(key(KeyCode::Char('j')), &mut state);
        assert!(matches!(
            state.overlay(),
            Some(Overlay::FileTypeDialog { index: 1 })
        ));
        handle_overlay_key(key(KeyCode::Enter), &mut state);
        assert_eq!(state.accept_filter(), Some(FileTypeChoice::Pdf));
    }

    #[test]
    fn test_gender_cycles_while_editing() {
        let mut state = state();
        while state.current_field() != FieldId::Gender {
            state.next_field();
        }
        state.enter_field_editing();
        handle_editing_key(key(KeyCode::Char(' ')), &mut state);
        assert_eq!(state.get_form().gender, Gender::Female);
    }

    #[test]
    fn test_range_adjusts_while_editing() {
        let mut state = state();
        while state.current_field() != FieldId::Range {
            state.next_field();
        }
        state.enter_field_editing();
        handle_editing_key(key(KeyCode::Right), &mut state);
        assert_eq!(state.get_form().range_value, "51");
        handle_editing_key(key(KeyCode::Left), &mut state);
        assert_eq!(state.get_form().range_value, "50");
    }

    #[test]
    fn test_submit_and_reset_hotkeys() {
        let mut state = state();
        handle_navigation_key(key(KeyCode::Char('s')), &mut state);
        assert!(!state.get_errors().is_empty());
        handle_navigation_key(key(KeyCode::Char('r')), &mut state);
        assert!(state.get_errors().is_empty());
    }

    #[test]
    fn test_log_view_toggle() {
        let mut state = state();
        handle_navigation_key(key(KeyCode::Char('d')), &mut state);
        assert_eq!(state.current_view(), View::Log);
        assert!(handle_log_key(key(KeyCode::Char('d')), &mut state));
        assert_eq!(state.current_view(), View::Form);
    }
}
