use crate::schema::{ErrorMap, Profile, Schema};
use crate::ui::Theme;
use crate::utils::datetime;
use log::*;
use std::fs;
use std::path::PathBuf;

use super::error::StateError;
use super::form::{
    ChangeEvent, FieldId, FileHandle, FileTypeChoice, FormData, Gender, COURSE_OPTIONS, TIME_ZONES,
};
use super::navigation::{Overlay, View};

/// Cap on retained debug log entries.
///
const MAX_DEBUG_ENTRIES: usize = 500;

/// Houses data representative of application state.
///
pub struct State {
    form: FormData,
    schema: Schema,
    errors: ErrorMap,
    submitted: Option<Profile>,
    view_stack: Vec<View>,
    overlay: Option<Overlay>,
    current_field_index: usize,
    field_editing_mode: bool,
    course_option_index: usize,
    accept_filter: Option<FileTypeChoice>,
    picker_directory: PathBuf,
    default_time_zone: String,
    debug_index: usize,
    debug_entries: Vec<String>,
    theme: Theme,
}

/// Defines default application state.
///
impl Default for State {
    fn default() -> State {
        State {
            form: FormData::default(),
            schema: Schema::default(),
            errors: ErrorMap::new(),
            submitted: None,
            view_stack: vec![View::Form],
            overlay: None,
            current_field_index: 0,
            field_editing_mode: false,
            course_option_index: 0,
            accept_filter: None,
            picker_directory: PathBuf::from("."),
            default_time_zone: "Asia/Kolkata".to_string(),
            debug_index: 0,
            debug_entries: vec![],
            theme: Theme::default(),
        }
    }
}

impl State {
    pub fn new(theme: Theme, picker_directory: PathBuf, default_time_zone: String) -> Self {
        let mut state = State {
            theme,
            picker_directory,
            default_time_zone,
            ..State::default()
        };
        debug!("Schema loaded with {} rules", state.schema.rules().len());
        state.form = state.default_form();
        state
    }

    /// Build the documented default form data, with the configured default
    /// time zone applied.
    ///
    fn default_form(&self) -> FormData {
        FormData {
            time_zone: self.default_time_zone.clone(),
            ..FormData::default()
        }
    }

    /// Get the current theme.
    ///
    pub fn get_theme(&self) -> &Theme {
        &self.theme
    }

    /// Returns the current form data.
    ///
    pub fn get_form(&self) -> &FormData {
        &self.form
    }

    /// Returns the error map from the most recent validation pass.
    ///
    pub fn get_errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// Returns the error message for a field, if it failed the most recent
    /// validation pass.
    ///
    pub fn error_for(&self, field: FieldId) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Returns the most recently submitted valid profile.
    ///
    pub fn get_submitted(&self) -> Option<&Profile> {
        self.submitted.as_ref()
    }

    /// Returns the current view.
    ///
    pub fn current_view(&self) -> View {
        *self.view_stack.last().unwrap_or(&View::Form)
    }

    pub fn push_view(&mut self, view: View) -> &mut Self {
        self.view_stack.push(view);
        self
    }

    pub fn pop_view(&mut self) -> Option<View> {
        if self.view_stack.len() > 1 {
            self.view_stack.pop()
        } else {
            None
        }
    }

    /// Returns the currently focused form field.
    ///
    pub fn current_field(&self) -> FieldId {
        FieldId::ALL[self.current_field_index.min(FieldId::ALL.len() - 1)]
    }

    /// Move focus to the next form field, wrapping at the end.
    ///
    pub fn next_field(&mut self) -> &mut Self {
        self.current_field_index = (self.current_field_index + 1) % FieldId::ALL.len();
        self.course_option_index = 0;
        self
    }

    /// Move focus to the previous form field, wrapping at the start.
    ///
    pub fn prev_field(&mut self) -> &mut Self {
        self.current_field_index =
            (self.current_field_index + FieldId::ALL.len() - 1) % FieldId::ALL.len();
        self.course_option_index = 0;
        self
    }

    pub fn is_field_editing_mode(&self) -> bool {
        self.field_editing_mode
    }

    pub fn enter_field_editing(&mut self) -> &mut Self {
        self.field_editing_mode = true;
        self
    }

    pub fn exit_field_editing(&mut self) -> &mut Self {
        self.field_editing_mode = false;
        self
    }

    pub fn course_option_index(&self) -> usize {
        self.course_option_index
    }

    pub fn next_course_option(&mut self) -> &mut Self {
        self.course_option_index = (self.course_option_index + 1) % COURSE_OPTIONS.len();
        self
    }

    pub fn prev_course_option(&mut self) -> &mut Self {
        self.course_option_index =
            (self.course_option_index + COURSE_OPTIONS.len() - 1) % COURSE_OPTIONS.len();
        self
    }

    /// Dispatch one change event through the reducer.
    ///
    pub fn apply_change(&mut self, event: ChangeEvent) -> &mut Self {
        self.form = self.form.apply(event);
        self
    }

    /// Append a typed character to the focused field's value.
    ///
    pub fn input_char(&mut self, c: char) -> &mut Self {
        let field = self.current_field();
        let event = match field {
            FieldId::Name
            | FieldId::Email
            | FieldId::Password
            | FieldId::DateOfBirth
            | FieldId::Color
            | FieldId::Url
            | FieldId::Time
            | FieldId::DateTime => {
                let mut value = self.form.text_value(field).unwrap_or_default().to_string();
                value.push(c);
                Some(ChangeEvent::Text(field, value))
            }
            FieldId::Age => {
                let mut raw = self.form.age.to_string();
                raw.push(c);
                Some(ChangeEvent::Number(field, raw))
            }
            // Selector fields change through dedicated actions
            _ => None,
        };
        if let Some(event) = event {
            self.apply_change(event);
        }
        self
    }

    /// Remove the last character from the focused field's value. On the
    /// file field this clears the selected file instead.
    ///
    pub fn backspace(&mut self) -> &mut Self {
        let field = self.current_field();
        let event = match field {
            FieldId::Name
            | FieldId::Email
            | FieldId::Password
            | FieldId::DateOfBirth
            | FieldId::Color
            | FieldId::Url
            | FieldId::Time
            | FieldId::DateTime => {
                let mut value = self.form.text_value(field).unwrap_or_default().to_string();
                value.pop();
                Some(ChangeEvent::Text(field, value))
            }
            FieldId::Age => {
                let mut raw = self.form.age.to_string();
                raw.pop();
                Some(ChangeEvent::Number(field, raw))
            }
            FieldId::File => Some(ChangeEvent::FileSelect(field, None)),
            _ => None,
        };
        if let Some(event) = event {
            self.apply_change(event);
        }
        self
    }

    /// Toggle the highlighted course checkbox.
    ///
    pub fn toggle_current_course(&mut self) -> &mut Self {
        let course = COURSE_OPTIONS[self.course_option_index.min(COURSE_OPTIONS.len() - 1)];
        let checked = !self.form.courses.iter().any(|c| c == course);
        self.apply_change(ChangeEvent::Toggle(
            FieldId::Courses,
            course.to_string(),
            checked,
        ))
    }

    /// Select the other gender radio option.
    ///
    pub fn cycle_gender(&mut self) -> &mut Self {
        let next = match self.form.gender {
            Gender::Male => Gender::Female,
            Gender::Female => Gender::Male,
        };
        self.apply_change(ChangeEvent::Text(FieldId::Gender, next.as_str().to_string()))
    }

    /// Step the time zone select forward or backward through the options.
    ///
    pub fn cycle_time_zone(&mut self, forward: bool) -> &mut Self {
        let position = TIME_ZONES
            .iter()
            .position(|(id, _)| *id == self.form.time_zone)
            .unwrap_or(0);
        let next = if forward {
            (position + 1) % TIME_ZONES.len()
        } else {
            (position + TIME_ZONES.len() - 1) % TIME_ZONES.len()
        };
        self.apply_change(ChangeEvent::Text(
            FieldId::TimeZone,
            TIME_ZONES[next].0.to_string(),
        ))
    }

    /// Step the range slider by the given delta, clamped to [0, 100]. The
    /// value is stored as its string representation.
    ///
    pub fn adjust_range(&mut self, delta: i64) -> &mut Self {
        let current: i64 = self.form.range_value.parse().unwrap_or(0);
        let next = (current + delta).clamp(0, 100);
        self.apply_change(ChangeEvent::Text(FieldId::Range, next.to_string()))
    }

    /// Validate the form. On success the error map is cleared wholesale,
    /// the validated profile is retained, and a valid signal is logged; on
    /// failure all current violations replace the previous error map.
    ///
    pub fn submit(&mut self) -> &mut Self {
        match self.schema.validate(&self.form) {
            Ok(profile) => {
                match serde_json::to_string(&profile) {
                    Ok(json) => info!("Form data is valid: {}", json),
                    Err(e) => warn!("Failed to serialize profile: {}", e),
                }
                self.errors = ErrorMap::new();
                self.submitted = Some(profile);
            }
            Err(errors) => {
                for (field, message) in &errors {
                    debug!("Validation failed for {}: {}", field.key(), message);
                }
                self.errors = errors;
                self.submitted = None;
            }
        }
        self
    }

    /// Reset the form to its documented defaults and clear all errors.
    ///
    pub fn reset_form(&mut self) -> &mut Self {
        debug!("Resetting form to defaults");
        self.form = self.default_form();
        self.errors = ErrorMap::new();
        self.submitted = None;
        self.accept_filter = None;
        self.course_option_index = 0;
        self
    }

    /// Returns the zone-converted display string for the date-time field.
    ///
    pub fn converted_date_time(&self) -> String {
        datetime::convert_date_time(&self.form.date_time, &self.form.time_zone)
    }

    /// Returns the current accept filter, if a file type has been chosen.
    ///
    pub fn accept_filter(&self) -> Option<FileTypeChoice> {
        self.accept_filter
    }

    /// Returns the active overlay, if any.
    ///
    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    /// Open the file type choice dialog.
    ///
    pub fn open_file_type_dialog(&mut self) -> &mut Self {
        self.overlay = Some(Overlay::FileTypeDialog { index: 0 });
        self
    }

    /// Close the active overlay without selecting anything.
    ///
    pub fn close_overlay(&mut self) -> &mut Self {
        self.overlay = None;
        self
    }

    /// Move the selection in the active overlay list.
    ///
    pub fn overlay_move(&mut self, forward: bool) -> &mut Self {
        match self.overlay.as_mut() {
            Some(Overlay::FileTypeDialog { index }) => {
                let len = FileTypeChoice::ALL.len();
                *index = if forward {
                    (*index + 1) % len
                } else {
                    (*index + len - 1) % len
                };
            }
            Some(Overlay::FilePicker { entries, index, .. }) if !entries.is_empty() => {
                let len = entries.len();
                *index = if forward {
                    (*index + 1) % len
                } else {
                    (*index + len - 1) % len
                };
            }
            _ => {}
        }
        self
    }

    /// Confirm the highlighted entry in the active overlay. For the type
    /// dialog this stores the accept filter, closes the dialog and opens
    /// the picker in one state change; for the picker it dispatches the
    /// file selection.
    ///
    pub fn overlay_confirm(&mut self) -> &mut Self {
        match self.overlay.take() {
            Some(Overlay::FileTypeDialog { index }) => {
                let choice = FileTypeChoice::ALL[index.min(FileTypeChoice::ALL.len() - 1)];
                self.choose_file_type(choice);
            }
            Some(Overlay::FilePicker { entries, index, .. }) => {
                if let Some(handle) = entries.get(index) {
                    let handle = handle.clone();
                    info!("Selected file {} ({} bytes)", handle.file_name(), handle.size);
                    self.apply_change(ChangeEvent::FileSelect(FieldId::File, Some(handle)));
                }
            }
            None => {}
        }
        self
    }

    /// Apply a file type choice: remember the accept filter and replace
    /// the dialog with the picker listing matching files.
    ///
    pub fn choose_file_type(&mut self, choice: FileTypeChoice) -> &mut Self {
        debug!("File type chosen: {}", choice.accept());
        self.accept_filter = Some(choice);
        let entries = match self.scan_picker_entries(choice) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("{}", e);
                vec![]
            }
        };
        self.overlay = Some(Overlay::FilePicker {
            accept: choice,
            entries,
            index: 0,
        });
        self
    }

    /// List regular files in the picker directory matching the accept
    /// filter, sorted by name, with sizes from metadata.
    ///
    fn scan_picker_entries(&self, choice: FileTypeChoice) -> Result<Vec<FileHandle>, StateError> {
        let dir = &self.picker_directory;
        let read = fs::read_dir(dir).map_err(|source| StateError::PickerDirectory {
            path: dir.display().to_string(),
            source,
        })?;
        let mut entries: Vec<FileHandle> = vec![];
        for entry in read.flatten() {
            let path = entry.path();
            if !choice.matches(&path) {
                continue;
            }
            match entry.metadata() {
                Ok(metadata) if metadata.is_file() => {
                    entries.push(FileHandle::new(path, metadata.len()));
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(
                        "{}",
                        StateError::FileMetadata {
                            path: path.display().to_string(),
                            source: e,
                        }
                    );
                }
            }
        }
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }

    /// Append a formatted log entry for the debug view.
    ///
    pub fn push_debug_entry(&mut self, entry: String) -> &mut Self {
        self.debug_entries.push(entry);
        if self.debug_entries.len() > MAX_DEBUG_ENTRIES {
            let excess = self.debug_entries.len() - MAX_DEBUG_ENTRIES;
            self.debug_entries.drain(..excess);
            self.debug_index = self.debug_index.saturating_sub(excess);
        }
        self
    }

    pub fn get_debug_entries(&self) -> &[String] {
        &self.debug_entries
    }

    pub fn get_debug_index(&self) -> usize {
        self.debug_index
    }

    pub fn current_debug_entry(&self) -> Option<&str> {
        self.debug_entries.get(self.debug_index).map(String::as_str)
    }

    pub fn next_debug_entry(&mut self) -> &mut Self {
        if self.debug_index + 1 < self.debug_entries.len() {
            self.debug_index += 1;
        }
        self
    }

    pub fn prev_debug_entry(&mut self) -> &mut Self {
        self.debug_index = self.debug_index.saturating_sub(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn state() -> State {
        State::new(
            Theme::default(),
            PathBuf::from("."),
            "Asia/Kolkata".to_string(),
        )
    }

    fn fill_valid(state: &mut State) {
        state.apply_change(ChangeEvent::Text(FieldId::Name, "Ada".to_string()));
        state.apply_change(ChangeEvent::Number(FieldId::Age, "45".to_string()));
        state.apply_change(ChangeEvent::Text(FieldId::Email, "ada@example.com".to_string()));
        state.apply_change(ChangeEvent::Text(
            FieldId::Password,
            "StrongPass1!".to_string(),
        ));
        state.apply_change(ChangeEvent::Text(
            FieldId::DateOfBirth,
            "2000-01-01".to_string(),
        ));
        state.apply_change(ChangeEvent::Toggle(
            FieldId::Courses,
            "React".to_string(),
            true,
        ));
        state.apply_change(ChangeEvent::FileSelect(
            FieldId::File,
            Some(FileHandle::new(PathBuf::from("/tmp/cv.pdf"), 100)),
        ));
        state.apply_change(ChangeEvent::Text(
            FieldId::Url,
            "https://example.com".to_string(),
        ));
        state.apply_change(ChangeEvent::Text(
            FieldId::DateTime,
            "2024-06-01T10:30".to_string(),
        ));
    }

    #[test]
    fn test_field_navigation_wraps() {
        let mut state = state();
        assert_eq!(state.current_field(), FieldId::Name);
        state.prev_field();
        assert_eq!(state.current_field(), FieldId::TimeZone);
        state.next_field();
        assert_eq!(state.current_field(), FieldId::Name);
    }

    #[test]
    fn test_input_char_routes_to_focused_field() {
        let mut state = state();
        state.input_char('A').input_char('d').input_char('a');
        assert_eq!(state.get_form().name, "Ada");
        state.backspace();
        assert_eq!(state.get_form().name, "Ad");
    }

    #[test]
    fn test_age_entry_coerces() {
        let mut state = state();
        state.next_field(); // Age
        state.input_char('4').input_char('5');
        assert_eq!(state.get_form().age, 45);
        state.input_char('x');
        assert_eq!(state.get_form().age, 0);
    }

    #[test]
    fn test_submit_failure_populates_errors() {
        let mut state = state();
        state.submit();
        assert!(state.get_errors().contains_key(&FieldId::Name));
        assert!(state.get_errors().contains_key(&FieldId::Courses));
        assert!(state.get_submitted().is_none());
    }

    #[test]
    fn test_submit_success_clears_errors_wholesale() {
        let mut state = state();
        state.submit();
        assert!(!state.get_errors().is_empty());
        fill_valid(&mut state);
        state.submit();
        assert!(state.get_errors().is_empty());
        assert!(state.get_submitted().is_some());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut state = state();
        fill_valid(&mut state);
        state.submit();
        state.reset_form();
        assert_eq!(*state.get_form(), FormData {
            time_zone: "Asia/Kolkata".to_string(),
            ..FormData::default()
        });
        assert!(state.get_errors().is_empty());
        assert!(state.get_submitted().is_none());
        assert!(state.accept_filter().is_none());
    }

    #[test]
    fn test_toggle_course_round_trips() {
        let mut state = state();
        let before = state.get_form().courses.clone();
        state.toggle_current_course();
        assert_eq!(state.get_form().courses, vec!["React".to_string()]);
        state.toggle_current_course();
        assert_eq!(state.get_form().courses, before);
    }

    #[test]
    fn test_cycle_gender() {
        let mut state = state();
        assert_eq!(state.get_form().gender, Gender::Male);
        state.cycle_gender();
        assert_eq!(state.get_form().gender, Gender::Female);
        state.cycle_gender();
        assert_eq!(state.get_form().gender, Gender::Male);
    }

    #[test]
    fn test_cycle_time_zone() {
        let mut state = state();
        state.cycle_time_zone(true);
        assert_eq!(state.get_form().time_zone, "America/New_York");
        state.cycle_time_zone(false);
        assert_eq!(state.get_form().time_zone, "Asia/Kolkata");
        state.cycle_time_zone(false);
        assert_eq!(state.get_form().time_zone, "Australia/Sydney");
    }

    #[test]
    fn test_adjust_range_clamps() {
        let mut state = state();
        state.adjust_range(60);
        assert_eq!(state.get_form().range_value, "100");
        state.adjust_range(-250);
        assert_eq!(state.get_form().range_value, "0");
    }

    #[test]
    fn test_file_dialog_flow_opens_picker_on_choice() {
        let dir = std::env::temp_dir().join("profile-tui-picker-test");
        fs::create_dir_all(&dir).expect("create temp dir");
        let file_path = dir.join("sample.txt");
        let mut file = fs::File::create(&file_path).expect("create sample file");
        file.write_all(b"hello").expect("write sample file");

        let mut state = State::new(Theme::default(), dir.clone(), "Asia/Kolkata".to_string());
        state.open_file_type_dialog();
        assert!(matches!(
            state.overlay(),
            Some(Overlay::FileTypeDialog { index: 0 })
        ));

        // Move to Text Files and confirm: dialog closes, picker opens
        state.overlay_move(true).overlay_move(true);
        state.overlay_confirm();
        assert_eq!(state.accept_filter(), Some(FileTypeChoice::PlainText));
        match state.overlay() {
            Some(Overlay::FilePicker { accept, entries, .. }) => {
                assert_eq!(*accept, FileTypeChoice::PlainText);
                assert_eq!(entries.len(), 1);
                assert_eq!(entries[0].size, 5);
            }
            other => panic!("expected file picker overlay, got {:?}", other),
        }

        // Confirming the picker dispatches the selection and closes it
        state.overlay_confirm();
        assert!(state.overlay().is_none());
        let selected = state.get_form().file.clone().expect("file selected");
        assert_eq!(selected.size, 5);
        assert_eq!(selected.file_name(), "sample.txt");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_picker_handles_missing_directory() {
        let mut state = State::new(
            Theme::default(),
            PathBuf::from("/nonexistent/profile-tui"),
            "Asia/Kolkata".to_string(),
        );
        state.choose_file_type(FileTypeChoice::Pdf);
        match state.overlay() {
            Some(Overlay::FilePicker { entries, .. }) => assert!(entries.is_empty()),
            other => panic!("expected file picker overlay, got {:?}", other),
        }
    }

    #[test]
    fn test_debug_entries_capped() {
        let mut state = state();
        for i in 0..(MAX_DEBUG_ENTRIES + 10) {
            state.push_debug_entry(format!("entry {}", i));
        }
        assert_eq!(state.get_debug_entries().len(), MAX_DEBUG_ENTRIES);
        assert!(state.get_debug_entries()[0].ends_with("10"));
    }

    #[test]
    fn test_view_stack() {
        let mut state = state();
        assert_eq!(state.current_view(), View::Form);
        state.push_view(View::Log);
        assert_eq!(state.current_view(), View::Log);
        assert_eq!(state.pop_view(), Some(View::Log));
        // The base view is never popped
        assert_eq!(state.pop_view(), None);
        assert_eq!(state.current_view(), View::Form);
    }
}
