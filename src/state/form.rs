//! Form field types and the state reducer.
//!
//! This module contains the types that make up the profile form state,
//! including field identifiers, field values, change events, and the
//! pure reducer that advances form data in response to one event.

use serde::Serialize;
use std::path::PathBuf;

/// Identifies one named, independently validated form field.
///
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub enum FieldId {
    Name,
    Age,
    Email,
    Password,
    DateOfBirth,
    Color,
    Courses,
    Gender,
    File,
    Range,
    Url,
    Time,
    DateTime,
    TimeZone,
}

impl FieldId {
    /// All fields in form display order.
    ///
    pub const ALL: [FieldId; 14] = [
        FieldId::Name,
        FieldId::Age,
        FieldId::Email,
        FieldId::Password,
        FieldId::DateOfBirth,
        FieldId::Color,
        FieldId::Courses,
        FieldId::Gender,
        FieldId::File,
        FieldId::Range,
        FieldId::Url,
        FieldId::Time,
        FieldId::DateTime,
        FieldId::TimeZone,
    ];

    /// Return the field key used in error maps and serialized output.
    ///
    pub fn key(&self) -> &'static str {
        match self {
            FieldId::Name => "name",
            FieldId::Age => "age",
            FieldId::Email => "email",
            FieldId::Password => "password",
            FieldId::DateOfBirth => "dob",
            FieldId::Color => "color",
            FieldId::Courses => "course",
            FieldId::Gender => "gender",
            FieldId::File => "file",
            FieldId::Range => "range",
            FieldId::Url => "url",
            FieldId::Time => "time",
            FieldId::DateTime => "dateTime",
            FieldId::TimeZone => "timeZone",
        }
    }

    /// Return the label shown next to the field's input row.
    ///
    pub fn label(&self) -> &'static str {
        match self {
            FieldId::Name => "Name",
            FieldId::Age => "Age",
            FieldId::Email => "Email",
            FieldId::Password => "Password",
            FieldId::DateOfBirth => "DOB",
            FieldId::Color => "Color",
            FieldId::Courses => "Courses",
            FieldId::Gender => "Gender",
            FieldId::File => "File",
            FieldId::Range => "Range",
            FieldId::Url => "URL",
            FieldId::Time => "Time",
            FieldId::DateTime => "Date Time",
            FieldId::TimeZone => "Time Zone",
        }
    }
}

/// Gender selection for the radio group.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    /// Parse a gender from its display name. Unknown names return None so
    /// the reducer can keep the prior selection.
    ///
    pub fn from_name(name: &str) -> Option<Gender> {
        match name {
            "Male" => Some(Gender::Male),
            "Female" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// Course options offered by the checkbox group.
///
pub const COURSE_OPTIONS: [&str; 3] = ["React", "Node", "Python"];

/// Time zones offered by the time zone select, as (IANA id, label) pairs.
///
pub const TIME_ZONES: [(&str, &str); 5] = [
    ("Asia/Kolkata", "India Standard Time (IST)"),
    ("America/New_York", "New York (EST)"),
    ("Europe/London", "London (GMT)"),
    ("Asia/Tokyo", "Tokyo (JST)"),
    ("Australia/Sydney", "Sydney (AEDT)"),
];

/// File type choice constraining the file picker's accept filter.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FileTypeChoice {
    Image,
    Pdf,
    PlainText,
}

impl FileTypeChoice {
    pub const ALL: [FileTypeChoice; 3] = [
        FileTypeChoice::Image,
        FileTypeChoice::Pdf,
        FileTypeChoice::PlainText,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FileTypeChoice::Image => "Images",
            FileTypeChoice::Pdf => "PDF",
            FileTypeChoice::PlainText => "Text Files",
        }
    }

    /// Return the MIME accept pattern for this choice.
    ///
    pub fn accept(&self) -> &'static str {
        match self {
            FileTypeChoice::Image => "image/*",
            FileTypeChoice::Pdf => "application/pdf",
            FileTypeChoice::PlainText => "text/plain",
        }
    }

    /// Return the file extensions the picker accepts for this choice.
    ///
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            FileTypeChoice::Image => &["png", "jpg", "jpeg", "gif", "bmp", "webp", "svg"],
            FileTypeChoice::Pdf => &["pdf"],
            FileTypeChoice::PlainText => &["txt"],
        }
    }

    /// Check whether a path's extension matches this accept filter.
    ///
    pub fn matches(&self, path: &std::path::Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                self.extensions().iter().any(|e| *e == ext)
            })
            .unwrap_or(false)
    }
}

/// Handle to a selected file: its path and byte size at selection time.
///
#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct FileHandle {
    pub path: PathBuf,
    pub size: u64,
}

impl FileHandle {
    pub fn new(path: PathBuf, size: u64) -> Self {
        FileHandle { path, size }
    }

    /// Return the file name portion of the path for display.
    ///
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// A discrete UI change event dispatched through the reducer.
///
#[derive(Debug, PartialEq, Clone)]
pub enum ChangeEvent {
    /// Replace a field's value with the raw string verbatim.
    Text(FieldId, String),
    /// Numeric entry; the raw string is parsed and coerced on failure.
    Number(FieldId, String),
    /// Checkbox toggle carrying the option value and checked state.
    Toggle(FieldId, String, bool),
    /// File selection; None clears the field.
    FileSelect(FieldId, Option<FileHandle>),
}

/// Raw form data, one entry per field. Every field always holds a value;
/// defaults are type-appropriate empty values.
///
#[derive(Debug, PartialEq, Clone)]
pub struct FormData {
    pub name: String,
    pub age: i64,
    pub email: String,
    pub password: String,
    pub date_of_birth: String,
    pub color: String,
    pub courses: Vec<String>,
    pub gender: Gender,
    pub file: Option<FileHandle>,
    pub range_value: String,
    pub url: String,
    pub time: String,
    pub date_time: String,
    pub time_zone: String,
}

impl Default for FormData {
    fn default() -> FormData {
        FormData {
            name: String::new(),
            age: 0,
            email: String::new(),
            password: String::new(),
            date_of_birth: String::new(),
            color: "#000000".to_string(),
            courses: vec![],
            gender: Gender::Male,
            file: None,
            range_value: "50".to_string(),
            url: String::new(),
            time: String::new(),
            date_time: String::new(),
            time_zone: "Asia/Kolkata".to_string(),
        }
    }
}

impl FormData {
    /// Advance form data in response to one change event. Pure: the same
    /// data and event always yield the same next data, and invalid input
    /// is represented in the result rather than rejected.
    ///
    pub fn apply(&self, event: ChangeEvent) -> FormData {
        let mut next = self.clone();
        match event {
            ChangeEvent::Text(field, value) => match field {
                FieldId::Name => next.name = value,
                FieldId::Email => next.email = value,
                FieldId::Password => next.password = value,
                FieldId::DateOfBirth => next.date_of_birth = value,
                FieldId::Color => next.color = value,
                FieldId::Range => next.range_value = value,
                FieldId::Url => next.url = value,
                FieldId::Time => next.time = value,
                FieldId::DateTime => next.date_time = value,
                FieldId::TimeZone => next.time_zone = value,
                FieldId::Gender => {
                    if let Some(gender) = Gender::from_name(&value) {
                        next.gender = gender;
                    }
                }
                // Age, Courses and File change through their own event kinds
                _ => {}
            },
            ChangeEvent::Number(field, raw) => {
                if field == FieldId::Age {
                    next.age = raw.trim().parse().unwrap_or(0);
                }
            }
            ChangeEvent::Toggle(field, value, checked) => {
                if field == FieldId::Courses {
                    if checked {
                        if !next.courses.contains(&value) {
                            next.courses.push(value);
                        }
                    } else {
                        next.courses.retain(|course| course != &value);
                    }
                }
            }
            ChangeEvent::FileSelect(field, handle) => {
                if field == FieldId::File {
                    next.file = handle;
                }
            }
        }
        next
    }

    /// Return the string representation of a text-valued field, or None
    /// for fields without one.
    ///
    pub fn text_value(&self, field: FieldId) -> Option<&str> {
        match field {
            FieldId::Name => Some(&self.name),
            FieldId::Email => Some(&self.email),
            FieldId::Password => Some(&self.password),
            FieldId::DateOfBirth => Some(&self.date_of_birth),
            FieldId::Color => Some(&self.color),
            FieldId::Gender => Some(self.gender.as_str()),
            FieldId::Range => Some(&self.range_value),
            FieldId::Url => Some(&self.url),
            FieldId::Time => Some(&self.time),
            FieldId::DateTime => Some(&self.date_time),
            FieldId::TimeZone => Some(&self.time_zone),
            FieldId::Age | FieldId::Courses | FieldId::File => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let data = FormData::default();
        assert_eq!(data.name, "");
        assert_eq!(data.age, 0);
        assert_eq!(data.color, "#000000");
        assert!(data.courses.is_empty());
        assert_eq!(data.gender, Gender::Male);
        assert!(data.file.is_none());
        assert_eq!(data.range_value, "50");
        assert_eq!(data.time_zone, "Asia/Kolkata");
    }

    #[test]
    fn test_apply_text_replaces_verbatim() {
        let data = FormData::default();
        let next = data.apply(ChangeEvent::Text(FieldId::Name, "Ada".to_string()));
        assert_eq!(next.name, "Ada");
        // Other fields untouched
        assert_eq!(next.age, data.age);
        assert_eq!(next.courses, data.courses);
    }

    #[test]
    fn test_apply_is_pure() {
        let data = FormData::default();
        let event = ChangeEvent::Text(FieldId::Email, "a@b.co".to_string());
        let first = data.apply(event.clone());
        let second = data.apply(event);
        assert_eq!(first, second);
        // Input state unchanged
        assert_eq!(data.email, "");
    }

    #[test]
    fn test_apply_number_parses() {
        let data = FormData::default();
        let next = data.apply(ChangeEvent::Number(FieldId::Age, "45".to_string()));
        assert_eq!(next.age, 45);
    }

    #[test]
    fn test_apply_number_coerces_invalid_to_zero() {
        let data = FormData::default().apply(ChangeEvent::Number(FieldId::Age, "45".to_string()));
        let next = data.apply(ChangeEvent::Number(FieldId::Age, "45x".to_string()));
        assert_eq!(next.age, 0);
        let next = data.apply(ChangeEvent::Number(FieldId::Age, String::new()));
        assert_eq!(next.age, 0);
    }

    #[test]
    fn test_apply_toggle_appends_and_removes() {
        let data = FormData::default();
        let checked =
            data.apply(ChangeEvent::Toggle(FieldId::Courses, "React".to_string(), true));
        assert_eq!(checked.courses, vec!["React".to_string()]);
        let unchecked =
            checked.apply(ChangeEvent::Toggle(FieldId::Courses, "React".to_string(), false));
        assert_eq!(unchecked.courses, data.courses);
    }

    #[test]
    fn test_apply_toggle_no_duplicates() {
        let data = FormData::default()
            .apply(ChangeEvent::Toggle(FieldId::Courses, "Node".to_string(), true))
            .apply(ChangeEvent::Toggle(FieldId::Courses, "Node".to_string(), true));
        assert_eq!(data.courses, vec!["Node".to_string()]);
    }

    #[test]
    fn test_apply_toggle_preserves_insertion_order() {
        let data = FormData::default()
            .apply(ChangeEvent::Toggle(FieldId::Courses, "Python".to_string(), true))
            .apply(ChangeEvent::Toggle(FieldId::Courses, "React".to_string(), true));
        assert_eq!(data.courses, vec!["Python".to_string(), "React".to_string()]);
    }

    #[test]
    fn test_apply_gender_replaces_scalar() {
        let data = FormData::default();
        let next = data.apply(ChangeEvent::Text(FieldId::Gender, "Female".to_string()));
        assert_eq!(next.gender, Gender::Female);
        // Unknown option keeps the prior selection
        let next = next.apply(ChangeEvent::Text(FieldId::Gender, "Other".to_string()));
        assert_eq!(next.gender, Gender::Female);
    }

    #[test]
    fn test_apply_file_select_replaces_and_clears() {
        let data = FormData::default();
        let handle = FileHandle::new(PathBuf::from("/tmp/photo.png"), 2048);
        let next = data.apply(ChangeEvent::FileSelect(FieldId::File, Some(handle.clone())));
        assert_eq!(next.file, Some(handle));
        let cleared = next.apply(ChangeEvent::FileSelect(FieldId::File, None));
        assert!(cleared.file.is_none());
    }

    #[test]
    fn test_apply_ignores_mismatched_field() {
        let data = FormData::default();
        let next = data.apply(ChangeEvent::Number(FieldId::Name, "12".to_string()));
        assert_eq!(next, data);
        let next = data.apply(ChangeEvent::Text(FieldId::Age, "12".to_string()));
        assert_eq!(next, data);
    }

    #[test]
    fn test_file_type_choice_accept() {
        assert_eq!(FileTypeChoice::Image.accept(), "image/*");
        assert_eq!(FileTypeChoice::Pdf.accept(), "application/pdf");
        assert_eq!(FileTypeChoice::PlainText.accept(), "text/plain");
    }

    #[test]
    fn test_file_type_choice_matches() {
        let choice = FileTypeChoice::Image;
        assert!(choice.matches(std::path::Path::new("a.png")));
        assert!(choice.matches(std::path::Path::new("b.JPG")));
        assert!(!choice.matches(std::path::Path::new("c.pdf")));
        assert!(!choice.matches(std::path::Path::new("noext")));
    }

    #[test]
    fn test_field_key_roundtrip() {
        assert_eq!(FieldId::Courses.key(), "course");
        assert_eq!(FieldId::DateOfBirth.key(), "dob");
        assert_eq!(FieldId::DateTime.key(), "dateTime");
        // Every field has a distinct key
        let mut keys: Vec<&str> = FieldId::ALL.iter().map(|f| f.key()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), FieldId::ALL.len());
    }

    #[test]
    fn test_file_handle_file_name() {
        let handle = FileHandle::new(PathBuf::from("/tmp/report.pdf"), 10);
        assert_eq!(handle.file_name(), "report.pdf");
    }
}
