//! Validated profile record.

use crate::state::{FileHandle, FormData, Gender};
use crate::utils::datetime::parse_date_time;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// A profile whose invariants have been checked by the schema: the age is
/// in range, dates are parsed, and a file with positive size is attached.
///
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Profile {
    pub name: String,
    pub age: i64,
    pub email: String,
    pub password: String,
    pub date_of_birth: NaiveDate,
    pub color: String,
    pub courses: Vec<String>,
    pub gender: Gender,
    pub file: FileHandle,
    pub range_value: String,
    pub url: String,
    pub time: String,
    pub date_time: NaiveDateTime,
    pub time_zone: String,
}

impl Profile {
    /// Convert raw form data into a validated profile. Returns None when
    /// any parse the schema depends on fails; `Schema::validate` only
    /// surfaces the result once every rule has passed.
    ///
    pub fn from_form(data: &FormData) -> Option<Profile> {
        let date_of_birth = NaiveDate::parse_from_str(&data.date_of_birth, "%Y-%m-%d").ok()?;
        let date_time = parse_date_time(&data.date_time)?;
        let file = data.file.clone()?;
        Some(Profile {
            name: data.name.clone(),
            age: data.age,
            email: data.email.clone(),
            password: data.password.clone(),
            date_of_birth,
            color: data.color.clone(),
            courses: data.courses.clone(),
            gender: data.gender,
            file,
            range_value: data.range_value.clone(),
            url: data.url.clone(),
            time: data.time.clone(),
            date_time,
            time_zone: data.time_zone.clone(),
        })
    }
}
