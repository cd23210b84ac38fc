//! Form binding and server-side validation for entries.
//!
//! Binding mirrors a model binder: every field is converted independently,
//! conversion failures are recorded in the `ModelState` under the field's
//! input name, and unbound fields fall back to a default so validation can
//! still run on the rest.

use crate::activities::ACTIVITIES;
use chrono::NaiveDate;
use fitnessfrog_schema::{EntryFormFields, Intensity, ModelState, NewEntry};

pub(crate) const DATE_FIELD: &str = "Date";
pub(crate) const ACTIVITY_FIELD: &str = "ActivityId";
pub(crate) const DURATION_FIELD: &str = "Duration";
pub(crate) const DISTANCE_FIELD: &str = "Distance";
pub(crate) const INTENSITY_FIELD: &str = "Intensity";
pub(crate) const NOTES_FIELD: &str = "Notes";

pub(crate) const NOTES_MAX_LEN: usize = 200;

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

pub(crate) fn bind_entry(fields: &EntryFormFields, state: &mut ModelState) -> NewEntry {
    let date = match fields.date.trim() {
        "" => {
            state.add_error(DATE_FIELD, "The Date field is required.");
            None
        }
        raw => {
            let parsed = DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok());
            if parsed.is_none() {
                state.add_error(DATE_FIELD, invalid_value(raw, DATE_FIELD));
            }
            parsed
        }
    };

    let activity_id = match fields.activity_id.trim() {
        "" => {
            state.add_error(ACTIVITY_FIELD, "The Activity field is required.");
            None
        }
        raw => match raw.parse::<i64>() {
            Ok(id) if ACTIVITIES.contains(id) => Some(id),
            Ok(_) => {
                state.add_error(ACTIVITY_FIELD, "The selected activity does not exist.");
                None
            }
            Err(_) => {
                state.add_error(ACTIVITY_FIELD, invalid_value(raw, ACTIVITY_FIELD));
                None
            }
        },
    };

    let duration = match fields.duration.trim() {
        "" => {
            state.add_error(DURATION_FIELD, "The Duration field is required.");
            None
        }
        raw => parse_number(raw, DURATION_FIELD, state),
    };

    let distance = match fields.distance.trim() {
        "" => None,
        raw => parse_number(raw, DISTANCE_FIELD, state),
    };

    let intensity = match fields.intensity.trim() {
        "" => Intensity::default(),
        raw => parse_intensity(raw).unwrap_or_else(|| {
            state.add_error(INTENSITY_FIELD, invalid_value(raw, INTENSITY_FIELD));
            Intensity::default()
        }),
    };

    let notes = fields.notes.trim();
    if notes.chars().count() > NOTES_MAX_LEN {
        state.add_error(
            NOTES_FIELD,
            format!("The Notes field cannot be longer than {NOTES_MAX_LEN} characters."),
        );
    }

    NewEntry {
        date: date.unwrap_or(NaiveDate::MIN),
        activity_id: activity_id.unwrap_or_default(),
        duration: duration.unwrap_or_default(),
        distance,
        intensity,
        exclude: fields.exclude,
        notes: (!notes.is_empty()).then(|| notes.to_string()),
    }
}

/// Server-side rules that run after binding.
///
/// The duration check is skipped when binding already flagged the field, so
/// a typo yields one message rather than two.
pub(crate) fn validate_entry(entry: &NewEntry, state: &mut ModelState) {
    if state.is_valid_field(DURATION_FIELD) && entry.duration <= 0.0 {
        state.add_error(
            DURATION_FIELD,
            "The Duration field value must be greater than '0'.",
        );
    }
}

fn parse_number(raw: &str, field: &str, state: &mut ModelState) -> Option<f64> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            state.add_error(field, invalid_value(raw, field));
            None
        }
    }
}

fn parse_intensity(raw: &str) -> Option<Intensity> {
    if let Ok(level) = raw.parse::<i64>() {
        return Intensity::from_level(level);
    }
    Intensity::ALL
        .into_iter()
        .find(|i| i.as_str().eq_ignore_ascii_case(raw))
}

fn invalid_value(raw: &str, field: &str) -> String {
    format!("The value '{raw}' is not valid for {field}.")
}
