use crate::entry::{Entry, Intensity};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Raw values of the add/edit form.
///
/// The same shape is posted by the browser and echoed back when the form is
/// re-displayed, so a value that failed to bind is shown exactly as typed.
/// Field names follow the form's input names (`Date`, `ActivityId`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EntryFormFields {
    /// Taken from the route, never from the posted body.
    #[serde(default, skip_deserializing)]
    pub id: Option<i64>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub activity_id: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub distance: String,
    #[serde(default)]
    pub intensity: String,
    #[serde(default, deserialize_with = "deserialize_checkbox")]
    pub exclude: bool,
    #[serde(default)]
    pub notes: String,
}

impl EntryFormFields {
    /// An empty form for a new entry on `date`.
    pub fn blank(date: NaiveDate) -> Self {
        Self {
            date: date.format("%Y-%m-%d").to_string(),
            intensity: Intensity::default().as_str().to_string(),
            ..Default::default()
        }
    }
}

impl From<&Entry> for EntryFormFields {
    fn from(entry: &Entry) -> Self {
        Self {
            id: Some(entry.id),
            date: entry.date.format("%Y-%m-%d").to_string(),
            activity_id: entry.activity_id.to_string(),
            duration: entry.duration.to_string(),
            distance: entry.distance.map(|d| d.to_string()).unwrap_or_default(),
            intensity: entry.intensity.as_str().to_string(),
            exclude: entry.exclude,
            notes: entry.notes.clone().unwrap_or_default(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Checkbox {
    Flag(bool),
    Text(String),
    Many(Vec<String>),
}

fn is_checked(text: &str) -> bool {
    matches!(
        text.trim().to_ascii_lowercase().as_str(),
        "on" | "true" | "1" | "yes"
    )
}

/// HTML checkboxes post `on` (or `true`) when ticked and nothing otherwise.
/// Forms that pair the checkbox with a hidden `false` input post both
/// values; any checked value wins.
fn deserialize_checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Checkbox::deserialize(deserializer)? {
        Checkbox::Flag(flag) => flag,
        Checkbox::Text(text) => is_checked(&text),
        Checkbox::Many(values) => values.iter().any(|v| is_checked(v)),
    })
}
