//! View models handed to the presentation layer.

use crate::activity::Activity;
use crate::entry::Entry;
use crate::form::EntryFormFields;
use crate::model_state::ModelState;
use serde::{Deserialize, Serialize};

/// One row of the entries list, with the activity name resolved.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EntryListItem {
    #[serde(flatten)]
    pub entry: Entry,
    pub activity_name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EntriesIndexView {
    pub entries: Vec<EntryListItem>,
    /// Sum of durations over entries that are not excluded.
    pub total_activity: f64,
    /// Distinct dates that have at least one entry.
    pub active_days: usize,
    /// `total_activity / active_days`; `None` when there are no active days.
    pub average_daily_activity: Option<f64>,
}

/// Add/edit form, either fresh or re-displayed with errors.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EntryFormView {
    pub entry: EntryFormFields,
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub errors: ModelState,
}

/// Confirmation page shown before a delete is posted.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EntryDeleteView {
    pub entry: EntryListItem,
}
