use crate::activities::ACTIVITIES;
use crate::utils::logging::with_pretty_json_debug;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use fitnessfrog_schema::{Entry, EntryFormFields, EntryFormView, EntryListItem, ModelState};
use tracing::debug;

pub const ENTRIES_PATH: &str = "/entries";

/// `303 See Other` back to the entries list.
pub(crate) fn redirect_to_list() -> Redirect {
    Redirect::to(ENTRIES_PATH)
}

pub(crate) fn list_item(entry: Entry) -> EntryListItem {
    let activity_name = ACTIVITIES.name(entry.activity_id).to_string();
    EntryListItem {
        entry,
        activity_name,
    }
}

/// Form view with the activity select list repopulated.
pub(crate) fn form_view(fields: EntryFormFields, errors: ModelState) -> EntryFormView {
    EntryFormView {
        entry: fields,
        activities: ACTIVITIES.select_list(),
        errors,
    }
}

/// Re-displays a form that failed validation.
pub(crate) fn invalid_form(fields: EntryFormFields, errors: ModelState) -> Response {
    with_pretty_json_debug(&errors, |pretty_errors| {
        debug!(errors = %pretty_errors, "Re-displaying entry form");
    });
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(form_view(fields, errors)),
    )
        .into_response()
}
