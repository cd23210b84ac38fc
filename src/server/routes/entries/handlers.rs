use super::binding::validate_entry;
use super::extract::{EntryFormInput, EntryId};
use super::respond;
use crate::error::FrogError;
use crate::server::router::FrogState;
use crate::stats::ActivitySummary;
use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Local;
use fitnessfrog_schema::{
    EntriesIndexView, EntryDeleteView, EntryFormFields, EntryFormView, ModelState,
};
use tracing::{debug, info};

pub(super) async fn list_entries(
    State(state): State<FrogState>,
) -> Result<Json<EntriesIndexView>, FrogError> {
    let entries = state.entries.entries().await?;
    let summary = ActivitySummary::from_entries(&entries);

    debug!(
        entries = entries.len(),
        total_activity = summary.total_activity,
        active_days = summary.active_days,
        "Listing entries"
    );

    Ok(Json(EntriesIndexView {
        entries: entries.into_iter().map(respond::list_item).collect(),
        total_activity: summary.total_activity,
        active_days: summary.active_days,
        average_daily_activity: summary.average_daily_activity,
    }))
}

pub(super) async fn add_entry_form() -> Json<EntryFormView> {
    let today = Local::now().date_naive();
    Json(respond::form_view(
        EntryFormFields::blank(today),
        ModelState::default(),
    ))
}

pub(super) async fn add_entry(
    State(state): State<FrogState>,
    input: EntryFormInput,
) -> Result<Response, FrogError> {
    let EntryFormInput {
        fields,
        entry,
        mut model_state,
    } = input;

    validate_entry(&entry, &mut model_state);
    if !model_state.is_valid() {
        return Ok(respond::invalid_form(fields, model_state));
    }

    let created = state.entries.add_entry(entry).await?;
    info!(entry.id = created.id, date = %created.date, "Entry added");
    Ok(respond::redirect_to_list().into_response())
}

pub(super) async fn edit_entry_form(
    State(state): State<FrogState>,
    EntryId(id): EntryId,
) -> Result<Json<EntryFormView>, FrogError> {
    let entry = state
        .entries
        .entry(id)
        .await?
        .ok_or(FrogError::EntryNotFound(id))?;

    Ok(Json(respond::form_view(
        EntryFormFields::from(&entry),
        ModelState::default(),
    )))
}

pub(super) async fn edit_entry(
    State(state): State<FrogState>,
    EntryId(id): EntryId,
    input: EntryFormInput,
) -> Result<Response, FrogError> {
    let EntryFormInput {
        mut fields,
        entry,
        mut model_state,
    } = input;
    fields.id = Some(id);

    validate_entry(&entry, &mut model_state);
    if !model_state.is_valid() {
        return Ok(respond::invalid_form(fields, model_state));
    }

    state.entries.update_entry(entry.with_id(id)).await?;
    info!(entry.id = id, "Entry updated");
    Ok(respond::redirect_to_list().into_response())
}

pub(super) async fn delete_entry_confirm(
    State(state): State<FrogState>,
    EntryId(id): EntryId,
) -> Result<Json<EntryDeleteView>, FrogError> {
    let entry = state
        .entries
        .entry(id)
        .await?
        .ok_or(FrogError::EntryNotFound(id))?;

    Ok(Json(EntryDeleteView {
        entry: respond::list_item(entry),
    }))
}

pub(super) async fn delete_entry(
    State(state): State<FrogState>,
    EntryId(id): EntryId,
) -> Result<Redirect, FrogError> {
    state.entries.delete_entry(id).await?;
    info!(entry.id = id, "Entry deleted");
    Ok(respond::redirect_to_list())
}

/// Edit and delete routes reached without an `{id}` segment.
pub(super) async fn missing_entry_id() -> FrogError {
    FrogError::MissingEntryId
}
