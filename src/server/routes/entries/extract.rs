use super::binding::bind_entry;
use crate::error::FrogError;
use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use axum_extra::extract::Form;
use fitnessfrog_schema::{EntryFormFields, ModelState, NewEntry};
use tracing::debug;

/// Entry id taken from the `{id}` route segment.
///
/// A segment that is not an integer is treated like a missing id and rejected
/// with `400` before any repository access.
pub(crate) struct EntryId(pub(crate) i64);

impl<S> FromRequestParts<S> for EntryId
where
    S: Send + Sync,
{
    type Rejection = FrogError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| FrogError::MissingEntryId)?;

        raw.trim()
            .parse::<i64>()
            .map(EntryId)
            .map_err(|_| {
                debug!(raw = %raw, "Rejected non-numeric entry id");
                FrogError::MissingEntryId
            })
    }
}

/// A posted add/edit form after binding.
///
/// Repeated keys are grouped, so a checkbox posted alongside its hidden
/// `false` companion binds instead of failing the request.
///
/// `fields` keeps the raw values for re-display; `entry` holds the bound
/// values (defaults where binding failed); `model_state` carries the binding
/// errors. Validation rules run afterwards, in the handler.
pub(crate) struct EntryFormInput {
    pub(crate) fields: EntryFormFields,
    pub(crate) entry: NewEntry,
    pub(crate) model_state: ModelState,
}

impl<S> FromRequest<S> for EntryFormInput
where
    S: Send + Sync,
{
    type Rejection = FrogError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let Form(fields) = Form::<EntryFormFields>::from_request(req, &()).await?;

        let mut model_state = ModelState::default();
        let entry = bind_entry(&fields, &mut model_state);

        Ok(Self {
            fields,
            entry,
            model_state,
        })
    }
}
