//! The entries controller: list, add, edit and delete activity entries.
//!
//! Every mutating action is a GET (form or confirmation) followed by a POST
//! that either redirects to the list or re-displays the form with errors.

use crate::server::router::FrogState;
use axum::{Router, routing::get};

pub(crate) mod binding;
pub(crate) mod extract;
pub(crate) mod handlers;
pub(crate) mod respond;

pub use respond::ENTRIES_PATH;

pub fn router() -> Router<FrogState> {
    Router::new()
        .route(ENTRIES_PATH, get(handlers::list_entries))
        .route(
            "/entries/add",
            get(handlers::add_entry_form).post(handlers::add_entry),
        )
        .route(
            "/entries/edit",
            get(handlers::missing_entry_id).post(handlers::missing_entry_id),
        )
        .route(
            "/entries/edit/{id}",
            get(handlers::edit_entry_form).post(handlers::edit_entry),
        )
        .route(
            "/entries/delete",
            get(handlers::missing_entry_id).post(handlers::missing_entry_id),
        )
        .route(
            "/entries/delete/{id}",
            get(handlers::delete_entry_confirm).post(handlers::delete_entry),
        )
}
