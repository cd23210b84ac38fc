use crate::repository::EntryRepository;
use crate::server::access_log::access_log;
use crate::server::routes::entries::{self, ENTRIES_PATH};

use axum::{
    Router,
    http::StatusCode,
    middleware,
    response::Redirect,
    routing::get,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct FrogState {
    pub entries: Arc<dyn EntryRepository>,
}

impl FrogState {
    pub fn new(entries: Arc<dyn EntryRepository>) -> Self {
        Self { entries }
    }
}

async fn not_found_handler() -> StatusCode {
    StatusCode::NOT_FOUND
}

async fn home_handler() -> Redirect {
    Redirect::to(ENTRIES_PATH)
}

pub fn frog_router(state: FrogState) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .merge(entries::router())
        .fallback(not_found_handler)
        .with_state(state)
        .layer(middleware::from_fn(access_log))
}
