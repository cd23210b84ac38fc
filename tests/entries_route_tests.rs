use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{
        Request, StatusCode,
        header::{CONTENT_TYPE, LOCATION},
    },
};
use chrono::NaiveDate;
use fitnessfrog::server::router::{FrogState, frog_router};
use fitnessfrog::{EntryRepository, FrogError};
use fitnessfrog_schema::{Entry, Intensity, NewEntry};
use serde_json::Value;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};
use tower::ServiceExt;

/// In-memory repository that counts every call it receives.
#[derive(Default)]
struct MemoryRepository {
    entries: Mutex<Vec<Entry>>,
    next_id: Mutex<i64>,
    calls: AtomicUsize,
}

impl MemoryRepository {
    fn with_entries(entries: Vec<Entry>) -> Arc<Self> {
        let next_id = entries.iter().map(|e| e.id).max().unwrap_or(0);
        Arc::new(Self {
            entries: Mutex::new(entries),
            next_id: Mutex::new(next_id),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn snapshot(&self) -> Vec<Entry> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl EntryRepository for MemoryRepository {
    async fn entries(&self) -> Result<Vec<Entry>, FrogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut entries = self.snapshot();
        entries.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(entries)
    }

    async fn entry(&self, id: i64) -> Result<Option<Entry>, FrogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.snapshot().into_iter().find(|e| e.id == id))
    }

    async fn add_entry(&self, entry: NewEntry) -> Result<Entry, FrogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let id = {
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            *next_id
        };
        let entry = entry.with_id(id);
        self.entries.lock().unwrap().push(entry.clone());
        Ok(entry)
    }

    async fn update_entry(&self, entry: Entry) -> Result<(), FrogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut entries = self.entries.lock().unwrap();
        let slot = entries
            .iter_mut()
            .find(|e| e.id == entry.id)
            .ok_or(FrogError::EntryNotFound(entry.id))?;
        *slot = entry;
        Ok(())
    }

    async fn delete_entry(&self, id: i64) -> Result<(), FrogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entries.lock().unwrap().retain(|e| e.id != id);
        Ok(())
    }
}

fn entry(id: i64, date: (i32, u32, u32), duration: f64, exclude: bool) -> Entry {
    Entry {
        id,
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        activity_id: 6,
        duration,
        distance: None,
        intensity: Intensity::Average,
        exclude,
        notes: None,
    }
}

fn app(repo: &Arc<MemoryRepository>) -> Router {
    frog_router(FrogState::new(repo.clone()))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("failed to build request")
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

async fn json_body(resp: axum::response::Response) -> Value {
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&body).expect("response body was not JSON")
}

fn assert_redirects_to_list(resp: &axum::response::Response) {
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()[LOCATION], "/entries");
}

#[tokio::test]
async fn list_reports_total_and_average_daily_activity() {
    let repo = MemoryRepository::with_entries(vec![
        entry(1, (2024, 1, 1), 30.0, false),
        entry(2, (2024, 1, 1), 20.0, true),
        entry(3, (2024, 1, 2), 10.0, false),
    ]);

    let resp = app(&repo).oneshot(get("/entries")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = json_body(resp).await;
    assert_eq!(body["total_activity"].as_f64(), Some(40.0));
    assert_eq!(body["active_days"].as_u64(), Some(2));
    assert_eq!(body["average_daily_activity"].as_f64(), Some(20.0));

    let ids: Vec<i64> = body["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, [3, 2, 1]);
    assert_eq!(body["entries"][0]["activity_name"], "Running");
}

#[tokio::test]
async fn list_without_entries_has_no_average() {
    let repo = MemoryRepository::with_entries(Vec::new());

    let resp = app(&repo).oneshot(get("/entries")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = json_body(resp).await;
    assert_eq!(body["total_activity"].as_f64(), Some(0.0));
    assert_eq!(body["active_days"].as_u64(), Some(0));
    assert!(body["average_daily_activity"].is_null());
}

#[tokio::test]
async fn home_redirects_to_list_and_unknown_routes_are_not_found() {
    let repo = MemoryRepository::with_entries(Vec::new());
    let app = app(&repo);

    let resp = app.clone().oneshot(get("/")).await.unwrap();
    assert_redirects_to_list(&resp);

    let resp = app.clone().oneshot(get("/nope")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(resp.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn add_form_defaults_to_today_with_activity_list() {
    let repo = MemoryRepository::with_entries(Vec::new());

    let resp = app(&repo).oneshot(get("/entries/add")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = json_body(resp).await;
    let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
    assert_eq!(body["entry"]["Date"], today.as_str());
    assert_eq!(body["entry"]["Intensity"], "Average");
    assert!(body["entry"]["Id"].is_null());
    assert_eq!(body["activities"].as_array().unwrap().len(), 11);
    assert_eq!(body["errors"], serde_json::json!({}));
    assert_eq!(repo.calls(), 0);
}

#[tokio::test]
async fn add_persists_valid_entry_and_redirects() {
    let repo = MemoryRepository::with_entries(Vec::new());

    let resp = app(&repo)
        .oneshot(post_form(
            "/entries/add",
            "Date=2024-05-06&ActivityId=2&Duration=45&Distance=12.5&Intensity=High&Exclude=on&Notes=commute",
        ))
        .await
        .unwrap();
    assert_redirects_to_list(&resp);

    let stored = repo.snapshot();
    assert_eq!(stored.len(), 1);
    let saved = &stored[0];
    assert_eq!(saved.id, 1);
    assert_eq!(saved.date, NaiveDate::from_ymd_opt(2024, 5, 6).unwrap());
    assert_eq!(saved.activity_id, 2);
    assert_eq!(saved.duration, 45.0);
    assert_eq!(saved.distance, Some(12.5));
    assert_eq!(saved.intensity, Intensity::High);
    assert!(saved.exclude);
    assert_eq!(saved.notes.as_deref(), Some("commute"));
}

#[tokio::test]
async fn add_with_non_positive_duration_redisplays_form() {
    for duration in ["0", "-10"] {
        let repo = MemoryRepository::with_entries(Vec::new());

        let resp = app(&repo)
            .oneshot(post_form(
                "/entries/add",
                &format!("Date=2024-05-06&ActivityId=2&Duration={duration}"),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = json_body(resp).await;
        assert_eq!(
            body["errors"]["Duration"],
            serde_json::json!(["The Duration field value must be greater than '0'."])
        );
        assert_eq!(body["entry"]["Duration"], duration);
        assert_eq!(body["activities"].as_array().unwrap().len(), 11);
        assert_eq!(repo.calls(), 0);
        assert!(repo.snapshot().is_empty());
    }
}

#[tokio::test]
async fn add_with_unparsable_duration_keeps_binding_error_only() {
    let repo = MemoryRepository::with_entries(Vec::new());

    let resp = app(&repo)
        .oneshot(post_form(
            "/entries/add",
            "Date=2024-05-06&ActivityId=2&Duration=abc",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = json_body(resp).await;
    assert_eq!(
        body["errors"]["Duration"],
        serde_json::json!(["The value 'abc' is not valid for Duration."])
    );
    assert_eq!(body["entry"]["Duration"], "abc");
    assert_eq!(repo.calls(), 0);
}

#[tokio::test]
async fn edit_and_delete_require_a_valid_id() {
    let repo = MemoryRepository::with_entries(vec![entry(1, (2024, 1, 1), 30.0, false)]);
    let app = app(&repo);

    for uri in [
        "/entries/edit",
        "/entries/edit/abc",
        "/entries/delete",
        "/entries/delete/abc",
    ] {
        let resp = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "GET {uri}");
    }

    let resp = app
        .clone()
        .oneshot(post_form("/entries/delete/abc", ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app
        .clone()
        .oneshot(post_form(
            "/entries/edit/abc",
            "Date=2024-05-06&ActivityId=2&Duration=5",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    assert_eq!(repo.calls(), 0);
    assert_eq!(repo.snapshot().len(), 1);
}

#[tokio::test]
async fn edit_and_delete_unknown_id_is_not_found() {
    let repo = MemoryRepository::with_entries(vec![entry(1, (2024, 1, 1), 30.0, false)]);
    let app = app(&repo);

    let resp = app.clone().oneshot(get("/entries/edit/42")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = json_body(resp).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let resp = app.clone().oneshot(get("/entries/delete/42")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app
        .clone()
        .oneshot(post_form(
            "/entries/edit/42",
            "Date=2024-05-06&ActivityId=2&Duration=5",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    assert_eq!(repo.snapshot(), vec![entry(1, (2024, 1, 1), 30.0, false)]);
}

#[tokio::test]
async fn edit_form_shows_stored_values() {
    let mut stored = entry(7, (2024, 3, 4), 25.5, true);
    stored.notes = Some("windy".to_string());
    let repo = MemoryRepository::with_entries(vec![stored]);

    let resp = app(&repo).oneshot(get("/entries/edit/7")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = json_body(resp).await;
    assert_eq!(body["entry"]["Id"], 7);
    assert_eq!(body["entry"]["Date"], "2024-03-04");
    assert_eq!(body["entry"]["ActivityId"], "6");
    assert_eq!(body["entry"]["Duration"], "25.5");
    assert_eq!(body["entry"]["Exclude"], true);
    assert_eq!(body["entry"]["Notes"], "windy");
    assert_eq!(body["activities"].as_array().unwrap().len(), 11);
}

#[tokio::test]
async fn edit_replaces_entry_and_redirects() {
    let repo = MemoryRepository::with_entries(vec![entry(7, (2024, 3, 4), 25.0, true)]);

    let resp = app(&repo)
        .oneshot(post_form(
            "/entries/edit/7",
            "Date=2024-03-05&ActivityId=10&Duration=60&Intensity=Low",
        ))
        .await
        .unwrap();
    assert_redirects_to_list(&resp);

    let stored = repo.snapshot();
    assert_eq!(stored.len(), 1);
    let updated = &stored[0];
    assert_eq!(updated.id, 7);
    assert_eq!(updated.date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    assert_eq!(updated.activity_id, 10);
    assert_eq!(updated.duration, 60.0);
    assert_eq!(updated.intensity, Intensity::Low);
    assert!(!updated.exclude);
    assert_eq!(updated.notes, None);
}

#[tokio::test]
async fn edit_with_invalid_duration_keeps_entry_untouched() {
    let original = entry(7, (2024, 3, 4), 25.0, false);
    let repo = MemoryRepository::with_entries(vec![original.clone()]);

    let resp = app(&repo)
        .oneshot(post_form(
            "/entries/edit/7",
            "Date=2024-03-05&ActivityId=10&Duration=0",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = json_body(resp).await;
    assert_eq!(body["entry"]["Id"], 7);
    assert_eq!(
        body["errors"]["Duration"],
        serde_json::json!(["The Duration field value must be greater than '0'."])
    );
    assert_eq!(body["activities"].as_array().unwrap().len(), 11);
    assert_eq!(repo.calls(), 0);
    assert_eq!(repo.snapshot(), vec![original]);
}

#[tokio::test]
async fn delete_confirms_then_removes_entry() {
    let repo = MemoryRepository::with_entries(vec![
        entry(1, (2024, 1, 1), 30.0, false),
        entry(2, (2024, 1, 2), 15.0, false),
    ]);
    let app = app(&repo);

    let resp = app.clone().oneshot(get("/entries/delete/2")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["entry"]["id"], 2);
    assert_eq!(body["entry"]["activity_name"], "Running");
    assert_eq!(repo.snapshot().len(), 2);

    let resp = app
        .clone()
        .oneshot(post_form("/entries/delete/2", ""))
        .await
        .unwrap();
    assert_redirects_to_list(&resp);
    assert_eq!(
        repo.snapshot(),
        vec![entry(1, (2024, 1, 1), 30.0, false)]
    );

    // Deleting again is a no-op that still lands on the list.
    let resp = app
        .clone()
        .oneshot(post_form("/entries/delete/2", ""))
        .await
        .unwrap();
    assert_redirects_to_list(&resp);
    assert_eq!(repo.snapshot().len(), 1);
}

#[tokio::test]
async fn add_binds_checkbox_posted_with_hidden_companion() {
    let repo = MemoryRepository::with_entries(Vec::new());

    let resp = app(&repo)
        .oneshot(post_form(
            "/entries/add",
            "Date=2024-05-06&ActivityId=2&Duration=45&Exclude=true&Exclude=false",
        ))
        .await
        .unwrap();
    assert_redirects_to_list(&resp);

    let stored = repo.snapshot();
    assert_eq!(stored.len(), 1);
    assert!(stored[0].exclude);

    // Unticked: only the hidden value is posted.
    let resp = app(&repo)
        .oneshot(post_form(
            "/entries/add",
            "Date=2024-05-07&ActivityId=2&Duration=15&Exclude=false",
        ))
        .await
        .unwrap();
    assert_redirects_to_list(&resp);
    assert!(!repo.snapshot()[1].exclude);
}

#[tokio::test]
async fn post_edit_without_id_is_bad_request() {
    let repo = MemoryRepository::with_entries(vec![entry(1, (2024, 1, 1), 30.0, false)]);

    let resp = app(&repo)
        .oneshot(post_form(
            "/entries/edit",
            "Date=2024-05-06&ActivityId=2&Duration=5",
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert_eq!(repo.calls(), 0);
}

/// Repository whose every call fails, as a lost database connection would.
struct FailingRepository;

impl FailingRepository {
    fn failure() -> FrogError {
        FrogError::RactorError("DbActor RPC failed: actor stopped".to_string())
    }
}

#[async_trait]
impl EntryRepository for FailingRepository {
    async fn entries(&self) -> Result<Vec<Entry>, FrogError> {
        Err(Self::failure())
    }

    async fn entry(&self, _id: i64) -> Result<Option<Entry>, FrogError> {
        Err(Self::failure())
    }

    async fn add_entry(&self, _entry: NewEntry) -> Result<Entry, FrogError> {
        Err(Self::failure())
    }

    async fn update_entry(&self, _entry: Entry) -> Result<(), FrogError> {
        Err(Self::failure())
    }

    async fn delete_entry(&self, _id: i64) -> Result<(), FrogError> {
        Err(Self::failure())
    }
}

#[tokio::test]
async fn repository_failures_surface_as_internal_error() {
    let app = frog_router(FrogState::new(Arc::new(FailingRepository)));

    let requests = [
        get("/entries"),
        get("/entries/edit/1"),
        get("/entries/delete/1"),
        post_form("/entries/add", "Date=2024-05-06&ActivityId=2&Duration=5"),
        post_form("/entries/edit/1", "Date=2024-05-06&ActivityId=2&Duration=5"),
        post_form("/entries/delete/1", ""),
    ];

    for req in requests {
        let uri = req.uri().clone();
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(
            resp.status(),
            StatusCode::INTERNAL_SERVER_ERROR,
            "{uri}"
        );

        let body = json_body(resp).await;
        assert_eq!(
            body,
            serde_json::json!({
                "error": {
                    "code": "INTERNAL_ERROR",
                    "message": "An internal server error occurred."
                }
            })
        );
    }
}
