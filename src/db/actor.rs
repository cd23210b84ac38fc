use crate::db::models::DbEntry;
use crate::db::schema::SQLITE_INIT;
use crate::error::FrogError;
use chrono::Utc;
use fitnessfrog_schema::{Entry, NewEntry};
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::{str::FromStr, time::Duration};
use tracing::{debug, info};

#[derive(Debug)]
pub enum DbActorMessage {
    /// List every entry, newest date first.
    ListEntries(RpcReplyPort<Result<Vec<Entry>, FrogError>>),

    /// Get an entry by id (`None` when absent).
    GetEntry(i64, RpcReplyPort<Result<Option<Entry>, FrogError>>),

    /// Insert an entry and return it with its assigned id.
    AddEntry(NewEntry, RpcReplyPort<Result<Entry, FrogError>>),

    /// Replace every field of an existing entry.
    UpdateEntry(Entry, RpcReplyPort<Result<(), FrogError>>),

    /// Hard-delete an entry; absent ids are ignored.
    DeleteEntry(i64, RpcReplyPort<Result<(), FrogError>>),
}

#[derive(Clone)]
pub struct DbActorHandle {
    actor: ActorRef<DbActorMessage>,
}

impl DbActorHandle {
    pub async fn list_entries(&self) -> Result<Vec<Entry>, FrogError> {
        ractor::call!(self.actor, DbActorMessage::ListEntries)
            .map_err(|e| FrogError::RactorError(format!("DbActor ListEntries RPC failed: {e}")))?
    }

    pub async fn get_entry(&self, id: i64) -> Result<Option<Entry>, FrogError> {
        ractor::call!(self.actor, DbActorMessage::GetEntry, id)
            .map_err(|e| FrogError::RactorError(format!("DbActor GetEntry RPC failed: {e}")))?
    }

    pub async fn add_entry(&self, entry: NewEntry) -> Result<Entry, FrogError> {
        ractor::call!(self.actor, DbActorMessage::AddEntry, entry)
            .map_err(|e| FrogError::RactorError(format!("DbActor AddEntry RPC failed: {e}")))?
    }

    pub async fn update_entry(&self, entry: Entry) -> Result<(), FrogError> {
        ractor::call!(self.actor, DbActorMessage::UpdateEntry, entry)
            .map_err(|e| FrogError::RactorError(format!("DbActor UpdateEntry RPC failed: {e}")))?
    }

    pub async fn delete_entry(&self, id: i64) -> Result<(), FrogError> {
        ractor::call!(self.actor, DbActorMessage::DeleteEntry, id)
            .map_err(|e| FrogError::RactorError(format!("DbActor DeleteEntry RPC failed: {e}")))?
    }
}

struct DbActorState {
    pool: SqlitePool,
}

struct DbActor;

#[ractor::async_trait]
impl Actor for DbActor {
    type Msg = DbActorMessage;
    type State = DbActorState;
    type Arguments = String;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        database_url: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        let connect_opts = SqliteConnectOptions::from_str(database_url.as_str())
            .map_err(|e| ActorProcessingErr::from(format!("invalid database url: {e}")))?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5))
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .connect_with(connect_opts)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db connect failed: {e}")))?;

        apply_schema(&pool)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db schema init failed: {e}")))?;

        info!("DbActor initialized");
        Ok(DbActorState { pool })
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            DbActorMessage::ListEntries(reply) => {
                let res = self.list_entries(&state.pool).await;
                let _ = reply.send(res);
            }
            DbActorMessage::GetEntry(id, reply) => {
                let res = self.get_entry(&state.pool, id).await;
                let _ = reply.send(res);
            }
            DbActorMessage::AddEntry(entry, reply) => {
                let res = self.add_entry(&state.pool, entry).await;
                let _ = reply.send(res);
            }
            DbActorMessage::UpdateEntry(entry, reply) => {
                let res = self.update_entry(&state.pool, entry).await;
                let _ = reply.send(res);
            }
            DbActorMessage::DeleteEntry(id, reply) => {
                let res = self.delete_entry(&state.pool, id).await;
                let _ = reply.send(res);
            }
        }
        Ok(())
    }
}

impl DbActor {
    async fn list_entries(&self, pool: &SqlitePool) -> Result<Vec<Entry>, FrogError> {
        let rows = sqlx::query_as::<_, DbEntry>(
            r#"
        SELECT id, date, activity_id, duration, distance, intensity, is_excluded, notes
        FROM entry
        ORDER BY date DESC, id DESC
        "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(Entry::from).collect())
    }

    async fn get_entry(&self, pool: &SqlitePool, id: i64) -> Result<Option<Entry>, FrogError> {
        let row = sqlx::query_as::<_, DbEntry>(
            r#"
        SELECT id, date, activity_id, duration, distance, intensity, is_excluded, notes
        FROM entry
        WHERE id = ?
        "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(Entry::from))
    }

    async fn add_entry(&self, pool: &SqlitePool, entry: NewEntry) -> Result<Entry, FrogError> {
        let now = Utc::now();
        let id: i64 = sqlx::query_scalar(
            r#"
        INSERT INTO entry (
            date, activity_id, duration, distance, intensity, is_excluded, notes, created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
        )
        .bind(entry.date)
        .bind(entry.activity_id)
        .bind(entry.duration)
        .bind(entry.distance)
        .bind(entry.intensity.level())
        .bind(entry.exclude)
        .bind(entry.notes.as_deref())
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await?;

        debug!(entry.id = id, "Inserted entry row");
        Ok(entry.with_id(id))
    }

    async fn update_entry(&self, pool: &SqlitePool, entry: Entry) -> Result<(), FrogError> {
        let result = sqlx::query(
            r#"
        UPDATE entry SET
            date = ?,
            activity_id = ?,
            duration = ?,
            distance = ?,
            intensity = ?,
            is_excluded = ?,
            notes = ?,
            updated_at = ?
        WHERE id = ?
        "#,
        )
        .bind(entry.date)
        .bind(entry.activity_id)
        .bind(entry.duration)
        .bind(entry.distance)
        .bind(entry.intensity.level())
        .bind(entry.exclude)
        .bind(entry.notes.as_deref())
        .bind(Utc::now())
        .bind(entry.id)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(FrogError::EntryNotFound(entry.id));
        }
        Ok(())
    }

    async fn delete_entry(&self, pool: &SqlitePool, id: i64) -> Result<(), FrogError> {
        let result = sqlx::query("DELETE FROM entry WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        debug!(entry.id = id, rows = result.rows_affected(), "Deleted entry row");
        Ok(())
    }
}

/// Spawns the database actor. Each call owns its own pool, so the actor is left unnamed.
///
/// Connection or schema failures during startup surface as `UnexpectedError`.
pub async fn spawn(database_url: &str) -> Result<DbActorHandle, FrogError> {
    let (actor, _jh) = ractor::Actor::spawn(None, DbActor, database_url.to_string())
        .await
        .map_err(|e| FrogError::UnexpectedError(format!("failed to spawn DbActor: {e}")))?;

    Ok(DbActorHandle { actor })
}

async fn apply_schema(pool: &SqlitePool) -> Result<(), FrogError> {
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}
