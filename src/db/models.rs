use chrono::NaiveDate;
use fitnessfrog_schema::{Entry, Intensity};
use sqlx::FromRow;

/// Row of the `entry` table. Audit timestamps stay in the database.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbEntry {
    pub id: i64,
    pub date: NaiveDate,
    pub activity_id: i64,
    pub duration: f64,
    pub distance: Option<f64>,
    /// Stored as `Intensity::level()`.
    pub intensity: i64,
    pub is_excluded: bool,
    pub notes: Option<String>,
}

impl From<DbEntry> for Entry {
    fn from(row: DbEntry) -> Self {
        Entry {
            id: row.id,
            date: row.date,
            activity_id: row.activity_id,
            duration: row.duration,
            distance: row.distance,
            intensity: Intensity::from_level(row.intensity).unwrap_or_default(),
            exclude: row.is_excluded,
            notes: row.notes,
        }
    }
}
