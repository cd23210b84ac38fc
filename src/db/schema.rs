//! SQL DDL for initializing the database schema.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema includes:
/// - `entry` table (one recorded activity per row)
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS entry (
    id INTEGER PRIMARY KEY NOT NULL,
    date TEXT NOT NULL, -- YYYY-MM-DD
    activity_id INTEGER NOT NULL,
    duration REAL NOT NULL, -- minutes
    distance REAL NULL,
    intensity INTEGER NOT NULL DEFAULT 2, -- 1 low, 2 average, 3 high
    is_excluded INTEGER NOT NULL DEFAULT 0,
    notes TEXT NULL,
    created_at TEXT NOT NULL, -- RFC3339
    updated_at TEXT NOT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_entry_date ON entry(date);
"#;
