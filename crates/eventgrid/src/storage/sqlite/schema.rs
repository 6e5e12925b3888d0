//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

pub const SELECT_VALUE: &str = r#"
SELECT value
FROM kv
WHERE key = ?1
"#;

pub const UPSERT_VALUE: &str = r#"
INSERT INTO kv (key, value)
VALUES (?1, ?2)
ON CONFLICT(key) DO UPDATE SET value = excluded.value
"#;

pub const DELETE_VALUE: &str = r#"
DELETE FROM kv
WHERE key = ?1
"#;
