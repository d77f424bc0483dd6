use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};

use crate::db::{helpers::parse_datetime, Database};

/// Raw contents of a key-value slot.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredValue {
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

impl Database {
    /// Read the slot at `key`, if it was ever written.
    pub async fn get_value(&self, key: &str) -> Result<Option<StoredValue>> {
        let key = key.to_string();
        self.execute(move |conn| {
            let row = conn
                .query_row(
                    "SELECT value, updated_at FROM kv_store WHERE key = ?1",
                    params![key],
                    |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
                )
                .optional()
                .with_context(|| format!("failed to read slot {key}"))?;

            match row {
                Some((value, updated_at)) => Ok(Some(StoredValue {
                    value,
                    updated_at: parse_datetime(&updated_at, "updated_at")?,
                })),
                None => Ok(None),
            }
        })
        .await
    }

    /// Overwrite the slot at `key`.
    pub async fn put_value(&self, key: &str, value: String) -> Result<()> {
        let key = key.to_string();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO kv_store (key, value, updated_at)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, Utc::now().to_rfc3339()],
            )
            .with_context(|| format!("failed to write slot {key}"))?;
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use crate::db::test_support::temp_database;

    #[tokio::test]
    async fn test_missing_slot_is_none() {
        let db = temp_database();
        assert!(db.get_value("nothing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let db = temp_database();
        db.put_value("k", "one".into()).await.unwrap();
        db.put_value("k", "two".into()).await.unwrap();
        let stored = db.get_value("k").await.unwrap().unwrap();
        assert_eq!(stored.value, "two");
    }
}
