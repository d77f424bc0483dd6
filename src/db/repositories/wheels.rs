use anyhow::{Context, Result};

use crate::{db::Database, log_info, log_warn, models::Wheel};

const ENABLE_LOGS: bool = true;

/// Slot holding the JSON array of every wheel, in display order.
pub const WHEELS_STORAGE_KEY: &str = "spins:wheels";

impl Database {
    /// All saved wheels. A missing or unreadable slot counts as no wheels.
    pub async fn load_wheels(&self) -> Result<Vec<Wheel>> {
        let stored = match self.get_value(WHEELS_STORAGE_KEY).await {
            Ok(Some(stored)) => stored,
            Ok(None) => return Ok(Vec::new()),
            Err(err) => {
                log_warn!("Ignoring unreadable saved wheels: {err:?}");
                return Ok(Vec::new());
            }
        };

        match serde_json::from_str::<Vec<Wheel>>(&stored.value) {
            Ok(wheels) => {
                log_info!(
                    "Loaded {} wheels (saved {})",
                    wheels.len(),
                    stored.updated_at.to_rfc3339()
                );
                Ok(wheels)
            }
            Err(err) => {
                log_warn!("Ignoring malformed saved wheels: {err}");
                Ok(Vec::new())
            }
        }
    }

    /// Replace the saved wheels with `wheels`.
    pub async fn save_wheels(&self, wheels: &[Wheel]) -> Result<()> {
        let serialized = serde_json::to_string(wheels).context("failed to serialize wheels")?;
        self.put_value(WHEELS_STORAGE_KEY, serialized).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::temp_database;
    use crate::models::WheelInput;
    use chrono::Utc;
    use rusqlite::params;

    fn wheel(name: &str, labels: &[&str]) -> Wheel {
        Wheel::create(WheelInput {
            name: name.into(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_empty_when_never_saved() {
        let db = temp_database();
        assert!(db.load_wheels().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_keeps_order_and_history() {
        let db = temp_database();
        let mut first = wheel("first", &["a", "b", "c"]);
        first.record_spin(1810.0, Utc::now()).unwrap();
        let second = wheel("second", &["x"]);

        db.save_wheels(&[first.clone(), second.clone()]).await.unwrap();
        let loaded = db.load_wheels().await.unwrap();
        assert_eq!(loaded, vec![first, second]);
    }

    #[tokio::test]
    async fn test_malformed_slot_loads_empty() {
        let db = temp_database();
        db.put_value(WHEELS_STORAGE_KEY, "{not json".into())
            .await
            .unwrap();
        assert!(db.load_wheels().await.unwrap().is_empty());

        db.put_value(WHEELS_STORAGE_KEY, r#"[{"name": "no id"}]"#.into())
            .await
            .unwrap();
        assert!(db.load_wheels().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bad_timestamp_loads_empty() {
        let db = temp_database();
        db.execute(|conn| {
            conn.execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, '[]', 'garbage')",
                params![WHEELS_STORAGE_KEY],
            )?;
            Ok(())
        })
        .await
        .unwrap();

        assert!(db.load_wheels().await.unwrap().is_empty());

        db.save_wheels(&[wheel("w", &["a"])]).await.unwrap();
        assert_eq!(db.load_wheels().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_save_empty_overwrites() {
        let db = temp_database();
        db.save_wheels(&[wheel("w", &["a"])]).await.unwrap();
        db.save_wheels(&[]).await.unwrap();
        assert!(db.load_wheels().await.unwrap().is_empty());
    }
}
