#![forbid(unsafe_code)]

use rusqlite::{Connection, OptionalExtension, params};
use sb_core::ids::UserId;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Sql(rusqlite::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io: {err}"),
            Self::Sql(err) => write!(f, "sqlite: {err}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sql(value)
    }
}

/// One recorded session-start event.
#[derive(Clone, Debug)]
pub struct UsageSampleRow {
    pub timestamp_ms: i64,
    pub connections: i64,
}

/// Persistent ledger: users, referral counts and usage samples.
///
/// Every public operation is individually atomic; there are no cross-entity
/// transactions. Multiple stores may be open on the same directory (WAL mode,
/// bounded busy wait), which is what makes concurrent referral increments
/// safe across processes.
#[derive(Debug)]
pub struct LedgerStore {
    storage_dir: PathBuf,
    conn: Connection,
}

impl LedgerStore {
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let storage_dir = storage_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&storage_dir)?;
        let db_path = storage_dir.join("starshop.db");
        let conn = Connection::open(db_path)?;
        let store = Self { storage_dir, conn };
        store.migrate()?;
        Ok(store)
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    fn migrate(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            r#"
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;
            PRAGMA busy_timeout=5000;

            CREATE TABLE IF NOT EXISTS users (
              user_id INTEGER PRIMARY KEY,
              first_seen INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS referrals (
              referrer_id INTEGER PRIMARY KEY,
              count INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS usage_stats (
              timestamp INTEGER NOT NULL,
              connections INTEGER NOT NULL DEFAULT 0
            );

            CREATE INDEX IF NOT EXISTS idx_usage_stats_ts ON usage_stats(timestamp);
            "#,
        )?;
        Ok(())
    }

    /// Record a user on first contact. Returns whether a row was inserted;
    /// repeat calls for the same id leave exactly one record.
    pub fn add_user_if_absent(&mut self, user: UserId) -> Result<bool, StoreError> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO users(user_id, first_seen) VALUES (?1, ?2)",
            params![user.as_i64(), now_ms()],
        )?;
        Ok(inserted > 0)
    }

    /// Atomic upsert-increment for a referrer's count. The increment happens
    /// inside a single statement so concurrent callers cannot lose updates;
    /// the follow-up read shares the same transaction.
    pub fn upsert_increment_referral(&mut self, referrer: UserId) -> Result<i64, StoreError> {
        let tx = self.conn.transaction()?;
        tx.execute(
            r#"
            INSERT INTO referrals(referrer_id, count)
            VALUES (?1, 1)
            ON CONFLICT(referrer_id)
            DO UPDATE SET count = count + 1
            "#,
            params![referrer.as_i64()],
        )?;
        let count: i64 = tx.query_row(
            "SELECT count FROM referrals WHERE referrer_id = ?1",
            params![referrer.as_i64()],
            |row| row.get(0),
        )?;
        tx.commit()?;
        Ok(count)
    }

    /// Referral count for a user; 0 when no record exists.
    pub fn referral_count(&self, user: UserId) -> Result<i64, StoreError> {
        Ok(self
            .conn
            .query_row(
                "SELECT count FROM referrals WHERE referrer_id = ?1",
                params![user.as_i64()],
                |row| row.get::<_, i64>(0),
            )
            .optional()?
            .unwrap_or(0))
    }

    /// Append one session-start sample stamped with the current time.
    pub fn record_usage_sample(&mut self) -> Result<(), StoreError> {
        self.record_usage_sample_at(now_ms())
    }

    /// Append one session-start sample with an explicit timestamp.
    pub fn record_usage_sample_at(&mut self, timestamp_ms: i64) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO usage_stats(timestamp, connections) VALUES (?1, 1)",
            params![timestamp_ms],
        )?;
        Ok(())
    }

    /// Delete samples older than `retention`. Returns rows removed. Readers
    /// running concurrently see an eventually-consistent window.
    pub fn purge_samples_older_than(&mut self, retention: Duration) -> Result<usize, StoreError> {
        let retention_ms = i64::try_from(retention.as_millis()).unwrap_or(i64::MAX);
        let cutoff = now_ms().saturating_sub(retention_ms);
        let deleted = self.conn.execute(
            "DELETE FROM usage_stats WHERE timestamp < ?1",
            params![cutoff],
        )?;
        Ok(deleted)
    }

    pub fn usage_samples_since(&self, since_ms: i64) -> Result<Vec<UsageSampleRow>, StoreError> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT timestamp, connections
            FROM usage_stats
            WHERE timestamp > ?1
            ORDER BY timestamp ASC
            "#,
        )?;
        let rows = stmt.query_map(params![since_ms], |row| {
            Ok(UsageSampleRow {
                timestamp_ms: row.get(0)?,
                connections: row.get(1)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Max `connections` across all retained samples; 0 when there are none.
    pub fn all_time_max_connections(&self) -> Result<i64, StoreError> {
        let max: Option<i64> = self.conn.query_row(
            "SELECT MAX(connections) FROM usage_stats",
            [],
            |row| row.get(0),
        )?;
        Ok(max.unwrap_or(0))
    }

    pub fn count_distinct_users(&self) -> Result<i64, StoreError> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(DISTINCT user_id) FROM users", [], |row| {
                row.get(0)
            })?)
    }
}

fn now_ms() -> i64 {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    now.as_millis() as i64
}
