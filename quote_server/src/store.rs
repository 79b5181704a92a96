//! SQLite-backed quotation store.
//!
//! The store is opened once at startup and shared by every request; `SqlitePool`
//! is cheap to clone and SQLite serializes writes internally.
//!
//! `save` runs schema creation, the insert and the commit in one transaction
//! under the persistence deadline. If the deadline fires before the commit
//! completes, the transaction is dropped and rolled back, so a request that
//! answered 408 leaves no row behind.

use std::path::Path;

use chrono::{DateTime, Utc};
use log::debug;
use quote_common::{Deadline, QuoteError, Result, Stage};
use sqlx::FromRow;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use crate::model::{Quote, StoredQuote};

/// Default database file, relative to the working directory.
pub const DEFAULT_DATABASE: &str = "quotes.db";

const MAX_CONNECTIONS: u32 = 4;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS quotations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    code TEXT NOT NULL,
    name TEXT NOT NULL,
    bid REAL NOT NULL,
    quotated_at TEXT NOT NULL,
    created_at TEXT NOT NULL
)";

const INSERT_QUOTE: &str =
    "INSERT INTO quotations (code, name, bid, quotated_at, created_at) VALUES (?, ?, ?, ?, ?)";

#[derive(Debug, FromRow)]
struct QuotationRow {
    id: i64,
    code: String,
    name: String,
    bid: f64,
    quotated_at: DateTime<Utc>,
}

impl From<QuotationRow> for StoredQuote {
    fn from(row: QuotationRow) -> Self {
        StoredQuote {
            id: row.id,
            quote: Quote {
                code: row.code,
                name: row.name,
                bid: row.bid,
                quotated_at: row.quotated_at,
            },
        }
    }
}

/// Durable, append-only quotation storage.
#[derive(Debug, Clone)]
pub struct QuoteStore {
    pool: SqlitePool,
}

impl QuoteStore {
    /// Open (creating if needed) the database at `path` and ensure the schema exists.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);
        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await
            .map_err(storage_error)?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Create the `quotations` table if it does not exist. Idempotent.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(())
    }

    /// Persist `quote` within `deadline` and return it with its assigned id.
    pub async fn save(&self, quote: &Quote, deadline: Deadline) -> Result<StoredQuote> {
        deadline.run(Stage::Persist, self.insert(quote)).await
    }

    async fn insert(&self, quote: &Quote) -> Result<StoredQuote> {
        let mut tx = self.pool.begin().await.map_err(storage_error)?;

        sqlx::query(CREATE_TABLE)
            .execute(&mut *tx)
            .await
            .map_err(storage_error)?;

        let id = sqlx::query(INSERT_QUOTE)
            .bind(&quote.code)
            .bind(&quote.name)
            .bind(quote.bid)
            .bind(quote.quotated_at)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await
            .map_err(storage_error)?
            .last_insert_rowid();

        tx.commit().await.map_err(storage_error)?;
        debug!("Stored quotation {} ({} {})", id, quote.code, quote.bid);

        Ok(StoredQuote {
            id,
            quote: quote.clone(),
        })
    }

    /// Look up a stored quotation by id.
    pub async fn find(&self, id: i64) -> Result<Option<StoredQuote>> {
        let row = sqlx::query_as::<_, QuotationRow>(
            "SELECT id, code, name, bid, quotated_at FROM quotations WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;
        Ok(row.map(StoredQuote::from))
    }

    /// Number of stored quotations.
    pub async fn count(&self) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM quotations")
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error)
    }
}

fn storage_error(err: sqlx::Error) -> QuoteError {
    QuoteError::Storage(err.to_string())
}
