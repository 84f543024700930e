// src/core/database.rs
//! Local SQLite store: the analysis cache and the persisted session

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::services::AnalysisCache;
use crate::types::{AnalysisResult, SessionContext, UserRole};

// ===== Core Database Connection Management =====

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (or create) the database file and run migrations
    pub async fn new(database_path: &Path) -> Result<Self> {
        if let Some(parent) = database_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let database_url = format!("sqlite:{}?mode=rwc", database_path.display());
        let pool = SqlitePool::connect(&database_url).await.with_context(|| {
            format!("Failed to connect to database: {}", database_path.display())
        })?;

        info!("Database connection established: {}", database_path.display());
        Self::from_pool(pool).await
    }

    /// Private in-memory database, used by tests and dry runs
    pub async fn in_memory() -> Result<Self> {
        // a second connection would see a different, empty memory database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .context("Failed to open in-memory database")?;
        Self::from_pool(pool).await
    }

    pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS analysis_cache (
                answer_id TEXT PRIMARY KEY,
                payload TEXT NOT NULL,
                cached_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create analysis_cache table")?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS session (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                user_id TEXT NOT NULL,
                name TEXT NOT NULL,
                email TEXT,
                role TEXT NOT NULL,
                signed_in_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create session table")?;

        debug!("Database migrations completed");
        Ok(())
    }

    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .context("Database health check failed")?;
        Ok(())
    }
}

// ===== Session =====

#[derive(Debug, sqlx::FromRow)]
struct SessionRow {
    user_id: String,
    name: String,
    email: Option<String>,
    role: String,
}

impl From<SessionRow> for SessionContext {
    fn from(row: SessionRow) -> Self {
        let role = match row.role.as_str() {
            "recruiter" => UserRole::Recruiter,
            _ => UserRole::Candidate,
        };
        Self {
            user_id: row.user_id,
            name: row.name,
            email: row.email,
            role,
        }
    }
}

impl Database {
    /// Replace the stored session
    pub async fn save_session(&self, session: &SessionContext) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO session (id, user_id, name, email, role, signed_in_at)
            VALUES (1, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                user_id = excluded.user_id,
                name = excluded.name,
                email = excluded.email,
                role = excluded.role,
                signed_in_at = excluded.signed_in_at
            "#,
        )
        .bind(&session.user_id)
        .bind(&session.name)
        .bind(&session.email)
        .bind(session.role.as_str())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .context("Failed to save session")?;

        info!("Session saved for user {}", session.user_id);
        Ok(())
    }

    pub async fn load_session(&self) -> Result<Option<SessionContext>> {
        let row = sqlx::query_as::<_, SessionRow>(
            "SELECT user_id, name, email, role FROM session WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await
        .context("Failed to load session")?;

        Ok(row.map(SessionContext::from))
    }

    pub async fn clear_session(&self) -> Result<()> {
        sqlx::query("DELETE FROM session")
            .execute(&self.pool)
            .await
            .context("Failed to clear session")?;
        Ok(())
    }
}

// ===== Analysis Cache =====

impl Database {
    async fn read_cache_payload(&self, answer_id: &str) -> Result<Option<String>> {
        let payload = sqlx::query_scalar::<_, String>(
            "SELECT payload FROM analysis_cache WHERE answer_id = ?",
        )
        .bind(answer_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(payload)
    }

    /// Store a raw JSON document for an answer, exactly as received
    pub async fn put_raw_analysis(&self, answer_id: &str, payload: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO analysis_cache (answer_id, payload, cached_at)
            VALUES (?, ?, ?)
            ON CONFLICT(answer_id) DO UPDATE SET
                payload = excluded.payload,
                cached_at = excluded.cached_at
            "#,
        )
        .bind(answer_id)
        .bind(payload)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to cache analysis for answer {}", answer_id))?;
        Ok(())
    }

    pub async fn cached_at(&self, answer_id: &str) -> Result<Option<DateTime<Utc>>> {
        let cached_at = sqlx::query_scalar::<_, DateTime<Utc>>(
            "SELECT cached_at FROM analysis_cache WHERE answer_id = ?",
        )
        .bind(answer_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to read cache timestamp")?;
        Ok(cached_at)
    }
}

impl AnalysisCache for Database {
    async fn get(&self, answer_id: &str) -> Option<AnalysisResult> {
        let payload = match self.read_cache_payload(answer_id).await {
            Ok(payload) => payload?,
            Err(e) => {
                warn!("Analysis cache read failed for {}: {:#}", answer_id, e);
                return None;
            }
        };

        let result = AnalysisResult::from_json_str(&payload);
        if result.is_none() {
            warn!("Ignoring unreadable cached analysis for answer {}", answer_id);
        }
        result
    }

    async fn put(&self, answer_id: &str, result: &AnalysisResult) -> Result<()> {
        let payload =
            serde_json::to_string(result).context("Failed to serialize analysis result")?;
        self.put_raw_analysis(answer_id, &payload).await?;
        debug!("Cached analysis for answer {}", answer_id);
        Ok(())
    }

    async fn keys(&self) -> Vec<String> {
        let keys = sqlx::query_scalar::<_, String>(
            "SELECT answer_id FROM analysis_cache ORDER BY answer_id",
        )
        .fetch_all(&self.pool)
        .await;

        match keys {
            Ok(keys) => keys,
            Err(e) => {
                warn!("Analysis cache key listing failed: {:#}", e);
                Vec::new()
            }
        }
    }
}
