//! SQLite implementation of [`AssessmentStore`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tokio::task;

use pathway_core::record::{AssessmentRecord, NewAssessment};
use pathway_core::traits::AssessmentStore;
use pathway_core::{Category, CategoryScores, Identity};

/// How long a writer waits for a competing transaction before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SELECT_COLUMNS: &str =
    "SELECT id, name, school, district, mobile, board, scores, trait_dominance, submitted_at FROM student_scores";

/// Append-only `student_scores` table in a SQLite file.
///
/// Each operation opens its own connection on the blocking pool; SQLite's
/// write lock serializes concurrent creates.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: PathBuf,
}

impl SqliteStore {
    /// Open (creating if needed) the database and its schema.
    pub async fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let path = db_path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let path_clone = path.clone();

        task::spawn_blocking(move || {
            let conn = connect(&path_clone)?;
            conn.execute(
                r#"
                CREATE TABLE IF NOT EXISTS student_scores (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL,
                    school TEXT NOT NULL,
                    district TEXT NOT NULL,
                    mobile TEXT NOT NULL,
                    board TEXT NOT NULL,
                    scores TEXT NOT NULL,
                    trait_dominance TEXT NOT NULL,
                    submitted_at TEXT NOT NULL
                );
                "#,
                [],
            )
            .context("failed to create student_scores table")?;
            Ok::<_, anyhow::Error>(())
        })
        .await??;

        tracing::debug!("opened assessment store at {}", path.display());
        Ok(Self { db_path: path })
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }
}

fn connect(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)
        .with_context(|| format!("failed to open database {}", path.display()))?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(conn)
}

/// Columns as stored, before decoding.
struct RawRow {
    id: i64,
    identity: Identity,
    scores: String,
    trait_dominance: String,
    submitted_at: String,
}

impl RawRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(RawRow {
            id: row.get(0)?,
            identity: Identity {
                name: row.get(1)?,
                school: row.get(2)?,
                district: row.get(3)?,
                mobile: row.get(4)?,
                board: row.get(5)?,
            },
            scores: row.get(6)?,
            trait_dominance: row.get(7)?,
            submitted_at: row.get(8)?,
        })
    }

    fn decode(self) -> Result<AssessmentRecord> {
        let scores: CategoryScores = serde_json::from_str(&self.scores)
            .with_context(|| format!("corrupt scores for record {}", self.id))?;
        let dominant_trait: Category = self
            .trait_dominance
            .parse()
            .map_err(|e: String| anyhow::anyhow!("record {}: {e}", self.id))?;
        let submitted_at = DateTime::parse_from_rfc3339(&self.submitted_at)
            .with_context(|| format!("corrupt timestamp for record {}", self.id))?
            .with_timezone(&Utc);
        Ok(AssessmentRecord {
            id: self.id,
            identity: self.identity,
            scores,
            dominant_trait,
            submitted_at,
        })
    }
}

#[async_trait]
impl AssessmentStore for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn create(&self, new: NewAssessment) -> Result<AssessmentRecord> {
        let path = self.db_path.clone();
        let scores_json = serde_json::to_string(&new.scores)?;

        task::spawn_blocking(move || {
            let mut conn = connect(&path)?;
            let submitted_at = Utc::now();
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO student_scores (name, school, district, mobile, board, scores, trait_dominance, submitted_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    &new.identity.name,
                    &new.identity.school,
                    &new.identity.district,
                    &new.identity.mobile,
                    &new.identity.board,
                    &scores_json,
                    new.dominant_trait.name(),
                    submitted_at.to_rfc3339(),
                ],
            )
            .context("failed to insert assessment")?;
            let id = tx.last_insert_rowid();
            tx.commit().context("failed to commit assessment")?;
            Ok(AssessmentRecord::from_new(id, new, submitted_at))
        })
        .await?
    }

    async fn get(&self, id: i64) -> Result<Option<AssessmentRecord>> {
        let path = self.db_path.clone();

        task::spawn_blocking(move || {
            let conn = connect(&path)?;
            let raw = conn
                .query_row(
                    &format!("{SELECT_COLUMNS} WHERE id = ?1"),
                    params![id],
                    RawRow::from_row,
                )
                .optional()?;
            raw.map(RawRow::decode).transpose()
        })
        .await?
    }

    async fn list(&self) -> Result<Vec<AssessmentRecord>> {
        let path = self.db_path.clone();

        task::spawn_blocking(move || {
            let conn = connect(&path)?;
            let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY id ASC"))?;
            let rows = stmt.query_map([], RawRow::from_row)?;
            let mut records = Vec::new();
            for raw in rows {
                records.push(raw?.decode()?);
            }
            Ok(records)
        })
        .await?
    }
}
