use crate::services::reference::{
    read_hiring_trends, read_relation, ReferenceData, ReferenceError, Relation,
};
use crate::services::tables::TableRow;
use crate::models::{
    EduCompany, EduProgram, HiringCount, Job, JobDutyTag, JobInfo, JobIntro, JobWorknet, NcsJob,
    Question, Tag, TagClass, TagJob, WorkCompany, WorkPosition,
};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur when interacting with SQLite
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    Reference(#[from] ReferenceError),
}

/// One audited survey submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    pub response_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub tags: Vec<String>,
}

/// Rows written per relation by an import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    pub tables: Vec<(String, usize)>,
    pub skipped: Vec<String>,
}

/// SQLite client for the survey audit log, reference tables and the board
///
/// SQLite serializes writers; multi-statement writes go through a
/// transaction so readers never see half of one.
#[derive(Debug, Clone)]
pub struct SqliteClient {
    pool: SqlitePool,
}

impl SqliteClient {
    /// Open (creating if missing) the database at `database_url` and run migrations
    ///
    /// In-memory databases live only as long as their single connection, so
    /// they get a one-connection pool that never recycles.
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let in_memory = database_url.contains(":memory:");
        if !in_memory {
            if let Some(parent) = options.get_filename().parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
        }

        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .max_connections(max_connections.max(1))
                .min_connections(min_connections.min(max_connections))
                .idle_timeout(Duration::from_secs(600))
        };

        let pool = pool_options
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new SQLite client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Opening SQLite database: {}", url);

        Self::new(
            url,
            max_connections.unwrap_or(5),
            min_connections.unwrap_or(1),
        )
        .await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Append one submission to the audit log
    ///
    /// The response row and its tag rows are written in one transaction.
    pub async fn record_response(&self, tags: &[String]) -> Result<Uuid, StoreError> {
        let response_id = Uuid::new_v4();
        let id = response_id.to_string();

        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO responses (id, created_at) VALUES (?, ?)")
            .bind(&id)
            .bind(chrono::Utc::now())
            .execute(&mut *tx)
            .await?;

        for (position, tag) in tags.iter().enumerate() {
            sqlx::query("INSERT INTO response_tags (response_id, id_tag, position) VALUES (?, ?, ?)")
                .bind(&id)
                .bind(tag)
                .bind(position as i64)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::debug!("Recorded response {} with {} tags", response_id, tags.len());
        Ok(response_id)
    }

    /// Fetch an audited submission
    pub async fn get_response(&self, response_id: Uuid) -> Result<Option<AuditRecord>, StoreError> {
        let id = response_id.to_string();

        let Some(row) = sqlx::query("SELECT created_at FROM responses WHERE id = ?")
            .bind(&id)
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };

        let tags: Vec<String> = sqlx::query(
            "SELECT id_tag FROM response_tags WHERE response_id = ? ORDER BY position",
        )
        .bind(&id)
        .fetch_all(&self.pool)
        .await?
        .iter()
        .map(|row| row.get("id_tag"))
        .collect();

        Ok(Some(AuditRecord {
            response_id,
            created_at: row.get("created_at"),
            tags,
        }))
    }

    pub async fn response_count(&self) -> Result<i64, StoreError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM responses")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("total"))
    }

    /// Load reference data from the imported tables
    pub async fn load_reference(&self) -> Result<ReferenceData, ReferenceError> {
        tracing::info!("Loading reference data from SQLite");

        let data = ReferenceData {
            questions: self.load_table::<Question>().await?,
            tag_classes: self.load_table::<TagClass>().await?,
            tags: self.load_table::<Tag>().await?,
            tag_jobs: self.load_table::<TagJob>().await?,
            jobs: self.load_table::<Job>().await?,
            ncs_jobs: self.load_table::<NcsJob>().await?,
            edu_companies: self.load_table::<EduCompany>().await?,
            edu_programs: self.load_table::<EduProgram>().await?,
            job_worknet: self.load_table::<JobWorknet>().await?,
            work_companies: self.load_table::<WorkCompany>().await?,
            work_positions: self.load_table::<WorkPosition>().await?,
            job_info: self.load_table::<JobInfo>().await?,
            job_duty_tags: self.load_table::<JobDutyTag>().await?,
            job_intros: self.load_table::<JobIntro>().await?,
            hiring_trends: self.load_table::<HiringCount>().await?,
        };

        data.validate()?;
        Ok(data)
    }

    async fn load_table<T: TableRow>(&self) -> Result<Vec<T>, ReferenceError> {
        let relation = T::RELATION;
        let database = |source: sqlx::Error| ReferenceError::Database { relation, source };

        let rows = sqlx::query(&T::select_sql())
            .fetch_all(&self.pool)
            .await
            .map_err(database)?;

        rows.iter()
            .map(T::from_row)
            .collect::<Result<Vec<T>, _>>()
            .map_err(database)
    }

    /// Copy every known `<table>.csv` in `dir` into its table
    ///
    /// Each table is written in its own transaction. With `replace` the table
    /// is emptied first; otherwise rows are appended.
    pub async fn import_csv_dir(&self, dir: &Path, replace: bool) -> Result<ImportReport, StoreError> {
        let mut report = ImportReport::default();

        for relation in Relation::ALL {
            let written = match relation {
                Relation::Question => self.import_relation::<Question>(dir, replace).await?,
                Relation::TagClass => self.import_relation::<TagClass>(dir, replace).await?,
                Relation::Tag => self.import_relation::<Tag>(dir, replace).await?,
                Relation::TagToJobs => self.import_relation::<TagJob>(dir, replace).await?,
                Relation::Jobs => self.import_relation::<Job>(dir, replace).await?,
                Relation::NcsToJobs => self.import_relation::<NcsJob>(dir, replace).await?,
                Relation::EduCompany => self.import_relation::<EduCompany>(dir, replace).await?,
                Relation::EduProgram => self.import_relation::<EduProgram>(dir, replace).await?,
                Relation::JobsToWorknet => self.import_relation::<JobWorknet>(dir, replace).await?,
                Relation::WorknetCompany => self.import_relation::<WorkCompany>(dir, replace).await?,
                Relation::WorknetPositions => self.import_relation::<WorkPosition>(dir, replace).await?,
                Relation::JobInfo => self.import_relation::<JobInfo>(dir, replace).await?,
                Relation::JobTag => self.import_relation::<JobDutyTag>(dir, replace).await?,
                Relation::JobIntro => self.import_relation::<JobIntro>(dir, replace).await?,
                Relation::HiringTrends => self.import_rows(read_hiring_trends(dir)?, replace).await?,
            };

            match written {
                Some(count) => {
                    tracing::info!("Imported {} rows into {}", count, relation);
                    report.tables.push((relation.table().to_string(), count));
                }
                None => {
                    tracing::warn!("Skipping {}: {} not found", relation, relation.file_name());
                    report.skipped.push(relation.table().to_string());
                }
            }
        }

        Ok(report)
    }

    async fn import_relation<T>(&self, dir: &Path, replace: bool) -> Result<Option<usize>, StoreError>
    where
        T: TableRow + serde::de::DeserializeOwned,
    {
        self.import_rows(read_relation::<T>(dir, T::RELATION)?, replace).await
    }

    async fn import_rows<T: TableRow>(&self, rows: Option<Vec<T>>, replace: bool) -> Result<Option<usize>, StoreError> {
        let Some(rows) = rows else {
            return Ok(None);
        };

        let insert = T::insert_sql();
        let mut tx = self.pool.begin().await?;

        if replace {
            sqlx::query(&format!("DELETE FROM {}", T::RELATION.table()))
                .execute(&mut *tx)
                .await?;
        }

        for row in &rows {
            row.bind_into(&insert).execute(&mut *tx).await?;
        }

        tx.commit().await?;
        Ok(Some(rows.len()))
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
