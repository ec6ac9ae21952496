use anyhow::Result;
use redb::backends::InMemoryBackend;
use redb::TableError;
use redb::{Database, ReadableTable, TableDefinition};
use std::path::Path;
use thiserror::Error;

use crate::board::JobStore;
use crate::job::Job;
use crate::job::JobPatch;

/// Job records keyed by id, as serde_json bytes.
const TBL_JOBS: TableDefinition<&str, Vec<u8>> = TableDefinition::new("jobs");

/// Secondary index for name search. The key is the job name and id
/// joined with a NUL byte, the value is the id. Keeping the id in the
/// key makes the index key unique while leaving keys sorted by name,
/// so a starts-with search becomes a plain range scan.
const TBL_NAME_IDX: TableDefinition<&str, &str> = TableDefinition::new("name_index");

/// Upper-bound sentinel for the prefix range scan: every name that
/// starts with `p` sorts inside `[p, p + U+10FFFF)`.
const MAX_UNICODE_SENTINEL: char = char::MAX;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no job with id {0}")]
    JobNotFound(String),
    #[error("a job with id {0} already exists")]
    DuplicateJob(String),
}

/// Embedded implementation of the job store on redb.
/// Stands in for the hosted document database in tests and in
/// single-machine deployments.
pub struct LocalStore {
    db: Database,
}

impl LocalStore {
    /// Create a store backed by a local DB file.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = Database::create(path)?;
        // redb will automatically detect and recover from crashes,
        // power loss, and other unclean shutdowns.
        Ok(LocalStore { db })
    }

    /// In memory version of the store, for testing purposes
    pub fn test_new() -> Result<Self> {
        let db = Database::builder().create_with_backend(InMemoryBackend::new())?;
        Ok(LocalStore { db })
    }

    fn index_key(name: &str, id: &str) -> String {
        format!("{name}\u{0}{id}")
    }
}

impl JobStore for LocalStore {
    fn list_jobs(&self) -> Result<Vec<Job>> {
        let read_txn = self.db.begin_read()?;
        let table_jobs = match read_txn.open_table(TBL_JOBS) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(..)) => return Ok(Vec::new()),
            Err(other) => return Err(other.into()),
        };
        let mut result = Vec::new();
        for record in table_jobs.iter()? {
            let (_, bytes) = record?;
            result.push(serde_json::from_slice(&bytes.value())?);
        }
        Ok(result)
    }

    fn create_job(&self, job: &Job) -> Result<()> {
        let write_txn = self.db.begin_write()?; // Only one write transaction can be opened at a time
        {
            let mut table_jobs = write_txn.open_table(TBL_JOBS)?;
            if table_jobs.get(job.id.as_str())?.is_some() {
                return Err(StoreError::DuplicateJob(job.id.clone()).into());
            }
            table_jobs.insert(job.id.as_str(), serde_json::to_vec(job)?)?;

            let mut table_idx = write_txn.open_table(TBL_NAME_IDX)?;
            table_idx.insert(
                Self::index_key(&job.name, &job.id).as_str(),
                job.id.as_str(),
            )?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn update_job(&self, id: &str, patch: &JobPatch) -> Result<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table_jobs = write_txn.open_table(TBL_JOBS)?;
            let bytes = table_jobs
                .get(id)?
                .map(|v| v.value())
                .ok_or_else(|| StoreError::JobNotFound(id.to_string()))?;
            let mut job: Job = serde_json::from_slice(&bytes)?;

            let old_name = job.name.clone();
            patch.apply_to(&mut job);
            table_jobs.insert(id, serde_json::to_vec(&job)?)?;

            if job.name != old_name {
                let mut table_idx = write_txn.open_table(TBL_NAME_IDX)?;
                table_idx.remove(Self::index_key(&old_name, id).as_str())?;
                table_idx.insert(Self::index_key(&job.name, id).as_str(), id)?;
            }
        }
        write_txn.commit()?;
        Ok(())
    }

    fn find_by_name_prefix(&self, prefix: &str) -> Result<Vec<Job>> {
        let read_txn = self.db.begin_read()?;
        let table_idx = match read_txn.open_table(TBL_NAME_IDX) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(..)) => return Ok(Vec::new()),
            Err(other) => return Err(other.into()),
        };

        let upper = format!("{prefix}{MAX_UNICODE_SENTINEL}");
        let mut ids = Vec::new();
        for record in table_idx.range(prefix..upper.as_str())? {
            let (_, id) = record?;
            ids.push(id.value().to_string());
        }

        let table_jobs = read_txn.open_table(TBL_JOBS)?;
        let mut result = Vec::with_capacity(ids.len());
        for id in &ids {
            let bytes = table_jobs
                .get(id.as_str())?
                .map(|v| v.value())
                .ok_or_else(|| StoreError::JobNotFound(id.clone()))?;
            result.push(serde_json::from_slice(&bytes)?);
        }
        Ok(result)
    }
}

/// Generates a fresh, non-empty, unique job id.
pub fn fresh_job_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
