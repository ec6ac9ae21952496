//! CSV bulk import and export.
//!
//! Import is best effort, one store write per row: a row that fails
//! to parse or to persist is logged and skipped, and the remaining
//! rows still go through. There is no transaction spanning the file.
//! Rows with more or fewer fields than the header are tolerated
//! (missing columns read as empty); only rows whose content cannot be
//! decoded at all, such as non-UTF-8 bytes, hit the skip path.

use std::io::Read;
use std::io::Write;

use anyhow::Result;
use log::warn;
use serde::Deserialize;

use crate::board::JobStore;
use crate::date_codec::to_storage_form;
use crate::job::Job;
use crate::store::fresh_job_id;

/// Outcome of a bulk import: how many rows were stored and how many
/// were skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub failed: usize,
}

/// One raw CSV row. Every column is optional so partial files import;
/// unrecognized columns are ignored by the reader.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CsvRow {
    id: Option<String>,
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    info: Option<String>,
    date: Option<String>,
    price: Option<String>,
    completed: Option<String>,
}

impl CsvRow {
    /// A row without an id gets a freshly generated one, so the same
    /// file imported twice yields distinct records. The date arrives
    /// in display form and is normalized to storage form; `completed`
    /// is true only for the literal text `true`.
    fn into_job(self) -> Job {
        Job {
            id: self
                .id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(fresh_job_id),
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            address: self.address.unwrap_or_default(),
            info: self.info.unwrap_or_default(),
            date: to_storage_form(&self.date.unwrap_or_default()),
            price: self.price.unwrap_or_default(),
            completed: self.completed.as_deref() == Some("true"),
        }
    }
}

/// Reads a headered CSV stream and stores one job per row.
pub fn import_jobs<R: Read>(reader: R, store: &dyn JobStore) -> Result<ImportReport> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let mut report = ImportReport {
        imported: 0,
        failed: 0,
    };
    for (row_no, row) in csv_reader.deserialize::<CsvRow>().enumerate() {
        let job = match row {
            Ok(row) => row.into_job(),
            Err(e) => {
                warn!("Skipping CSV row {}: {e}", row_no + 1);
                report.failed += 1;
                continue;
            }
        };
        match store.create_job(&job) {
            Ok(()) => report.imported += 1,
            Err(e) => {
                warn!("Failed to store CSV row {} (id {}): {e}", row_no + 1, job.id);
                report.failed += 1;
            }
        }
    }
    Ok(report)
}

/// Writes the given jobs as a headered CSV document, with the job
/// fields as columns.
pub fn export_jobs<W: Write>(writer: W, jobs: &[Job]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for job in jobs {
        csv_writer.serialize(job)?;
    }
    csv_writer.flush()?;
    Ok(())
}
