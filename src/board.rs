use std::collections::BTreeSet;
use std::io::Read;
use std::io::Write;

use anyhow::Result;
use itertools::Itertools;
use log::debug;

use crate::csv_io;
use crate::csv_io::ImportReport;
use crate::date_codec::day_key;
use crate::date_codec::days_in_month;
use crate::date_codec::ymd_range_for_ym;
use crate::date_codec::DayKey;
use crate::date_codec::YearMonth;
use crate::job::Job;
use crate::job::JobPatch;
use crate::schedule;
use crate::schedule::BlackoutSet;
use crate::schedule::DayClassification;
use crate::schedule::ScheduleError;

/// The external persistence layer the dashboard talks to.
/// In the deployed system this is a hosted document database client;
/// [`LocalStore`](crate::store::LocalStore) provides an embedded
/// implementation so the whole board is exercisable without a network.
pub trait JobStore {
    /// Full collection fetch.
    fn list_jobs(&self) -> Result<Vec<Job>>;

    /// Stores a new record. The id must not already exist.
    fn create_job(&self, job: &Job) -> Result<()>;

    /// Writes the set fields of `patch` onto an existing record.
    fn update_job(&self, id: &str, patch: &JobPatch) -> Result<()>;

    /// Returns jobs whose `name` falls lexically in
    /// `[prefix, prefix + U+10FFFF)`. This approximates a starts-with
    /// filter with a range scan; it is case-sensitive and matches no
    /// substrings, a known limitation of the storage layer.
    fn find_by_name_prefix(&self, prefix: &str) -> Result<Vec<Job>>;
}

/// The dashboard core: owns a store handle, the loaded job snapshot,
/// the derived set of scheduled days and the session blackout set.
/// Every mutation goes through the store first; derived views are
/// recomputed in full from the refreshed snapshot.
pub struct JobBoard {
    store: Box<dyn JobStore>,
    jobs: Vec<Job>,
    scheduled: BTreeSet<DayKey>,
    blackout: BlackoutSet,
}

impl JobBoard {
    /// Creates a board over the given store with an empty snapshot.
    /// Call [`refresh`](Self::refresh) to load it.
    pub fn new(store: Box<dyn JobStore>) -> JobBoard {
        JobBoard {
            store,
            jobs: Vec::new(),
            scheduled: BTreeSet::new(),
            blackout: BlackoutSet::new(),
        }
    }

    /// Reloads the snapshot from the store and recomputes the
    /// scheduled-day set. The blackout set survives a refresh;
    /// it is session state, not store state.
    pub fn refresh(&mut self) -> Result<()> {
        debug!("Refreshing job snapshot from store");
        self.jobs = self.store.list_jobs()?;
        self.scheduled = schedule::job_day_keys(&self.jobs);
        debug!(
            "Snapshot refreshed: {} jobs over {} scheduled days",
            self.jobs.len(),
            self.scheduled.len()
        );
        Ok(())
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn scheduled_days(&self) -> &BTreeSet<DayKey> {
        &self.scheduled
    }

    pub fn blackout_days(&self) -> &BlackoutSet {
        &self.blackout
    }

    /// Jobs scheduled on the given day, in snapshot order.
    pub fn jobs_on(&self, day: DayKey) -> Vec<&Job> {
        schedule::jobs_on_day(&self.jobs, day)
    }

    /// Scheduled days falling inside the given month, in day order.
    pub fn scheduled_days_in(&self, ym: YearMonth) -> Vec<DayKey> {
        self.scheduled
            .range(ymd_range_for_ym(ym))
            .copied()
            .collect_vec()
    }

    /// How a single calendar cell should be painted.
    pub fn classify_day(&self, day: DayKey, today: DayKey) -> DayClassification {
        schedule::classify(day, today, &self.blackout, &self.scheduled)
    }

    /// One classification per real calendar day of the given month,
    /// in day order, for painting a month view.
    pub fn classify_month(
        &self,
        ym: YearMonth,
        today: DayKey,
    ) -> Vec<(DayKey, DayClassification)> {
        let (year, month) = (ym / 100, ym % 100);
        (1..=days_in_month(year, month))
            .map(|d| {
                let key = day_key(year, month, d);
                (key, self.classify_day(key, today))
            })
            .collect_vec()
    }

    /// Flips the blackout marking for a day. Rejected with
    /// [`ScheduleError::BlackoutConflict`] when the day has jobs in
    /// the current snapshot.
    pub fn toggle_blackout(&mut self, day: DayKey) -> Result<(), ScheduleError> {
        schedule::toggle_blackout(&mut self.blackout, day, &self.scheduled)
    }

    /// Stores a new job, then folds it into the local snapshot.
    pub fn add_job(&mut self, job: Job) -> Result<()> {
        self.store.create_job(&job)?;
        self.jobs.push(job);
        self.scheduled = schedule::job_day_keys(&self.jobs);
        Ok(())
    }

    /// Marks a job completed. The local snapshot is only touched
    /// after the store write succeeds; a failed write leaves the
    /// board exactly as it was.
    pub fn mark_completed(&mut self, id: &str) -> Result<()> {
        self.store.update_job(id, &JobPatch::completed(true))?;
        if let Some(job) = self.jobs.iter_mut().find(|j| j.id == id) {
            job.completed = true;
        }
        Ok(())
    }

    /// Starts-with search on job names, delegated to the store's
    /// prefix range scan.
    pub fn search(&self, prefix: &str) -> Result<Vec<Job>> {
        self.store.find_by_name_prefix(prefix)
    }

    /// Bulk import from CSV, one store write per row, best effort.
    /// The snapshot is refreshed afterwards so the calendar reflects
    /// whatever subset of rows made it in.
    pub fn import_csv<R: Read>(&mut self, reader: R) -> Result<ImportReport> {
        let report = csv_io::import_jobs(reader, self.store.as_ref())?;
        self.refresh()?;
        Ok(report)
    }

    /// Writes the current snapshot as CSV.
    pub fn export_csv<W: Write>(&self, writer: W) -> Result<()> {
        csv_io::export_jobs(writer, &self.jobs)
    }
}
