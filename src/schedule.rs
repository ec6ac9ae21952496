//! Derived calendar views over a job snapshot.
//!
//! Everything here is a pure function over explicit arguments.
//! Job lists in this domain are small (tens to low hundreds of
//! records), so each view is recomputed in full from the latest
//! snapshot instead of being maintained incrementally.

use std::collections::BTreeSet;

use itertools::Itertools;
use log::warn;
use thiserror::Error;

use crate::date_codec::to_day_key;
use crate::date_codec::DayKey;
use crate::job::Job;

/// Days the user has marked as closed for scheduling.
/// Held only in memory; lifecycle is per-session.
pub type BlackoutSet = BTreeSet<DayKey>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("day {0} has scheduled jobs and cannot be blacked out")]
    BlackoutConflict(DayKey),
}

/// How a single calendar cell should be painted.
/// Precedence when a day matches several categories:
/// today > blackout > has-jobs > free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayClassification {
    Today,
    Blackout,
    HasJobs,
    Free,
}

/// The set of days that have at least one job scheduled.
/// Jobs with unparseable dates are silently excluded and
/// duplicate days collapse.
pub fn job_day_keys(jobs: &[Job]) -> BTreeSet<DayKey> {
    jobs.iter().filter_map(|j| to_day_key(&j.date)).collect()
}

/// Jobs scheduled on the given day, in their original snapshot order.
pub fn jobs_on_day<'a>(jobs: &'a [Job], day: DayKey) -> Vec<&'a Job> {
    jobs.iter()
        .filter(|j| to_day_key(&j.date) == Some(day))
        .collect_vec()
}

/// Flips membership of `day` in the blackout set.
/// Rejected when the day already has scheduled jobs; the set is
/// left unchanged in that case.
pub fn toggle_blackout(
    blackout: &mut BlackoutSet,
    day: DayKey,
    scheduled: &BTreeSet<DayKey>,
) -> Result<(), ScheduleError> {
    if scheduled.contains(&day) {
        warn!("Rejecting blackout toggle for day {day}: jobs are scheduled on it");
        return Err(ScheduleError::BlackoutConflict(day));
    }
    if !blackout.remove(&day) {
        blackout.insert(day);
    }
    Ok(())
}

/// Classification of a single day for calendar painting.
pub fn classify(
    day: DayKey,
    today: DayKey,
    blackout: &BlackoutSet,
    scheduled: &BTreeSet<DayKey>,
) -> DayClassification {
    if day == today {
        DayClassification::Today
    } else if blackout.contains(&day) {
        DayClassification::Blackout
    } else if scheduled.contains(&day) {
        DayClassification::HasJobs
    } else {
        DayClassification::Free
    }
}
