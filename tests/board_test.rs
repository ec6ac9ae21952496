mod common;

use anyhow::Result;
use job_board::board::JobBoard;
use job_board::date_codec::ym_of;
use job_board::schedule::{DayClassification, ScheduleError};
use job_board::store::LocalStore;

fn board_with_jobs(jobs: Vec<job_board::job::Job>) -> Result<JobBoard> {
    let store = LocalStore::test_new()?;
    let mut board = JobBoard::new(Box::new(store));
    for job in jobs {
        board.add_job(job)?;
    }
    board.refresh()?;
    Ok(board)
}

#[test]
fn test_refresh_derives_scheduled_days() -> Result<()> {
    // Given two jobs on the same day and one on another
    let board = board_with_jobs(vec![
        job!("a", "01/05/2024"),
        job!("b", "01/05/2024"),
        job!("c", "02/01/2024"),
        job!("d", ""),
    ])?;

    // Two distinct scheduled days; the dateless job is excluded
    assert_eq!(2, board.scheduled_days().len());
    assert!(board.scheduled_days().contains(&20240105));
    assert!(board.scheduled_days().contains(&20240201));

    // Same-day jobs come back in snapshot order
    let ids: Vec<&str> = board
        .jobs_on(20240105)
        .iter()
        .map(|j| j.id.as_str())
        .collect();
    assert_eq!(vec!["a", "b"], ids);

    Ok(())
}

#[test]
fn test_blackout_toggle_and_conflict() -> Result<()> {
    let mut board = board_with_jobs(vec![job!("a", "01/05/2024")])?;

    // A day with jobs cannot be blacked out
    assert_eq!(
        Err(ScheduleError::BlackoutConflict(20240105)),
        board.toggle_blackout(20240105)
    );
    assert!(board.blackout_days().is_empty());

    // A free day toggles on and back off
    board.toggle_blackout(20240110).unwrap();
    assert!(board.blackout_days().contains(&20240110));
    board.toggle_blackout(20240110).unwrap();
    assert!(board.blackout_days().is_empty());

    Ok(())
}

#[test]
fn test_classification_precedence_and_month_view() -> Result<()> {
    let mut board = board_with_jobs(vec![job!("a", "01/05/2024")])?;
    board.toggle_blackout(20240110).unwrap();

    // Today outranks even a day that has jobs
    assert_eq!(
        DayClassification::Today,
        board.classify_day(20240105, 20240105)
    );
    assert_eq!(
        DayClassification::HasJobs,
        board.classify_day(20240105, 20240120)
    );
    assert_eq!(
        DayClassification::Blackout,
        board.classify_day(20240110, 20240120)
    );
    assert_eq!(
        DayClassification::Free,
        board.classify_day(20240111, 20240120)
    );

    // Month view paints one cell per real calendar day
    let month = board.classify_month(ym_of(20240120), 20240120);
    assert_eq!(31, month.len());
    assert_eq!((20240101, DayClassification::Free), month[0]);
    assert_eq!((20240105, DayClassification::HasJobs), month[4]);
    assert_eq!((20240110, DayClassification::Blackout), month[9]);
    assert_eq!((20240120, DayClassification::Today), month[19]);

    // Only actually-scheduled days show up as month dots
    assert_eq!(vec![20240105], board.scheduled_days_in(202401));
    assert!(board.scheduled_days_in(202402).is_empty());

    Ok(())
}

#[test]
fn test_mark_completed_writes_store_first() -> Result<()> {
    let mut board = board_with_jobs(vec![job!("a", "01/05/2024")])?;

    board.mark_completed("a")?;
    assert!(board.jobs()[0].completed);

    // The write reached the store, not just the snapshot
    board.refresh()?;
    assert!(board.jobs()[0].completed);

    // An unknown id fails and leaves the snapshot untouched
    assert!(board.mark_completed("missing").is_err());
    assert_eq!(1, board.jobs().len());

    Ok(())
}

#[test]
fn test_search_delegates_to_prefix_scan() -> Result<()> {
    let board = board_with_jobs(vec![
        job!("a", "", "Anderson"),
        job!("b", "", "Andrews"),
        job!("c", "", "Baker"),
    ])?;

    let hits = board.search("And")?;
    let names: Vec<&str> = hits.iter().map(|j| j.name.as_str()).collect();
    assert_eq!(vec!["Anderson", "Andrews"], names);

    // Range scan is case-sensitive, a known limitation
    assert!(board.search("and")?.is_empty());

    Ok(())
}

#[test]
fn test_csv_round_trip_through_board() -> Result<()> {
    let mut board = board_with_jobs(vec![job!("a", "01/05/2024", "Anderson")])?;

    let mut out = Vec::new();
    board.export_csv(&mut out)?;

    // Importing the export into a fresh board reproduces the job
    let store = LocalStore::test_new()?;
    let mut other = JobBoard::new(Box::new(store));
    let report = other.import_csv(out.as_slice())?;
    assert_eq!(1, report.imported);
    assert_eq!(0, report.failed);
    assert_eq!(board.jobs(), other.jobs());

    Ok(())
}
