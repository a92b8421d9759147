//! Locally-cached view of generation jobs and their history.
//!
//! The tracker is an immutable state value: every mutating operation takes
//! `&self` and returns a fresh [`JobTrackerState`], so callers keep
//! identity-based change detection and concurrent readers never see a
//! half-applied update. Serializing writes to one canonical state value is
//! the owning application's job.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

use crate::types::{GenerationJob, JobStatus};

/// A recorded status/progress transition. Appended to a job's timeline,
/// never rewritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobTimelineEvent {
    /// Status the job transitioned to.
    pub status: JobStatus,
    /// ISO-8601 timestamp of the transition.
    pub timestamp: String,
    /// Progress at the time of the transition, when known.
    pub progress: Option<u8>,
    /// Free-form annotation.
    pub note: Option<String>,
}

impl JobTimelineEvent {
    /// Creates an event with no progress or note.
    pub fn new(status: JobStatus, timestamp: impl Into<String>) -> Self {
        Self {
            status,
            timestamp: timestamp.into(),
            progress: None,
            note: None,
        }
    }

    /// Sets the progress carried by this event.
    pub fn with_progress(mut self, progress: u8) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Sets the annotation.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// A job plus its chronological timeline. The unit the tracker owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationJobRecord {
    /// Latest normalized snapshot of the job.
    pub job: GenerationJob,
    /// Every observed transition, oldest first.
    pub events: Vec<JobTimelineEvent>,
}

/// The ordered collection of known jobs, newest creation first.
///
/// Invariants: job ids are unique, and the order is recomputed after every
/// mutation with a stable sort (ties keep their relative order; records
/// whose timestamp does not parse sort last).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobTrackerState {
    jobs: Vec<GenerationJobRecord>,
}

impl JobTrackerState {
    /// Creates a tracker from the given jobs, seeding each record's timeline
    /// from the job's own status, progress, and creation timestamp.
    pub fn new(initial_jobs: Vec<GenerationJob>) -> Self {
        let mut jobs: Vec<GenerationJobRecord> =
            initial_jobs.into_iter().map(seed_record).collect();
        sort_newest_first(&mut jobs);
        Self { jobs }
    }

    /// All records, newest creation first.
    pub fn jobs(&self) -> &[GenerationJobRecord] {
        &self.jobs
    }

    /// Number of tracked jobs.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// True when no jobs are tracked.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Looks up one record by job id.
    pub fn get(&self, job_id: &str) -> Option<&GenerationJobRecord> {
        self.jobs.iter().find(|record| record.job.id == job_id)
    }

    /// Applies a freshly normalized job and returns the new state.
    ///
    /// Unknown ids insert a new record with a seeded timeline. Known ids
    /// merge: the incoming job replaces every scalar field, and a timeline
    /// event is appended only when the status or progress differs from the
    /// pre-merge record, so byte-identical repeated polls stay silent.
    pub fn upsert(&self, job: GenerationJob) -> Self {
        let mut jobs = self.jobs.clone();
        if let Some(record) = jobs.iter_mut().find(|record| record.job.id == job.id) {
            let changed =
                record.job.status != job.status || record.job.progress != job.progress;
            if changed {
                record.events.push(
                    JobTimelineEvent::new(job.status, job.updated_at.clone())
                        .with_progress(job.progress),
                );
            }
            record.job = job;
        } else {
            jobs.push(seed_record(job));
        }
        sort_newest_first(&mut jobs);
        Self { jobs }
    }

    /// Appends an event verbatim to the matching job's timeline and returns
    /// the new state. The job takes the event's status and timestamp; its
    /// progress changes only when the event carries one. Non-matching jobs
    /// are untouched.
    pub fn mark_event(&self, job_id: &str, event: JobTimelineEvent) -> Self {
        let mut jobs = self.jobs.clone();
        if let Some(record) = jobs.iter_mut().find(|record| record.job.id == job_id) {
            record.job.status = event.status;
            record.job.updated_at = event.timestamp.clone();
            if let Some(progress) = event.progress {
                record.job.progress = progress;
            }
            record.events.push(event);
        }
        sort_newest_first(&mut jobs);
        Self { jobs }
    }

    /// Jobs still expecting updates (queued or running).
    pub fn active_jobs(&self) -> Vec<&GenerationJobRecord> {
        self.jobs
            .iter()
            .filter(|record| record.job.status.is_active())
            .collect()
    }

    /// Jobs that finished successfully.
    pub fn completed_jobs(&self) -> Vec<&GenerationJobRecord> {
        self.jobs
            .iter()
            .filter(|record| record.job.status == JobStatus::Completed)
            .collect()
    }

    /// Jobs that ended without a result (failed or canceled).
    pub fn failed_jobs(&self) -> Vec<&GenerationJobRecord> {
        self.jobs
            .iter()
            .filter(|record| {
                matches!(
                    record.job.status,
                    JobStatus::Failed | JobStatus::Canceled
                )
            })
            .collect()
    }
}

fn seed_record(job: GenerationJob) -> GenerationJobRecord {
    let seed =
        JobTimelineEvent::new(job.status, job.created_at.clone()).with_progress(job.progress);
    GenerationJobRecord {
        events: vec![seed],
        job,
    }
}

fn sort_newest_first(jobs: &mut [GenerationJobRecord]) {
    // Stable sort: equal or unparsable timestamps keep their relative order.
    jobs.sort_by_key(|record| Reverse(parse_timestamp(&record.job.created_at)));
}

fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value).ok()
}
