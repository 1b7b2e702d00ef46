//! Download job records, progress events and snapshot types

use tokio::task::JoinHandle;

/// Lifecycle of one download job
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobState {
    /// Task spawned, no response yet
    Pending,
    /// Bytes are flowing
    Active,
    /// Every byte written
    Succeeded,
    /// Terminal failure with a user-facing reason
    Failed(String),
}

impl JobState {
    /// Whether the job can no longer change state
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Succeeded | JobState::Failed(_))
    }
}

/// Runtime record for one web source's retrieval
///
/// Byte counters are written only by [`super::manager::DownloadManager`]
/// folding in this job's own events; the retrieval task never touches the
/// record directly.
#[derive(Debug)]
pub struct DownloadJob {
    /// Destination file name shown to the user
    pub(super) file_name: String,
    /// Bytes received so far
    pub(super) received: u64,
    /// Total bytes, once the response announced a length
    pub(super) total: Option<u64>,
    /// Current lifecycle state
    pub(super) state: JobState,
    /// The retrieval task belongs to its job record
    #[allow(dead_code)]
    pub(super) task: JoinHandle<()>,
}

impl DownloadJob {
    pub(super) fn new(file_name: String, task: JoinHandle<()>) -> Self {
        Self {
            file_name,
            received: 0,
            total: None,
            state: JobState::Pending,
            task,
        }
    }
}

/// Event published by a retrieval task about its own job
///
/// Events from one task arrive in order; tasks never share a job index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobEvent {
    /// The request was sent
    Started { job: usize },
    /// Byte counters moved
    Progress {
        job: usize,
        received: u64,
        total: Option<u64>,
    },
    /// All bytes written to disk
    Finished { job: usize },
    /// Terminal failure
    Failed { job: usize, reason: String },
}

/// Render view of one job at snapshot time
#[derive(Debug, Clone, PartialEq)]
pub struct JobProgress {
    pub file_name: String,
    pub state: JobState,
    pub received: u64,
    pub total: Option<u64>,
}

impl JobProgress {
    /// Completed fraction in `0.0..=1.0`; 0.0 while the total is unknown
    pub fn fraction(&self) -> f64 {
        if self.state == JobState::Succeeded {
            return 1.0;
        }
        match self.total {
            Some(total) if total > 0 => (self.received as f64 / total as f64).min(1.0),
            _ => 0.0,
        }
    }
}

/// Consolidated, eventually-consistent view of every job
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DownloadSnapshot {
    pub jobs: Vec<JobProgress>,
}

impl DownloadSnapshot {
    /// Whether every job has reached a terminal state
    pub fn all_terminal(&self) -> bool {
        self.jobs.iter().all(|job| job.state.is_terminal())
    }

    /// Number of jobs that ended in failure
    pub fn failed_count(&self) -> usize {
        self.jobs
            .iter()
            .filter(|job| matches!(job.state, JobState::Failed(_)))
            .count()
    }
}
