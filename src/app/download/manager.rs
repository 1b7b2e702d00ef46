//! Job orchestration and progress aggregation
//!
//! The manager spawns every retrieval task up front and then acts as the
//! single reader of their shared event channel. Job records are only ever
//! written here; tasks communicate exclusively through [`JobEvent`]s, so a
//! snapshot is an eventually-consistent view of whatever has arrived by the
//! time the UI loop asks for one.

use std::path::Path;

use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, error, info};

use crate::app::catalog::Configuration;

use super::client;
use super::types::{DownloadJob, DownloadSnapshot, JobEvent, JobProgress, JobState};

/// Drives all retrievals of one finalized configuration
#[derive(Debug)]
pub struct DownloadManager {
    jobs: Vec<DownloadJob>,
    events: UnboundedReceiver<JobEvent>,
}

impl DownloadManager {
    /// Launch one retrieval task per web source, all together
    ///
    /// Sources are taken in catalog item order (iso, img, fixed_iso, floppy).
    /// Load-time cleansing guarantees at least one web source here. A client
    /// that cannot be built fails every job with the same reason instead of
    /// propagating; that matches how an unwritable destination surfaces.
    pub fn start(config: &Configuration, destination: &Path) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let client = client::build_client();

        let mut jobs = Vec::new();
        for (index, source) in config.web_sources().cloned().enumerate() {
            let file_name = client::destination_file_name(&source);
            let path = destination.join(&file_name);
            let events = event_tx.clone();

            let task = match &client {
                Ok(client) => {
                    let client = client.clone();
                    tokio::spawn(client::retrieve(client, source, path, index, events))
                }
                Err(e) => {
                    let reason = e.to_string();
                    tokio::spawn(async move {
                        let _ = events.send(JobEvent::Failed { job: index, reason });
                    })
                }
            };

            jobs.push(DownloadJob::new(file_name, task));
        }

        info!(
            jobs = jobs.len(),
            destination = %destination.display(),
            "downloads started"
        );
        Self {
            jobs,
            events: event_rx,
        }
    }

    /// Fold every event that has arrived since the last tick into the job
    /// records
    pub fn pump(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.apply(event);
        }
    }

    fn apply(&mut self, event: JobEvent) {
        let index = match &event {
            JobEvent::Started { job }
            | JobEvent::Progress { job, .. }
            | JobEvent::Finished { job }
            | JobEvent::Failed { job, .. } => *job,
        };
        let Some(record) = self.jobs.get_mut(index) else {
            error!(job = index, "event for unknown job dropped");
            return;
        };

        match event {
            JobEvent::Started { .. } => {
                if !record.state.is_terminal() {
                    record.state = JobState::Active;
                }
            }
            JobEvent::Progress {
                received, total, ..
            } => {
                record.received = received;
                record.total = total;
                if !record.state.is_terminal() {
                    record.state = JobState::Active;
                }
            }
            JobEvent::Finished { .. } => {
                debug!(job = index, file = %record.file_name, "job succeeded");
                record.state = JobState::Succeeded;
            }
            JobEvent::Failed { reason, .. } => {
                debug!(job = index, file = %record.file_name, %reason, "job failed");
                record.state = JobState::Failed(reason);
            }
        }
    }

    /// Consolidated render view of every job
    pub fn snapshot(&self) -> DownloadSnapshot {
        DownloadSnapshot {
            jobs: self
                .jobs
                .iter()
                .map(|job| JobProgress {
                    file_name: job.file_name.clone(),
                    state: job.state.clone(),
                    received: job.received,
                    total: job.total,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::sync::mpsc::UnboundedSender;

    use crate::app::catalog::{SourceItem, WebSource};

    use super::*;

    /// A manager whose channel is fed by the test instead of real tasks
    fn scripted_manager(file_names: &[&str]) -> (DownloadManager, UnboundedSender<JobEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let jobs = file_names
            .iter()
            .map(|name| DownloadJob::new(name.to_string(), tokio::spawn(async {})))
            .collect();
        (
            DownloadManager {
                jobs,
                events: event_rx,
            },
            event_tx,
        )
    }

    fn config_with_urls(urls: &[&str]) -> Configuration {
        Configuration {
            release: "1.0".to_string(),
            edition: None,
            arch: None,
            iso: urls
                .iter()
                .map(|url| {
                    SourceItem::Web(WebSource {
                        url: url.to_string(),
                        checksum: None,
                        file_name: None,
                    })
                })
                .collect(),
            img: vec![],
            fixed_iso: vec![],
            floppy: vec![],
            disk_images: vec![],
        }
    }

    #[tokio::test]
    async fn test_progress_fractions_never_decrease() {
        let (mut manager, events) = scripted_manager(&["disk.iso"]);

        let mut fractions = Vec::new();
        for received in [0, 50, 100] {
            events
                .send(JobEvent::Progress {
                    job: 0,
                    received,
                    total: Some(100),
                })
                .unwrap();
            manager.pump();
            fractions.push(manager.snapshot().jobs[0].fraction());
        }
        events.send(JobEvent::Finished { job: 0 }).unwrap();
        manager.pump();
        fractions.push(manager.snapshot().jobs[0].fraction());

        assert_eq!(fractions, vec![0.0, 0.5, 1.0, 1.0]);
        assert!(fractions.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[tokio::test]
    async fn test_failed_job_does_not_end_its_sibling() {
        let (mut manager, events) = scripted_manager(&["a.iso", "b.iso"]);

        events
            .send(JobEvent::Failed {
                job: 0,
                reason: "server error: HTTP 500".to_string(),
            })
            .unwrap();
        events.send(JobEvent::Started { job: 1 }).unwrap();
        manager.pump();

        let snapshot = manager.snapshot();
        assert!(matches!(snapshot.jobs[0].state, JobState::Failed(_)));
        assert_eq!(snapshot.jobs[1].state, JobState::Active);
        assert!(!snapshot.all_terminal());

        events
            .send(JobEvent::Progress {
                job: 1,
                received: 10,
                total: Some(10),
            })
            .unwrap();
        events.send(JobEvent::Finished { job: 1 }).unwrap();
        manager.pump();

        let snapshot = manager.snapshot();
        assert_eq!(snapshot.jobs[1].state, JobState::Succeeded);
        assert!(snapshot.all_terminal());
        assert_eq!(snapshot.failed_count(), 1);
    }

    #[tokio::test]
    async fn test_terminal_state_survives_stray_events() {
        let (mut manager, events) = scripted_manager(&["a.iso"]);

        events.send(JobEvent::Finished { job: 0 }).unwrap();
        events.send(JobEvent::Started { job: 0 }).unwrap();
        events
            .send(JobEvent::Progress {
                job: 0,
                received: 1,
                total: Some(2),
            })
            .unwrap();
        manager.pump();

        assert_eq!(manager.snapshot().jobs[0].state, JobState::Succeeded);
    }

    #[tokio::test]
    async fn test_events_for_unknown_jobs_are_dropped() {
        let (mut manager, events) = scripted_manager(&["a.iso"]);

        events.send(JobEvent::Finished { job: 7 }).unwrap();
        manager.pump();

        assert_eq!(manager.snapshot().jobs.len(), 1);
        assert_eq!(manager.snapshot().jobs[0].state, JobState::Pending);
    }

    #[tokio::test]
    async fn test_start_fails_unparseable_sources_without_network() {
        let destination = tempfile::tempdir().unwrap();
        let config = config_with_urls(&["not a url", "also not a url"]);

        let mut manager = DownloadManager::start(&config, destination.path());
        assert_eq!(manager.jobs.len(), 2);

        // The tasks only have to parse the URL before failing, so a short
        // bounded wait is enough.
        for _ in 0..50 {
            manager.pump();
            if manager.snapshot().all_terminal() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        let snapshot = manager.snapshot();
        assert!(snapshot.all_terminal());
        assert_eq!(snapshot.failed_count(), 2);
    }
}
