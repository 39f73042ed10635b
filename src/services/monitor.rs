//! Commit monitor.
//!
//! Polls HEAD on a fixed interval. Every tick is one complete guarded merge,
//! so stopping between ticks never leaves partial work behind.

use super::lessons::LessonsService;
use super::report::AnalysisReport;
use crate::Result;
use crate::git::CommitSource;
use crate::storage::DocumentFs;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Granularity of the stop-flag check while sleeping.
const SLEEP_SLICE: Duration = Duration::from_millis(100);

/// Watches HEAD and turns each new fix commit into a lesson.
#[derive(Debug, Clone)]
pub struct CommitMonitor {
    interval: Duration,
    last_head: Option<String>,
}

impl CommitMonitor {
    /// Creates a monitor ticking every `interval`.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_head: None,
        }
    }

    /// The last HEAD seen.
    #[must_use]
    pub fn last_head(&self) -> Option<&str> {
        self.last_head.as_deref()
    }

    /// Records the current HEAD so only later commits are analysed.
    ///
    /// # Errors
    ///
    /// Returns an error if HEAD cannot be read.
    pub fn prime<S: CommitSource, F: DocumentFs>(
        &mut self,
        service: &LessonsService<S, F>,
    ) -> Result<()> {
        self.last_head = service.head()?;
        debug!(head = ?self.last_head, "Commit monitor primed");
        Ok(())
    }

    /// Checks HEAD once.
    ///
    /// Returns the analysis of the new HEAD commit, or `None` when HEAD has
    /// not moved.
    ///
    /// # Errors
    ///
    /// Returns an error if HEAD or the commit cannot be read.
    pub fn tick<S: CommitSource, F: DocumentFs>(
        &mut self,
        service: &LessonsService<S, F>,
    ) -> Result<Option<AnalysisReport>> {
        let head = service.head()?;
        if head == self.last_head {
            return Ok(None);
        }
        self.last_head.clone_from(&head);

        let Some(hash) = head else {
            return Ok(None);
        };
        let commit = service.commits().commit(&hash)?;
        info!(commit = commit.short_hash(), message = %commit.message, "New commit detected");
        Ok(Some(service.analyze_new_commit(&commit)))
    }

    /// Polls until `stop` is raised.
    ///
    /// `on_report` is called for every analysed commit. Tick errors are
    /// logged and polling continues. Returns the number of commits analysed.
    ///
    /// # Errors
    ///
    /// Returns an error if HEAD cannot be read when priming.
    pub fn run<S, F, R>(
        &mut self,
        service: &LessonsService<S, F>,
        stop: &AtomicBool,
        mut on_report: R,
    ) -> Result<usize>
    where
        S: CommitSource,
        F: DocumentFs,
        R: FnMut(&AnalysisReport),
    {
        self.prime(service)?;
        info!(
            interval_secs = self.interval.as_secs(),
            "Monitoring commits, interrupt to stop"
        );

        let mut analysed = 0;
        while !stop.load(Ordering::SeqCst) {
            match self.tick(service) {
                Ok(Some(report)) => {
                    analysed += 1;
                    on_report(&report);
                },
                Ok(None) => {},
                Err(e) => warn!(error = %e, "Commit monitor tick failed"),
            }
            self.sleep(stop);
        }

        info!(analysed, "Commit monitor stopped");
        Ok(analysed)
    }

    fn sleep(&self, stop: &AtomicBool) {
        let mut remaining = self.interval;
        while !remaining.is_zero() && !stop.load(Ordering::SeqCst) {
            let slice = remaining.min(SLEEP_SLICE);
            thread::sleep(slice);
            remaining = remaining.saturating_sub(slice);
        }
    }
}
