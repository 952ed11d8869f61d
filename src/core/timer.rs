//! Cooperative periodic job scheduler.
//!
//! All jobs run on the caller's thread: the event loop asks [`TimerEngine::due`]
//! which jobs fire at a given instant and runs them one after the other, so
//! jobs never overlap with each other or with user mutations.
//!
//! A job kind owns at most one handle: scheduling a kind that is already
//! scheduled returns the existing handle instead of creating a second job.

pub const DEFAULT_CLOCK_INTERVAL_MS: i64 = 1_000;
pub const DEFAULT_STOPWATCH_INTERVAL_MS: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobHandle(u64);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JobKind {
    /// Live clock tile refresh.
    Clock,
    /// Refresh of the running stopwatch with this widget id.
    Stopwatch(String),
}

#[derive(Debug, Clone)]
struct Job {
    handle: JobHandle,
    kind: JobKind,
    period_ms: i64,
    next_due_ms: i64,
}

#[derive(Debug, Default)]
pub struct TimerEngine {
    jobs: Vec<Job>,
    next_handle: u64,
}

impl TimerEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` every `period_ms`, first firing one period after `now_ms`.
    pub fn every(&mut self, kind: JobKind, period_ms: i64, now_ms: i64) -> JobHandle {
        if let Some(existing) = self.handle_for(&kind) {
            return existing;
        }

        self.next_handle += 1;
        let handle = JobHandle(self.next_handle);
        let period_ms = period_ms.max(1);

        self.jobs.push(Job {
            handle,
            kind,
            period_ms,
            next_due_ms: now_ms.saturating_add(period_ms),
        });
        handle
    }

    pub fn handle_for(&self, kind: &JobKind) -> Option<JobHandle> {
        self.jobs.iter().find(|j| &j.kind == kind).map(|j| j.handle)
    }

    /// Kinds of every outstanding job, in scheduling order.
    pub fn scheduled(&self) -> impl Iterator<Item = &JobKind> {
        self.jobs.iter().map(|j| &j.kind)
    }

    pub fn is_scheduled(&self, kind: &JobKind) -> bool {
        self.handle_for(kind).is_some()
    }

    /// Returns `false` if the handle was not (or no longer) scheduled.
    pub fn cancel(&mut self, handle: JobHandle) -> bool {
        let before = self.jobs.len();
        self.jobs.retain(|j| j.handle != handle);
        self.jobs.len() != before
    }

    pub fn cancel_kind(&mut self, kind: &JobKind) -> bool {
        match self.handle_for(kind) {
            Some(handle) => self.cancel(handle),
            None => false,
        }
    }

    /// Cancel every outstanding job; returns how many were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.jobs.len();
        self.jobs.clear();
        n
    }

    pub fn active(&self) -> usize {
        self.jobs.len()
    }

    /// Earliest instant at which some job is due.
    pub fn next_due_ms(&self) -> Option<i64> {
        self.jobs.iter().map(|j| j.next_due_ms).min()
    }

    /// Collect the jobs due at `now_ms`, in scheduling order, and reschedule
    /// each one period after `now_ms`. A job fires at most once per call even
    /// if several periods were missed.
    pub fn due(&mut self, now_ms: i64) -> Vec<JobKind> {
        let mut fired = Vec::new();
        for job in self.jobs.iter_mut().filter(|j| j.next_due_ms <= now_ms) {
            job.next_due_ms = now_ms.saturating_add(job.period_ms);
            fired.push(job.kind.clone());
        }
        fired
    }
}
