//! Dashboard session.
//!
//! Owns everything that lives as long as the screen is open: the widget
//! store, the timer engine with its job handles, and the three built-in
//! tiles. Closing the session (explicitly or on drop) cancels every
//! outstanding job, the clock included.

use crate::core::clock::Clock;
use crate::core::moon::MoonCalculator;
use crate::core::providers::{
    PhaseTableSource, WeatherSource, WidgetPrompt, load_phases, load_weather,
};
use crate::core::store::{Effect, WidgetOp, WidgetStore};
use crate::core::timer::{
    DEFAULT_CLOCK_INTERVAL_MS, DEFAULT_STOPWATCH_INTERVAL_MS, JobKind, TimerEngine,
};
use crate::db::kv::KeyValueSlot;
use crate::errors::{AppError, AppResult};
use crate::models::moon::{MoonReading, PhaseRange};
use crate::models::tiles::{ClockTile, Tiles, WeatherTile};
use crate::models::widget::WidgetRecord;
use crate::models::widget_kind::WidgetKind;
use crate::ui::messages::{info, warning};

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub clock_interval_ms: i64,
    pub stopwatch_interval_ms: i64,
    pub weather_location: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            clock_interval_ms: DEFAULT_CLOCK_INTERVAL_MS,
            stopwatch_interval_ms: DEFAULT_STOPWATCH_INTERVAL_MS,
            weather_location: "Moscow".to_string(),
        }
    }
}

/// Result of one pass over the due jobs. Every due job runs even when a save
/// fails, so `fired` is always complete.
#[derive(Debug)]
pub struct Tick {
    pub fired: Vec<JobKind>,
    /// First persistence error among the jobs that ran.
    pub error: Option<AppError>,
}

impl Tick {
    pub fn clock_fired(&self) -> bool {
        self.fired.contains(&JobKind::Clock)
    }

    pub fn into_result(self) -> AppResult<Vec<JobKind>> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.fired),
        }
    }
}

/// What a [`Dashboard::run_for`] loop did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Jobs cancelled by the final teardown.
    pub cancelled: usize,
    /// Storage warnings shown: one per streak of consecutive failed saves.
    pub save_warnings: usize,
}

pub struct Dashboard<S: KeyValueSlot, C: Clock> {
    store: WidgetStore<S>,
    timers: TimerEngine,
    clock: C,
    moon: MoonCalculator,
    phases: Vec<PhaseRange>,
    tiles: Tiles,
    settings: SessionSettings,
}

impl<S: KeyValueSlot, C: Clock> Dashboard<S, C> {
    /// Start the clock job and relaunch the jobs of stopwatches saved as running.
    pub fn open(
        store: WidgetStore<S>,
        clock: C,
        moon: MoonCalculator,
        settings: SessionSettings,
    ) -> Self {
        let now = clock.now();
        let mut dashboard = Self {
            store,
            timers: TimerEngine::new(),
            clock,
            moon,
            phases: Vec::new(),
            tiles: Tiles {
                weather: WeatherTile::placeholder(),
                clock: ClockTile::at(now),
                moon: None,
            },
            settings,
        };

        let now_ms = now.timestamp_millis();
        dashboard
            .timers
            .every(JobKind::Clock, dashboard.settings.clock_interval_ms, now_ms);
        dashboard.sync_all_stopwatch_jobs(now_ms);

        dashboard
    }

    pub fn tiles(&self) -> &Tiles {
        &self.tiles
    }

    pub fn widgets(&self) -> &[WidgetRecord] {
        self.store.records()
    }

    pub fn widget(&self, id: &str) -> Option<&WidgetRecord> {
        self.store.get(id)
    }

    pub fn timers(&self) -> &TimerEngine {
        &self.timers
    }

    pub fn slot(&self) -> &S {
        self.store.slot()
    }

    pub fn slot_mut(&mut self) -> &mut S {
        self.store.slot_mut()
    }

    pub fn phases(&self) -> &[PhaseRange] {
        &self.phases
    }

    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    /// Returns `true` when live data was obtained, `false` when the placeholder is shown.
    pub fn refresh_weather(&mut self, source: &dyn WeatherSource) -> bool {
        let fetched = load_weather(source, &self.settings.weather_location);
        let live = !fetched.is_fallback();
        self.tiles.weather = fetched.into_inner();
        live
    }

    /// One calculation cycle: fetch the phase table (or its fallback) and
    /// compute the reading for the current instant.
    pub fn refresh_moon(&mut self, source: &dyn PhaseTableSource) -> AppResult<&MoonReading> {
        self.phases = load_phases(source).into_inner();
        let reading = self.moon.calculate(self.clock.now(), &self.phases)?;
        let reading = &*self.tiles.moon.insert(reading);
        Ok(reading)
    }

    /// Ask the prompt for a widget and create it. `Ok(None)` when cancelled.
    pub fn add_widget(&mut self, prompt: &mut dyn WidgetPrompt) -> AppResult<Option<WidgetRecord>> {
        match prompt.ask() {
            Some(req) => self
                .create_widget(req.kind, &req.title, req.content.as_deref())
                .map(Some),
            None => Ok(None),
        }
    }

    pub fn create_widget(
        &mut self,
        kind: WidgetKind,
        title: &str,
        content: Option<&str>,
    ) -> AppResult<WidgetRecord> {
        let now_ms = self.clock.now_ms();
        self.store.create(kind, title, content, now_ms)
    }

    /// Cancel the widget's job (if any) and remove it from the store.
    pub fn remove_widget(&mut self, id: &str) -> AppResult<Option<WidgetRecord>> {
        self.timers.cancel_kind(&JobKind::Stopwatch(id.to_string()));
        let now_ms = self.clock.now_ms();
        self.store.remove(id, now_ms)
    }

    /// Apply an operation and keep the stopwatch job in step with the record,
    /// even when persisting the change failed.
    pub fn apply(&mut self, id: &str, op: WidgetOp) -> AppResult<Effect> {
        let now_ms = self.clock.now_ms();
        let result = self.store.mutate(id, op, now_ms);
        self.sync_stopwatch_job(id, now_ms);
        result
    }

    fn sync_stopwatch_job(&mut self, id: &str, now_ms: i64) {
        let kind = JobKind::Stopwatch(id.to_string());
        let running = self.store.get(id).is_some_and(WidgetRecord::is_running_stopwatch);

        if running {
            self.timers
                .every(kind, self.settings.stopwatch_interval_ms, now_ms);
        } else {
            self.timers.cancel_kind(&kind);
        }
    }

    /// One job per running stopwatch, none for anything else.
    fn sync_all_stopwatch_jobs(&mut self, now_ms: i64) {
        let stale: Vec<JobKind> = self
            .timers
            .scheduled()
            .filter(|kind| match kind {
                JobKind::Stopwatch(id) => !self
                    .store
                    .get(id)
                    .is_some_and(WidgetRecord::is_running_stopwatch),
                JobKind::Clock => false,
            })
            .cloned()
            .collect();
        for kind in &stale {
            self.timers.cancel_kind(kind);
        }

        for id in self.store.running_stopwatches() {
            self.timers.every(
                JobKind::Stopwatch(id),
                self.settings.stopwatch_interval_ms,
                now_ms,
            );
        }
    }

    /// Run every job due now. All jobs are processed even if one fails to
    /// persist; the first persistence error is reported alongside the jobs.
    ///
    /// The clock job also adopts widget changes written by other processes
    /// and brings the stopwatch jobs in line with them.
    pub fn tick(&mut self) -> Tick {
        let now = self.clock.now();
        let now_ms = now.timestamp_millis();
        let fired = self.timers.due(now_ms);
        let mut first_err = None;

        for kind in &fired {
            match kind {
                JobKind::Clock => {
                    self.tiles.clock = ClockTile::at(now);
                    if self.store.sync_from_slot() {
                        self.sync_all_stopwatch_jobs(now_ms);
                    }
                }
                JobKind::Stopwatch(id) => match self.store.tick_stopwatch(id, now_ms) {
                    Ok(true) => {}
                    Ok(false) => {
                        self.timers.cancel_kind(kind);
                    }
                    Err(e) => {
                        first_err.get_or_insert(e);
                    }
                },
            }
        }

        Tick {
            fired,
            error: first_err,
        }
    }

    /// Event loop: sleep until the next due job, fire it, repeat for
    /// `duration_ms`, then tear down. `sleep` receives the wait in ms and
    /// `render` is called after every clock refresh, failed saves included.
    pub fn run_for(
        &mut self,
        duration_ms: i64,
        mut sleep: impl FnMut(i64),
        mut render: impl FnMut(&Self),
    ) -> RunSummary {
        let deadline = self.clock.now_ms().saturating_add(duration_ms);
        let mut failing = false;
        let mut save_warnings = 0;

        loop {
            let now_ms = self.clock.now_ms();
            if now_ms >= deadline {
                break;
            }

            let wake_at = self.timers.next_due_ms().unwrap_or(deadline).min(deadline);
            if wake_at > now_ms {
                sleep(wake_at - now_ms);
            }

            let tick = self.tick();
            match &tick.error {
                Some(e) if !failing => {
                    warning(format!("Could not save widgets, keeping them in memory: {}", e));
                    failing = true;
                    save_warnings += 1;
                }
                Some(_) => {}
                None if failing && !self.store.has_unsaved_changes() => {
                    info("Widgets saved again.");
                    failing = false;
                }
                None => {}
            }

            if tick.clock_fired() {
                render(self);
            }
        }

        RunSummary {
            cancelled: self.teardown(),
            save_warnings,
        }
    }

    /// Cancel the clock job and every stopwatch job. Returns how many were cancelled.
    /// Stopwatches stay marked as running in storage and resume on the next open.
    pub fn teardown(&mut self) -> usize {
        self.timers.cancel_all()
    }
}

impl<S: KeyValueSlot, C: Clock> Drop for Dashboard<S, C> {
    fn drop(&mut self) {
        self.teardown();
    }
}
