//! Stopwatch state machine: {Stopped, Running}.
//!
//! The transitions only touch [`StopwatchData`]; launching and cancelling the
//! periodic job that refreshes a running stopwatch is the session's business.

use crate::models::widget::{Lap, MAX_LAPS, StopwatchData};
use crate::utils::time::format_elapsed;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopwatchState {
    Stopped,
    Running,
}

pub fn state(sw: &StopwatchData) -> StopwatchState {
    if sw.is_running {
        StopwatchState::Running
    } else {
        StopwatchState::Stopped
    }
}

/// Elapsed time as seen at `now_ms`, never negative.
pub fn elapsed_at(sw: &StopwatchData, now_ms: i64) -> u64 {
    if sw.is_running {
        u64::try_from(now_ms.saturating_sub(sw.start_epoch_ms)).unwrap_or(0)
    } else {
        sw.elapsed_ms
    }
}

/// Stopped → Running. Returns `false` when already running.
pub fn start(sw: &mut StopwatchData, now_ms: i64) -> bool {
    if sw.is_running {
        return false;
    }
    let elapsed = i64::try_from(sw.elapsed_ms).unwrap_or(i64::MAX);
    sw.start_epoch_ms = now_ms.saturating_sub(elapsed);
    sw.is_running = true;
    true
}

/// Running → Stopped, keeping the elapsed time. Returns `false` when already stopped.
pub fn stop(sw: &mut StopwatchData, now_ms: i64) -> bool {
    if !sw.is_running {
        return false;
    }
    sw.elapsed_ms = elapsed_at(sw, now_ms);
    sw.is_running = false;
    true
}

/// Any → Stopped with zero elapsed time and no laps.
/// Returns `true` if the stopwatch was running before the reset.
pub fn reset(sw: &mut StopwatchData, now_ms: i64) -> bool {
    let was_running = stop(sw, now_ms);
    sw.elapsed_ms = 0;
    sw.laps.clear();
    was_running
}

/// Periodic refresh while running. Returns `false` if the stopwatch is stopped.
pub fn tick(sw: &mut StopwatchData, now_ms: i64) -> bool {
    if !sw.is_running {
        return false;
    }
    sw.elapsed_ms = elapsed_at(sw, now_ms);
    true
}

/// Record a lap (newest first, at most [`MAX_LAPS`]). Only valid while running.
pub fn lap(sw: &mut StopwatchData, now_ms: i64) -> Option<&Lap> {
    if !sw.is_running {
        return None;
    }
    sw.elapsed_ms = elapsed_at(sw, now_ms);

    let number = sw.laps.first().map_or(1, |newest| newest.number + 1);
    sw.laps.insert(
        0,
        Lap {
            number,
            formatted_time: format_elapsed(sw.elapsed_ms),
            timestamp: now_ms,
        },
    );
    sw.laps.truncate(MAX_LAPS);

    sw.laps.first()
}
