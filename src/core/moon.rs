//! Moon phase calculation.
//!
//! The lunar age is the number of days since a reference new moon, reduced
//! modulo the synodic month. The phase is looked up in an ordered table of
//! half-open `[min, max)` ranges; the first match wins and, if nothing
//! matches (gap in the table or age past the last `max`), the last entry is
//! used.

use crate::errors::{AppError, AppResult};
use crate::models::moon::{MoonReading, PhaseRange};
use chrono::{DateTime, Utc};

pub const DEFAULT_REFERENCE_NEW_MOON: &str = "2024-01-11T11:57:00Z";
pub const DEFAULT_LUNAR_CYCLE_DAYS: f64 = 29.530_588_2;

const MS_PER_DAY: f64 = 86_400_000.0;

/// Lunar parameters shared by every calculation of a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonCalculator {
    pub reference_new_moon: DateTime<Utc>,
    pub cycle_length_days: f64,
}

impl Default for MoonCalculator {
    fn default() -> Self {
        Self {
            reference_new_moon: DateTime::parse_from_rfc3339(DEFAULT_REFERENCE_NEW_MOON)
                .map(|d| d.with_timezone(&Utc))
                .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
            cycle_length_days: DEFAULT_LUNAR_CYCLE_DAYS,
        }
    }
}

impl MoonCalculator {
    pub fn new(reference_new_moon: DateTime<Utc>, cycle_length_days: f64) -> AppResult<Self> {
        check_cycle_length(cycle_length_days)?;
        Ok(Self {
            reference_new_moon,
            cycle_length_days,
        })
    }

    /// Parse the reference epoch from an RFC 3339 string (as stored in the config file).
    pub fn from_config(reference: &str, cycle_length_days: f64) -> AppResult<Self> {
        let reference = DateTime::parse_from_rfc3339(reference)
            .map_err(|e| AppError::InvalidDate(format!("{reference}: {e}")))?
            .with_timezone(&Utc);
        Self::new(reference, cycle_length_days)
    }

    pub fn calculate(&self, date: DateTime<Utc>, phases: &[PhaseRange]) -> AppResult<MoonReading> {
        calculate(date, phases, self.reference_new_moon, self.cycle_length_days)
    }

    pub fn age_days(&self, date: DateTime<Utc>) -> f64 {
        lunar_age(date, self.reference_new_moon, self.cycle_length_days)
    }
}

fn check_cycle_length(cycle_length_days: f64) -> AppResult<()> {
    if cycle_length_days.is_finite() && cycle_length_days > 0.0 {
        Ok(())
    } else {
        Err(AppError::InvalidCycleLength(cycle_length_days))
    }
}

/// Days since `reference`, reduced into `[0, cycle_length_days)`.
pub fn lunar_age(date: DateTime<Utc>, reference: DateTime<Utc>, cycle_length_days: f64) -> f64 {
    let diff_days = (date - reference).num_milliseconds() as f64 / MS_PER_DAY;
    let age = diff_days % cycle_length_days;
    if age < 0.0 {
        age + cycle_length_days
    } else {
        age
    }
}

pub fn calculate(
    date: DateTime<Utc>,
    phases: &[PhaseRange],
    reference_new_moon: DateTime<Utc>,
    cycle_length_days: f64,
) -> AppResult<MoonReading> {
    check_cycle_length(cycle_length_days)?;
    let age = lunar_age(date, reference_new_moon, cycle_length_days);
    let phase = determine_phase(age, phases)?;

    Ok(MoonReading {
        phase_name: phase.name.clone(),
        emoji: phase.emoji.clone(),
        age_days: (age * 10.0).round() / 10.0,
        description: describe_phase(&phase.name).to_string(),
    })
}

/// First range containing `age` wins; with no match the last entry is returned.
pub fn determine_phase(age: f64, phases: &[PhaseRange]) -> AppResult<&PhaseRange> {
    let last = phases
        .last()
        .ok_or_else(|| AppError::InvalidPhaseTable("the phase table is empty".into()))?;

    Ok(phases.iter().find(|p| p.contains(age)).unwrap_or(last))
}

pub fn describe_phase(name: &str) -> &'static str {
    match name {
        "New Moon" => "The moon is not visible in the sky",
        "Young Moon" => "A thin crescent after the new moon",
        "First Quarter" => "Half of the lunar disc is lit",
        "Waxing Moon" => "The moon keeps growing",
        "Full Moon" => "The moon is fully lit",
        "Waning Moon" => "The moon starts to shrink",
        "Last Quarter" => "The other half of the disc is lit",
        "Old Moon" => "A thin crescent before the new moon",
        _ => "Moon phase",
    }
}

/// Complete eight-phase table covering `[0, 29.53)`.
pub fn default_phases() -> Vec<PhaseRange> {
    vec![
        PhaseRange::new("New Moon", "🌑", 0.0, 1.0),
        PhaseRange::new("Young Moon", "🌒", 1.0, 6.38),
        PhaseRange::new("First Quarter", "🌓", 6.38, 8.38),
        PhaseRange::new("Waxing Moon", "🌔", 8.38, 13.38),
        PhaseRange::new("Full Moon", "🌕", 13.38, 15.38),
        PhaseRange::new("Waning Moon", "🌖", 15.38, 20.38),
        PhaseRange::new("Last Quarter", "🌗", 20.38, 22.38),
        PhaseRange::new("Old Moon", "🌘", 22.38, 29.53),
    ]
}

/// Minimal table used when the phase-table source is unavailable.
pub fn fallback_phases() -> Vec<PhaseRange> {
    vec![
        PhaseRange::new("New Moon", "🌑", 0.0, 1.0),
        PhaseRange::new("Full Moon", "🌕", 13.38, 15.38),
    ]
}
