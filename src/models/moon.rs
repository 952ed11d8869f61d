use serde::{Deserialize, Serialize};

/// Half-open lunar age interval `[min, max)` in days mapped to a named phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseRange {
    pub name: String,
    pub emoji: String,
    pub min: f64,
    pub max: f64,
}

impl PhaseRange {
    pub fn new(name: &str, emoji: &str, min: f64, max: f64) -> Self {
        Self {
            name: name.to_string(),
            emoji: emoji.to_string(),
            min,
            max,
        }
    }

    pub fn contains(&self, age_days: f64) -> bool {
        age_days >= self.min && age_days < self.max
    }
}

/// Document shape returned by phase-table sources: `{ "moonPhases": [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseTable {
    pub moon_phases: Vec<PhaseRange>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoonReading {
    pub phase_name: String,
    pub emoji: String,
    pub age_days: f64, // rounded to one decimal
    pub description: String,
}

impl MoonReading {
    pub fn age_label(&self) -> String {
        format!("{:.1} days", self.age_days)
    }
}
