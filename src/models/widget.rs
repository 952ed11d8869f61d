use super::widget_kind::WidgetKind;
use serde::{Deserialize, Serialize};

/// Maximum number of laps kept on a stopwatch (newest first).
pub const MAX_LAPS: usize = 20;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextData {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterData {
    #[serde(default)]
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lap {
    pub number: u32,
    pub formatted_time: String,
    pub timestamp: i64, // epoch ms at the moment the lap was taken
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StopwatchData {
    pub elapsed_ms: u64,
    pub is_running: bool,
    pub start_epoch_ms: i64,
    pub laps: Vec<Lap>,
}

/// Type-specific payload. Serialized next to the record as
/// `"type": "<kind>", "data": { ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum WidgetData {
    Basic(TextData),
    Counter(CounterData),
    Notes(TextData),
    Stopwatch(StopwatchData),
}

impl WidgetData {
    /// Default payload for a freshly created widget.
    pub fn initial(kind: WidgetKind, content: Option<&str>) -> Self {
        let text = || TextData {
            content: content.unwrap_or_default().to_string(),
        };

        match kind {
            WidgetKind::Basic => WidgetData::Basic(text()),
            WidgetKind::Notes => WidgetData::Notes(text()),
            WidgetKind::Counter => WidgetData::Counter(CounterData::default()),
            WidgetKind::Stopwatch => WidgetData::Stopwatch(StopwatchData::default()),
        }
    }

    pub fn kind(&self) -> WidgetKind {
        match self {
            WidgetData::Basic(_) => WidgetKind::Basic,
            WidgetData::Counter(_) => WidgetKind::Counter,
            WidgetData::Notes(_) => WidgetKind::Notes,
            WidgetData::Stopwatch(_) => WidgetKind::Stopwatch,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetRecord {
    pub id: String,
    pub title: String,
    #[serde(flatten)]
    pub data: WidgetData,
    pub icon: String,
}

impl WidgetRecord {
    /// Build a record with the type defaults (icon, initial data, fallback title).
    pub fn new(id: String, kind: WidgetKind, title: &str, content: Option<&str>) -> Self {
        let title = if title.trim().is_empty() {
            kind.default_title().to_string()
        } else {
            title.to_string()
        };

        Self {
            id,
            title,
            data: WidgetData::initial(kind, content),
            icon: kind.icon().to_string(),
        }
    }

    pub fn kind(&self) -> WidgetKind {
        self.data.kind()
    }

    pub fn stopwatch(&self) -> Option<&StopwatchData> {
        match &self.data {
            WidgetData::Stopwatch(sw) => Some(sw),
            _ => None,
        }
    }

    pub fn counter(&self) -> Option<&CounterData> {
        match &self.data {
            WidgetData::Counter(c) => Some(c),
            _ => None,
        }
    }

    pub fn is_running_stopwatch(&self) -> bool {
        self.stopwatch().is_some_and(|sw| sw.is_running)
    }
}
