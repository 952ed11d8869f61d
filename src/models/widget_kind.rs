use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    Basic,
    Counter,
    Notes,
    Stopwatch,
}

impl WidgetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetKind::Basic => "basic",
            WidgetKind::Counter => "counter",
            WidgetKind::Notes => "notes",
            WidgetKind::Stopwatch => "stopwatch",
        }
    }

    /// Helper: convert input code from CLI (lowercase or uppercase)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "basic" | "text" => Some(WidgetKind::Basic),
            "counter" => Some(WidgetKind::Counter),
            "notes" | "note" => Some(WidgetKind::Notes),
            "stopwatch" => Some(WidgetKind::Stopwatch),
            _ => None,
        }
    }

    /// Title used when the prompt leaves the title empty.
    pub fn default_title(&self) -> &'static str {
        match self {
            WidgetKind::Notes => "My notes",
            WidgetKind::Counter => "My counter",
            WidgetKind::Stopwatch => "Stopwatch",
            WidgetKind::Basic => "My text",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            WidgetKind::Notes => "document-text",
            WidgetKind::Counter => "stats-chart",
            WidgetKind::Stopwatch => "stopwatch",
            WidgetKind::Basic => "text",
        }
    }

    /// Only text widgets take initial content from the prompt.
    pub fn accepts_content(&self) -> bool {
        matches!(self, WidgetKind::Notes | WidgetKind::Basic)
    }
}
