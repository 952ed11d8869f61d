//! Widget state store.
//!
//! Holds the ordered widget collection in memory and writes the whole
//! collection to a key-value slot after every state change. The in-memory
//! list is the source of truth: a failed write is reported to the caller but
//! never rolls the list back.
//!
//! Other processes may write the same slot while a long-lived session is
//! open. [`WidgetStore::sync_from_slot`] adopts their changes; it is skipped
//! while the last write failed, so unsaved local state is never dropped.

use crate::core::{counter, stopwatch};
use crate::db::kv::KeyValueSlot;
use crate::errors::{AppError, AppResult};
use crate::models::widget::{WidgetData, WidgetRecord};
use crate::models::widget_kind::WidgetKind;
use crate::ui::messages::warning;

/// Type-specific mutation applied through [`WidgetStore::mutate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetOp {
    Increment,
    Decrement,
    ResetCounter,
    Start,
    Stop,
    ResetStopwatch,
    Lap,
    SetContent(String),
}

impl WidgetOp {
    fn expected_kind(&self) -> &'static str {
        match self {
            WidgetOp::Increment | WidgetOp::Decrement | WidgetOp::ResetCounter => "counter",
            WidgetOp::Start | WidgetOp::Stop | WidgetOp::ResetStopwatch | WidgetOp::Lap => {
                "stopwatch"
            }
            WidgetOp::SetContent(_) => "notes/basic",
        }
    }
}

/// What a mutation did to the stopwatch lifecycle, so the caller can launch
/// or cancel the matching periodic job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Unchanged,
    Updated,
    Started,
    Stopped,
}

pub struct WidgetStore<S: KeyValueSlot> {
    slot: S,
    key: String,
    records: Vec<WidgetRecord>,
    last_id: i64,
    dirty: bool,
}

impl<S: KeyValueSlot> WidgetStore<S> {
    /// Open the store and load whatever the slot currently holds.
    pub fn open(slot: S, key: &str) -> Self {
        let mut store = Self {
            slot,
            key: key.to_string(),
            records: Vec::new(),
            last_id: 0,
            dirty: false,
        };
        store.records = store.load();
        store.bump_last_id();
        store
    }

    fn bump_last_id(&mut self) {
        let highest = self
            .records
            .iter()
            .filter_map(|r| r.id.parse::<i64>().ok())
            .max()
            .unwrap_or(0);
        self.last_id = self.last_id.max(highest);
    }

    /// Deserialize the persisted collection. Missing, unreadable or malformed
    /// data yields an empty collection.
    pub fn load(&self) -> Vec<WidgetRecord> {
        let raw = match self.slot.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warning(format!("Could not read saved widgets: {}", e));
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<WidgetRecord>>(&raw) {
            Ok(records) => records,
            Err(e) => {
                warning(format!("Saved widgets are malformed, starting empty: {}", e));
                Vec::new()
            }
        }
    }

    /// Serialize and overwrite the full collection.
    pub fn save(&mut self) -> AppResult<()> {
        let json = serde_json::to_string(&self.records)?;
        let result = self.slot.write(&self.key, &json);
        self.dirty = result.is_err();
        result
    }

    /// `true` while the slot is behind memory because the last write failed.
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    /// Replace the in-memory list with what the slot holds now. Returns
    /// `false` (and keeps memory as is) when there are unsaved changes or the
    /// slot cannot be read or parsed.
    pub fn sync_from_slot(&mut self) -> bool {
        if self.dirty {
            return false;
        }

        let parsed = match self.slot.read(&self.key) {
            Ok(Some(raw)) => serde_json::from_str::<Vec<WidgetRecord>>(&raw).ok(),
            Ok(None) => Some(Vec::new()),
            Err(_) => None,
        };

        match parsed {
            Some(records) => {
                self.records = records;
                self.bump_last_id();
                true
            }
            None => false,
        }
    }

    pub fn records(&self) -> &[WidgetRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&WidgetRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    pub fn slot_mut(&mut self) -> &mut S {
        &mut self.slot
    }

    /// Ids of every stopwatch currently marked as running.
    pub fn running_stopwatches(&self) -> Vec<String> {
        self.records
            .iter()
            .filter(|r| r.is_running_stopwatch())
            .map(|r| r.id.clone())
            .collect()
    }

    /// Creation-time id, strictly greater than every id handed out before.
    fn next_id(&mut self, now_ms: i64) -> String {
        let id = now_ms.max(self.last_id.saturating_add(1));
        self.last_id = id;
        id.to_string()
    }

    /// Append a new widget with its type defaults and persist.
    pub fn create(
        &mut self,
        kind: WidgetKind,
        title: &str,
        content: Option<&str>,
        now_ms: i64,
    ) -> AppResult<WidgetRecord> {
        let id = self.next_id(now_ms);
        let content = content.filter(|_| kind.accepts_content());
        let record = WidgetRecord::new(id, kind, title, content);

        self.records.push(record.clone());
        self.save()?;
        Ok(record)
    }

    /// Remove a widget, stopping it first if it is a running stopwatch.
    /// Unknown ids leave the collection and the slot untouched.
    pub fn remove(&mut self, id: &str, now_ms: i64) -> AppResult<Option<WidgetRecord>> {
        let Some(pos) = self.records.iter().position(|r| r.id == id) else {
            return Ok(None);
        };

        if let WidgetData::Stopwatch(sw) = &mut self.records[pos].data {
            stopwatch::stop(sw, now_ms);
        }

        let removed = self.records.remove(pos);
        self.save()?;
        Ok(Some(removed))
    }

    /// Apply a type-specific operation and persist when something changed.
    pub fn mutate(&mut self, id: &str, op: WidgetOp, now_ms: i64) -> AppResult<Effect> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::WidgetNotFound(id.to_string()))?;

        let effect = match (&mut record.data, &op) {
            (WidgetData::Counter(c), WidgetOp::Increment) => {
                counter::increment(c);
                Effect::Updated
            }
            (WidgetData::Counter(c), WidgetOp::Decrement) => {
                counter::decrement(c);
                Effect::Updated
            }
            (WidgetData::Counter(c), WidgetOp::ResetCounter) => {
                counter::reset(c);
                Effect::Updated
            }
            (WidgetData::Stopwatch(sw), WidgetOp::Start) => {
                if stopwatch::start(sw, now_ms) {
                    Effect::Started
                } else {
                    Effect::Unchanged
                }
            }
            (WidgetData::Stopwatch(sw), WidgetOp::Stop) => {
                if stopwatch::stop(sw, now_ms) {
                    Effect::Stopped
                } else {
                    Effect::Unchanged
                }
            }
            (WidgetData::Stopwatch(sw), WidgetOp::ResetStopwatch) => {
                if stopwatch::reset(sw, now_ms) {
                    Effect::Stopped
                } else {
                    Effect::Updated
                }
            }
            (WidgetData::Stopwatch(sw), WidgetOp::Lap) => {
                if stopwatch::lap(sw, now_ms).is_some() {
                    Effect::Updated
                } else {
                    Effect::Unchanged
                }
            }
            (WidgetData::Notes(t) | WidgetData::Basic(t), WidgetOp::SetContent(content)) => {
                t.content = content.clone();
                Effect::Updated
            }
            (data, op) => {
                return Err(AppError::WrongWidgetType {
                    id: id.to_string(),
                    expected: op.expected_kind(),
                    actual: data.kind().as_str(),
                });
            }
        };

        if effect != Effect::Unchanged {
            self.save()?;
        }
        Ok(effect)
    }

    /// Periodic stopwatch refresh: pick up changes made by other processes,
    /// recompute elapsed time and persist. Returns `false` (and writes
    /// nothing) when the widget is gone or stopped.
    pub fn tick_stopwatch(&mut self, id: &str, now_ms: i64) -> AppResult<bool> {
        self.sync_from_slot();

        let ticked = match self.records.iter_mut().find(|r| r.id == id) {
            Some(WidgetRecord {
                data: WidgetData::Stopwatch(sw),
                ..
            }) => stopwatch::tick(sw, now_ms),
            _ => false,
        };

        if ticked {
            self.save()?;
        }
        Ok(ticked)
    }
}
