use rdashboard::core::store::{Effect, WidgetOp, WidgetStore};
use rdashboard::db::initialize::init_db;
use rdashboard::db::kv::{KeyValueSlot, MemorySlot, SqliteSlot, WIDGETS_KEY};
use rdashboard::db::pool::DbPool;
use rdashboard::errors::AppError;
use rdashboard::models::widget::WidgetData;
use rdashboard::models::widget_kind::WidgetKind;
use serde_json::Value;

const NOW: i64 = 1_760_000_000_000;

fn empty_store() -> WidgetStore<MemorySlot> {
    WidgetStore::open(MemorySlot::new(), WIDGETS_KEY)
}

fn saved_json(store: &WidgetStore<MemorySlot>) -> Value {
    let raw = store.slot().get(WIDGETS_KEY).expect("saved blob");
    serde_json::from_str(raw).expect("valid json")
}

#[test]
fn test_load_absent_slot_is_empty() {
    let store = empty_store();
    assert!(store.records().is_empty());
    assert_eq!(store.slot().writes, 0);
}

#[test]
fn test_load_malformed_slot_is_empty() {
    let store = WidgetStore::open(MemorySlot::with_value(WIDGETS_KEY, "{not json"), WIDGETS_KEY);
    assert!(store.records().is_empty());
}

#[test]
fn test_create_assigns_unique_increasing_ids() {
    let mut store = empty_store();
    let a = store.create(WidgetKind::Counter, "Cups", None, NOW).unwrap();
    let b = store.create(WidgetKind::Notes, "Todo", Some("milk"), NOW).unwrap();
    let c = store.create(WidgetKind::Basic, "Hi", None, NOW - 5_000).unwrap();

    assert_eq!(a.id, NOW.to_string());
    assert_eq!(b.id, (NOW + 1).to_string());
    assert_eq!(c.id, (NOW + 2).to_string());

    // insertion order is display order
    let ids: Vec<&str> = store.records().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec![a.id.as_str(), b.id.as_str(), c.id.as_str()]);
    assert_eq!(store.slot().writes, 3);
}

#[test]
fn test_create_fills_type_defaults() {
    let mut store = empty_store();
    let counter = store.create(WidgetKind::Counter, "  ", Some("ignored"), NOW).unwrap();
    let notes = store.create(WidgetKind::Notes, "", Some("buy milk"), NOW).unwrap();

    assert_eq!(counter.title, "My counter");
    assert_eq!(counter.icon, "stats-chart");
    assert_eq!(counter.counter().map(|c| c.value), Some(0));

    assert_eq!(notes.title, "My notes");
    assert_eq!(notes.icon, "document-text");
    match &notes.data {
        WidgetData::Notes(t) => assert_eq!(t.content, "buy milk"),
        other => panic!("unexpected data {other:?}"),
    }
}

#[test]
fn test_persisted_shape() {
    let mut store = empty_store();
    store.create(WidgetKind::Stopwatch, "Run", None, NOW).unwrap();
    store.create(WidgetKind::Counter, "Cups", None, NOW).unwrap();

    let json = saved_json(&store);
    let first = &json[0];
    assert_eq!(first["type"], "stopwatch");
    assert_eq!(first["icon"], "stopwatch");
    assert_eq!(first["data"]["elapsedMs"], 0);
    assert_eq!(first["data"]["isRunning"], false);
    assert!(first["data"]["laps"].as_array().unwrap().is_empty());
    assert_eq!(json[1]["type"], "counter");
    assert_eq!(json[1]["data"]["value"], 0);
}

#[test]
fn test_reload_from_slot() {
    let mut store = empty_store();
    let created = store.create(WidgetKind::Counter, "Cups", None, NOW).unwrap();
    store.mutate(&created.id, WidgetOp::Increment, NOW).unwrap();

    let reopened = WidgetStore::open(store.slot().clone(), WIDGETS_KEY);
    assert_eq!(reopened.records(), store.records());

    // ids keep increasing after a reload
    let mut reopened = reopened;
    let next = reopened.create(WidgetKind::Basic, "x", None, NOW - 1).unwrap();
    assert_eq!(next.id, (NOW + 1).to_string());
}

#[test]
fn test_counter_never_negative() {
    let mut store = empty_store();
    let id = store.create(WidgetKind::Counter, "c", None, NOW).unwrap().id;

    store.mutate(&id, WidgetOp::Decrement, NOW).unwrap();
    assert_eq!(store.get(&id).unwrap().counter().unwrap().value, 0);

    store.mutate(&id, WidgetOp::Increment, NOW).unwrap();
    store.mutate(&id, WidgetOp::Increment, NOW).unwrap();
    store.mutate(&id, WidgetOp::Decrement, NOW).unwrap();
    assert_eq!(store.get(&id).unwrap().counter().unwrap().value, 1);

    store.mutate(&id, WidgetOp::ResetCounter, NOW).unwrap();
    assert_eq!(store.get(&id).unwrap().counter().unwrap().value, 0);
    assert_eq!(saved_json(&store)[0]["data"]["value"], 0);
}

#[test]
fn test_every_mutation_is_persisted() {
    let mut store = empty_store();
    let id = store.create(WidgetKind::Counter, "c", None, NOW).unwrap().id;
    let before = store.slot().writes;

    store.mutate(&id, WidgetOp::Increment, NOW).unwrap();
    assert_eq!(store.slot().writes, before + 1);
    assert_eq!(saved_json(&store)[0]["data"]["value"], 1);
}

#[test]
fn test_noop_stopwatch_ops_do_not_write() {
    let mut store = empty_store();
    let id = store.create(WidgetKind::Stopwatch, "s", None, NOW).unwrap().id;
    let before = store.slot().writes;

    assert_eq!(store.mutate(&id, WidgetOp::Stop, NOW).unwrap(), Effect::Unchanged);
    assert_eq!(store.mutate(&id, WidgetOp::Lap, NOW).unwrap(), Effect::Unchanged);
    assert_eq!(store.slot().writes, before);

    assert_eq!(store.mutate(&id, WidgetOp::Start, NOW).unwrap(), Effect::Started);
    assert_eq!(store.mutate(&id, WidgetOp::Start, NOW + 10).unwrap(), Effect::Unchanged);
    assert_eq!(store.mutate(&id, WidgetOp::Lap, NOW + 500).unwrap(), Effect::Updated);
    assert_eq!(
        store.mutate(&id, WidgetOp::ResetStopwatch, NOW + 600).unwrap(),
        Effect::Stopped
    );
}

#[test]
fn test_remove_unknown_id_changes_nothing() {
    let mut store = empty_store();
    store.create(WidgetKind::Counter, "c", None, NOW).unwrap();
    let blob = store.slot().get(WIDGETS_KEY).map(str::to_string);
    let writes = store.slot().writes;

    assert!(store.remove("does-not-exist", NOW).unwrap().is_none());
    assert_eq!(store.records().len(), 1);
    assert_eq!(store.slot().writes, writes);
    assert_eq!(store.slot().get(WIDGETS_KEY).map(str::to_string), blob);
}

#[test]
fn test_remove_stops_running_stopwatch_first() {
    let mut store = empty_store();
    let id = store.create(WidgetKind::Stopwatch, "s", None, NOW).unwrap().id;
    store.mutate(&id, WidgetOp::Start, NOW).unwrap();

    let removed = store.remove(&id, NOW + 1_500).unwrap().expect("removed");
    let sw = removed.stopwatch().unwrap();
    assert!(!sw.is_running);
    assert_eq!(sw.elapsed_ms, 1_500);
    assert!(store.records().is_empty());
    assert_eq!(saved_json(&store), Value::Array(vec![]));
}

#[test]
fn test_wrong_type_and_unknown_id() {
    let mut store = empty_store();
    let id = store.create(WidgetKind::Notes, "n", None, NOW).unwrap().id;

    let err = store.mutate(&id, WidgetOp::Increment, NOW).unwrap_err();
    assert!(matches!(err, AppError::WrongWidgetType { expected: "counter", actual: "notes", .. }));

    let err = store.mutate("nope", WidgetOp::Increment, NOW).unwrap_err();
    assert!(matches!(err, AppError::WidgetNotFound(_)));

    store
        .mutate(&id, WidgetOp::SetContent("updated".into()), NOW)
        .unwrap();
    assert_eq!(saved_json(&store)[0]["data"]["content"], "updated");
}

#[test]
fn test_persist_failure_keeps_memory_state() {
    let mut store = empty_store();
    let id = store.create(WidgetKind::Counter, "c", None, NOW).unwrap().id;
    store.slot_mut().fail_writes = true;

    let err = store.mutate(&id, WidgetOp::Increment, NOW).unwrap_err();
    assert!(matches!(err, AppError::Storage(_)));
    assert_eq!(store.get(&id).unwrap().counter().unwrap().value, 1);
    assert_eq!(saved_json(&store)[0]["data"]["value"], 0);

    // next successful save catches the slot up
    store.slot_mut().fail_writes = false;
    store.mutate(&id, WidgetOp::Increment, NOW).unwrap();
    assert_eq!(saved_json(&store)[0]["data"]["value"], 2);
}

#[test]
fn test_sqlite_slot_overwrites_value() {
    let pool = DbPool::in_memory().unwrap();
    init_db(&pool.conn).unwrap();
    let mut slot = SqliteSlot::new(pool);

    assert_eq!(slot.read(WIDGETS_KEY).unwrap(), None);
    slot.write(WIDGETS_KEY, "[]").unwrap();
    slot.write(WIDGETS_KEY, "[1]").unwrap();
    assert_eq!(slot.read(WIDGETS_KEY).unwrap().as_deref(), Some("[1]"));

    let count: i64 = slot
        .pool()
        .conn
        .query_row("SELECT COUNT(*) FROM kv", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn test_sync_adopts_slot_unless_local_changes_are_unsaved() {
    let mut store = empty_store();
    let id = store.create(WidgetKind::Counter, "c", None, NOW).unwrap().id;

    // another writer bumps the counter in the slot
    let mut other = WidgetStore::open(store.slot().clone(), WIDGETS_KEY);
    other.mutate(&id, WidgetOp::Increment, NOW).unwrap();
    store.slot_mut().write(WIDGETS_KEY, other.slot().get(WIDGETS_KEY).unwrap()).unwrap();

    assert!(store.sync_from_slot());
    assert_eq!(store.get(&id).unwrap().counter().unwrap().value, 1);

    // a failed local write keeps memory authoritative
    store.slot_mut().fail_writes = true;
    store.mutate(&id, WidgetOp::ResetCounter, NOW).unwrap_err();
    assert!(store.has_unsaved_changes());
    assert!(!store.sync_from_slot());
    assert_eq!(store.get(&id).unwrap().counter().unwrap().value, 0);
}
