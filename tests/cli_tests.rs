mod common;
use common::{init_db, rdb, stored_widgets};

use predicates::str::contains;
use rdashboard::models::widget_kind::WidgetKind;

#[test]
fn test_init_creates_empty_collection() {
    let db_path = init_db("cli_init");
    assert!(stored_widgets(&db_path).is_empty());

    rdb("cli_init")
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("No widgets yet"));
}

#[test]
fn test_add_counter_and_increment() {
    let db_path = init_db("cli_counter");

    rdb("cli_counter")
        .args(["--db", &db_path, "add", "counter", "--title", "Coffee"])
        .assert()
        .success()
        .stdout(contains("Added counter widget 'Coffee'"));

    let id = stored_widgets(&db_path)[0].id.clone();

    for _ in 0..2 {
        rdb("cli_counter")
            .args(["--db", &db_path, "counter", &id, "inc"])
            .assert()
            .success();
    }
    rdb("cli_counter")
        .args(["--db", &db_path, "counter", &id, "dec"])
        .assert()
        .success()
        .stdout(contains(format!("Counter {} = 1", id)));

    let widgets = stored_widgets(&db_path);
    assert_eq!(widgets[0].title, "Coffee");
    assert_eq!(widgets[0].counter().map(|c| c.value), Some(1));
}

#[test]
fn test_add_notes_with_default_title() {
    let db_path = init_db("cli_notes");

    rdb("cli_notes")
        .args(["--db", &db_path, "add", "notes", "--content", "buy milk"])
        .assert()
        .success()
        .stdout(contains("My notes"));

    let id = stored_widgets(&db_path)[0].id.clone();
    rdb("cli_notes")
        .args(["--db", &db_path, "note", &id, "buy bread"])
        .assert()
        .success();

    rdb("cli_notes")
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("buy bread"));
}

#[test]
fn test_add_rejects_unknown_type() {
    let db_path = init_db("cli_bad_type");

    rdb("cli_bad_type")
        .args(["--db", &db_path, "add", "calendar"])
        .assert()
        .failure()
        .stderr(contains("Invalid widget type"));

    assert!(stored_widgets(&db_path).is_empty());
}

#[test]
fn test_counter_on_wrong_widget_type_fails() {
    let db_path = init_db("cli_wrong_type");

    rdb("cli_wrong_type")
        .args(["--db", &db_path, "add", "basic"])
        .assert()
        .success();
    let id = stored_widgets(&db_path)[0].id.clone();

    rdb("cli_wrong_type")
        .args(["--db", &db_path, "counter", &id, "inc"])
        .assert()
        .failure()
        .stderr(contains("operation requires counter"));
}

#[test]
fn test_stopwatch_across_invocations() {
    let db_path = init_db("cli_stopwatch");

    rdb("cli_stopwatch")
        .args(["--db", &db_path, "add", "stopwatch"])
        .assert()
        .success();
    let id = stored_widgets(&db_path)[0].id.clone();

    rdb("cli_stopwatch")
        .args(["--db", &db_path, "stopwatch", &id, "lap"])
        .assert()
        .success()
        .stdout(contains("Laps can only be taken while the stopwatch is running."));

    rdb("cli_stopwatch")
        .args(["--db", &db_path, "stopwatch", &id, "start"])
        .assert()
        .success();
    assert!(stored_widgets(&db_path)[0].is_running_stopwatch());

    rdb("cli_stopwatch")
        .args(["--db", &db_path, "stopwatch", &id, "start"])
        .assert()
        .success()
        .stdout(contains("Stopwatch is already running."));

    rdb("cli_stopwatch")
        .args(["--db", &db_path, "stopwatch", &id, "lap"])
        .assert()
        .success();

    rdb("cli_stopwatch")
        .args(["--db", &db_path, "stopwatch", &id, "stop"])
        .assert()
        .success();

    let widgets = stored_widgets(&db_path);
    let sw = widgets[0].stopwatch().expect("stopwatch data");
    assert!(!sw.is_running);
    assert_eq!(sw.laps.len(), 1);
    assert_eq!(sw.laps[0].number, 1);

    rdb("cli_stopwatch")
        .args(["--db", &db_path, "stopwatch", &id, "show"])
        .assert()
        .success()
        .stdout(contains("stopped"));
}

#[test]
fn test_del_unknown_id_fails() {
    let db_path = init_db("cli_del_unknown");

    rdb("cli_del_unknown")
        .args(["--db", &db_path, "del", "12345", "--force"])
        .assert()
        .failure()
        .stderr(contains("No widget found with id 12345"));
}

#[test]
fn test_del_force_removes_widget() {
    let db_path = init_db("cli_del");

    rdb("cli_del")
        .args(["--db", &db_path, "add", "counter"])
        .assert()
        .success();
    rdb("cli_del")
        .args(["--db", &db_path, "add", "stopwatch"])
        .assert()
        .success();

    let widgets = stored_widgets(&db_path);
    let counter_id = widgets
        .iter()
        .find(|w| w.kind() == WidgetKind::Counter)
        .map(|w| w.id.clone())
        .expect("counter");

    rdb("cli_del")
        .args(["--db", &db_path, "del", &counter_id, "-f"])
        .assert()
        .success()
        .stdout(contains("Widget 'My counter' has been deleted."));

    let widgets = stored_widgets(&db_path);
    assert_eq!(widgets.len(), 1);
    assert_eq!(widgets[0].kind(), WidgetKind::Stopwatch);
}

#[test]
fn test_del_cancelled_without_confirmation() {
    let db_path = init_db("cli_del_cancel");

    rdb("cli_del_cancel")
        .args(["--db", &db_path, "add", "counter"])
        .assert()
        .success();
    let id = stored_widgets(&db_path)[0].id.clone();

    rdb("cli_del_cancel")
        .args(["--db", &db_path, "del", &id])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Operation cancelled."));

    assert_eq!(stored_widgets(&db_path).len(), 1);
}

#[test]
fn test_moon_for_fixed_date() {
    rdb("cli_moon")
        .args(["moon", "--date", "2024-01-15T00:00:00Z"])
        .assert()
        .success()
        .stdout(contains("Young Moon"))
        .stdout(contains("3.5 days"));

    rdb("cli_moon")
        .args(["moon", "--date", "2024-01-15T00:00:00Z", "--json"])
        .assert()
        .success()
        .stdout(contains("\"phase_name\": \"Young Moon\""));
}

#[test]
fn test_moon_rejects_bad_date() {
    rdb("cli_moon_bad")
        .args(["moon", "--date", "yesterday"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));
}

#[test]
fn test_weather_without_source_shows_placeholder() {
    rdb("cli_weather")
        .arg("weather")
        .assert()
        .success()
        .stdout(contains("No data"))
        .stdout(contains("Load error"));
}

#[test]
fn test_watch_runs_and_stops_timers() {
    let db_path = init_db("cli_watch");

    rdb("cli_watch")
        .args(["--db", &db_path, "watch", "--seconds", "1"])
        .assert()
        .success()
        .stdout(contains("Stopped 1 timer(s)."));
}

#[test]
fn test_log_records_operations() {
    let db_path = init_db("cli_log");

    rdb("cli_log")
        .args(["--db", &db_path, "add", "counter"])
        .assert()
        .success();

    rdb("cli_log")
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("init"))
        .stdout(contains("add"));
}
