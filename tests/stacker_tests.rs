use chrono::{Duration, NaiveDate};
use momentum::models::day_start;
use momentum::stacker::stack_for_day;
use momentum::storage::Storage;
use momentum::store::TaskStore;
use tempfile::TempDir;

fn test_store() -> (TempDir, TaskStore) {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::at(dir.path().join("tasks.json"));
    (dir, TaskStore::load(storage))
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()
}

fn yesterday() -> NaiveDate {
    today() - Duration::days(1)
}

#[test]
fn stacks_one_instance_per_distinct_habit_name() {
    let (_dir, mut store) = test_store();
    let meditate = store.add("Meditate", true, day_start(yesterday())).unwrap();
    store.add("Read", true, day_start(yesterday())).unwrap();
    store.toggle_complete(meditate);

    let created = stack_for_day(&mut store, today());

    assert_eq!(created, 2);
    for name in ["Meditate", "Read"] {
        let instances: Vec<_> = store
            .snapshot()
            .iter()
            .filter(|t| t.name == name && t.due_day() == today())
            .collect();
        assert_eq!(instances.len(), 1, "expected one instance of {name}");
        assert!(instances[0].is_daily_habit);
        assert!(!instances[0].is_completed);
    }
}

#[test]
fn second_run_same_day_is_a_noop() {
    let (_dir, mut store) = test_store();
    store.add("Meditate", true, day_start(yesterday())).unwrap();
    store.add("Read", true, day_start(yesterday())).unwrap();

    assert_eq!(stack_for_day(&mut store, today()), 2);
    let len_after_first = store.snapshot().len();

    assert_eq!(stack_for_day(&mut store, today()), 0);
    assert_eq!(store.snapshot().len(), len_after_first);
}

#[test]
fn marker_short_circuits_across_process_restarts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.json");

    let mut store = TaskStore::load(Storage::at(path.clone()));
    store.add("Meditate", true, day_start(yesterday())).unwrap();
    assert_eq!(stack_for_day(&mut store, today()), 1);
    drop(store);

    // A fresh process the same day must not stack again, even if today's
    // instance has been deleted in between.
    let mut store = TaskStore::load(Storage::at(path));
    let todays = store
        .snapshot()
        .iter()
        .find(|t| t.due_day() == today())
        .map(|t| t.id)
        .unwrap();
    store.remove(todays);
    assert_eq!(stack_for_day(&mut store, today()), 0);
}

#[test]
fn a_new_day_stacks_again() {
    let (_dir, mut store) = test_store();
    store.add("Meditate", true, day_start(yesterday())).unwrap();

    assert_eq!(stack_for_day(&mut store, yesterday()), 0); // instance already exists
    assert_eq!(stack_for_day(&mut store, today()), 1);
}

#[test]
fn existing_instance_today_is_not_duplicated() {
    let (_dir, mut store) = test_store();
    store.add("Meditate", true, day_start(today())).unwrap();
    store.add("Read", true, day_start(yesterday())).unwrap();

    assert_eq!(stack_for_day(&mut store, today()), 1);
    let meditations = store
        .snapshot()
        .iter()
        .filter(|t| t.name == "Meditate" && t.due_day() == today())
        .count();
    assert_eq!(meditations, 1);
}

#[test]
fn completed_instance_today_still_counts() {
    let (_dir, mut store) = test_store();
    let id = store.add("Meditate", true, day_start(today())).unwrap();
    store.toggle_complete(id);

    // Completing today's instance must not resurrect a fresh one.
    assert_eq!(stack_for_day(&mut store, today()), 0);
}

#[test]
fn one_time_tasks_are_not_stacked() {
    let (_dir, mut store) = test_store();
    store.add("Buy milk", false, day_start(yesterday())).unwrap();

    assert_eq!(stack_for_day(&mut store, today()), 0);
    assert!(store.snapshot().iter().all(|t| t.due_day() != today()));
}

#[test]
fn stacking_never_mutates_existing_tasks() {
    let (_dir, mut store) = test_store();
    let done = store.add("Meditate", true, day_start(yesterday())).unwrap();
    store.toggle_complete(done);
    store.add("Buy milk", false, day_start(yesterday())).unwrap();
    let before: Vec<_> = store.snapshot().to_vec();

    stack_for_day(&mut store, today());

    for old in &before {
        let still = store.snapshot().iter().find(|t| t.id == old.id).unwrap();
        assert_eq!(still, old);
    }
}
