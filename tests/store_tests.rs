use chrono::Local;
use momentum::models::day_start;
use momentum::storage::Storage;
use momentum::store::TaskStore;
use tempfile::TempDir;
use uuid::Uuid;

fn test_store() -> (TempDir, TaskStore) {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::at(dir.path().join("tasks.json"));
    (dir, TaskStore::load(storage))
}

#[test]
fn add_rejects_blank_names() {
    let (_dir, mut store) = test_store();

    assert_eq!(store.add("", false, Local::now()), None);
    assert_eq!(store.add("   ", false, Local::now()), None);
    assert!(store.snapshot().is_empty());
}

#[test]
fn add_trims_surrounding_whitespace() {
    let (_dir, mut store) = test_store();

    store.add("  Run  ", false, Local::now()).unwrap();
    assert_eq!(store.snapshot()[0].name, "Run");
}

#[test]
fn add_remove_round_trip() {
    let (_dir, mut store) = test_store();

    store.add("Walk dog", false, Local::now()).unwrap();
    let before: Vec<_> = store.snapshot().to_vec();

    let id = store.add("Run", false, Local::now()).unwrap();
    assert_eq!(store.snapshot().len(), 2);

    assert!(store.remove(id));
    assert_eq!(store.snapshot(), before.as_slice());
}

#[test]
fn toggle_flips_flag_and_tracks_timestamp() {
    let (_dir, mut store) = test_store();
    let id = store.add("Meditate", true, Local::now()).unwrap();

    assert!(store.toggle_complete(id));
    let t = store.snapshot().iter().find(|t| t.id == id).unwrap();
    assert!(t.is_completed);
    assert!(t.completed_at.is_some());

    assert!(store.toggle_complete(id));
    let t = store.snapshot().iter().find(|t| t.id == id).unwrap();
    assert!(!t.is_completed);
    assert!(t.completed_at.is_none());

    // Re-completing stamps a fresh instant; presence must track the flag.
    assert!(store.toggle_complete(id));
    let t = store.snapshot().iter().find(|t| t.id == id).unwrap();
    assert!(t.is_completed);
    assert!(t.completed_at.is_some());
}

#[test]
fn unknown_ids_are_idempotent_noops() {
    let (_dir, mut store) = test_store();
    store.add("Run", false, Local::now()).unwrap();
    let before: Vec<_> = store.snapshot().to_vec();

    assert!(!store.remove(Uuid::new_v4()));
    assert!(!store.toggle_complete(Uuid::new_v4()));
    assert_eq!(store.snapshot(), before.as_slice());
}

#[test]
fn persists_and_reloads_across_process_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.json");

    let mut store = TaskStore::load(Storage::at(path.clone()));
    let id = store.add("Run", false, Local::now()).unwrap();
    store.add("Meditate", true, Local::now()).unwrap();
    store.toggle_complete(id);
    let before: Vec<_> = store.snapshot().to_vec();
    drop(store);

    let reloaded = TaskStore::load(Storage::at(path));
    assert_eq!(reloaded.snapshot(), before.as_slice());
}

#[test]
fn corrupt_snapshot_loads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.json");
    std::fs::write(&path, "{not json").unwrap();

    let store = TaskStore::load(Storage::at(path));
    assert!(store.snapshot().is_empty());
}

#[test]
fn snapshot_uses_camel_case_field_names() {
    let (_dir, mut store) = test_store();
    let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    store.add("Run", true, day_start(date)).unwrap();

    let raw = std::fs::read_to_string(store.storage().tasks_path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let obj = value.as_array().unwrap()[0].as_object().unwrap();

    for key in ["id", "name", "isDailyHabit", "isCompleted", "dueDate", "completedAt"] {
        assert!(obj.contains_key(key), "missing field {key}");
    }
    assert_eq!(obj["isDailyHabit"], serde_json::Value::Bool(true));
    assert_eq!(obj["completedAt"], serde_json::Value::Null);
}
