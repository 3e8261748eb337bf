use chrono::{TimeZone, Utc};
use flipzy_core::{compute_next_review_at, Card, CardStore, CoreError, Quality};
use flipzy_json::JsonStore;
use std::fs;
use tempfile::tempdir;

fn card(id: &str, front: &str) -> Card {
    let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    Card::new_at(id, front, "answer", at).unwrap()
}

#[test]
fn missing_file_loads_empty_and_is_not_created() {
    let dir = tempdir().unwrap();
    let store = JsonStore::open_in(dir.path()).unwrap();
    assert!(store.load_all().is_empty());
    assert!(store.try_load_all().unwrap().is_empty());
    assert!(!store.path().exists());
    assert!(store.backups_dir().is_dir());
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempdir().unwrap();
    let store = JsonStore::open_in(dir.path()).unwrap();

    let reviewed = compute_next_review_at(
        card("b", "adios").with_example(Some("adios amigo".into())),
        Quality::new(5).unwrap(),
        Utc.with_ymd_and_hms(2024, 1, 3, 8, 30, 0).unwrap(),
    );
    let cards = vec![card("a", "hola").with_category("vocabulary"), reviewed];
    store.save_all(&cards).unwrap();
    assert_eq!(store.load_all(), cards);

    let again = store.load_all();
    store.save_all(&again).unwrap();
    assert_eq!(store.load_all(), cards);
}

#[test]
fn save_replaces_whole_collection() {
    let dir = tempdir().unwrap();
    let store = JsonStore::open_in(dir.path()).unwrap();
    store.save_all(&[card("a", "one"), card("b", "two")]).unwrap();
    store.save_all(&[card("c", "three")]).unwrap();

    let ids: Vec<String> = store.load_all().into_iter().map(|c| c.id).collect();
    assert_eq!(ids, ["c"]);
}

#[test]
fn absent_optionals_are_written_as_null() {
    let dir = tempdir().unwrap();
    let store = JsonStore::open_in(dir.path()).unwrap();
    store.add(card("a", "hola")).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
    let obj = raw[0].as_object().unwrap();
    assert!(obj["example"].is_null());
    assert!(obj["last_reviewed"].is_null());
    assert_eq!(obj["created_at"], "2024-01-02T03:04:05Z");
    assert_eq!(obj["next_review"], "2024-01-02T03:04:05Z");
}

#[test]
fn missing_category_reads_as_general() {
    let dir = tempdir().unwrap();
    let store = JsonStore::open_in(dir.path()).unwrap();
    fs::write(
        store.path(),
        r#"[{
            "id": "legacy",
            "front": "hola",
            "back": "hello",
            "example": null,
            "created_at": "2024-01-02T03:04:05Z",
            "ease_factor": 2.5,
            "interval": 1,
            "repetitions": 0,
            "next_review": "2024-01-02T03:04:05Z",
            "last_reviewed": null
        }]"#,
    )
    .unwrap();

    let cards = store.load_all();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].category, "general");
}

#[test]
fn malformed_file_loads_empty_but_try_load_reports_it() {
    let dir = tempdir().unwrap();
    let store = JsonStore::open_in(dir.path()).unwrap();
    fs::write(store.path(), "{ not json").unwrap();

    assert!(store.load_all().is_empty());
    assert!(matches!(store.try_load_all(), Err(CoreError::Malformed(_))));
}

#[test]
fn crud_goes_through_the_file() {
    let dir = tempdir().unwrap();
    let store = JsonStore::open_in(dir.path()).unwrap();
    store.add(card("a", "one")).unwrap();
    store.add(card("b", "two")).unwrap();

    let reopened = JsonStore::open_in(dir.path()).unwrap();
    let mut a = reopened.get_by_id("a").unwrap();
    a.back = "uno".into();
    reopened.update_by_id(&a).unwrap();
    reopened.delete_by_id("b").unwrap();

    let cards = store.load_all();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].back, "uno");
    assert!(store.get_by_id("b").is_none());
}

#[test]
fn deleting_unknown_id_leaves_collection_unchanged() {
    let dir = tempdir().unwrap();
    let store = JsonStore::open_in(dir.path()).unwrap();
    store.save_all(&[card("a", "one"), card("b", "two")]).unwrap();
    let before = store.load_all();

    store.delete_by_id("nope").unwrap();
    store.update_by_id(&card("nope", "ghost")).unwrap();
    assert_eq!(store.load_all(), before);
}

#[test]
fn backup_without_store_file_is_none() {
    let dir = tempdir().unwrap();
    let store = JsonStore::open_in(dir.path()).unwrap();
    assert_eq!(store.backup_now().unwrap(), None);

    fs::write(store.path(), "").unwrap();
    assert_eq!(store.backup_now().unwrap(), None);
}

#[test]
fn backup_copies_file_verbatim() {
    let dir = tempdir().unwrap();
    let store = JsonStore::open_in(dir.path()).unwrap();
    store.add(card("a", "one")).unwrap();

    let first = store.backup_now().unwrap().expect("backup path");
    let second = store.backup_now().unwrap().expect("backup path");
    assert_ne!(first, second);
    assert!(first.starts_with(store.backups_dir()));
    let name = first.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("vocabulary_cards_backup_"));
    assert!(name.ends_with(".json"));

    let original = fs::read(store.path()).unwrap();
    assert_eq!(fs::read(&first).unwrap(), original);
    assert_eq!(fs::read(&second).unwrap(), original);
}
