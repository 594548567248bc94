use chrono::{FixedOffset, TimeZone};
use letsdo_core::{Todo, TodoId, TodoValidationError};
use uuid::Uuid;

#[test]
fn todo_new_sets_defaults() {
    let todo = Todo::new("wash dishes").unwrap();

    let minted = Uuid::parse_str(todo.id.as_str()).unwrap();
    assert_eq!(minted.get_version_num(), 4);
    assert_eq!(todo.id.as_str(), minted.to_string());
    assert_eq!(todo.text, "wash dishes");
    assert!(!todo.is_completed);
    assert!(!todo.created_at.is_empty());
}

#[test]
fn todo_new_keeps_text_as_entered() {
    let todo = Todo::new("  padded task ").unwrap();
    assert_eq!(todo.text, "  padded task ");
}

#[test]
fn todo_new_at_formats_local_timestamp() {
    let offset = FixedOffset::east_opt(5 * 3600).unwrap();
    let at = offset.with_ymd_and_hms(2024, 12, 31, 0, 7, 3).unwrap();

    let todo = Todo::new_at("new year prep", &at).unwrap();

    assert_eq!(todo.created_at, "12/31/2024, 12:07:03 AM");
}

#[test]
fn todo_new_rejects_three_chars_or_fewer() {
    for text in ["", "   ", "ab", " abc "] {
        let err = Todo::new(text).unwrap_err();
        assert!(
            matches!(err, TodoValidationError::TextTooShort { min_exclusive: 3, .. }),
            "unexpected result for {text:?}: {err}"
        );
    }
}

#[test]
fn ids_are_unique_across_creations() {
    let first = Todo::new("first task").unwrap();
    let second = Todo::new("first task").unwrap();
    assert_ne!(first.id, second.id);
}

#[test]
fn toggle_completed_is_an_involution() {
    let mut todo = Todo::new("read a book").unwrap();
    assert!(todo.toggle_completed());
    assert!(!todo.toggle_completed());
    assert!(!todo.is_completed);
}

#[test]
fn visibility_follows_show_finished_flag() {
    let mut todo = Todo::new("stretch").unwrap();
    assert!(todo.is_visible(false));
    todo.toggle_completed();
    assert!(todo.is_visible(true));
    assert!(!todo.is_visible(false));
}

#[test]
fn from_parts_rejects_empty_id_and_blank_text() {
    assert_eq!(
        Todo::from_parts("", "valid", false, "1/1/2025, 1:00:00 PM").unwrap_err(),
        TodoValidationError::EmptyId
    );
    assert_eq!(
        Todo::from_parts("task-9", " ", false, "1/1/2025, 1:00:00 PM").unwrap_err(),
        TodoValidationError::BlankText
    );
}

#[test]
fn from_parts_keeps_foreign_ids_and_empty_timestamps() {
    let todo = Todo::from_parts("Legacy-ID_01", "imported", false, "").unwrap();

    assert_eq!(todo.id, TodoId::new("Legacy-ID_01"));
    assert_eq!(todo.created_at, "");
}

#[test]
fn from_parts_accepts_short_legacy_text() {
    let todo = Todo::from_parts(TodoId::generate(), "ab", true, "1/1/2025, 1:00:00 PM").unwrap();
    assert_eq!(todo.text, "ab");
}

#[test]
fn deserialize_reads_browser_blob_fields() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "todo": "ship it",
        "isCompleted": true,
        "createdAt": "9/14/2025, 6:41:12 PM"
    });

    let todo: Todo = serde_json::from_value(value).unwrap();

    assert_eq!(todo.id.as_str(), "11111111-2222-4333-8444-555555555555");
    assert_eq!(todo.text, "ship it");
    assert!(todo.is_completed);
    assert_eq!(todo.created_at, "9/14/2025, 6:41:12 PM");
}

#[test]
fn deserialize_rejects_blank_text() {
    let value = serde_json::json!({
        "id": "11111111-2222-4333-8444-555555555555",
        "todo": "   ",
        "isCompleted": false,
        "createdAt": "9/14/2025, 6:41:12 PM"
    });

    let err = serde_json::from_value::<Todo>(value).unwrap_err();
    assert!(
        err.to_string().contains("must not be blank"),
        "unexpected error: {err}"
    );
}
