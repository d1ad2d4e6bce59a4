//! Timeline stories and comments over an in-memory localStorage

use moments_core::config::TimelineConfig;
use moments_core::storage::models::Story;
use moments_core::storage::{KeyValueStore, MemoryKeyValueStore};
use moments_core::{MomentsError, Timeline};

fn timeline() -> Timeline<MemoryKeyValueStore> {
    Timeline::new(MemoryKeyValueStore::new(), TimelineConfig::default())
}

#[test]
fn test_add_story_persists_json_array() {
    let mut t = timeline();
    let story = t
        .add_story("First date", "Coffee downtown", 1_700_000_000_000)
        .unwrap();
    assert_eq!(story.id, "1700000000000");

    let raw = t.store().get_item("stories").unwrap().unwrap();
    let stored: Vec<Story> = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored, vec![story]);
}

#[test]
fn test_load_reads_existing_stories() {
    let store = MemoryKeyValueStore::new();
    store
        .set_item(
            "stories",
            r#"[{"title":"a","description":"x","id":"1"},{"title":"b","description":"y","id":"2"}]"#,
        )
        .unwrap();

    let mut t = Timeline::new(store, TimelineConfig::default());
    let ids: Vec<&str> = t.load().unwrap().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
    assert_eq!(t.story("2").unwrap().title, "b");
}

#[test]
fn test_update_story() {
    let mut t = timeline();
    t.add_story("Old", "old text", 10).unwrap();

    t.update_story("10", "New", "new text").unwrap();
    assert_eq!(t.story("10").unwrap().description, "new text");

    let mut reloaded = Timeline::new(
        MemoryKeyValueStore::new(),
        TimelineConfig::default(),
    );
    reloaded
        .store()
        .set_item("stories", &t.store().get_item("stories").unwrap().unwrap())
        .unwrap();
    assert_eq!(reloaded.load().unwrap()[0].title, "New");

    let err = t.update_story("missing", "x", "y").unwrap_err();
    assert!(matches!(err, MomentsError::NotFound(_)));
}

/// Deleting a story also drops its comment list
#[test]
fn test_delete_story_removes_comments() {
    let mut t = timeline();
    t.add_story("keep", "", 1).unwrap();
    t.add_story("drop", "", 2).unwrap();
    t.add_comment("2", "Jim", "Lovely").unwrap();
    assert!(t.store().get_item("comments-2").unwrap().is_some());

    assert!(t.delete_story("2").unwrap());
    assert!(t.store().get_item("comments-2").unwrap().is_none());
    assert_eq!(t.stories().len(), 1);
    assert!(!t.delete_story("2").unwrap());
}

#[test]
fn test_comment_lifecycle() {
    let mut t = timeline();
    t.add_story("Trip", "", 5).unwrap();

    t.add_comment("5", "Jim", "first").unwrap();
    t.add_comment("5", "Lee", "second").unwrap();
    let comments = t.add_comment("5", "Jim", "third").unwrap();
    assert_eq!(comments.len(), 3);

    let comments = t.update_comment("5", 1, "Lee", "edited").unwrap();
    assert_eq!(comments[1].message, "edited");

    let comments = t.delete_comment("5", 0).unwrap();
    let messages: Vec<&str> = comments.iter().map(|c| c.message.as_str()).collect();
    assert_eq!(messages, vec!["edited", "third"]);

    // список в хранилище совпадает с возвращённым
    assert_eq!(t.comments("5").unwrap(), comments);
}

#[test]
fn test_comment_validation() {
    let mut t = timeline();
    t.add_story("Trip", "", 5).unwrap();

    assert!(t.add_comment("5", "  ", "hi").unwrap_err().is_validation());
    assert!(t.add_comment("5", "Jim", "").unwrap_err().is_validation());
    assert!(t.comments("5").unwrap().is_empty());

    t.add_comment("5", "Jim", "hi").unwrap();
    assert!(t.update_comment("5", 0, "Jim", " ").unwrap_err().is_validation());
}

#[test]
fn test_comment_index_out_of_range() {
    let mut t = timeline();
    t.add_story("Trip", "", 5).unwrap();
    t.add_comment("5", "Jim", "hi").unwrap();

    let err = t.update_comment("5", 3, "Jim", "x").unwrap_err();
    assert!(matches!(err, MomentsError::NotFound(_)));

    let comments = t.delete_comment("5", 3).unwrap();
    assert_eq!(comments.len(), 1);
}

#[test]
fn test_custom_keys() {
    let config = TimelineConfig {
        stories_key: "our-stories".to_string(),
        comments_key_prefix: "c:".to_string(),
        ..TimelineConfig::default()
    };
    let mut t = Timeline::new(MemoryKeyValueStore::new(), config);
    t.add_story("x", "", 9).unwrap();
    t.add_comment("9", "Jim", "hi").unwrap();

    assert_eq!(t.store().keys(), vec!["c:9".to_string(), "our-stories".to_string()]);
}
