use mailcmd::resolver::ListEdit;
use mailcmd::schema::Schema;
use mailcmd::store::MemoryTracker;

fn tracker_with_topics(names: &[&str]) -> MemoryTracker {
    let mut tracker = MemoryTracker::new(Schema::tracker_default());
    for name in names {
        tracker.create_named("topic", name).unwrap();
    }
    tracker
}

#[test]
fn test_incremental_add_and_remove() {
    // T1 -> 1, T2 -> 2, T3 -> 3
    let tracker = tracker_with_topics(&["T1", "T2", "T3"]);
    let edit = ListEdit::parse("+T3, -T2", "topic", &tracker);

    assert!(edit.is_incremental());
    let merged = edit.merge_into(&["1".to_string(), "2".to_string()]);
    assert_eq!(merged, vec!["1".to_string(), "3".to_string()]);
}

#[test]
fn test_bare_names_replace_the_list() {
    // T1 -> 1, T2 -> 2, T9 -> 3
    let tracker = tracker_with_topics(&["T1", "T2", "T9"]);
    let edit = ListEdit::parse("T1, T2", "topic", &tracker);

    assert!(!edit.is_incremental());
    let merged = edit.merge_into(&["3".to_string()]);
    assert_eq!(merged, vec!["1".to_string(), "2".to_string()]);
}

#[test]
fn test_removing_absent_reference_is_a_noop() {
    // T1 -> 1, T5 -> 2; the current list only holds T1.
    let tracker = tracker_with_topics(&["T1", "T5"]);
    let edit = ListEdit::parse("-T5", "topic", &tracker);

    assert!(edit.is_incremental());
    let merged = edit.merge_into(&["1".to_string()]);
    assert_eq!(merged, vec!["1".to_string()]);
}

#[test]
fn test_unresolved_names_are_dropped() {
    let tracker = tracker_with_topics(&["T1", "T3"]);
    let edit = ListEdit::parse("+Bogus, +T3", "topic", &tracker);

    assert_eq!(edit.to_add, vec!["2".to_string()]);
    assert!(edit.to_remove.is_empty());
    assert!(edit.to_set.is_empty());
}

#[test]
fn test_duplicate_mentions_deduplicate() {
    let tracker = tracker_with_topics(&["T1"]);
    let edit = ListEdit::parse("T1, T1", "topic", &tracker);

    assert_eq!(edit.merge_into(&[]), vec!["1".to_string()]);
}

#[test]
fn test_adding_an_already_present_reference_keeps_one_copy() {
    let tracker = tracker_with_topics(&["T1", "T2"]);
    let edit = ListEdit::parse("+T2", "topic", &tracker);

    let merged = edit.merge_into(&["1".to_string(), "2".to_string()]);
    assert_eq!(merged, vec!["1".to_string(), "2".to_string()]);
}

#[test]
fn test_mixed_set_tokens_join_an_incremental_edit() {
    // With a sigil present, bare names are appended rather than
    // replacing the list.
    let tracker = tracker_with_topics(&["T1", "T2", "T3"]);
    let edit = ListEdit::parse("T3, -T2", "topic", &tracker);

    let merged = edit.merge_into(&["1".to_string(), "2".to_string()]);
    assert_eq!(merged, vec!["1".to_string(), "3".to_string()]);
}

#[test]
fn test_empty_tokens_are_ignored() {
    let tracker = tracker_with_topics(&["T1"]);
    let edit = ListEdit::parse(" , T1, ,", "topic", &tracker);

    assert_eq!(edit.to_set, vec!["1".to_string()]);
}
