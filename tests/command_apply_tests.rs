use chrono::{TimeZone, Utc};
use mailcmd::config::HookConfig;
use mailcmd::hooks::{Event, HookSet};
use mailcmd::store::{MemoryTracker, RecordStore};
use mailcmd::value::{RecordId, Value, Values};
use std::sync::Arc;

/// Tracker seeded like a fresh install: statuses, priorities, a few
/// topics and users.
fn setup() -> (HookSet, MemoryTracker) {
    let config = Arc::new(HookConfig::default());
    let hooks = HookSet::standard(config.clone());
    let mut tracker = MemoryTracker::new(config.schema.clone());
    for name in ["new", "open", "closed", "pending", "spam"] {
        tracker.create_named("status", name).unwrap();
    }
    for name in ["immediate", "urgent", "high", "normal", "low"] {
        tracker.create_named("priority", name).unwrap();
    }
    for name in ["T1", "T2", "T3"] {
        tracker.create_named("topic", name).unwrap();
    }
    for name in ["alice", "bob"] {
        tracker.create_named("user", name).unwrap();
    }
    (hooks, tracker)
}

/// Run the message-create audit and store the message, as a host would.
fn new_message(hooks: &HookSet, tracker: &mut MemoryTracker, content: &str) -> RecordId {
    let mut values = Values::from([("content".to_string(), Value::Text(content.to_string()))]);
    hooks
        .fire_audit(tracker, "msg", Event::Create, None, &mut values)
        .unwrap();
    tracker.create("msg", values).unwrap()
}

fn get(tracker: &MemoryTracker, class: &str, id: &str, property: &str) -> Option<Value> {
    tracker.get(class, id, property).unwrap()
}

#[test]
fn test_message_body_is_cleaned() {
    let (hooks, mut tracker) = setup();
    let msg = new_message(
        &hooks,
        &mut tracker,
        "status: open\ntopics: T1,T2\nHello there\nSecond line",
    );

    assert_eq!(
        get(&tracker, "msg", &msg, "content"),
        Some(Value::Text("Hello there\nSecond line".to_string()))
    );
    assert_eq!(
        get(&tracker, "msg", &msg, "summary"),
        Some(Value::Text("Hello there".to_string()))
    );
    assert_eq!(
        get(&tracker, "msg", &msg, "mailcommands"),
        Some(Value::Text("status: open\ntopics: T1,T2".to_string()))
    );
}

#[test]
fn test_commands_only_message_keeps_commands_as_content() {
    let (hooks, mut tracker) = setup();
    let msg = new_message(&hooks, &mut tracker, "status: open");

    assert_eq!(
        get(&tracker, "msg", &msg, "content"),
        Some(Value::Text("status: open".to_string()))
    );
    assert_eq!(
        get(&tracker, "msg", &msg, "summary"),
        Some(Value::Text("status: open".to_string()))
    );
}

#[test]
fn test_issue_create_applies_commands_and_defaults() {
    let (hooks, mut tracker) = setup();
    let msg = new_message(&hooks, &mut tracker, "status: open\ntopics: T1,T2\nHello");

    let mut values = Values::from([
        ("title".to_string(), Value::Text("printer on fire".to_string())),
        ("messages".to_string(), Value::References(vec![msg.clone()])),
    ]);
    hooks
        .fire_audit(&mut tracker, "issue", Event::Create, None, &mut values)
        .unwrap();

    // "open" is the second seeded status.
    assert_eq!(values.get("status"), Some(&Value::Reference("2".to_string())));
    assert_eq!(
        values.get("topics"),
        Some(&Value::References(vec!["1".to_string(), "2".to_string()]))
    );
    // Untouched by commands: priority and public fall back to defaults.
    assert_eq!(values.get("priority"), Some(&Value::Reference("4".to_string())));
    assert_eq!(values.get("public"), Some(&Value::Flag(false)));

    tracker.create("issue", values).unwrap();
    // The stash is spent.
    assert_eq!(
        get(&tracker, "msg", &msg, "mailcommands"),
        Some(Value::Text(String::new()))
    );
}

#[test]
fn test_issue_set_merges_into_current_topics() {
    let (hooks, mut tracker) = setup();
    let first = new_message(&hooks, &mut tracker, "Initial report");
    let issue = tracker
        .create(
            "issue",
            Values::from([
                ("topics".to_string(), Value::References(vec!["1".to_string(), "2".to_string()])),
                ("messages".to_string(), Value::References(vec![first.clone()])),
            ]),
        )
        .unwrap();

    let followup = new_message(&hooks, &mut tracker, "topics: +T3, -T2\nFollow up");
    let mut values = Values::from([(
        "messages".to_string(),
        Value::References(vec![first, followup]),
    )]);
    hooks
        .fire_audit(&mut tracker, "issue", Event::Set, Some(&issue), &mut values)
        .unwrap();

    assert_eq!(
        values.get("topics"),
        Some(&Value::References(vec!["1".to_string(), "3".to_string()]))
    );
}

#[test]
fn test_invalid_date_does_not_block_later_commands() {
    let (hooks, mut tracker) = setup();
    let msg = new_message(&hooks, &mut tracker, "deadline: banana\nstatus: closed\nBody");

    let mut values = Values::from([(
        "messages".to_string(),
        Value::References(vec![msg]),
    )]);
    hooks
        .fire_audit(&mut tracker, "issue", Event::Create, None, &mut values)
        .unwrap();

    assert!(values.get("deadline").is_none());
    assert_eq!(values.get("status"), Some(&Value::Reference("3".to_string())));
}

#[test]
fn test_absolute_date_command() {
    let (hooks, mut tracker) = setup();
    let msg = new_message(&hooks, &mut tracker, "deadline: 2030-01-02\nBody");

    let mut values = Values::from([(
        "messages".to_string(),
        Value::References(vec![msg]),
    )]);
    hooks
        .fire_audit(&mut tracker, "issue", Event::Create, None, &mut values)
        .unwrap();

    assert_eq!(
        values.get("deadline"),
        Some(&Value::Timestamp(
            Utc.with_ymd_and_hms(2030, 1, 2, 0, 0, 0).unwrap()
        ))
    );
}

#[test]
fn test_boolean_command() {
    let (hooks, mut tracker) = setup();
    let msg = new_message(&hooks, &mut tracker, "public: 1\nBody");

    let mut values = Values::from([(
        "messages".to_string(),
        Value::References(vec![msg]),
    )]);
    hooks
        .fire_audit(&mut tracker, "issue", Event::Create, None, &mut values)
        .unwrap();

    assert_eq!(values.get("public"), Some(&Value::Flag(true)));
}

#[test]
fn test_unknown_assignee_is_skipped() {
    let (hooks, mut tracker) = setup();
    let msg = new_message(&hooks, &mut tracker, "assignee: nobody\nstatus: open\nBody");

    let mut values = Values::from([(
        "messages".to_string(),
        Value::References(vec![msg]),
    )]);
    hooks
        .fire_audit(&mut tracker, "issue", Event::Create, None, &mut values)
        .unwrap();

    assert!(values.get("assignee").is_none());
    assert_eq!(values.get("status"), Some(&Value::Reference("2".to_string())));
}

#[test]
fn test_already_linked_messages_do_not_replay() {
    let (hooks, mut tracker) = setup();
    let msg = new_message(&hooks, &mut tracker, "status: open\nBody");
    let issue = tracker
        .create(
            "issue",
            Values::from([(
                "messages".to_string(),
                Value::References(vec![msg.clone()]),
            )]),
        )
        .unwrap();

    // An edit that re-states the unchanged message list.
    let mut values = Values::from([(
        "messages".to_string(),
        Value::References(vec![msg]),
    )]);
    hooks
        .fire_audit(&mut tracker, "issue", Event::Set, Some(&issue), &mut values)
        .unwrap();

    assert!(values.get("status").is_none());
}

#[test]
fn test_missing_issue_is_a_hard_error() {
    let (hooks, mut tracker) = setup();
    let msg = new_message(&hooks, &mut tracker, "status: open\nBody");

    let mut values = Values::from([(
        "messages".to_string(),
        Value::References(vec![msg]),
    )]);
    let result = hooks.fire_audit(&mut tracker, "issue", Event::Set, Some("999"), &mut values);

    assert!(result.is_err());
}
