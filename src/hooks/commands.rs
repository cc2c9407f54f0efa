// File: ./src/hooks/commands.rs
/*! Mail command lines: edit issue properties from a message body.

A message may open with command lines such as:

```text
status: open
topics: +networking, -printing
deadline: 2d
Actual comment text starts here.
```

Each one names an issue property and a value; see [`crate::scanner`]
for what counts as a command line and where scanning stops.

Messages are created before the issue they land on, so this runs in two
steps. The message-create audit pulls the command lines out of the body,
stashes them in a dedicated message property and derives the summary
from the cleaned text. The issue audit (create and set) then reads the
stash of every newly attached message, resolves each command against the
schema and writes the results into the values being committed, clearing
the stash so a later edit cannot replay it.

Per-command failures (a date that does not parse, a name that matches
nothing) are logged and skipped; the rest of the block still applies.
*/

use crate::config::HookConfig;
use crate::resolver::{self, ListEdit};
use crate::scanner::{self, CommandLine};
use crate::schema::PropertyKind;
use crate::store::{NameLookup, StoreError, Tracker};
use crate::value::{RecordId, Value, Values};
use anyhow::Result;

/// Message-create audit: strip command lines from the body into the
/// stash property, and refresh the content and summary.
pub fn extract_commands(
    cfg: &HookConfig,
    _tracker: &mut dyn Tracker,
    _id: Option<&str>,
    values: &mut Values,
) -> Result<()> {
    let content = match values.get("content") {
        Some(Value::Text(s)) => s.clone(),
        // Nothing to parse.
        _ => return Ok(()),
    };
    let Some(props) = cfg.schema.properties_of(&cfg.issue_class) else {
        return Ok(());
    };

    let parsed = scanner::scan(&content, props);
    for cmd in &parsed.commands {
        log::debug!("found command line '{}'", cmd.to_line());
    }

    let stash = parsed
        .commands
        .iter()
        .map(CommandLine::to_line)
        .collect::<Vec<_>>()
        .join("\n");

    let mut body = parsed.remaining;
    if body.is_empty() {
        // No prose left: the command lines double as the content.
        body = stash.clone();
    }
    if let Some(first) = body.lines().next() {
        values.insert("summary".to_string(), Value::Text(first.to_string()));
    }
    values.insert(cfg.stash_property.clone(), Value::Text(stash));
    values.insert("content".to_string(), Value::Text(body));
    Ok(())
}

/// Issue audit (create and set): apply the stashed commands of every
/// message newly attached by this mutation.
pub fn apply_commands(
    cfg: &HookConfig,
    tracker: &mut dyn Tracker,
    id: Option<&str>,
    values: &mut Values,
) -> Result<()> {
    let mut new_messages = match values.get("messages") {
        Some(Value::References(list)) if !list.is_empty() => list.clone(),
        _ => return Ok(()),
    };
    // On an edit, only messages not already linked carry fresh commands.
    if let Some(issue_id) = id
        && let Some(Value::References(old)) = tracker.get(&cfg.issue_class, issue_id, "messages")?
    {
        new_messages.retain(|m| !old.contains(m));
    }

    for msg_id in &new_messages {
        let stash = match tracker.get(&cfg.message_class, msg_id, &cfg.stash_property)? {
            Some(Value::Text(s)) if !s.is_empty() => s,
            _ => continue,
        };
        apply_stash(cfg, tracker, id, values, &stash)?;
        // One shot: a later edit of the issue must not replay these.
        tracker.set(
            &cfg.message_class,
            msg_id,
            &cfg.stash_property,
            Value::Text(String::new()),
        )?;
    }
    Ok(())
}

fn apply_stash(
    cfg: &HookConfig,
    tracker: &mut dyn Tracker,
    id: Option<&str>,
    values: &mut Values,
    stash: &str,
) -> Result<()> {
    let Some(props) = cfg.schema.properties_of(&cfg.issue_class) else {
        return Ok(());
    };
    let parsed = scanner::scan(stash, props);

    for cmd in &parsed.commands {
        let Some(kind) = props.get(&cmd.property) else {
            continue;
        };
        match kind {
            PropertyKind::MultiReference(class) => {
                let lookup: &dyn NameLookup = &*tracker;
                let edit = ListEdit::parse(&cmd.raw_value, class, lookup);
                let current = current_list(cfg, &*tracker, id, values, &cmd.property)?;
                let merged = edit.merge_into(&current);
                log::debug!("setting {} to [{}]", cmd.property, merged.join(", "));
                values.insert(cmd.property.clone(), Value::References(merged));
            }
            kind => {
                let lookup: &dyn NameLookup = &*tracker;
                match resolver::resolve(kind, &cmd.raw_value, lookup) {
                    Ok(value) => {
                        log::debug!("setting {} to '{}'", cmd.property, value);
                        values.insert(cmd.property.clone(), value);
                    }
                    Err(err) => {
                        log::error!("skipping '{}': {}", cmd.to_line(), err);
                    }
                }
            }
        }
    }
    Ok(())
}

/// The list a multi-reference edit starts from: the value already being
/// written if any, else the record's current value, else empty.
fn current_list(
    cfg: &HookConfig,
    tracker: &dyn Tracker,
    id: Option<&str>,
    values: &Values,
    property: &str,
) -> Result<Vec<RecordId>, StoreError> {
    if let Some(Value::References(list)) = values.get(property) {
        return Ok(list.clone());
    }
    if let Some(issue_id) = id
        && let Some(Value::References(list)) = tracker.get(&cfg.issue_class, issue_id, property)?
    {
        return Ok(list);
    }
    Ok(Vec::new())
}
