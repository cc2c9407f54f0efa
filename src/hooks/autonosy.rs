// File: ./src/hooks/autonosy.rs
// Issue audit: topics carry follower lists; whoever follows a topic
// lands on the nosy list of issues filed under it.
use crate::config::HookConfig;
use crate::store::Tracker;
use crate::value::{RecordId, Value, Values};
use anyhow::Result;

pub fn assign_topic_followers(
    cfg: &HookConfig,
    tracker: &mut dyn Tracker,
    id: Option<&str>,
    values: &mut Values,
) -> Result<()> {
    let topics = match values.get("topics") {
        Some(Value::References(list)) if !list.is_empty() => list.clone(),
        _ => return Ok(()),
    };

    let mut nosy: Vec<RecordId> = match values.get("nosy") {
        Some(Value::References(list)) => list.clone(),
        _ => match id {
            Some(issue_id) => match tracker.get(&cfg.issue_class, issue_id, "nosy")? {
                Some(Value::References(list)) => list,
                _ => Vec::new(),
            },
            None => Vec::new(),
        },
    };

    let mut changed = false;
    for topic_id in &topics {
        // A topic that vanished mid-flight is not this hook's problem.
        let Ok(followers) = tracker.get(&cfg.topic_class, topic_id, "autonosy") else {
            continue;
        };
        if let Some(Value::References(users)) = followers {
            for user in users {
                if !nosy.contains(&user) {
                    nosy.push(user);
                    changed = true;
                }
            }
        }
    }

    if changed {
        values.insert("nosy".to_string(), Value::References(nosy));
    }
    Ok(())
}
