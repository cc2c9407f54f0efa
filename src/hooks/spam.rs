// File: ./src/hooks/spam.rs
// Issue reactor: an issue marked with the spam status is retired along
// with the user who filed it. The creator gets no notification.
use crate::config::HookConfig;
use crate::schema::PropertyKind;
use crate::store::Tracker;
use crate::value::{Value, Values};
use anyhow::Result;

pub fn retire_spam(
    cfg: &HookConfig,
    tracker: &mut dyn Tracker,
    id: &str,
    _old_values: &Values,
) -> Result<()> {
    let Some(spam_name) = cfg.spam_status.as_deref() else {
        return Ok(());
    };
    let Some(PropertyKind::SingleReference(status_class)) =
        cfg.schema.kind_of(&cfg.issue_class, "status")
    else {
        return Ok(());
    };
    let Some(spam_id) = tracker.lookup(status_class, spam_name).into_iter().next() else {
        return Ok(());
    };

    let status = tracker.get(&cfg.issue_class, id, "status")?;
    if status.as_ref().and_then(Value::as_reference) != Some(spam_id.as_str()) {
        return Ok(());
    }

    let creator = tracker.get(&cfg.issue_class, id, "creator")?;
    log::info!("retiring spam issue {}", id);
    tracker.retire(&cfg.issue_class, id)?;

    if let Some(Value::Reference(user_id)) = creator
        && let Some(PropertyKind::SingleReference(user_class)) =
            cfg.schema.kind_of(&cfg.issue_class, "creator")
    {
        log::info!("retiring creator {} of spam issue {}", user_id, id);
        tracker.retire(user_class, &user_id)?;
    }
    Ok(())
}
