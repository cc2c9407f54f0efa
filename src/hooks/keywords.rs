// File: ./src/hooks/keywords.rs
// Issue audit: fold the free-text `extra_keywords` pseudo-property into
// the real keyword list.
use crate::config::HookConfig;
use crate::store::Tracker;
use crate::value::{RecordId, Value, Values};
use anyhow::Result;

/// Comma-separated names; a `-` prefix removes instead of adding.
/// Unknown names being added are created on the fly, unknown names
/// being removed are skipped. The pseudo-property is cleared afterwards
/// so it never reaches storage with content.
pub fn merge_extra(
    cfg: &HookConfig,
    tracker: &mut dyn Tracker,
    id: Option<&str>,
    values: &mut Values,
) -> Result<()> {
    let raw = match values.get("extra_keywords") {
        Some(Value::Text(s)) if !s.is_empty() => s.clone(),
        _ => return Ok(()),
    };
    log::debug!("extra keywords: {}", raw);

    let mut keywords: Vec<RecordId> = match values.get("keywords") {
        Some(Value::References(list)) => list.clone(),
        _ => match id {
            Some(issue_id) => match tracker.get(&cfg.issue_class, issue_id, "keywords")? {
                Some(Value::References(list)) => list,
                _ => Vec::new(),
            },
            None => Vec::new(),
        },
    };

    let key = cfg
        .schema
        .key_of(&cfg.keyword_class)
        .unwrap_or("name")
        .to_string();

    for token in raw.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        if let Some(name) = token.strip_prefix('-') {
            let ids = tracker.lookup(&cfg.keyword_class, name);
            if ids.is_empty() {
                // Removing a keyword that never existed: nothing to do.
                continue;
            }
            keywords.retain(|k| !ids.contains(k));
        } else {
            let keyword_id = match tracker.lookup(&cfg.keyword_class, token).into_iter().next() {
                Some(existing) => existing,
                None => {
                    log::debug!("creating keyword '{}'", token);
                    tracker.create(
                        &cfg.keyword_class,
                        Values::from([(key.clone(), Value::Text(token.to_string()))]),
                    )?
                }
            };
            if !keywords.contains(&keyword_id) {
                keywords.push(keyword_id);
            }
        }
    }

    values.insert("keywords".to_string(), Value::References(keywords));
    values.insert("extra_keywords".to_string(), Value::Text(String::new()));
    Ok(())
}
