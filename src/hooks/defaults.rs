// File: ./src/hooks/defaults.rs
// Issue-create audit: preset the fields nobody filled in.
use crate::config::HookConfig;
use crate::schema::PropertyKind;
use crate::store::Tracker;
use crate::value::{Value, Values};
use anyhow::Result;

/// New issues get the canonical status and priority when none was set,
/// and start out private. All presets are best effort: a canonical
/// record missing from the store is logged and skipped.
pub fn preset_missing(
    cfg: &HookConfig,
    tracker: &mut dyn Tracker,
    _id: Option<&str>,
    values: &mut Values,
) -> Result<()> {
    preset_reference(cfg, tracker, values, "status", cfg.default_status.as_deref());
    preset_reference(
        cfg,
        tracker,
        values,
        "priority",
        cfg.default_priority.as_deref(),
    );
    if cfg.private_by_default
        && cfg.schema.kind_of(&cfg.issue_class, "public") == Some(&PropertyKind::Boolean)
        && !values.contains_key("public")
    {
        values.insert("public".to_string(), Value::Flag(false));
    }
    Ok(())
}

fn preset_reference(
    cfg: &HookConfig,
    tracker: &dyn Tracker,
    values: &mut Values,
    property: &str,
    canonical: Option<&str>,
) {
    let Some(canonical) = canonical else { return };
    if values.get(property).is_some_and(|v| !v.is_empty()) {
        return;
    }
    let Some(PropertyKind::SingleReference(class)) = cfg.schema.kind_of(&cfg.issue_class, property)
    else {
        log::warn!("cannot preset '{}': not a single-reference property", property);
        return;
    };
    match tracker.lookup(class, canonical).into_iter().next() {
        Some(id) => {
            log::debug!("presetting {} to '{}' ({})", property, canonical, id);
            values.insert(property.to_string(), Value::Reference(id));
        }
        None => log::warn!(
            "no {} named '{}', leaving '{}' unset",
            class,
            canonical,
            property
        ),
    }
}
