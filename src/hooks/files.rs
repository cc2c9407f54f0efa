// File: ./src/hooks/files.rs
// File audit: HTML attachments are stored as plain text.
use crate::config::HookConfig;
use crate::store::Tracker;
use crate::value::{Value, Values};
use anyhow::Result;

pub fn force_plain_text(
    _cfg: &HookConfig,
    _tracker: &mut dyn Tracker,
    _id: Option<&str>,
    values: &mut Values,
) -> Result<()> {
    if values.get("type").and_then(Value::as_text) == Some("text/html") {
        values.insert("type".to_string(), Value::Text("text/plain".to_string()));
    }
    Ok(())
}
