// File: ./src/config.rs
// Hook configuration: class names, schema table, canonical defaults.
use crate::schema::Schema;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_issue_class() -> String {
    "issue".to_string()
}
fn default_message_class() -> String {
    "msg".to_string()
}
fn default_file_class() -> String {
    "file".to_string()
}
fn default_topic_class() -> String {
    "topic".to_string()
}
fn default_keyword_class() -> String {
    "keyword".to_string()
}
fn default_stash_property() -> String {
    "mailcommands".to_string()
}
fn default_status() -> Option<String> {
    Some("new".to_string())
}
fn default_priority() -> Option<String> {
    Some("normal".to_string())
}
fn default_spam_status() -> Option<String> {
    Some("spam".to_string())
}
fn default_private() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookConfig {
    #[serde(default = "default_issue_class")]
    pub issue_class: String,
    #[serde(default = "default_message_class")]
    pub message_class: String,
    #[serde(default = "default_file_class")]
    pub file_class: String,
    #[serde(default = "default_topic_class")]
    pub topic_class: String,
    #[serde(default = "default_keyword_class")]
    pub keyword_class: String,
    /// Message property the extracted command lines are stashed in
    /// between the message audit and the issue audit.
    #[serde(default = "default_stash_property")]
    pub stash_property: String,
    /// Canonical status name preset on issues created without one.
    #[serde(default = "default_status", skip_serializing_if = "Option::is_none")]
    pub default_status: Option<String>,
    /// Canonical priority name preset on issues created without one.
    #[serde(default = "default_priority", skip_serializing_if = "Option::is_none")]
    pub default_priority: Option<String>,
    /// Status name that marks an issue as spam, retiring it and its
    /// creator. `None` disables the reactor.
    #[serde(default = "default_spam_status", skip_serializing_if = "Option::is_none")]
    pub spam_status: Option<String>,
    /// New issues default to `public = false` unless stated otherwise.
    #[serde(default = "default_private")]
    pub private_by_default: bool,
    #[serde(default = "Schema::tracker_default")]
    pub schema: Schema,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            issue_class: default_issue_class(),
            message_class: default_message_class(),
            file_class: default_file_class(),
            topic_class: default_topic_class(),
            keyword_class: default_keyword_class(),
            stash_property: default_stash_property(),
            default_status: default_status(),
            default_priority: default_priority(),
            spam_status: default_spam_status(),
            private_by_default: default_private(),
            schema: Schema::tracker_default(),
        }
    }
}

impl HookConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file '{}'", path.display()))
    }
}
