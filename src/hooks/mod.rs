// File: ./src/hooks/mod.rs
/*! Audit/react hook registry.

Audits fire before a mutation is committed and may rewrite the values
being written; reactors fire after the commit. Hooks register per class
and event with a numeric priority: lower fires first, equal priorities
keep registration order. [`HookSet::standard`] wires up the stock
detector set.

A host drives the registry around its own writes:

```ignore
hooks.fire_audit(&mut tracker, "msg", Event::Create, None, &mut values)?;
let id = tracker.create("msg", values)?;
```
*/

pub mod autonosy;
pub mod commands;
pub mod defaults;
pub mod files;
pub mod keywords;
pub mod spam;

use crate::config::HookConfig;
use crate::store::Tracker;
use crate::value::Values;
use anyhow::Result;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Create,
    Set,
}

/// Before-write hook: may rewrite the values being written. The record
/// id is `None` on create.
pub type AuditFn = Box<dyn Fn(&mut dyn Tracker, Option<&str>, &mut Values) -> Result<()>>;

/// After-write hook: receives the record id and the values as they were
/// before the write.
pub type ReactFn = Box<dyn Fn(&mut dyn Tracker, &str, &Values) -> Result<()>>;

struct Registration<F> {
    class: String,
    event: Event,
    priority: i32,
    name: &'static str,
    hook: F,
}

#[derive(Default)]
pub struct HookSet {
    audits: Vec<Registration<AuditFn>>,
    reacts: Vec<Registration<ReactFn>>,
}

impl HookSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn audit(
        &mut self,
        class: &str,
        event: Event,
        name: &'static str,
        priority: i32,
        hook: AuditFn,
    ) {
        self.audits.push(Registration {
            class: class.to_string(),
            event,
            priority,
            name,
            hook,
        });
    }

    pub fn react(
        &mut self,
        class: &str,
        event: Event,
        name: &'static str,
        priority: i32,
        hook: ReactFn,
    ) {
        self.reacts.push(Registration {
            class: class.to_string(),
            event,
            priority,
            name,
            hook,
        });
    }

    pub fn fire_audit(
        &self,
        tracker: &mut dyn Tracker,
        class: &str,
        event: Event,
        id: Option<&str>,
        values: &mut Values,
    ) -> Result<()> {
        let mut hooks: Vec<&Registration<AuditFn>> = self
            .audits
            .iter()
            .filter(|r| r.class == class && r.event == event)
            .collect();
        hooks.sort_by_key(|r| r.priority);
        for reg in hooks {
            log::debug!("audit {}/{:?}: {}", class, event, reg.name);
            (reg.hook)(tracker, id, values)?;
        }
        Ok(())
    }

    pub fn fire_react(
        &self,
        tracker: &mut dyn Tracker,
        class: &str,
        event: Event,
        id: &str,
        old_values: &Values,
    ) -> Result<()> {
        let mut hooks: Vec<&Registration<ReactFn>> = self
            .reacts
            .iter()
            .filter(|r| r.class == class && r.event == event)
            .collect();
        hooks.sort_by_key(|r| r.priority);
        for reg in hooks {
            log::debug!("react {}/{:?}: {}", class, event, reg.name);
            (reg.hook)(tracker, id, old_values)?;
        }
        Ok(())
    }

    /// The stock detector set. Priorities put the command translator
    /// ahead of the keyword/nosy merges, and the create-time presets
    /// last so they observe what the commands wrote.
    pub fn standard(config: Arc<HookConfig>) -> Self {
        let mut hooks = Self::new();

        let cfg = config.clone();
        hooks.audit(
            &config.message_class,
            Event::Create,
            "extract-commands",
            100,
            Box::new(move |t, id, v| commands::extract_commands(&cfg, t, id, v)),
        );

        for event in [Event::Create, Event::Set] {
            let cfg = config.clone();
            hooks.audit(
                &config.issue_class,
                event,
                "apply-commands",
                100,
                Box::new(move |t, id, v| commands::apply_commands(&cfg, t, id, v)),
            );
            let cfg = config.clone();
            hooks.audit(
                &config.issue_class,
                event,
                "merge-extra-keywords",
                110,
                Box::new(move |t, id, v| keywords::merge_extra(&cfg, t, id, v)),
            );
            let cfg = config.clone();
            hooks.audit(
                &config.issue_class,
                event,
                "topic-autonosy",
                115,
                Box::new(move |t, id, v| autonosy::assign_topic_followers(&cfg, t, id, v)),
            );
            let cfg = config.clone();
            hooks.audit(
                &config.file_class,
                event,
                "plain-text-files",
                100,
                Box::new(move |t, id, v| files::force_plain_text(&cfg, t, id, v)),
            );
        }

        let cfg = config.clone();
        hooks.audit(
            &config.issue_class,
            Event::Create,
            "preset-defaults",
            120,
            Box::new(move |t, id, v| defaults::preset_missing(&cfg, t, id, v)),
        );

        let cfg = config.clone();
        hooks.react(
            &config.issue_class,
            Event::Set,
            "retire-spam",
            100,
            Box::new(move |t, id, v| spam::retire_spam(&cfg, t, id, v)),
        );

        hooks
    }
}
