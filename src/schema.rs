// File: ./src/schema.rs
// Property-kind taxonomy and per-class schema tables.
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The closed set of property kinds a tracker class can declare.
///
/// Reference kinds carry the name of the class they point into, so a
/// lookup service knows which namespace to search. The serde codec is the
/// compact form used in config files: `"text"`, `"date"`, `"boolean"`,
/// `"link:status"`, `"multilink:topic"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PropertyKind {
    Text,
    SingleReference(String),
    MultiReference(String),
    Date,
    Boolean,
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKind::Text => write!(f, "text"),
            PropertyKind::SingleReference(class) => write!(f, "link:{}", class),
            PropertyKind::MultiReference(class) => write!(f, "multilink:{}", class),
            PropertyKind::Date => write!(f, "date"),
            PropertyKind::Boolean => write!(f, "boolean"),
        }
    }
}

impl TryFrom<String> for PropertyKind {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "text" => return Ok(PropertyKind::Text),
            "date" => return Ok(PropertyKind::Date),
            "boolean" => return Ok(PropertyKind::Boolean),
            _ => {}
        }
        if let Some((kind, class)) = value.split_once(':') {
            if class.is_empty() {
                return Err(format!("property kind '{}' names no class", value));
            }
            match kind {
                "link" => return Ok(PropertyKind::SingleReference(class.to_string())),
                "multilink" => return Ok(PropertyKind::MultiReference(class.to_string())),
                _ => {}
            }
        }
        Err(format!(
            "unknown property kind '{}' (expected text, date, boolean, link:<class> or multilink:<class>)",
            value
        ))
    }
}

impl From<PropertyKind> for String {
    fn from(kind: PropertyKind) -> Self {
        kind.to_string()
    }
}

/// One tracker class: an optional key property (the one `lookup` matches
/// names against) and the property table. Property names must be
/// lowercase; command-line matching lowercases before comparing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default)]
    pub properties: HashMap<String, PropertyKind>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    pub classes: HashMap<String, ClassSchema>,
}

impl Schema {
    pub fn class(&self, name: &str) -> Option<&ClassSchema> {
        self.classes.get(name)
    }

    pub fn properties_of(&self, class: &str) -> Option<&HashMap<String, PropertyKind>> {
        self.class(class).map(|c| &c.properties)
    }

    pub fn kind_of(&self, class: &str, property: &str) -> Option<&PropertyKind> {
        self.properties_of(class).and_then(|p| p.get(property))
    }

    pub fn key_of(&self, class: &str) -> Option<&str> {
        self.class(class).and_then(|c| c.key.as_deref())
    }

    /// The stock tracker layout: issues with messages and files attached,
    /// plus the small lookup classes (status, priority, topic, keyword,
    /// user).
    pub fn tracker_default() -> Self {
        use PropertyKind::{Boolean, Date, Text};

        fn link(class: &str) -> PropertyKind {
            PropertyKind::SingleReference(class.to_string())
        }
        fn multilink(class: &str) -> PropertyKind {
            PropertyKind::MultiReference(class.to_string())
        }
        fn table(key: Option<&str>, props: &[(&str, PropertyKind)]) -> ClassSchema {
            ClassSchema {
                key: key.map(str::to_string),
                properties: props
                    .iter()
                    .map(|(name, kind)| (name.to_string(), kind.clone()))
                    .collect(),
            }
        }

        let mut classes = HashMap::new();
        classes.insert(
            "issue".to_string(),
            table(
                None,
                &[
                    ("title", Text),
                    ("status", link("status")),
                    ("priority", link("priority")),
                    ("assignee", link("user")),
                    ("creator", link("user")),
                    ("superseder", link("issue")),
                    ("topics", multilink("topic")),
                    ("dependencies", multilink("issue")),
                    ("keywords", multilink("keyword")),
                    ("nosy", multilink("user")),
                    ("messages", multilink("msg")),
                    ("files", multilink("file")),
                    ("deadline", Date),
                    ("public", Boolean),
                    ("extra_keywords", Text),
                ],
            ),
        );
        classes.insert(
            "msg".to_string(),
            table(
                None,
                &[
                    ("author", link("user")),
                    ("recipients", multilink("user")),
                    ("date", Date),
                    ("summary", Text),
                    ("content", Text),
                    ("type", Text),
                    ("mailcommands", Text),
                    ("files", multilink("file")),
                    ("messageid", Text),
                    ("inreplyto", Text),
                ],
            ),
        );
        classes.insert(
            "file".to_string(),
            table(
                Some("name"),
                &[
                    ("name", Text),
                    ("description", Text),
                    ("content", Text),
                    ("type", Text),
                ],
            ),
        );
        classes.insert(
            "topic".to_string(),
            table(
                Some("name"),
                &[
                    ("name", Text),
                    ("description", Text),
                    ("assign_to", link("user")),
                    ("autonosy", multilink("user")),
                ],
            ),
        );
        classes.insert(
            "keyword".to_string(),
            table(Some("name"), &[("name", Text), ("description", Text)]),
        );
        classes.insert(
            "status".to_string(),
            table(Some("name"), &[("name", Text), ("description", Text)]),
        );
        classes.insert(
            "priority".to_string(),
            table(Some("name"), &[("name", Text), ("description", Text)]),
        );
        classes.insert(
            "user".to_string(),
            table(
                Some("username"),
                &[
                    ("username", Text),
                    ("realname", Text),
                    ("address", Text),
                    ("roles", Text),
                ],
            ),
        );
        Schema { classes }
    }
}
