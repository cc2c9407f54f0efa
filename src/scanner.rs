// File: ./src/scanner.rs
/*! Command-line extraction from message bodies.

A command line has the form `property: value`. Only the leading block of
a message is scanned: empty lines are skipped, and the first line that
does not look like a command at all ends the scan, so prose below the
header block is never picked apart for stray colons. A line that does
match the shape but names a property the schema does not know (a typo,
or a `Re:` subject echo) is passed through as ordinary text without
ending the scan, so later valid commands are still recognized.

Recognized lines are removed from the body entirely. Scanning never
fails; at worst it recognizes nothing.
*/

use crate::schema::PropertyKind;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// Lowercased property name.
    pub property: String,
    /// The value text, trimmed.
    pub raw_value: String,
}

impl CommandLine {
    /// Re-serialize as a `property: value` line.
    pub fn to_line(&self) -> String {
        format!("{}: {}", self.property, self.raw_value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseResult {
    pub commands: Vec<CommandLine>,
    /// The untouched lines rejoined, trimmed of surrounding whitespace.
    pub remaining: String,
}

pub fn scan(text: &str, known: &HashMap<String, PropertyKind>) -> ParseResult {
    let mut commands = Vec::new();
    let mut body: Vec<&str> = Vec::new();
    let mut scanning = true;

    for line in text.split('\n') {
        // Mail bodies are frequently CRLF-delimited.
        let line = line.strip_suffix('\r').unwrap_or(line);

        if !scanning {
            body.push(line);
            continue;
        }
        if line.is_empty() {
            body.push(line);
            continue;
        }
        match line.split_once(':') {
            Some((name, value)) => {
                let property = name.to_lowercase();
                if known.contains_key(&property) {
                    commands.push(CommandLine {
                        property,
                        raw_value: value.trim().to_string(),
                    });
                } else {
                    // Unknown name: keep the line, keep scanning.
                    body.push(line);
                }
            }
            None => {
                // Not a command shape at all: the header block is over.
                scanning = false;
                body.push(line);
            }
        }
    }

    ParseResult {
        commands,
        remaining: body.join("\n").trim().to_string(),
    }
}
