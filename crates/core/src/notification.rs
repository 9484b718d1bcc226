//! Per-entity error accumulator.
//!
//! Entities record business-rule violations here instead of failing. Errors
//! are either attached to a field (`{"name": ["too long"]}`) or stand alone
//! as a bare message. Insertion order is kept so responses are stable.

use core::fmt;

use indexmap::IndexMap;
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    Field(Vec<String>),
    Message,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notification {
    /// Keyed by field name, or by the message itself for field-less errors.
    entries: IndexMap<String, Entry>,
}

impl Notification {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message`, under `field` when given. Duplicate messages are
    /// ignored.
    pub fn add_error(&mut self, message: impl Into<String>, field: Option<&str>) {
        let message = message.into();
        match field {
            Some(field) => {
                let entry = self
                    .entries
                    .entry(field.to_string())
                    .or_insert_with(|| Entry::Field(Vec::new()));
                match entry {
                    Entry::Field(messages) => {
                        if !messages.contains(&message) {
                            messages.push(message);
                        }
                    }
                    Entry::Message => *entry = Entry::Field(vec![message]),
                }
            }
            None => {
                self.entries.entry(message).or_insert(Entry::Message);
            }
        }
    }

    /// Replace the messages of `field` (or record field-less messages).
    pub fn set_error<I, S>(&mut self, messages: I, field: Option<&str>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match field {
            Some(field) => {
                let messages = messages.into_iter().map(Into::into).collect();
                self.entries.insert(field.to_string(), Entry::Field(messages));
            }
            None => {
                for message in messages {
                    self.entries.insert(message.into(), Entry::Message);
                }
            }
        }
    }

    /// Merge every entry of `other` into this notification, replacing
    /// fields that exist in both.
    pub fn copy_errors(&mut self, other: &Notification) {
        for (key, entry) in &other.entries {
            self.entries.insert(key.clone(), entry.clone());
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Messages recorded for `field`, empty if none.
    pub fn field_errors(&self, field: &str) -> &[String] {
        match self.entries.get(field) {
            Some(Entry::Field(messages)) => messages,
            _ => &[],
        }
    }

    /// Field names carrying errors, in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|(key, entry)| match entry {
            Entry::Field(_) => Some(key.as_str()),
            Entry::Message => None,
        })
    }

    /// Field-less messages, in insertion order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|(key, entry)| match entry {
            Entry::Message => Some(key.as_str()),
            Entry::Field(_) => None,
        })
    }
}

/// Serialises as `[{"field": ["msg", ..]}, "bare message", ..]`.
impl Serialize for Notification {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.entries.len()))?;
        for (key, entry) in &self.entries {
            match entry {
                Entry::Field(messages) => {
                    let mut item = IndexMap::with_capacity(1);
                    item.insert(key.as_str(), messages);
                    seq.serialize_element(&item)?;
                }
                Entry::Message => seq.serialize_element(key)?,
            }
        }
        seq.end()
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, entry) in &self.entries {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            match entry {
                Entry::Field(messages) => write!(f, "{key}: {}", messages.join(", "))?,
                Entry::Message => f.write_str(key)?,
            }
        }
        Ok(())
    }
}
