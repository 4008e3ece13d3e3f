use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::logging;
use crate::message::{ExtractedMessage, MessageEntry};

/// Messages of one domain, keyed by `message_key`, in discovery order.
pub type DomainMessages = IndexMap<String, MessageEntry>;

/// Extracted messages grouped by domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    default_domain: String,
    domains: IndexMap<String, DomainMessages>,
}

/// One output unit: everything destined for a single domain's template file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoTemplate {
    pub domain: String,
    pub items: Vec<PoItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoItem {
    pub msgid: String,
    pub msgctxt: Option<String>,
    pub msgid_plural: Option<String>,
    /// `file:line` (or `file`) per reference.
    pub references: Vec<String>,
    pub extracted_comments: Vec<String>,
}

impl Catalog {
    pub fn new(default_domain: impl Into<String>) -> Self {
        Self {
            default_domain: default_domain.into(),
            domains: IndexMap::new(),
        }
    }

    /// Build a catalog by adding `messages` in order.
    pub fn from_messages<I>(default_domain: impl Into<String>, messages: I) -> Self
    where
        I: IntoIterator<Item = ExtractedMessage>,
    {
        let mut catalog = Self::new(default_domain);
        for message in messages {
            catalog.add_message(&message.domain, message.entry);
        }
        catalog
    }

    pub fn default_domain(&self) -> &str {
        &self.default_domain
    }

    /// Add one message, merging it into an existing entry with the same key.
    ///
    /// References and new comments are appended after the existing ones. The first
    /// plural seen for a key is kept; a later one only fills in a missing plural.
    pub fn add_message(&mut self, domain: &str, entry: MessageEntry) {
        let key = entry.key();
        let messages = self.domains.entry(domain.to_string()).or_default();

        match messages.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(entry);
            }
            Entry::Occupied(mut slot) => {
                let existing = slot.get_mut();
                if existing.msgid_plural.is_none() {
                    existing.msgid_plural = entry.msgid_plural;
                } else if let (Some(kept), Some(other)) =
                    (&existing.msgid_plural, &entry.msgid_plural)
                {
                    if kept != other {
                        logging::warn(&format!(
                            "Conflicting plural for msgid \"{}\" in domain \"{}\": keeping \"{}\", ignoring \"{}\"",
                            existing.msgid, domain, kept, other
                        ));
                    }
                }
                existing.references.extend(entry.references);
                for comment in entry.extracted_comments {
                    if !existing.extracted_comments.contains(&comment) {
                        existing.extracted_comments.push(comment);
                    }
                }
            }
        }
    }

    /// Fold another catalog into this one, domain by domain, in its discovery order.
    pub fn merge(&mut self, other: Catalog) {
        for (domain, messages) in other.domains {
            for (_, entry) in messages {
                self.add_message(&domain, entry);
            }
        }
    }

    pub fn get(&self, domain: &str, msgid: &str, msgctxt: Option<&str>) -> Option<&MessageEntry> {
        let key = crate::message::message_key(msgid, msgctxt);
        self.domains.get(domain)?.get(&key)
    }

    /// Domains with their messages, in discovery order.
    pub fn domains(&self) -> impl Iterator<Item = (&str, &DomainMessages)> {
        self.domains
            .iter()
            .map(|(domain, messages)| (domain.as_str(), messages))
    }

    /// Number of distinct messages across all domains.
    pub fn len(&self) -> usize {
        self.domains.values().map(|messages| messages.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// One template per domain that has messages.
    pub fn to_templates(&self) -> Vec<PoTemplate> {
        self.domains
            .iter()
            .filter(|(_, messages)| !messages.is_empty())
            .map(|(domain, messages)| PoTemplate {
                domain: domain.clone(),
                items: messages.values().map(PoItem::from_entry).collect(),
            })
            .collect()
    }
}

impl PoItem {
    fn from_entry(entry: &MessageEntry) -> Self {
        Self {
            msgid: entry.msgid.clone(),
            msgctxt: entry.msgctxt.clone(),
            msgid_plural: entry.msgid_plural.clone(),
            references: entry
                .references
                .iter()
                .filter_map(|reference| reference.flatten())
                .collect(),
            extracted_comments: entry.extracted_comments.clone(),
        }
    }
}
