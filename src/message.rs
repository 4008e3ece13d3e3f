use serde::Deserialize;
use std::borrow::Cow;
use std::collections::HashMap;
use unicode_normalization::{is_nfc_quick, IsNormalized, UnicodeNormalization};

/// Separator gettext uses between context and msgid in a lookup key.
const CONTEXT_SEPARATOR: char = '\u{4}';

/// Role of a positional argument in a translation call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Domain,
    Msgctxt,
    Msgid,
    MsgidPlural,
    N,
    Category,
    /// Any tag we don't know about. It still occupies its position.
    #[serde(other)]
    Other,
}

/// Maps a function name to the roles of its positional arguments.
pub type IdentifierSpec = HashMap<String, Vec<Role>>;

/// The gettext family recognized when no identifiers are configured.
pub fn default_identifiers() -> IdentifierSpec {
    use Role::*;

    let table: [(&str, Vec<Role>); 11] = [
        ("gettext", vec![Msgid]),
        ("dgettext", vec![Domain, Msgid]),
        ("dcgettext", vec![Domain, Msgid, Category]),
        ("ngettext", vec![Msgid, MsgidPlural, N]),
        ("dngettext", vec![Domain, Msgid, MsgidPlural, N]),
        ("dcngettext", vec![Domain, Msgid, MsgidPlural, N, Category]),
        ("pgettext", vec![Msgctxt, Msgid]),
        ("dpgettext", vec![Domain, Msgctxt, Msgid]),
        ("npgettext", vec![Msgctxt, Msgid, MsgidPlural, N]),
        ("dnpgettext", vec![Domain, Msgctxt, Msgid, MsgidPlural, N]),
        (
            "dcnpgettext",
            vec![Domain, Msgctxt, Msgid, MsgidPlural, N, Category],
        ),
    ];

    table
        .into_iter()
        .map(|(name, roles)| (name.to_string(), roles))
        .collect()
}

/// Position of the first occurrence of `role` in a parameter list.
pub fn role_index(roles: &[Role], role: &Role) -> Option<usize> {
    roles.iter().position(|r| r == role)
}

/// One call site a message was found at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReference {
    pub filename: Option<String>,
    pub first_line: Option<usize>,
    pub first_column: Option<usize>,
    pub last_line: Option<usize>,
    pub last_column: Option<usize>,
}

impl SourceReference {
    /// A reference without location data.
    pub fn file_only(filename: Option<String>) -> Self {
        Self {
            filename,
            first_line: None,
            first_column: None,
            last_line: None,
            last_column: None,
        }
    }

    /// `file:line`, or just `file` without location data. `None` without a filename.
    pub fn flatten(&self) -> Option<String> {
        let filename = self.filename.as_deref()?;
        Some(match self.first_line {
            Some(line) => format!("{}:{}", filename, line),
            None => filename.to_string(),
        })
    }
}

/// A translatable message with everything collected about it so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEntry {
    pub msgid: String,
    /// `None` is "no context", which is not the same as `Some("")`.
    pub msgctxt: Option<String>,
    pub msgid_plural: Option<String>,
    pub references: Vec<SourceReference>,
    pub extracted_comments: Vec<String>,
}

impl MessageEntry {
    /// Catalog key for this entry.
    pub fn key(&self) -> String {
        message_key(&self.msgid, self.msgctxt.as_deref())
    }
}

/// A message as produced by one call site, before aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedMessage {
    pub domain: String,
    pub entry: MessageEntry,
}

/// Normalize a string to NFC form for consistent key handling.
///
/// Uses `is_nfc_quick()` first so already-normalized text is borrowed, not copied.
fn normalize_key(key: &str) -> Cow<'_, str> {
    match is_nfc_quick(key.chars()) {
        IsNormalized::Yes => Cow::Borrowed(key),
        _ => Cow::Owned(key.nfc().collect()),
    }
}

/// Identity of a message inside a domain.
pub fn message_key(msgid: &str, msgctxt: Option<&str>) -> String {
    let msgid = normalize_key(msgid);
    match msgctxt {
        Some(ctx) => format!("{}{}{}", normalize_key(ctx), CONTEXT_SEPARATOR, msgid),
        None => msgid.into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_key_distinguishes_empty_context() {
        assert_ne!(message_key("File", None), message_key("File", Some("")));
        assert_eq!(message_key("File", Some("Verb")), "Verb\u{4}File");
    }

    #[test]
    fn test_message_key_nfc_normalization() {
        let nfd = "\u{304b}\u{3099}";
        let nfc = "\u{304c}";
        assert_eq!(message_key(nfd, None), message_key(nfc, None));
    }

    #[test]
    fn test_default_identifiers() {
        let ids = default_identifiers();
        assert_eq!(ids.len(), 11);
        assert_eq!(ids["gettext"], vec![Role::Msgid]);
        assert_eq!(
            ids["dcnpgettext"],
            vec![
                Role::Domain,
                Role::Msgctxt,
                Role::Msgid,
                Role::MsgidPlural,
                Role::N,
                Role::Category
            ]
        );
    }

    #[test]
    fn test_role_deserialize_unknown_tag() {
        let roles: Vec<Role> =
            serde_json::from_str(r#"["msgid", "msgid_plural", "whatever"]"#).unwrap();
        assert_eq!(roles, vec![Role::Msgid, Role::MsgidPlural, Role::Other]);
    }

    #[test]
    fn test_role_index_first_occurrence() {
        let roles = vec![Role::Other, Role::Msgid, Role::Msgid];
        assert_eq!(role_index(&roles, &Role::Msgid), Some(1));
        assert_eq!(role_index(&roles, &Role::Domain), None);
    }

    #[test]
    fn test_reference_flatten() {
        let mut reference = SourceReference::file_only(Some("foo.js".to_string()));
        assert_eq!(reference.flatten().as_deref(), Some("foo.js"));
        reference.first_line = Some(3);
        assert_eq!(reference.flatten().as_deref(), Some("foo.js:3"));
        assert_eq!(SourceReference::file_only(None).flatten(), None);
    }
}
