use thiserror::Error;

/// A recognized translation call that cannot be extracted.
///
/// These abort the whole extraction run: the call was positively identified, so a missing or
/// dynamic argument is a bug in the scanned source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("{location}: expected a context for msgid \"{msgid}\" in {function}() but none was given")]
    MissingContext {
        function: String,
        msgid: String,
        location: String,
    },

    #[error("{location}: context must be a string literal (msgid \"{msgid}\" in {function}())")]
    NonLiteralContext {
        function: String,
        msgid: String,
        location: String,
    },

    #[error("{location}: expected a domain for msgid \"{msgid}\" in {function}() but none was given")]
    MissingDomain {
        function: String,
        msgid: String,
        location: String,
    },

    #[error("{location}: domain must be a string literal (msgid \"{msgid}\" in {function}())")]
    NonLiteralDomain {
        function: String,
        msgid: String,
        location: String,
    },

    #[error("{location}: no plural specified for msgid \"{msgid}\" in {function}()")]
    MissingPlural {
        function: String,
        msgid: String,
        location: String,
    },

    #[error("{location}: plural must be a string literal (msgid \"{msgid}\" in {function}())")]
    NonLiteralPlural {
        function: String,
        msgid: String,
        location: String,
    },
}

impl ExtractError {
    /// The msgid of the offending call.
    pub fn msgid(&self) -> &str {
        match self {
            Self::MissingContext { msgid, .. }
            | Self::NonLiteralContext { msgid, .. }
            | Self::MissingDomain { msgid, .. }
            | Self::NonLiteralDomain { msgid, .. }
            | Self::MissingPlural { msgid, .. }
            | Self::NonLiteralPlural { msgid, .. } => msgid,
        }
    }
}
