//! Error type for decoding listings and querying the media index.
//!
//! Entry-level failures ([`Error::MalformedEntry`], [`Error::InvalidLanguageCode`],
//! [`Error::InconsistentEventTag`], [`Error::DuplicateLanguageCombination`]) are
//! skipped in lenient builds and wrapped in [`Error::IndexBuild`] in strict
//! builds. Lookup failures always reach the caller.

use frabdl_common::TalkId;

/// Errors produced by the resolver, decoder, index and lookup engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A token is not a known language code under the standard its length implies.
    #[error("unknown language code \"{code}\"")]
    UnknownLanguageCode {
        /// The offending token.
        code: String,
    },

    /// The entry cannot be split into event, id, languages and title.
    #[error("could not parse \"{entry}\": {reason}")]
    MalformedEntry {
        /// The raw link text.
        entry: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The language run is empty or starts with an unresolvable token.
    #[error("invalid language code in \"{entry}\": {detail}")]
    InvalidLanguageCode {
        /// The raw link text.
        entry: String,
        /// Which token failed and why.
        detail: String,
    },

    /// Two files of one talk disagree about the event tag.
    #[error("the event tags of talk {talk_id} do not agree: once \"{existing}\", once \"{found}\"")]
    InconsistentEventTag {
        /// The talk both files belong to.
        talk_id: TalkId,
        /// Tag recorded first.
        existing: String,
        /// Tag of the rejected file.
        found: String,
    },

    /// Two files of one talk carry the same set of languages.
    #[error("language key \"{key}\" of talk {talk_id} generated twice, by \"{existing_url}\" and \"{new_url}\"")]
    DuplicateLanguageCombination {
        /// The talk both files belong to.
        talk_id: TalkId,
        /// The shared language-combination key.
        key: String,
        /// URL already in the index.
        existing_url: String,
        /// URL of the rejected file.
        new_url: String,
    },

    /// The index has no record for this talk.
    #[error("unknown talk id {0}")]
    UnknownTalkId(TalkId),

    /// An exact language selection has no variant with exactly those languages.
    #[error("talk {talk_id} has no file with exactly the languages \"{key}\"; partial matches are not implemented for exact selections")]
    UnimplementedSelector {
        /// The talk that was queried.
        talk_id: TalkId,
        /// Key of the requested language set.
        key: String,
    },

    /// No variant contains all requested languages.
    #[error("talk {talk_id} has no file containing the languages \"{key}\"")]
    NoMatchingVariant {
        /// The talk that was queried.
        talk_id: TalkId,
        /// Key of the requested language set.
        key: String,
    },

    /// A strict build stopped at the first bad entry.
    #[error("index build aborted at \"{entry}\": {source}")]
    IndexBuild {
        /// The raw link text that failed.
        entry: String,
        /// The decode or merge failure.
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Short description for skip reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::UnknownLanguageCode { .. } => "unknown language code",
            Error::MalformedEntry { .. } => "failed to parse link",
            Error::InvalidLanguageCode { .. } => "invalid language code",
            Error::InconsistentEventTag { .. } => "inconsistent information",
            Error::DuplicateLanguageCombination { .. } => "duplicated language set",
            Error::UnknownTalkId(_) => "unknown talk id",
            Error::UnimplementedSelector { .. } => "unsupported language selection",
            Error::NoMatchingVariant { .. } => "no matching language set",
            Error::IndexBuild { source, .. } => source.kind(),
        }
    }

    pub(crate) fn malformed(entry: &str, reason: impl Into<String>) -> Self {
        Error::MalformedEntry {
            entry: entry.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_language(entry: &str, detail: impl Into<String>) -> Self {
        Error::InvalidLanguageCode {
            entry: entry.to_string(),
            detail: detail.into(),
        }
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
