use std::collections::BTreeSet;

use frabdl_common::TalkId;

use super::LanguageCode;
use crate::error::Error;

/// One file of a talk, identified by its language-combination key.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Variant {
    /// Language-combination key.
    pub key: String,
    /// Audio languages of the file.
    pub languages: BTreeSet<LanguageCode>,
    /// Download URL, passed through unchanged.
    pub url: String,
}

/// Everything the index knows about one talk.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TalkRecord {
    pub(crate) talk_id: TalkId,
    pub(crate) event_tag: String,
    pub(crate) languages: BTreeSet<LanguageCode>,
    pub(crate) variants: Vec<Variant>,
}

impl TalkRecord {
    pub(crate) fn new(talk_id: TalkId, event_tag: String) -> Self {
        Self {
            talk_id,
            event_tag,
            languages: BTreeSet::new(),
            variants: Vec::new(),
        }
    }

    /// The talk's id.
    pub fn talk_id(&self) -> &TalkId {
        &self.talk_id
    }

    /// Event tag shared by all files of the talk.
    pub fn event_tag(&self) -> &str {
        &self.event_tag
    }

    /// Union of the languages of all variants.
    pub fn languages(&self) -> &BTreeSet<LanguageCode> {
        &self.languages
    }

    /// Variants in listing order.
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// The variant with the given language-combination key.
    pub fn variant(&self, key: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.key == key)
    }
}

/// A listing entry that a lenient build left out, with the reason.
#[derive(Debug)]
pub struct SkippedEntry {
    /// The raw link text.
    pub entry: String,
    /// Why it was skipped.
    pub error: Error,
}

impl SkippedEntry {
    /// Short reason, as returned by [`Error::kind`].
    pub fn reason(&self) -> &'static str {
        self.error.kind()
    }
}
