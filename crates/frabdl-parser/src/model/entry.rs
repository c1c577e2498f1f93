use std::collections::BTreeSet;

use frabdl_common::TalkId;

use super::{language_key, LanguageCode, LanguageStandard};

/// One media file name, split into its parts.
///
/// Produced by [`decode`](crate::decode); consumed by
/// [`MediaIndex::merge`](crate::MediaIndex::merge).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecodedEntry {
    /// Talk the file belongs to.
    pub talk_id: TalkId,
    /// Event tag (segment 0), e.g. `32c3`.
    pub event_tag: String,
    /// Location qualifier, only set when location segments are enabled.
    pub location: Option<String>,
    /// Audio languages of the file.
    pub languages: BTreeSet<LanguageCode>,
    /// Language-combination key, see [`language_key`].
    pub key: String,
    /// Download URL: the caller's prefix followed by the link text.
    pub url: String,
    /// Standard the run was written in.
    pub standard: LanguageStandard,
    /// Remaining segments joined by `-`, from the first title segment on.
    pub title: Option<String>,
    /// The raw link text.
    pub link: String,
}

impl DecodedEntry {
    /// Recompute the key from `languages`.
    pub fn computed_key(&self) -> String {
        language_key(&self.languages)
    }
}
