//! The media index: per-talk records for one (event, format) listing.

use std::collections::BTreeMap;

use frabdl_common::TalkId;
use tracing::{debug, warn};

use crate::config::{BestVariantPolicy, IndexConfig};
use crate::decoder::decode_with;
use crate::error::{Error, Result};
use crate::model::{DecodedEntry, SkippedEntry, TalkRecord, Variant};

/// Talk records decoded from one media listing.
///
/// Built once by [`IndexBuilder`] or [`build_index`] and read-only
/// afterwards; every (event, format) pair gets its own index.
#[derive(Debug)]
pub struct MediaIndex {
    prefix: String,
    format: String,
    talks: BTreeMap<TalkId, TalkRecord>,
    skipped: Vec<SkippedEntry>,
    pub(crate) best_variant: BestVariantPolicy,
}

impl MediaIndex {
    /// An empty index for `prefix/format`.
    pub fn new(prefix: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            format: format.into(),
            talks: BTreeMap::new(),
            skipped: Vec::new(),
            best_variant: BestVariantPolicy::default(),
        }
    }

    /// Media prefix the listing was fetched from.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Format directory of the listing.
    pub fn format(&self) -> &str {
        &self.format
    }

    /// The `prefix/format/` string every variant URL starts with.
    pub fn url_prefix(&self) -> String {
        format!("{}/{}/", self.prefix, self.format)
    }

    /// Number of talks.
    pub fn len(&self) -> usize {
        self.talks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.talks.is_empty()
    }

    pub fn contains(&self, talk_id: &TalkId) -> bool {
        self.talks.contains_key(talk_id)
    }

    /// The record of one talk.
    pub fn talk(&self, talk_id: &TalkId) -> Option<&TalkRecord> {
        self.talks.get(talk_id)
    }

    /// All records, ordered by talk id.
    pub fn talks(&self) -> impl Iterator<Item = &TalkRecord> {
        self.talks.values()
    }

    /// All talk ids, ordered.
    pub fn talk_ids(&self) -> impl Iterator<Item = &TalkId> {
        self.talks.keys()
    }

    /// Entries a lenient build left out, in listing order.
    pub fn skipped(&self) -> &[SkippedEntry] {
        &self.skipped
    }

    /// Add one decoded entry.
    ///
    /// Fails without modifying the index when the event tag disagrees with
    /// an earlier file of the same talk, or when the talk already has a
    /// variant with the same language-combination key.
    pub fn merge(&mut self, entry: DecodedEntry) -> Result<()> {
        if let Some(record) = self.talks.get(&entry.talk_id) {
            if record.event_tag != entry.event_tag {
                return Err(Error::InconsistentEventTag {
                    talk_id: entry.talk_id,
                    existing: record.event_tag.clone(),
                    found: entry.event_tag,
                });
            }
            if let Some(existing) = record.variant(&entry.key) {
                return Err(Error::DuplicateLanguageCombination {
                    talk_id: entry.talk_id,
                    key: entry.key,
                    existing_url: existing.url.clone(),
                    new_url: entry.url,
                });
            }
        }

        let record = self
            .talks
            .entry(entry.talk_id.clone())
            .or_insert_with(|| TalkRecord::new(entry.talk_id, entry.event_tag));
        record.languages.extend(entry.languages.iter().copied());
        record.variants.push(Variant {
            key: entry.key,
            languages: entry.languages,
            url: entry.url,
        });
        Ok(())
    }

    fn record_skip(&mut self, entry: &str, error: Error) {
        warn!(entry, reason = error.kind(), "skipping listing entry: {}", error);
        self.skipped.push(SkippedEntry {
            entry: entry.to_string(),
            error,
        });
    }
}

/// Builds a [`MediaIndex`] from the link texts of one listing.
///
/// ```
/// use frabdl_parser::{IndexBuilder, IndexConfig};
///
/// let links = ["32c3-100-de-Title_x.mp4", "32c3-101-deu-eng-Title_y.mp4", "garbage"];
/// let index = IndexBuilder::new(IndexConfig::default())
///     .build("https://m.example/congress/2015", "h264-hd", links)
///     .unwrap();
/// assert_eq!(index.len(), 2);
/// assert_eq!(index.skipped().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct IndexBuilder {
    config: IndexConfig,
}

impl IndexBuilder {
    pub fn new(config: IndexConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Decode and merge every link, in order.
    ///
    /// Lenient builds log and record failing entries; strict builds stop at
    /// the first one with [`Error::IndexBuild`].
    pub fn build<I, S>(&self, prefix: &str, format: &str, links: I) -> Result<MediaIndex>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = MediaIndex::new(prefix, format);
        index.best_variant = self.config.best_variant;
        let url_prefix = index.url_prefix();

        for link in links {
            let link = link.as_ref();
            let outcome = decode_with(link, &url_prefix, &self.config)
                .and_then(|entry| index.merge(entry));
            if let Err(error) = outcome {
                if self.config.is_strict() {
                    return Err(Error::IndexBuild {
                        entry: link.to_string(),
                        source: Box::new(error),
                    });
                }
                index.record_skip(link, error);
            }
        }

        debug!(
            prefix,
            format,
            talks = index.len(),
            skipped = index.skipped.len(),
            "media index built"
        );
        Ok(index)
    }
}

/// Build an index with the default settings and the given strictness.
pub fn build_index<I, S>(prefix: &str, format: &str, links: I, strict: bool) -> Result<MediaIndex>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    IndexBuilder::new(IndexConfig::with_strict(strict)).build(prefix, format, links)
}
