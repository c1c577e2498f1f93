//! Lookup of languages and download URLs in a built [`MediaIndex`].

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use frabdl_common::TalkId;

use crate::config::BestVariantPolicy;
use crate::error::{Error, Result};
use crate::index::MediaIndex;
use crate::model::{language_key, to_canonical, LanguageCode, TalkRecord, Variant};

/// Which file of a talk to pick.
///
/// Parsed from the strings users write:
///
/// ```
/// use frabdl_parser::LanguageSelector;
///
/// assert_eq!("ALL".parse::<LanguageSelector>().unwrap(), LanguageSelector::BestAvailable);
/// assert!(matches!(
///     "deu,eng".parse::<LanguageSelector>().unwrap(),
///     LanguageSelector::Exact(set) if set.len() == 2
/// ));
/// assert!(matches!(
///     "+de".parse::<LanguageSelector>().unwrap(),
///     LanguageSelector::Containing(set) if set.len() == 1
/// ));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LanguageSelector {
    /// The file with the most audio languages.
    #[default]
    BestAvailable,
    /// The file with exactly these languages.
    Exact(BTreeSet<LanguageCode>),
    /// The smallest file that has at least these languages.
    Containing(BTreeSet<LanguageCode>),
}

impl LanguageSelector {
    /// Exact selection from any iterable of codes.
    pub fn exact(codes: impl IntoIterator<Item = LanguageCode>) -> Self {
        LanguageSelector::Exact(codes.into_iter().collect())
    }

    /// Containment selection from any iterable of codes.
    pub fn containing(codes: impl IntoIterator<Item = LanguageCode>) -> Self {
        LanguageSelector::Containing(codes.into_iter().collect())
    }
}

impl FromStr for LanguageSelector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s == "ALL" || s.eq_ignore_ascii_case("best") {
            return Ok(LanguageSelector::BestAvailable);
        }
        let (containing, list) = match s.strip_prefix('+') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let codes = list
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(to_canonical)
            .collect::<Result<BTreeSet<_>>>()?;
        if codes.is_empty() {
            return Err(Error::invalid_language(s, "no language codes"));
        }
        Ok(if containing {
            LanguageSelector::Containing(codes)
        } else {
            LanguageSelector::Exact(codes)
        })
    }
}

impl fmt::Display for LanguageSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |set: &BTreeSet<LanguageCode>| {
            set.iter().map(|c| c.as_str()).collect::<Vec<_>>().join(",")
        };
        match self {
            LanguageSelector::BestAvailable => f.write_str("ALL"),
            LanguageSelector::Exact(set) => f.write_str(&join(set)),
            LanguageSelector::Containing(set) => write!(f, "+{}", join(set)),
        }
    }
}

impl MediaIndex {
    /// All languages seen for a talk.
    pub fn get_languages(&self, talk_id: &TalkId) -> Result<&BTreeSet<LanguageCode>> {
        self.record(talk_id).map(TalkRecord::languages)
    }

    /// URL of the talk's file chosen by `selector`.
    ///
    /// ```
    /// use frabdl_parser::{build_index, LanguageSelector};
    /// use frabdl_common::TalkId;
    ///
    /// let links = ["32c3-100-deu-T_x.mp4", "32c3-100-deu-eng-T_x.mp4"];
    /// let index = build_index("https://m.example", "h264-hd", links, true).unwrap();
    /// let url = index.get_url(&TalkId::from(100), &LanguageSelector::BestAvailable).unwrap();
    /// assert_eq!(url, "https://m.example/h264-hd/32c3-100-deu-eng-T_x.mp4");
    /// ```
    pub fn get_url(&self, talk_id: &TalkId, selector: &LanguageSelector) -> Result<&str> {
        let record = self.record(talk_id)?;
        let variant = match selector {
            LanguageSelector::BestAvailable => best_variant(record, self.best_variant)
                .ok_or_else(|| Error::UnknownTalkId(talk_id.clone()))?,
            LanguageSelector::Exact(codes) => {
                let key = language_key(codes);
                record
                    .variant(&key)
                    .ok_or_else(|| Error::UnimplementedSelector {
                        talk_id: talk_id.clone(),
                        key,
                    })?
            }
            LanguageSelector::Containing(codes) => smallest_superset(record, codes)
                .ok_or_else(|| Error::NoMatchingVariant {
                    talk_id: talk_id.clone(),
                    key: language_key(codes),
                })?,
        };
        Ok(&variant.url)
    }

    fn record(&self, talk_id: &TalkId) -> Result<&TalkRecord> {
        self.talk(talk_id)
            .ok_or_else(|| Error::UnknownTalkId(talk_id.clone()))
    }
}

/// First variant with the highest score under `policy`.
fn best_variant(record: &TalkRecord, policy: BestVariantPolicy) -> Option<&Variant> {
    let score = |v: &Variant| match policy {
        BestVariantPolicy::LanguageCount => v.languages.len(),
        BestVariantPolicy::KeyLength => v.key.len(),
    };
    let (first, rest) = record.variants.split_first()?;
    Some(rest.iter().fold(first, |best, v| {
        if score(v) > score(best) {
            v
        } else {
            best
        }
    }))
}

fn smallest_superset<'a>(record: &'a TalkRecord, codes: &BTreeSet<LanguageCode>) -> Option<&'a Variant> {
    record
        .variants
        .iter()
        .filter(|v| v.languages.is_superset(codes))
        .min_by_key(|v| v.languages.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IndexConfig;
    use crate::decode;
    use crate::index::{build_index, IndexBuilder};
    use assert_matches::assert_matches;

    const PREFIX: &str = "https://cdn.example/congress/2016";

    fn selector(s: &str) -> LanguageSelector {
        s.parse().unwrap()
    }

    fn sample() -> MediaIndex {
        build_index(
            PREFIX,
            "h264-hd",
            [
                "33c3-8000-deu-Talk_hd.mp4",
                "33c3-8000-deu-eng-Talk_hd.mp4",
                "33c3-8000-deu-eng-fra-Talk_hd.mp4",
                "33c3-8000-eng-Talk_hd.mp4",
                "33c3-8001-en-Other_hd.mp4",
            ],
            true,
        )
        .unwrap()
    }

    #[test]
    fn test_get_languages_matches_decoded_set() {
        let link = "33c3-8100-deu-eng-Title_hd.mp4";
        let decoded = decode(link, "x/").unwrap();
        let index = build_index(PREFIX, "h264-hd", [link], true).unwrap();
        assert_eq!(index.get_languages(&decoded.talk_id).unwrap(), &decoded.languages);
    }

    #[test]
    fn test_get_languages_union() {
        let index = sample();
        let langs: Vec<_> = index
            .get_languages(&TalkId::from(8000))
            .unwrap()
            .iter()
            .map(|c| c.as_str())
            .collect();
        assert_eq!(langs, ["deu", "eng", "fra"]);
    }

    #[test]
    fn test_unknown_talk_id() {
        let index = sample();
        assert_matches!(
            index.get_url(&TalkId::from(999), &LanguageSelector::BestAvailable),
            Err(Error::UnknownTalkId(TalkId::Numeric(999)))
        );
        assert_matches!(
            index.get_languages(&TalkId::from(999)),
            Err(Error::UnknownTalkId(_))
        );
    }

    #[test]
    fn test_best_available_prefers_most_languages() {
        let index = sample();
        let url = index
            .get_url(&TalkId::from(8000), &LanguageSelector::BestAvailable)
            .unwrap();
        assert_eq!(url, format!("{}/h264-hd/33c3-8000-deu-eng-fra-Talk_hd.mp4", PREFIX));
    }

    #[test]
    fn test_best_available_is_among_variants() {
        let index = sample();
        for record in index.talks() {
            let url = index
                .get_url(record.talk_id(), &LanguageSelector::BestAvailable)
                .unwrap();
            assert!(record.variants().iter().any(|v| v.url == url));
        }
    }

    #[test]
    fn test_best_available_tie_keeps_first() {
        let index = build_index(
            PREFIX,
            "h264-hd",
            ["33c3-1-eng-A_hd.mp4", "33c3-1-deu-B_hd.mp4"],
            true,
        )
        .unwrap();
        let url = index
            .get_url(&TalkId::from(1), &LanguageSelector::BestAvailable)
            .unwrap();
        assert!(url.ends_with("A_hd.mp4"));
    }

    #[test]
    fn test_key_length_policy() {
        let links = ["33c3-6-deu-A_hd.mp4", "33c3-6-deu-eng-rus-B_hd.mp4", "33c3-6-eng-C_hd.mp4"];
        let config = IndexConfig::builder()
            .best_variant(BestVariantPolicy::KeyLength)
            .build();
        let index = IndexBuilder::new(config)
            .build(PREFIX, "h264-hd", links)
            .unwrap();
        let url = index
            .get_url(&TalkId::from(6), &LanguageSelector::BestAvailable)
            .unwrap();
        assert!(url.ends_with("B_hd.mp4"));
    }

    #[test]
    fn test_exact_selector() {
        let index = sample();
        let url = index
            .get_url(&TalkId::from(8000), &selector("eng,deu"))
            .unwrap();
        assert!(url.ends_with("33c3-8000-deu-eng-Talk_hd.mp4"));
    }

    #[test]
    fn test_exact_selector_miss_is_unimplemented() {
        let index = sample();
        assert_matches!(
            index.get_url(&TalkId::from(8000), &selector("fra")),
            Err(Error::UnimplementedSelector { ref key, .. }) if key == "fra"
        );
    }

    #[test]
    fn test_containing_selector_picks_smallest_superset() {
        let index = sample();
        let url = index
            .get_url(&TalkId::from(8000), &selector("+eng"))
            .unwrap();
        assert!(url.ends_with("33c3-8000-eng-Talk_hd.mp4"));

        let url = index
            .get_url(&TalkId::from(8000), &selector("+fr"))
            .unwrap();
        assert!(url.ends_with("33c3-8000-deu-eng-fra-Talk_hd.mp4"));
    }

    #[test]
    fn test_containing_selector_miss() {
        let index = sample();
        assert_matches!(
            index.get_url(&TalkId::from(8001), &selector("+deu")),
            Err(Error::NoMatchingVariant { .. })
        );
    }

    #[test]
    fn test_selector_parsing() {
        assert_eq!(selector("best"), LanguageSelector::BestAvailable);
        assert_eq!(selector(" ALL "), LanguageSelector::BestAvailable);
        assert_eq!(selector("de, en").to_string(), "deu,eng");
        assert_eq!(selector("+ger").to_string(), "+deu");
        assert_matches!("".parse::<LanguageSelector>(), Err(Error::InvalidLanguageCode { .. }));
        assert_matches!(
            "deu,xx".parse::<LanguageSelector>(),
            Err(Error::UnknownLanguageCode { ref code }) if code == "xx"
        );
    }
}
