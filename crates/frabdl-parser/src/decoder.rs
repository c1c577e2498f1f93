//! Filename decoder.
//!
//! Media listings name files `event-id-lang1-lang2-...-Title_format.ext`.
//! The decoder isolates the language run and resolves every code in it;
//! everything after the run is kept verbatim as the title.

use std::collections::BTreeSet;

use frabdl_common::TalkId;
use tracing::debug;

use crate::config::IndexConfig;
use crate::error::{Error, Result};
use crate::model::{language_key, resolve_as, DecodedEntry, LanguageCode, LanguageStandard};

/// Smallest number of `-` separated segments a media file name can have.
const MIN_SEGMENTS: usize = 4;

/// Decode one link text with the default configuration.
///
/// `url_prefix` is prepended to the link text unchanged to form the URL.
///
/// # Examples
///
/// ```
/// use frabdl_parser::decode;
///
/// let entry = decode("32c3-7550-deu-eng-Nice_Talk_webm.webm", "https://m.example/webm-hd/").unwrap();
/// assert_eq!(entry.event_tag, "32c3");
/// assert_eq!(entry.key, "deu-eng");
/// assert_eq!(entry.url, "https://m.example/webm-hd/32c3-7550-deu-eng-Nice_Talk_webm.webm");
/// ```
pub fn decode(link: &str, url_prefix: &str) -> Result<DecodedEntry> {
    decode_with(link, url_prefix, &IndexConfig::default())
}

/// Decode one link text.
///
/// The first language token fixes the standard for the rest of the run.
/// A lower-case token that does not resolve ends the run once at least one
/// language was accepted; before that it is an error.
pub fn decode_with(link: &str, url_prefix: &str, config: &IndexConfig) -> Result<DecodedEntry> {
    let segments: Vec<&str> = link.split('-').collect();
    if segments.len() < MIN_SEGMENTS {
        return Err(Error::malformed(link, "too few segments"));
    }

    let event_tag = segments[0];
    let (location, id_index) = if config.location_segment && !is_numeric(segments[1]) {
        (Some(segments[1].to_string()), 2)
    } else {
        (None, 1)
    };

    let id_text = segments[id_index];
    let talk_id = id_text
        .parse::<u64>()
        .map(TalkId::Numeric)
        .map_err(|_| Error::malformed(link, format!("invalid talk id \"{}\"", id_text)))?;

    let mut languages: BTreeSet<LanguageCode> = BTreeSet::new();
    let mut standard: Option<LanguageStandard> = None;
    let mut title_start = None;

    for (pos, token) in segments.iter().enumerate().skip(id_index + 1) {
        match token.chars().next() {
            Some(c) if c.is_lowercase() => {}
            Some(c) if c.is_uppercase() || c.is_ascii_digit() => {
                title_start = Some(pos);
                break;
            }
            _ => {
                return Err(Error::invalid_language(
                    link,
                    format!("unexpected segment \"{}\"", token),
                ))
            }
        }

        let active = standard.or_else(|| LanguageStandard::for_token(token));
        let resolved = match active {
            Some(s) => resolve_as(token, s),
            None => Err(Error::UnknownLanguageCode {
                code: token.to_string(),
            }),
        };

        match resolved {
            Ok(code) => {
                standard = active;
                languages.insert(code);
            }
            Err(_) if !languages.is_empty() => {
                debug!(link, token, "language run ends at unresolvable token");
                title_start = Some(pos);
                break;
            }
            Err(err) => return Err(Error::invalid_language(link, err.to_string())),
        }
    }

    let Some(standard) = standard else {
        return Err(Error::invalid_language(link, "no language codes"));
    };

    let key = language_key(&languages);
    let title = title_start.map(|pos| segments[pos..].join("-"));

    Ok(DecodedEntry {
        talk_id,
        event_tag: event_tag.to_string(),
        location,
        languages,
        key,
        url: format!("{}{}", url_prefix, link),
        standard,
        title,
        link: link.to_string(),
    })
}

fn is_numeric(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const PREFIX: &str = "https://cdn.example/congress/2015/h264-hd/";

    fn codes(entry: &DecodedEntry) -> Vec<&'static str> {
        entry.languages.iter().map(|c| c.as_str()).collect()
    }

    #[test]
    fn test_single_language() {
        let entry = decode("32c3-7550-deu-Talk_Title_hd.mp4", PREFIX).unwrap();
        assert_eq!(entry.talk_id, TalkId::Numeric(7550));
        assert_eq!(entry.event_tag, "32c3");
        assert_eq!(codes(&entry), ["deu"]);
        assert_eq!(entry.key, "deu");
        assert_eq!(entry.standard, LanguageStandard::Alpha3);
        assert_eq!(entry.title.as_deref(), Some("Talk_Title_hd.mp4"));
        assert_eq!(entry.location, None);
    }

    #[test]
    fn test_url_is_prefix_plus_link() {
        let link = "32c3-7550-deu-Talk_Title_hd.mp4";
        let entry = decode(link, PREFIX).unwrap();
        assert_eq!(entry.url, format!("{}{}", PREFIX, link));
        assert_eq!(entry.link, link);
    }

    #[test]
    fn test_alpha2_run_is_normalised() {
        let entry = decode("32c3-100-de-Title_x.mp4", PREFIX).unwrap();
        assert_eq!(codes(&entry), ["deu"]);
        assert_eq!(entry.standard, LanguageStandard::Alpha2);
    }

    #[test]
    fn test_mixed_standards_across_talks() {
        let two = decode("32c3-100-de-Title_x.mp4", PREFIX).unwrap();
        let three = decode("32c3-101-deu-eng-Title_y.mp4", PREFIX).unwrap();
        assert_eq!(codes(&two), ["deu"]);
        assert_eq!(codes(&three), ["deu", "eng"]);
        assert_eq!(two.standard, LanguageStandard::Alpha2);
        assert_eq!(three.standard, LanguageStandard::Alpha3);
    }

    #[test]
    fn test_regional_languages() {
        let entry = decode("gpn18-42-deu-swg-Spaetzle_hd.mp4", PREFIX).unwrap();
        assert_eq!(codes(&entry), ["deu", "swg"]);
        assert_eq!(entry.key, "deu-swg");
    }

    #[test]
    fn test_unresolvable_token_after_languages_starts_title() {
        let entry = decode("32c3-100-deu-eng-special-Title_x.mp4", PREFIX).unwrap();
        assert_eq!(codes(&entry), ["deu", "eng"]);
        assert_eq!(entry.title.as_deref(), Some("special-Title_x.mp4"));
    }

    #[test]
    fn test_other_standard_inside_run_starts_title() {
        let entry = decode("32c3-100-deu-en-Title_x.mp4", PREFIX).unwrap();
        assert_eq!(codes(&entry), ["deu"]);
        assert_eq!(entry.title.as_deref(), Some("en-Title_x.mp4"));
    }

    #[test]
    fn test_unresolvable_first_token_fails() {
        let err = decode("32c3-100-special-Title_x.mp4", PREFIX).unwrap_err();
        assert_matches!(err, Error::InvalidLanguageCode { .. });
    }

    #[test]
    fn test_empty_run_fails() {
        let err = decode("32c3-100-Title-More_x.mp4", PREFIX).unwrap_err();
        assert_matches!(err, Error::InvalidLanguageCode { ref detail, .. } if detail == "no language codes");
    }

    #[test]
    fn test_digit_starts_title() {
        let entry = decode("32c3-100-eng-3D_Printing_hd.mp4", PREFIX).unwrap();
        assert_eq!(entry.title.as_deref(), Some("3D_Printing_hd.mp4"));
    }

    #[test]
    fn test_empty_segment_fails() {
        let err = decode("32c3-100--deu-Title_x.mp4", PREFIX).unwrap_err();
        assert_matches!(err, Error::InvalidLanguageCode { .. });
    }

    #[test]
    fn test_punctuation_segment_fails() {
        let err = decode("32c3-100-_deu-Title_x.mp4", PREFIX).unwrap_err();
        assert_matches!(err, Error::InvalidLanguageCode { .. });
    }

    #[test]
    fn test_too_few_segments() {
        let err = decode("32c3-100-deu.mp4", PREFIX).unwrap_err();
        assert_matches!(err, Error::MalformedEntry { ref reason, .. } if reason == "too few segments");
    }

    #[test]
    fn test_non_numeric_id() {
        let err = decode("32c3-abc-deu-Title_x.mp4", PREFIX).unwrap_err();
        assert_matches!(err, Error::MalformedEntry { .. });
    }

    #[test]
    fn test_historical_alias() {
        let entry = decode("34c3-9000-chi-eng-Title_x.mp4", PREFIX).unwrap();
        assert_eq!(entry.key, "eng-zho");
    }

    #[test]
    fn test_run_without_title() {
        let entry = decode("32c3-100-deu-eng-fra", PREFIX).unwrap();
        assert_eq!(entry.key, "deu-eng-fra");
        assert_eq!(entry.title, None);
    }

    #[test]
    fn test_location_segment_disabled_by_default() {
        let err = decode("gpn19-saal-42-deu-Title_x.mp4", PREFIX).unwrap_err();
        assert_matches!(err, Error::MalformedEntry { .. });
    }

    #[test]
    fn test_location_segment() {
        let config = IndexConfig::builder().location_segment(true).build();
        let entry = decode_with("gpn19-saal-42-deu-Title_x.mp4", PREFIX, &config).unwrap();
        assert_eq!(entry.talk_id, TalkId::Numeric(42));
        assert_eq!(entry.location.as_deref(), Some("saal"));
        assert_eq!(codes(&entry), ["deu"]);

        // Numeric segment 1 is still the id.
        let entry = decode_with("32c3-100-deu-Title_x.mp4", PREFIX, &config).unwrap();
        assert_eq!(entry.talk_id, TalkId::Numeric(100));
        assert_eq!(entry.location, None);
    }

    #[test]
    fn test_decode_is_pure() {
        let link = "32c3-101-deu-eng-Title_y.mp4";
        assert_eq!(decode(link, PREFIX).unwrap(), decode(link, PREFIX).unwrap());
    }

    #[test]
    fn test_key_matches_languages() {
        let entry = decode("32c3-101-eng-deu-Title_y.mp4", PREFIX).unwrap();
        assert_eq!(entry.key, entry.computed_key());
        assert_eq!(entry.key, "deu-eng");
    }
}
