//! Talk identifiers.
//!
//! Schedules identify a talk by a numeric id; newer schedule systems also
//! publish a slug which users copy from the web page. [`TalkId`] holds
//! either form so lookups can accept whatever the user supplied.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Identifier of one scheduled talk.
///
/// Numeric ids sort before slugs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TalkId {
    /// Numeric id as used in media file names and `schedule.json`.
    Numeric(u64),
    /// Opaque slug (e.g. `"34c3-9270-i_am_a_slug"`).
    Slug(String),
}

impl TalkId {
    /// The numeric id, if this is one.
    #[must_use]
    pub fn as_numeric(&self) -> Option<u64> {
        match self {
            TalkId::Numeric(n) => Some(*n),
            TalkId::Slug(_) => None,
        }
    }

    /// Whether this id is a slug.
    #[must_use]
    pub fn is_slug(&self) -> bool {
        matches!(self, TalkId::Slug(_))
    }
}

impl From<u64> for TalkId {
    fn from(id: u64) -> Self {
        TalkId::Numeric(id)
    }
}

impl fmt::Display for TalkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TalkId::Numeric(n) => write!(f, "{}", n),
            TalkId::Slug(s) => f.write_str(s),
        }
    }
}

impl FromStr for TalkId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::invalid_input("empty talk id"));
        }
        match s.parse::<u64>() {
            Ok(n) => Ok(TalkId::Numeric(n)),
            Err(_) => Ok(TalkId::Slug(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric() {
        let id: TalkId = "7550".parse().unwrap();
        assert_eq!(id, TalkId::Numeric(7550));
        assert_eq!(id.as_numeric(), Some(7550));
        assert!(!id.is_slug());
    }

    #[test]
    fn test_parse_slug() {
        let id: TalkId = " gpn17-4711-rust_for_fun ".parse().unwrap();
        assert_eq!(id, TalkId::Slug("gpn17-4711-rust_for_fun".into()));
        assert!(id.as_numeric().is_none());
    }

    #[test]
    fn test_parse_empty_fails() {
        assert!("   ".parse::<TalkId>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(TalkId::from(42).to_string(), "42");
        assert_eq!(TalkId::Slug("abc".into()).to_string(), "abc");
    }

    #[test]
    fn test_ordering_numeric_first() {
        let mut ids = vec![
            TalkId::Slug("b".into()),
            TalkId::from(10),
            TalkId::Slug("a".into()),
            TalkId::from(2),
        ];
        ids.sort();
        assert_eq!(
            ids,
            vec![
                TalkId::from(2),
                TalkId::from(10),
                TalkId::Slug("a".into()),
                TalkId::Slug("b".into()),
            ]
        );
    }

    #[test]
    fn test_serde_untagged() {
        let json = serde_json::to_string(&TalkId::from(5)).unwrap();
        assert_eq!(json, "5");
        let back: TalkId = serde_json::from_str("\"slug\"").unwrap();
        assert_eq!(back, TalkId::Slug("slug".into()));
    }
}
