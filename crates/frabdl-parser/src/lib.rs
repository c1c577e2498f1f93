//! # frabdl-parser
//!
//! Decoder and lookup index for the media listings of conference
//! recording servers.
//!
//! A listing page names every file of one format as
//! `event-id-lang1-lang2-...-Title_format.ext`. This crate turns those
//! names into per-talk records (event tag, talk id, audio languages,
//! download URL) and answers "which URL for this talk and these
//! languages" queries. It performs no I/O: link texts go in, URLs come
//! out.
//!
//! ## Quick Start
//!
//! ```
//! use frabdl_common::TalkId;
//! use frabdl_parser::{build_index, LanguageSelector};
//!
//! let links = [
//!     "32c3-7550-deu-Talk_hd.mp4",
//!     "32c3-7550-deu-eng-Talk_hd.mp4",
//!     "32c3-7551-en-Other_hd.mp4",
//! ];
//! let index = build_index("https://cdn.example/congress/2015", "h264-hd", links, false).unwrap();
//!
//! let id = TalkId::from(7550);
//! assert_eq!(index.get_languages(&id).unwrap().len(), 2);
//! assert_eq!(
//!     index.get_url(&id, &LanguageSelector::BestAvailable).unwrap(),
//!     "https://cdn.example/congress/2015/h264-hd/32c3-7550-deu-eng-Talk_hd.mp4"
//! );
//! ```
//!
//! ## Strict builds
//!
//! ```
//! use frabdl_parser::{Error, IndexBuilder};
//! use frabdl_parser::config::IndexConfig;
//!
//! let config = IndexConfig::builder().strict(true).build();
//! let err = IndexBuilder::new(config)
//!     .build("https://cdn.example", "h264-hd", ["32c3-7550-Talk_hd.mp4"])
//!     .unwrap_err();
//! assert!(matches!(err, Error::IndexBuild { .. }));
//! ```

pub mod config;
pub mod error;
pub mod model;

mod decoder;
mod index;
mod lookup;

pub use config::{BestVariantPolicy, ErrorPolicy, IndexConfig};
pub use decoder::{decode, decode_with};
pub use error::{Error, Result};
pub use index::{build_index, IndexBuilder, MediaIndex};
pub use lookup::LanguageSelector;
pub use model::{
    language_key, resolve_as, to_canonical, DecodedEntry, LanguageCode, LanguageStandard,
    SkippedEntry, TalkRecord, Variant, TABLE_VERSION,
};
