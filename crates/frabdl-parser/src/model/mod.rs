//! Data model for decoded listing entries and the per-talk records built
//! from them.

mod entry;
mod language;
mod talk;

pub use entry::DecodedEntry;
pub use language::{
    language_key, resolve_as, to_canonical, LanguageCode, LanguageStandard, TABLE_VERSION,
};
pub use talk::{SkippedEntry, TalkRecord, Variant};
