//! frabdl - fetch conference talk recordings
//!
//! Collaborators around the media listing index of `frabdl-parser`:
//! configuration, listing and schedule retrieval, id lists and download
//! planning.

pub mod client;
pub mod config;
pub mod idlist;
pub mod listing;
pub mod logging;
pub mod plan;
pub mod schedule;

pub use client::{build_indexes, ListingSource, MediaServerClient};
pub use config::{Config, EventConfig, Settings};
pub use plan::{plan_download, DownloadPlan, PlannedFile};
pub use schedule::{Lecture, Schedule};
