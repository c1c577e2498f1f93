//! Frabdl-Common: Shared types and utilities.
//!
//! This crate provides common functionality used across frabdl:
//!
//! - **Talk IDs**: [`TalkId`], either a numeric schedule id or a slug
//! - **URL Utilities**: Helpers for media and attachment URLs
//! - **Error Handling**: Common error type and result alias
//!
//! # Examples
//!
//! ```
//! use frabdl_common::TalkId;
//! use frabdl_common::paths::attachment_file_name;
//!
//! let id: TalkId = "7550".parse().unwrap();
//! assert_eq!(id, TalkId::Numeric(7550));
//!
//! assert_eq!(
//!     attachment_file_name("https://example.org/attachments/slides.pdf?1451"),
//!     "slides.pdf"
//! );
//! ```

pub mod error;
pub mod ids;
pub mod paths;

pub use error::{Error, Result};
pub use ids::TalkId;
