//! Turning a talk id into the list of files to fetch.
//!
//! Planning resolves every URL and target name up front; fetching the
//! files is left to the caller.

use crate::schedule::{Lecture, Schedule};
use anyhow::Result;
use frabdl_common::paths::{attachment_file_name, sanitize_title, MISSING_ATTACHMENT_MARKER};
use frabdl_common::TalkId;
use frabdl_parser::{LanguageSelector, MediaIndex};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One file to fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedFile {
    pub url: String,
    /// Name inside the talk folder
    pub file_name: String,
}

impl PlannedFile {
    fn from_url(url: String) -> Self {
        let file_name = attachment_file_name(&url).to_string();
        Self { url, file_name }
    }
}

/// Everything needed to fetch one talk.
#[derive(Debug, Clone, Serialize)]
pub struct DownloadPlan {
    pub talk_id: TalkId,
    pub folder: PathBuf,
    pub info_file: PathBuf,
    pub info_text: String,
    pub media: Vec<PlannedFile>,
    pub attachments: Vec<PlannedFile>,
    /// Non-fatal problems, e.g. a format without a file for this talk
    pub problems: Vec<String>,
}

impl DownloadPlan {
    pub fn is_complete(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn files(&self) -> impl Iterator<Item = &PlannedFile> {
        self.media.iter().chain(self.attachments.iter())
    }
}

/// Plan the download of one talk.
///
/// Fails if the schedule does not know the talk. A format whose listing
/// has no file for the talk is recorded in `problems`.
pub fn plan_download(
    schedule: &Schedule,
    indexes: &[MediaIndex],
    talk_id: &TalkId,
    download_dir: &Path,
    event_name: &str,
) -> Result<DownloadPlan> {
    let lecture = schedule
        .lecture(talk_id)
        .ok_or_else(|| frabdl_parser::Error::UnknownTalkId(talk_id.clone()))?;

    let folder = download_dir.join(folder_name(schedule, lecture, talk_id));
    let info_file = folder.join(format!("info_{}.txt", talk_id));
    let info_text = schedule.info_text(&TalkId::Numeric(lecture.id))?;

    let media_id = TalkId::Numeric(lecture.id);
    let mut media = Vec::new();
    let mut problems = Vec::new();
    for index in indexes {
        match index.get_url(&media_id, &LanguageSelector::BestAvailable) {
            Ok(url) => media.push(PlannedFile::from_url(url.to_string())),
            Err(e) => {
                tracing::warn!(
                    "{}: no \"{}\" file for talk {}: {}",
                    event_name,
                    index.format(),
                    talk_id,
                    e
                );
                problems.push(format!(
                    "Could not find format \"{}\" for talk \"{}\": {}",
                    index.format(),
                    talk_id,
                    e.kind()
                ));
            }
        }
    }

    let attachments = lecture
        .attachments
        .iter()
        .map(|att| format!("{}/{}", schedule.base_page, att.url))
        .filter(|url| !url.contains(MISSING_ATTACHMENT_MARKER))
        .map(PlannedFile::from_url)
        .collect();

    Ok(DownloadPlan {
        talk_id: talk_id.clone(),
        folder,
        info_file,
        info_text,
        media,
        attachments,
        problems,
    })
}

fn folder_name(schedule: &Schedule, lecture: &Lecture, talk_id: &TalkId) -> String {
    match talk_id {
        TalkId::Numeric(_) => lecture
            .slug
            .clone()
            .unwrap_or_else(|| lecture.id.to_string()),
        TalkId::Slug(_) => format!(
            "{}-{}-{}",
            schedule.meta.conference.replace(' ', "_"),
            lecture.id,
            sanitize_title(&lecture.title)
        ),
    }
}
