//! Fahrplan schedule extraction.
//!
//! Only the parts needed to name, describe and collect the files of a talk
//! are read from `schedule.json`.

use crate::client::MediaServerClient;
use anyhow::{Context, Result};
use frabdl_common::TalkId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Column at which info text paragraphs are wrapped.
const WRAP_WIDTH: usize = 80;

/// Widest title column in the links section.
const MAX_LINK_TITLE_WIDTH: usize = 37;

const ABSTRACT_BANNER: &str =
    "########################\n#--     Abstract     --#\n########################\n\n";
const DESCRIPTION_BANNER: &str =
    "########################\n#--    Description   --#\n########################\n\n";
const LINKS_BANNER: &str =
    "########################\n#--       Links      --#\n########################\n\n";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScheduleMeta {
    pub version: String,
    pub conference: String,
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Link {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Attachment {
    /// Relative to the Fahrplan base page
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Lecture {
    pub id: u64,
    #[serde(default)]
    pub slug: Option<String>,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(rename = "abstract", default)]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl Lecture {
    /// The id users refer to this talk by: the slug when there is one.
    pub fn talk_id(&self) -> TalkId {
        match &self.slug {
            Some(slug) => TalkId::Slug(slug.clone()),
            None => TalkId::Numeric(self.id),
        }
    }
}

#[derive(Deserialize)]
struct ScheduleFile {
    schedule: RawSchedule,
}

#[derive(Deserialize)]
struct RawSchedule {
    version: String,
    conference: RawConference,
}

#[derive(Deserialize)]
struct RawConference {
    title: String,
    start: String,
    end: String,
    days: Vec<RawDay>,
}

#[derive(Deserialize)]
struct RawDay {
    rooms: BTreeMap<String, Vec<Lecture>>,
}

/// The lectures of one event.
#[derive(Debug, Clone)]
pub struct Schedule {
    /// Fahrplan base page; attachment URLs are relative to it
    pub base_page: String,
    /// Where the JSON was read from
    pub location: String,
    pub meta: ScheduleMeta,
    pub lectures: BTreeMap<u64, Lecture>,
}

impl Schedule {
    /// Parse `schedule.json` text.
    pub fn from_json(text: &str, base_page: &str, location: &str) -> Result<Self> {
        let file: ScheduleFile = serde_json::from_str(text).with_context(|| {
            format!(
                "Fahrplan file \"{}\" is not in the expected format",
                location
            )
        })?;

        let RawSchedule {
            version,
            conference,
        } = file.schedule;

        let lectures = conference
            .days
            .into_iter()
            .flat_map(|day| day.rooms.into_values().flatten())
            .map(|lecture| (lecture.id, lecture))
            .collect();

        Ok(Self {
            base_page: base_page.to_string(),
            location: location.to_string(),
            meta: ScheduleMeta {
                version,
                conference: conference.title,
                start: conference.start,
                end: conference.end,
            },
            lectures,
        })
    }

    /// Read the schedule from a local file if `location` exists on disk,
    /// otherwise download it.
    pub async fn load(location: &str, base_page: &str, client: &MediaServerClient) -> Result<Self> {
        let text = if Path::new(location).exists() {
            tokio::fs::read_to_string(location)
                .await
                .with_context(|| format!("Could not get the Fahrplan from \"{}\"", location))?
        } else {
            client
                .fetch_text(location)
                .await
                .with_context(|| format!("Could not get the Fahrplan from \"{}\"", location))?
        };
        let schedule = Self::from_json(&text, base_page, location)?;
        tracing::info!(
            "Got \"{}\", version \"{}\" ({} lectures)",
            schedule.meta.conference,
            schedule.meta.version,
            schedule.lectures.len()
        );
        Ok(schedule)
    }

    /// Look up a lecture by numeric id or by slug.
    pub fn lecture(&self, talk_id: &TalkId) -> Option<&Lecture> {
        match talk_id {
            TalkId::Numeric(id) => self.lectures.get(id),
            TalkId::Slug(slug) => {
                let mut matches = self
                    .lectures
                    .values()
                    .filter(|l| l.slug.as_deref() == Some(slug.as_str()));
                match (matches.next(), matches.next()) {
                    (Some(lecture), None) => Some(lecture),
                    _ => None,
                }
            }
        }
    }

    /// Ids of every lecture, slugs preferred.
    pub fn all_talk_ids(&self) -> Vec<TalkId> {
        self.lectures.values().map(Lecture::talk_id).collect()
    }

    /// Human-readable description of a lecture for `info_<id>.txt`.
    pub fn info_text(&self, talk_id: &TalkId) -> Result<String> {
        let lecture = self
            .lecture(talk_id)
            .ok_or_else(|| frabdl_parser::Error::UnknownTalkId(talk_id.clone()))?;
        Ok(render_info(lecture))
    }
}

fn render_info(lecture: &Lecture) -> String {
    let mut out = String::new();
    out.push_str(&lecture.title);
    out.push('\n');
    out.push_str(lecture.subtitle.as_deref().unwrap_or_default());
    out.push_str("\n\n");

    out.push_str(ABSTRACT_BANNER);
    out.push_str(&wrap(lecture.abstract_text.as_deref().unwrap_or_default()));
    out.push_str("\n\n");

    out.push_str(DESCRIPTION_BANNER);
    out.push_str(&wrap(lecture.description.as_deref().unwrap_or_default()));

    if lecture.links.is_empty() {
        return out;
    }

    out.push_str("\n\n");
    out.push_str(LINKS_BANNER);
    let width = lecture
        .links
        .iter()
        .map(|l| l.title.chars().count())
        .max()
        .unwrap_or(0)
        .min(MAX_LINK_TITLE_WIDTH);
    for link in &lecture.links {
        out.push_str(&format!(
            "  - {:<width$}   {}\n",
            link.title,
            link.url,
            width = width
        ));
    }
    out
}

/// Fill `text` to [`WRAP_WIDTH`] columns.
///
/// All whitespace, line breaks included, is collapsed first; words longer
/// than a line are split.
fn wrap(text: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    textwrap::fill(&words.join(" "), WRAP_WIDTH)
}
