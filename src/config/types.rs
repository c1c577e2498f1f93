use chrono::NaiveDate;
use frabdl_common::paths::join_url;
use frabdl_parser::IndexConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,

    /// Known events, keyed by the name users select them with.
    #[serde(default = "default_events")]
    pub events: BTreeMap<String, EventConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            events: default_events(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    /// Media formats in order of preference
    #[serde(default = "default_video_preference")]
    pub video_preference: Vec<String>,

    /// Abort on the first listing entry that cannot be decoded
    #[serde(default)]
    pub strict: bool,

    /// Accept `event-location-id-...` file names, as some events publish
    #[serde(default)]
    pub location_segment: bool,
}

fn default_video_preference() -> Vec<String> {
    vec![
        "webm-hd".to_string(),
        "h264-hq".to_string(),
        "h264-hd".to_string(),
    ]
}

impl Settings {
    /// Index settings matching this configuration.
    pub fn index_config(&self) -> IndexConfig {
        IndexConfig::builder()
            .strict(self.strict)
            .location_segment(self.location_segment)
            .build()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            video_preference: default_video_preference(),
            strict: false,
            location_segment: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EventConfig {
    /// First day of the event, written as a quoted `"yyyy-mm-dd"` string
    pub starts: NaiveDate,

    /// Display name; should match the table key
    pub name: String,

    /// Base URL of the Fahrplan pages
    pub fahrplan: String,

    /// Base URL of the media listing; lists one directory per format
    pub media_prefix: String,

    /// Direct location of the schedule JSON, if not `<fahrplan>/schedule.json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_location: Option<String>,
}

impl EventConfig {
    /// Where the schedule JSON of this event is found (URL or local path).
    pub fn schedule_location(&self) -> frabdl_common::Result<String> {
        match &self.json_location {
            Some(location) => Ok(location.clone()),
            None => join_url(&self.fahrplan, "schedule.json"),
        }
    }
}

fn event(
    starts: (i32, u32, u32),
    name: &str,
    fahrplan: &str,
    media_prefix: &str,
    json_location: Option<&str>,
) -> Option<EventConfig> {
    Some(EventConfig {
        starts: NaiveDate::from_ymd_opt(starts.0, starts.1, starts.2)?,
        name: name.to_string(),
        fahrplan: fahrplan.to_string(),
        media_prefix: media_prefix.to_string(),
        json_location: json_location.map(str::to_string),
    })
}

fn default_events() -> BTreeMap<String, EventConfig> {
    const CDN: &str = "https://cdn.media.ccc.de";
    let events = [
        ("32c3", (2015, 12, 26), "https://events.ccc.de/congress/2015/Fahrplan", "congress/2015", None),
        ("mrmcd2015", (2015, 9, 4), "https://mrmcd.net/events_page/2015/fahrplan", "events/mrmcd/mrmcd15", None),
        ("camp2015", (2015, 8, 13), "https://events.ccc.de/camp/2015/Fahrplan", "events/camp2015", None),
        ("mrmcd2016", (2016, 9, 2), "https://2016.mrmcd.net/fahrplan", "events/mrmcd/mrmcd16", None),
        ("33c3", (2016, 12, 27), "https://fahrplan.events.ccc.de/congress/2016/Fahrplan", "congress/2016", None),
        ("EH2017", (2017, 4, 14), "https://eh17.easterhegg.eu/Fahrplan", "events/eh2017", None),
        (
            "GPN17",
            (2017, 5, 25),
            "https://entropia.de/GPN17:Fahrplan",
            "events/gpn/gpn17",
            Some("https://entropia.de/GPN17:Fahrplan:JSON?action=raw"),
        ),
        ("SHA2017", (2017, 8, 5), "https://program.sha2017.org", "events/SHA2017", None),
        ("mrmcd2017", (2017, 9, 1), "https://cfp.mrmcd.net/2017", "events/mrmcd/mrmcd17", None),
        ("34c3", (2017, 12, 27), "https://fahrplan.events.ccc.de/congress/2017/Fahrplan/", "congress/2017", None),
        (
            "GPN18",
            (2018, 5, 10),
            "https://entropia.de/GPN18:Fahrplan",
            "events/gpn/gpn18",
            Some("https://entropia.de/GPN18:Fahrplan:JSON?action=raw"),
        ),
        ("mrmcd2018", (2018, 9, 7), "https://talks.mrmcd.net/2018", "events/mrmcd/mrmcd18", None),
        ("35c3", (2018, 12, 27), "https://fahrplan.events.ccc.de/congress/2018/Fahrplan/", "congress/2018", None),
        ("camp2019", (2019, 8, 21), "https://events.ccc.de/camp/2019/Fahrplan", "events/camp2019", None),
        ("36c3", (2019, 12, 27), "https://fahrplan.events.ccc.de/congress/2019/Fahrplan/", "congress/2019", None),
    ];

    events
        .into_iter()
        .filter_map(|(key, starts, fahrplan, media_path, json_location)| {
            let media_prefix = format!("{}/{}", CDN, media_path);
            event(starts, key, fahrplan, &media_prefix, json_location)
                .map(|e| (key.to_string(), e))
        })
        .collect()
}
