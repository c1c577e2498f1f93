//! Writing configuration files with toml_edit so comments survive.

use super::{Config, EventConfig};
use anyhow::{Context, Result};
use std::path::Path;
use toml_edit::{DocumentMut, Item};

const HEADER: &str = "\
#
# Config file for frabdl
#
# [settings]
#   video_preference  List of media formats in order of preference.
#   strict            Abort when a media listing contains an entry that
#                     cannot be decoded, instead of skipping it.
#   location_segment  Accept media file names with a location segment
#                     between event and talk id (event-location-id-...).
#
# [events.<key>]
#   starts            When does the event start? Format: \"yyyy-mm-dd\"
#   name              The name of the event (should be the same as the key)
#   fahrplan          Prefix url to the main Fahrplan page without index.html
#                     or similar. Expects a schedule.json directly below it.
#   json_location     Optional direct link to the schedule JSON.
#   media_prefix      Prefix url to the media files. This url should present
#                     a list of available file formats.
#
########
";

/// Render the default configuration, with an explanatory comment header.
pub fn default_config_toml() -> Result<String> {
    render(&Config::default())
}

/// Render a configuration the way [`default_config_toml`] does.
pub fn render(config: &Config) -> Result<String> {
    let body = toml::to_string_pretty(config).context("Failed to serialize config")?;
    Ok(format!("{}\n{}", HEADER, body))
}

/// Write the default configuration to `path`, creating parent directories.
pub fn dump_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
    }
    let content = default_config_toml()?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;
    tracing::info!("Wrote default config to {:?}", path);
    Ok(())
}

/// Add or replace one event in an existing config file, keeping the rest
/// of the file (including comments) as it is.
pub fn update_event(path: &Path, key: &str, event: &EventConfig) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut doc: DocumentMut = content
        .parse()
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    let event_toml = toml::to_string(event).with_context(|| "Failed to serialize event")?;
    let event_doc: DocumentMut = event_toml
        .parse()
        .with_context(|| "Failed to parse serialized event")?;

    if !doc.contains_key("events") {
        let mut events = toml_edit::Table::new();
        events.set_implicit(true);
        doc.insert("events", Item::Table(events));
    }
    let events = doc["events"]
        .as_table_mut()
        .with_context(|| format!("'events' in {:?} is not a table", path))?;
    events.insert(key, Item::Table(event_doc.as_table().clone()));

    std::fs::write(path, doc.to_string())
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    Ok(())
}
