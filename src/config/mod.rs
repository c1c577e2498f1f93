pub mod persist;
mod types;

pub use persist::default_config_toml;
pub use types::*;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use frabdl_common::paths::parse_http_url;
use std::collections::BTreeMap;
use std::path::Path;

/// Events older than this are never picked as the most recent one.
const MAX_EVENT_AGE_DAYS: i64 = 10 * 365;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    // The table key is what users select an event by.
    for (key, event) in config.events.iter_mut() {
        if event.name != *key {
            event.name = key.clone();
        }
    }

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = ["./frabdl.toml", "~/.config/frabdl/config.toml"];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.events.is_empty() {
        anyhow::bail!("No events configured");
    }

    for (key, event) in &config.events {
        if event.media_prefix.trim().is_empty() {
            anyhow::bail!("Event '{}' has an empty media_prefix", key);
        }
        if event.fahrplan.trim().is_empty() {
            anyhow::bail!("Event '{}' has an empty fahrplan url", key);
        }
        parse_http_url(&event.media_prefix)
            .with_context(|| format!("Event '{}' has an unusable media_prefix", key))?;
        parse_http_url(&event.fahrplan)
            .with_context(|| format!("Event '{}' has an unusable fahrplan url", key))?;
        if event.name != *key {
            tracing::warn!(
                "Event '{}' is named '{}'; using the key as its name",
                key,
                event.name
            );
        }
    }

    if config.settings.video_preference.is_empty() {
        tracing::warn!("settings.video_preference is empty; formats must be requested explicitly");
    }

    Ok(())
}

/// The event that started most recently, at most ten years before `today`.
///
/// Events starting after `today` are ignored. Ties keep the first key in
/// table order.
pub fn most_recent_event(
    events: &BTreeMap<String, EventConfig>,
    today: NaiveDate,
) -> Option<(&str, &EventConfig)> {
    let mut best: Option<(i64, &str, &EventConfig)> = None;
    for (key, event) in events {
        let age = (today - event.starts).num_days();
        if !(0..MAX_EVENT_AGE_DAYS).contains(&age) {
            continue;
        }
        if best.map_or(true, |(best_age, _, _)| age < best_age) {
            best = Some((age, key.as_str(), event));
        }
    }
    best.map(|(_, key, event)| (key, event))
}

/// Decide which media formats to fetch.
///
/// With nothing requested, the first entry of `preference` that the server
/// offers is used. Otherwise every requested format must be offered.
pub fn select_formats(
    preference: &[String],
    available: &[String],
    requested: &[String],
) -> Result<Vec<String>> {
    if requested.is_empty() {
        return preference
            .iter()
            .find(|f| available.contains(f))
            .map(|f| vec![f.clone()])
            .with_context(|| {
                format!(
                    "None of the preferred formats {:?} is available; the server offers {:?}",
                    preference, available
                )
            });
    }

    if let Some(missing) = requested.iter().find(|f| !available.contains(f)) {
        anyhow::bail!(
            "The format \"{}\" is not available; the server offers {:?}",
            missing,
            available
        );
    }
    Ok(requested.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_most_recent_event() {
        let events = Config::default().events;
        let (key, _) = most_recent_event(&events, date(2017, 1, 2)).unwrap();
        assert_eq!(key, "33c3");

        // The start day itself counts.
        let (key, _) = most_recent_event(&events, date(2019, 12, 27)).unwrap();
        assert_eq!(key, "36c3");
    }

    #[test]
    fn test_most_recent_event_ignores_future_and_stale() {
        let events = Config::default().events;
        assert!(most_recent_event(&events, date(2015, 1, 1)).is_none());
        assert!(most_recent_event(&events, date(2035, 1, 1)).is_none());
    }

    #[test]
    fn test_select_formats_by_preference() {
        let preference = strings(&["webm-hd", "h264-hq", "h264-hd"]);
        let available = strings(&["h264-hd", "h264-hq", "mp3"]);
        let selected = select_formats(&preference, &available, &[]).unwrap();
        assert_eq!(selected, ["h264-hq"]);
    }

    #[test]
    fn test_select_formats_nothing_preferred() {
        let preference = strings(&["webm-hd"]);
        let available = strings(&["mp3"]);
        assert!(select_formats(&preference, &available, &[]).is_err());
    }

    #[test]
    fn test_select_formats_requested() {
        let preference = strings(&["webm-hd"]);
        let available = strings(&["h264-hd", "mp3", "opus"]);
        let requested = strings(&["mp3", "opus"]);
        assert_eq!(
            select_formats(&preference, &available, &requested).unwrap(),
            requested
        );

        let err = select_formats(&preference, &available, &strings(&["mp3", "webm-sd"]))
            .unwrap_err();
        assert!(err.to_string().contains("webm-sd"));
    }

    #[test]
    fn test_validate_rejects_non_http_prefix() {
        let mut config = Config::default();
        if let Some(event) = config.events.get_mut("33c3") {
            event.media_prefix = "ftp://cdn.example/congress/2016".to_string();
        }
        let err = validate_config(&config).unwrap_err();
        assert!(format!("{:#}", err).contains("unsupported url scheme \"ftp\""));
    }

    #[test]
    fn test_validate_rejects_relative_fahrplan() {
        let mut config = Config::default();
        if let Some(event) = config.events.get_mut("33c3") {
            event.fahrplan = "congress/2016/Fahrplan".to_string();
        }
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("fahrplan"));
    }

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }
}
