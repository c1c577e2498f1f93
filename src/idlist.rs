//! Talk id list files.
//!
//! Plain lists hold one id or slug per line, `#` starts a comment.
//! Favourite lists (`*.fav.list`) are exported from the Fahrplan web page
//! and hold one event page URL per line.

use anyhow::{Context, Result};
use frabdl_common::TalkId;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

const FAV_LIST_SUFFIX: &str = ".fav.list";

static FAV_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://.*/([^./]*)\.html")
        .unwrap_or_else(|e| unreachable!("invalid favourite url pattern: {e}"))
});

/// Parse the contents of an id list.
pub fn parse_id_list(text: &str, fav_list: bool) -> Result<Vec<TalkId>> {
    let values = if fav_list {
        parse_fav_urls(text)?
    } else {
        text.lines()
            .filter(|line| !line.starts_with('#'))
            .map(|line| line.split('#').next().unwrap_or_default().trim().to_string())
            .collect()
    };

    values
        .iter()
        .filter(|v| !v.is_empty())
        .map(|v| v.parse::<TalkId>().with_context(|| format!("Invalid talk id \"{}\"", v)))
        .collect()
}

fn parse_fav_urls(text: &str) -> Result<Vec<String>> {
    text.lines()
        .filter(|line| line.starts_with("http"))
        .map(|line| {
            FAV_URL
                .captures(line)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
                .with_context(|| format!("Couldn't parse the following URL line: {}", line))
        })
        .collect()
}

/// Read an id list file; `*.fav.list` files are read as favourite lists.
pub fn read_id_list(path: &Path) -> Result<Vec<TalkId>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read id list: {:?}", path))?;
    let fav_list = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(FAV_LIST_SUFFIX));
    parse_id_list(&text, fav_list).with_context(|| format!("Invalid id list file {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_list() {
        let text = "# talks for the train\n8414\n  8099  # money\n\n34c3-9270-die_sprache\n#8000\n";
        let ids = parse_id_list(text, false).unwrap();
        assert_eq!(
            ids,
            [
                TalkId::from(8414),
                TalkId::from(8099),
                TalkId::Slug("34c3-9270-die_sprache".into()),
            ]
        );
    }

    #[test]
    fn test_fav_list() {
        let text = "Favourites\nhttps://fahrplan.events.ccc.de/congress/2016/Fahrplan/events/8414.html\nhttp://talks.example/2018/talk/ABCDEF.html\n";
        let ids = parse_id_list(text, true).unwrap();
        assert_eq!(ids, [TalkId::from(8414), TalkId::Slug("ABCDEF".into())]);
    }

    #[test]
    fn test_fav_list_bad_url() {
        let err = parse_id_list("https://example.org/no-page\n", true).unwrap_err();
        assert!(err.to_string().contains("https://example.org/no-page"));
    }

    #[test]
    fn test_read_dispatches_on_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let fav = dir.path().join("mine.fav.list");
        std::fs::write(&fav, "https://f.example/events/7550.html\n").unwrap();
        assert_eq!(read_id_list(&fav).unwrap(), [TalkId::from(7550)]);

        let plain = dir.path().join("ids.txt");
        std::fs::write(&plain, "7550\n7551\n").unwrap();
        assert_eq!(read_id_list(&plain).unwrap().len(), 2);

        assert!(read_id_list(&dir.path().join("missing.txt")).is_err());
    }
}
