use std::sync::OnceLock;

use chrono::{Local, NaiveDate};
use regex::Regex;
use url::Url;

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn video_path_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?i)\.(mp4|webm)$").expect("Regex should compile"))
}

pub fn is_video_path(path: &str) -> bool {
    video_path_regex().is_match(path)
}

pub fn media_url(media_host: &Url, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    media_host
        .join(path.trim_start_matches('/'))
        .map(|u| u.to_string())
        .unwrap_or_else(|_| format!("{}{}", media_host.as_str().trim_end_matches('/'), path))
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}
