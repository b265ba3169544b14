use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::feed::CommentCountPolicy;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_LIMIT: i64 = 10;
pub const DEFAULT_EXCERPT_CHARS: usize = 150;
pub const UNKNOWN_AUTHOR_NAME: &str = "Unknown User";

/// Where the repository reads users, posts and comments from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Memory,
    Remote,
}

impl FromStr for DataSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "fixture" => Ok(DataSource::Memory),
            "remote" | "http" => Ok(DataSource::Remote),
            other => Err(format!("unknown data source: {}", other)),
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

pub fn bind_addr() -> String {
    std::env::var("FEEDLINE_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string())
}

pub fn data_source() -> DataSource {
    env_or("FEEDLINE_DATA_SOURCE", DataSource::Memory)
}

pub fn remote_base_url() -> String {
    std::env::var("FEEDLINE_REMOTE_URL").unwrap_or_else(|_| "http://localhost:8000/api".to_string())
}

pub fn request_timeout() -> Duration {
    Duration::from_millis(env_or("FEEDLINE_REQUEST_TIMEOUT_MS", 5000u64))
}

pub fn fixture_path() -> Option<PathBuf> {
    std::env::var("FEEDLINE_FIXTURE_PATH")
        .ok()
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
}

pub fn comment_count_policy() -> CommentCountPolicy {
    env_or("FEEDLINE_COMMENT_COUNT", CommentCountPolicy::PreferStored)
}

pub fn excerpt_chars() -> usize {
    env_or("FEEDLINE_EXCERPT_CHARS", DEFAULT_EXCERPT_CHARS).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_data_source_names() {
        assert_eq!("memory".parse::<DataSource>(), Ok(DataSource::Memory));
        assert_eq!(" Remote ".parse::<DataSource>(), Ok(DataSource::Remote));
        assert!("postgres".parse::<DataSource>().is_err());
    }
}
