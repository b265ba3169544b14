/// Cut `content` to at most `max_chars` characters, appending `...` only
/// when something was cut.
pub fn excerpt(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &content[..byte_idx]),
        None => content.to_string(),
    }
}

/// Percent-encode one path segment for a remote URL.
pub fn path_segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}
