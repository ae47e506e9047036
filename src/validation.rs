//! Request input validation.

use url::Url;

const MAX_URL_LEN: usize = 2048;

const YOUTUBE_HOSTS: &[&str] = &["youtube.com", "www.youtube.com", "m.youtube.com", "youtu.be"];

/// Checks that `url` points at a YouTube host. A missing scheme is tolerated,
/// the way users paste `youtube.com/@channel`.
pub fn validate_channel_url(url: &str) -> Result<(), String> {
    let url = url.trim();
    if url.is_empty() {
        return Err("Channel URL is required".to_string());
    }

    if url.len() > MAX_URL_LEN {
        return Err("URL too long (max 2048 characters)".to_string());
    }

    let parsed = if url.contains("://") {
        Url::parse(url)
    } else {
        Url::parse(&format!("https://{url}"))
    }
    .map_err(|_| "Invalid URL format".to_string())?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err("Invalid URL format. Must be HTTP or HTTPS".to_string());
    }

    match parsed.host_str() {
        Some(host) if YOUTUBE_HOSTS.contains(&host.to_ascii_lowercase().as_str()) => Ok(()),
        _ => Err("Please enter a valid YouTube URL".to_string()),
    }
}
