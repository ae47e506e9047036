use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("metadata service base URL is not configured")]
    NotConfigured,
    #[error("metadata service rejected the request ({status}): {detail}")]
    Rejected { status: u16, detail: String },
    #[error("transcript unavailable: {detail}")]
    TranscriptUnavailable { detail: String },
    #[error("metadata service request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("metadata service returned an unexpected payload: {0}")]
    Malformed(String),
}

#[derive(Debug, Serialize)]
pub struct ExtractChannelRequest<'a> {
    pub url: &'a str,
}

/// Channel metadata resolved from a user supplied URL.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChannelInfo {
    pub channel_id: String,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Entries are kept loose so one malformed upload does not sink the listing.
#[derive(Debug, Deserialize)]
pub struct ChannelVideosResponse {
    pub videos: Vec<serde_json::Value>,
}

impl ChannelVideosResponse {
    pub fn into_videos(self) -> Vec<VideoInfo> {
        self.videos
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<VideoInfo>(entry) {
                Ok(info) => Some(info),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping malformed video listing entry");
                    None
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VideoInfo {
    pub video_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub url: String,
    /// ISO-8601 duration, e.g. `PT4M13S`
    #[serde(default)]
    pub duration: Option<String>,
    pub published_at: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TranscriptRequest<'a> {
    pub video_id: &'a str,
    pub language: &'a str,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Transcript {
    #[serde(rename = "transcript_raw")]
    pub raw: String,
    #[serde(rename = "transcript_clean")]
    pub clean: String,
}

/// Error body of the metadata service. `detail` is usually a string but
/// validation failures come back as a list of objects.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn into_detail(self) -> Option<String> {
        match self.detail? {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}
