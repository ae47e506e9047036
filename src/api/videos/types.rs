use crate::classifier::types::ContentAnalysis;
use crate::errors::{AppError, AppResult};
use crate::models::video::Video;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoIdRequest {
    #[serde(default)]
    pub video_id: Option<String>,
}

impl VideoIdRequest {
    pub fn require_video_id(&self) -> AppResult<&str> {
        self.video_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::validation("Video ID is required"))
    }
}

pub const ALREADY_PROCESSED: &str = "Video already processed";
pub const PROCESSED: &str = "Video processed successfully";
pub const TRANSCRIPT_ONLY: &str = "Transcript obtained, but analysis failed";

#[derive(Debug, Serialize)]
pub struct VideoResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<Video>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<ContentAnalysis>,
    pub message: &'static str,
}

pub type RqVideoId = actix_web::web::Path<String>;
