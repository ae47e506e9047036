use super::types::{
    ChannelInfo, ChannelVideosResponse, ErrorBody, ExtractChannelRequest, MetadataError,
    Transcript, TranscriptRequest, VideoInfo,
};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Client for the YouTube extraction service that resolves channels, lists
/// their uploads and produces transcripts.
pub struct MetadataClient {
    client: Client,
    base_url: Option<String>,
}

impl MetadataClient {
    pub fn new(base_url: Option<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(concat!("aiwatch/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        let base_url = base_url
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty());

        Ok(Self { client, base_url })
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    fn endpoint(&self, path: &str) -> Result<String, MetadataError> {
        let base = self.base_url.as_deref().ok_or(MetadataError::NotConfigured)?;
        Ok(format!("{base}{path}"))
    }

    pub async fn resolve_channel(&self, url: &str) -> Result<ChannelInfo, MetadataError> {
        let response = self
            .client
            .post(self.endpoint("/extract-channel-info")?)
            .json(&ExtractChannelRequest { url })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let detail = error_detail(response)
                .await
                .unwrap_or_else(|| "Failed to extract channel info".to_string());
            return Err(MetadataError::Rejected { status, detail });
        }

        decode(response).await
    }

    pub async fn list_recent_videos(
        &self,
        channel_id: &str,
        max_results: u32,
    ) -> Result<Vec<VideoInfo>, MetadataError> {
        let max_results = max_results.to_string();
        let response = self
            .client
            .post(self.endpoint("/get-channel-videos")?)
            .query(&[("channel_id", channel_id), ("max_results", max_results.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let detail = error_detail(response)
                .await
                .unwrap_or_else(|| "Failed to list channel videos".to_string());
            return Err(MetadataError::Rejected { status, detail });
        }

        let body: ChannelVideosResponse = decode(response).await?;
        Ok(body.into_videos())
    }

    pub async fn fetch_transcript(
        &self,
        video_id: &str,
        language: &str,
    ) -> Result<Transcript, MetadataError> {
        let response = self
            .client
            .post(self.endpoint("/get-transcript")?)
            .json(&TranscriptRequest { video_id, language })
            .send()
            .await?;

        if !response.status().is_success() {
            let detail = error_detail(response)
                .await
                .unwrap_or_else(|| "Could not get transcript".to_string());
            return Err(MetadataError::TranscriptUnavailable { detail });
        }

        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, MetadataError> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| MetadataError::Malformed(e.to_string()))
}

async fn error_detail(response: Response) -> Option<String> {
    let body = response.text().await.ok()?;
    serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(ErrorBody::into_detail)
}
