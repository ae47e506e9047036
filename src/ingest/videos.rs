use super::Ingestor;
use crate::classifier::types::ContentAnalysis;
use crate::errors::{AppError, AppResult};
use crate::models::channel::Channel;
use crate::models::news_item::NewNewsItem;
use crate::models::tool::{FeatureList, NewTool};
use crate::models::video::{PartialVideo, Video};
use crate::DbPool;
use chrono::Utc;
use diesel::prelude::*;

const FALLBACK_LANGUAGE: &str = "en";
const UNKNOWN_CHANNEL: &str = "Unknown";

#[derive(Debug)]
pub enum ProcessOutcome {
    /// Nothing was fetched or written.
    AlreadyProcessed(Video),
    Processed {
        video: Video,
        analysis: ContentAnalysis,
    },
    /// The transcript was stored but classification failed.
    TranscriptOnly(Video),
}

#[derive(Debug)]
pub enum AnalyzeOutcome {
    AlreadyProcessed,
    Analyzed {
        video: Video,
        analysis: ContentAnalysis,
    },
}

fn already_running() -> AppError {
    AppError::Conflict {
        message: "Video is already being processed".to_string(),
    }
}

impl Ingestor {
    /// Fetches the transcript of a registered video and classifies it.
    ///
    /// A transcript failure writes nothing. A classification failure keeps
    /// the stored transcript and reports [`ProcessOutcome::TranscriptOnly`].
    pub async fn process_video(&self, pool: &DbPool, video_id: &str) -> AppResult<ProcessOutcome> {
        let _guard = self
            .locks
            .try_acquire(video_id)
            .ok_or_else(already_running)?;

        let (video, channel) = {
            let mut conn = pool.get()?;
            let video = Video::get_by_video_id(&mut conn, video_id)?
                .ok_or_else(|| AppError::validation("Video not found"))?;
            if video.is_processed {
                tracing::info!(video_id, "Video already processed, skipping");
                return Ok(ProcessOutcome::AlreadyProcessed(video));
            }
            let channel = Channel::get_by_id(&mut conn, video.channel_id)?;
            (video, channel)
        };

        let language = channel
            .as_ref()
            .map_or(FALLBACK_LANGUAGE, |c| c.language.as_str());
        let channel_name = channel.as_ref().map_or(UNKNOWN_CHANNEL, |c| c.name.as_str());

        tracing::info!(video_id, language, "Fetching transcript");
        let transcript = self
            .metadata
            .fetch_transcript(&video.video_id, language)
            .await?;

        let video = {
            let mut conn = pool.get()?;
            let update = PartialVideo {
                transcript_raw: Some(transcript.raw),
                transcript_clean: Some(transcript.clean),
                updated_at: Some(Utc::now().naive_utc()),
                ..Default::default()
            };
            Video::update(&mut conn, video.id, &update)?
        };
        tracing::info!(video_id, "Transcript stored");

        match self.classify_and_store(pool, &video, channel_name).await {
            Ok((video, analysis)) => Ok(ProcessOutcome::Processed { video, analysis }),
            Err(e) => {
                tracing::warn!(video_id, error = ?e, "Analysis failed, keeping transcript");
                Ok(ProcessOutcome::TranscriptOnly(video))
            }
        }
    }

    /// Classifies a video whose transcript is already stored.
    pub async fn analyze_video(&self, pool: &DbPool, video_id: &str) -> AppResult<AnalyzeOutcome> {
        let _guard = self
            .locks
            .try_acquire(video_id)
            .ok_or_else(already_running)?;

        let (video, channel) = {
            let mut conn = pool.get()?;
            let video = Video::get_by_video_id(&mut conn, video_id)?
                .ok_or_else(|| AppError::not_found("Video"))?;
            let channel = Channel::get_by_id(&mut conn, video.channel_id)?;
            (video, channel)
        };

        let has_transcript = video
            .transcript_clean
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty());
        if !has_transcript {
            return Err(AppError::validation("Video transcript not available"));
        }
        if video.is_processed {
            return Ok(AnalyzeOutcome::AlreadyProcessed);
        }

        let channel_name = channel.as_ref().map_or(UNKNOWN_CHANNEL, |c| c.name.as_str());
        let (video, analysis) = self.classify_and_store(pool, &video, channel_name).await?;
        Ok(AnalyzeOutcome::Analyzed { video, analysis })
    }

    async fn classify_and_store(
        &self,
        pool: &DbPool,
        video: &Video,
        channel_name: &str,
    ) -> AppResult<(Video, ContentAnalysis)> {
        let transcript = video.transcript_clean.as_deref().unwrap_or_default();
        let analysis = self
            .classifier
            .classify(transcript, &video.title, channel_name)
            .await?;

        let mut conn = pool.get()?;
        let updated = store_analysis(&mut conn, video.id, &analysis)?;
        tracing::info!(
            video_id = %updated.video_id,
            category = %analysis.category,
            priority = %analysis.priority,
            tools = analysis.tools.len(),
            news = analysis.news.len(),
            "Video classified"
        );

        Ok((updated, analysis))
    }
}

/// Marks the video processed and stores every extracted tool and news item,
/// all or nothing.
pub fn store_analysis(
    conn: &mut SqliteConnection,
    video_pk: i32,
    analysis: &ContentAnalysis,
) -> QueryResult<Video> {
    conn.transaction(|conn| {
        let now = Utc::now().naive_utc();
        let update = PartialVideo {
            summary: Some(analysis.summary.clone()),
            category: Some(analysis.category),
            priority: Some(analysis.priority),
            is_processed: Some(true),
            updated_at: Some(now),
            ..Default::default()
        };
        let video = Video::update(conn, video_pk, &update)?;

        for tool in &analysis.tools {
            NewTool {
                video_id: video_pk,
                name: &tool.name,
                description: tool.description.as_deref(),
                category: tool.category,
                url: tool.url.as_deref(),
                pricing: tool.pricing.as_deref(),
                features: FeatureList(tool.features.clone()),
                created_at: now,
            }
            .insert(conn)?;
        }

        for news in &analysis.news {
            NewNewsItem {
                video_id: video_pk,
                title: &news.title,
                summary: &news.summary,
                importance: news.importance,
                created_at: now,
            }
            .insert(conn)?;
        }

        Ok(video)
    })
}
