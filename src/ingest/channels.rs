use super::Ingestor;
use crate::errors::{AppError, AppResult};
use crate::metadata::types::VideoInfo;
use crate::models::channel::{Channel, NewChannel};
use crate::models::video::NewVideo;
use crate::validation::validate_channel_url;
use crate::DbPool;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::SqliteConnection;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredChannel {
    pub channel: Channel,
    pub videos_imported: usize,
}

/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS` timestamp (taken as UTC)
/// or a bare `YYYYMMDD` upload date.
pub fn parse_published_at(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(value, "%Y%m%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

impl Ingestor {
    /// Resolves `url`, stores the channel and imports its latest uploads.
    /// Failing to list or store uploads never undoes the channel.
    pub async fn register_channel(&self, pool: &DbPool, url: &str) -> AppResult<RegisteredChannel> {
        let url = url.trim();
        validate_channel_url(url).map_err(|message| AppError::Validation { message })?;

        let info = self.metadata.resolve_channel(url).await?;

        let channel = {
            let mut conn = pool.get()?;
            if Channel::get_by_channel_id(&mut conn, &info.channel_id)?.is_some() {
                return Err(AppError::duplicate("Channel"));
            }

            let language = self.language.detect(url, &info.name);
            let now = Utc::now().naive_utc();
            let new_channel = NewChannel {
                channel_id: &info.channel_id,
                name: &info.name,
                url: &info.url,
                description: info.description.as_deref(),
                language: &language,
                is_active: true,
                created_at: now,
                updated_at: now,
            };
            match new_channel.insert(&mut conn) {
                Ok(channel) => channel,
                Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                    return Err(AppError::duplicate("Channel"));
                }
                Err(e) => return Err(e.into()),
            }
        };
        tracing::info!(
            channel_id = %channel.channel_id,
            language = %channel.language,
            "Channel registered"
        );

        let videos = match self
            .metadata
            .list_recent_videos(&channel.channel_id, self.initial_videos)
            .await
        {
            Ok(videos) => videos,
            Err(e) => {
                tracing::warn!(
                    channel_id = %channel.channel_id,
                    error = %e,
                    "Could not list channel videos, continuing without them"
                );
                Vec::new()
            }
        };

        let videos_imported = match pool.get() {
            Ok(mut conn) => import_videos(&mut conn, channel.id, &videos),
            Err(e) => {
                tracing::warn!(error = %e, "No connection for video import");
                0
            }
        };
        tracing::info!(
            channel_id = %channel.channel_id,
            listed = videos.len(),
            imported = videos_imported,
            "Initial videos imported"
        );

        Ok(RegisteredChannel {
            channel,
            videos_imported,
        })
    }
}

/// Inserts each listed video on its own; a bad or duplicate entry is skipped.
fn import_videos(conn: &mut SqliteConnection, channel_pk: i32, videos: &[VideoInfo]) -> usize {
    let now = Utc::now().naive_utc();
    let mut imported = 0;

    for info in videos {
        let Some(published_at) = parse_published_at(&info.published_at) else {
            tracing::warn!(
                video_id = %info.video_id,
                published_at = %info.published_at,
                "Skipping video with unparseable publish date"
            );
            continue;
        };

        let new_video = NewVideo {
            video_id: &info.video_id,
            channel_id: channel_pk,
            title: &info.title,
            description: info.description.as_deref(),
            url: &info.url,
            duration: info.duration.as_deref(),
            published_at,
            thumbnail: info.thumbnail.as_deref(),
            created_at: now,
            updated_at: now,
        };
        match new_video.insert(conn) {
            Ok(_) => imported += 1,
            Err(e) => tracing::warn!(video_id = %info.video_id, error = %e, "Skipping video"),
        }
    }

    imported
}
