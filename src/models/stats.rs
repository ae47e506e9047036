use super::{
    channel::Channel,
    news_item::{NewsItem, NewsWithSource},
    tool::{Tool, ToolCategory, ToolWithSource},
    video::{Category, Video, VideoWithEntities},
    CategoryCount,
};
use diesel::prelude::*;
use serde::Serialize;

const RECENT_TOOLS: i64 = 10;
const RECENT_NEWS: i64 = 10;
const RECENT_VIDEOS: i64 = 20;

#[derive(Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_channels: i64,
    pub total_videos: i64,
    pub processed_videos: i64,
    pub total_tools: i64,
    pub new_tools: i64,
    pub total_news: i64,
    pub high_priority_news: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub stats: DashboardStats,
    pub recent_tools: Vec<ToolWithSource>,
    pub recent_news: Vec<NewsWithSource>,
    pub recent_videos: Vec<DashboardVideo>,
    pub tools_by_category: Vec<CategoryCount<ToolCategory>>,
    pub videos_by_category: Vec<CategoryCount<Category>>,
}

/// Processed video as shown on the dashboard: its channel plus extracted entities.
#[derive(Debug, Serialize)]
pub struct DashboardVideo {
    #[serde(flatten)]
    pub video: VideoWithEntities,
    pub channel: Channel,
}

impl DashboardStats {
    pub fn load(conn: &mut SqliteConnection) -> QueryResult<DashboardStats> {
        Ok(DashboardStats {
            total_channels: Channel::count_active(conn)?,
            total_videos: Video::count(conn)?,
            processed_videos: Video::count_processed(conn)?,
            total_tools: Tool::count(conn)?,
            new_tools: Tool::count_new(conn)?,
            total_news: NewsItem::count(conn)?,
            high_priority_news: NewsItem::count_high_priority(conn)?,
        })
    }
}

impl DashboardData {
    pub fn load(conn: &mut SqliteConnection) -> QueryResult<DashboardData> {
        let stats = DashboardStats::load(conn)?;
        let recent_tools = Tool::recent_with_source(conn, Some(RECENT_TOOLS))?;
        let recent_news = NewsItem::recent_with_source(conn, Some(RECENT_NEWS))?;

        let processed = Video::recent_processed(conn, RECENT_VIDEOS)?;
        let mut recent_videos = Vec::with_capacity(processed.len());
        for video in Video::with_entities(conn, processed)? {
            let channel = Channel::get_by_id(conn, video.video.channel_id)?
                .ok_or(diesel::result::Error::NotFound)?;
            recent_videos.push(DashboardVideo { video, channel });
        }

        Ok(DashboardData {
            stats,
            recent_tools,
            recent_news,
            recent_videos,
            tools_by_category: Tool::count_by_category(conn)?,
            videos_by_category: Video::count_by_category(conn)?,
        })
    }
}
