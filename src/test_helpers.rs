use crate::db::{initialize_db_pool_sized, MIGRATIONS};
use crate::models::channel::{Channel, NewChannel};
use crate::models::news_item::{NewNewsItem, NewsItem};
use crate::models::tool::{FeatureList, NewTool, Tool, ToolCategory};
use crate::models::video::{NewVideo, Priority, Video};
use crate::DbPool;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel_migrations::MigrationHarness;
use tempfile::TempDir;

/// Create a test database with a temporary file
pub fn create_test_db() -> (TempDir, DbPool) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("test.db");

    let pool = initialize_db_pool_sized(&db_path.display().to_string(), 1)
        .expect("Failed to create pool");

    let mut conn = pool.get().expect("Failed to get connection");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run migrations");

    (temp_dir, pool)
}

/// In-memory database with migrations applied and foreign keys enforced
pub fn get_test_db_connection() -> SqliteConnection {
    let mut conn = SqliteConnection::establish(":memory:")
        .unwrap_or_else(|_| panic!("Error connecting to in-memory SQLite database"));
    conn.batch_execute("PRAGMA foreign_keys = ON;")
        .expect("Failed to enable foreign keys");

    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run migrations");
    conn
}

fn base_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .expect("valid date")
}

pub fn insert_channel(conn: &mut SqliteConnection, channel_id: &str) -> Channel {
    let now = chrono::Utc::now().naive_utc();
    NewChannel {
        channel_id,
        name: &format!("Channel {channel_id}"),
        url: &format!("https://www.youtube.com/channel/{channel_id}"),
        description: None,
        language: "en",
        is_active: true,
        created_at: now,
        updated_at: now,
    }
    .insert(conn)
    .expect("Failed to insert channel")
}

/// Inserts an unprocessed video published `offset` hours after a fixed base time.
pub fn insert_video(conn: &mut SqliteConnection, channel_pk: i32, video_id: &str, offset: i64) -> Video {
    let now = chrono::Utc::now().naive_utc();
    NewVideo {
        video_id,
        channel_id: channel_pk,
        title: &format!("Video {video_id}"),
        description: None,
        url: &format!("https://www.youtube.com/watch?v={video_id}"),
        duration: None,
        published_at: base_time() + Duration::hours(offset),
        thumbnail: None,
        created_at: now,
        updated_at: now,
    }
    .insert(conn)
    .expect("Failed to insert video")
}

pub fn insert_tool(conn: &mut SqliteConnection, video_pk: i32, name: &str, category: ToolCategory) -> Tool {
    NewTool {
        video_id: video_pk,
        name,
        description: None,
        category,
        url: None,
        pricing: None,
        features: FeatureList::default(),
        created_at: chrono::Utc::now().naive_utc(),
    }
    .insert(conn)
    .expect("Failed to insert tool")
}

pub fn insert_news(conn: &mut SqliteConnection, video_pk: i32, title: &str, importance: Priority) -> NewsItem {
    NewNewsItem {
        video_id: video_pk,
        title,
        summary: "summary",
        importance,
        created_at: chrono::Utc::now().naive_utc(),
    }
    .insert(conn)
    .expect("Failed to insert news item")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_db() {
        let (_temp_dir, pool) = create_test_db();
        let mut conn = pool.get().expect("Failed to get connection");
        insert_channel(&mut conn, "UC1");
        assert_eq!(Channel::count_active(&mut conn).unwrap(), 1);
    }

    #[test]
    fn test_deleting_channel_cascades() {
        let mut conn = get_test_db_connection();
        let channel = insert_channel(&mut conn, "UC1");
        let video = insert_video(&mut conn, channel.id, "v1", 0);
        insert_tool(&mut conn, video.id, "Cursor", ToolCategory::Code);
        insert_news(&mut conn, video.id, "Launch", Priority::High);

        diesel::delete(crate::schema::channels::table)
            .execute(&mut conn)
            .unwrap();

        assert_eq!(Video::count(&mut conn).unwrap(), 0);
        assert_eq!(Tool::count(&mut conn).unwrap(), 0);
        assert_eq!(NewsItem::count(&mut conn).unwrap(), 0);
    }
}
