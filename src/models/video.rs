use super::{channel::Channel, news_item::NewsItem, tool::Tool, CategoryCount};
use crate::schema::*;
use chrono::NaiveDateTime;
use diesel::{dsl::count, prelude::*};
use serde::Serialize;

text_enum! {
    /// Editorial category of a video, assigned by classification.
    Category {
        Tools => "TOOLS",
        News => "NEWS",
        Tutorial => "TUTORIAL",
        Research => "RESEARCH",
        Startup => "STARTUP",
        Uncategorized => "UNCATEGORIZED",
    }
}

text_enum! {
    /// Shared by video priority and news importance.
    Priority {
        Low => "LOW",
        Medium => "MEDIUM",
        High => "HIGH",
        Critical => "CRITICAL",
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Uncategorized
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

#[derive(
    Debug, Clone, Serialize, Queryable, Selectable, Identifiable, Associations, PartialEq,
)]
#[diesel(belongs_to(Channel))]
#[diesel(table_name = videos)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: i32,
    /// YouTube video id
    pub video_id: String,
    pub channel_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    /// ISO-8601 duration, e.g. `PT4M13S`
    pub duration: Option<String>,
    pub published_at: NaiveDateTime,
    pub thumbnail: Option<String>,
    pub transcript_raw: Option<String>,
    pub transcript_clean: Option<String>,
    pub summary: Option<String>,
    pub category: Category,
    pub priority: Priority,
    pub is_processed: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = videos)]
pub struct NewVideo<'a> {
    pub video_id: &'a str,
    pub channel_id: i32,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub url: &'a str,
    pub duration: Option<&'a str>,
    pub published_at: NaiveDateTime,
    pub thumbnail: Option<&'a str>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = videos)]
pub struct PartialVideo {
    pub transcript_raw: Option<String>,
    pub transcript_clean: Option<String>,
    pub summary: Option<String>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub is_processed: Option<bool>,
    pub updated_at: Option<NaiveDateTime>,
}

/// A video together with the entities extracted from it.
#[derive(Debug, Serialize)]
pub struct VideoWithEntities {
    #[serde(flatten)]
    pub video: Video,
    pub tools: Vec<Tool>,
    pub news: Vec<NewsItem>,
}

/// A video nested under its channel, as shown on tool and news cards.
#[derive(Debug, Serialize)]
pub struct VideoWithChannel {
    #[serde(flatten)]
    pub video: Video,
    pub channel: Channel,
}

#[derive(Debug, Serialize)]
pub struct VideoDetail {
    #[serde(flatten)]
    pub video: Video,
    pub channel: Channel,
    pub tools: Vec<Tool>,
    pub news: Vec<NewsItem>,
}

impl<'a> NewVideo<'a> {
    pub fn insert(&self, conn: &mut SqliteConnection) -> QueryResult<Video> {
        use crate::schema::videos::dsl::*;
        diesel::insert_into(videos)
            .values(self)
            .returning(Video::as_returning())
            .get_result(conn)
    }
}

impl Video {
    pub fn get_by_video_id(conn: &mut SqliteConnection, vid: &str) -> QueryResult<Option<Video>> {
        use crate::schema::videos::dsl::{video_id, videos};
        videos
            .filter(video_id.eq(vid))
            .select(Video::as_select())
            .first(conn)
            .optional()
    }

    pub fn update(
        conn: &mut SqliteConnection,
        video_pk: i32,
        update: &PartialVideo,
    ) -> QueryResult<Video> {
        use crate::schema::videos::dsl::{id, videos};
        diesel::update(videos.filter(id.eq(video_pk)))
            .set(update)
            .returning(Video::as_returning())
            .get_result(conn)
    }

    /// Most recently published videos of one channel.
    pub fn recent_for_channel(
        conn: &mut SqliteConnection,
        channel_pk: i32,
        limit: i64,
    ) -> QueryResult<Vec<Video>> {
        use crate::schema::videos::dsl::{channel_id, id, published_at, videos};
        videos
            .filter(channel_id.eq(channel_pk))
            .order((published_at.desc(), id.desc()))
            .limit(limit)
            .select(Video::as_select())
            .load(conn)
    }

    pub fn recent_processed(conn: &mut SqliteConnection, limit: i64) -> QueryResult<Vec<Video>> {
        use crate::schema::videos::dsl::{id, is_processed, published_at, videos};
        videos
            .filter(is_processed.eq(true))
            .order((published_at.desc(), id.desc()))
            .limit(limit)
            .select(Video::as_select())
            .load(conn)
    }

    pub fn count(conn: &mut SqliteConnection) -> QueryResult<i64> {
        use crate::schema::videos::dsl::videos;
        videos.count().get_result(conn)
    }

    pub fn count_processed(conn: &mut SqliteConnection) -> QueryResult<i64> {
        use crate::schema::videos::dsl::{is_processed, videos};
        videos.filter(is_processed.eq(true)).count().get_result(conn)
    }

    /// Processed videos grouped by category.
    pub fn count_by_category(
        conn: &mut SqliteConnection,
    ) -> QueryResult<Vec<CategoryCount<Category>>> {
        use crate::schema::videos::dsl::{category, id, is_processed, videos};
        let rows = videos
            .filter(is_processed.eq(true))
            .group_by(category)
            .select((category, count(id)))
            .order(category.asc())
            .load::<(Category, i64)>(conn)?;
        Ok(rows.into_iter().map(CategoryCount::from).collect())
    }

    /// Attaches tools and news to each video with two queries, keeping the
    /// order of `list`.
    pub fn with_entities(
        conn: &mut SqliteConnection,
        list: Vec<Video>,
    ) -> QueryResult<Vec<VideoWithEntities>> {
        let tools = Tool::belonging_to(&list)
            .select(Tool::as_select())
            .order(tools::id.asc())
            .load::<Tool>(conn)?
            .grouped_by(&list);
        let news = NewsItem::belonging_to(&list)
            .select(NewsItem::as_select())
            .order(news_items::id.asc())
            .load::<NewsItem>(conn)?
            .grouped_by(&list);

        Ok(list
            .into_iter()
            .zip(tools)
            .zip(news)
            .map(|((video, tools), news)| VideoWithEntities { video, tools, news })
            .collect())
    }

    pub fn detail(conn: &mut SqliteConnection, video: Video) -> QueryResult<VideoDetail> {
        let channel = channels::table
            .find(video.channel_id)
            .select(Channel::as_select())
            .first(conn)?;
        let tools = Tool::belonging_to(&video)
            .select(Tool::as_select())
            .order(tools::id.asc())
            .load(conn)?;
        let news = NewsItem::belonging_to(&video)
            .select(NewsItem::as_select())
            .order(news_items::id.asc())
            .load(conn)?;

        Ok(VideoDetail {
            video,
            channel,
            tools,
            news,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{get_test_db_connection, insert_channel, insert_video};

    #[test]
    fn test_new_video_defaults_to_unprocessed() {
        let mut conn = get_test_db_connection();
        let channel = insert_channel(&mut conn, "UC1");
        let video = insert_video(&mut conn, channel.id, "v1", 0);

        assert_eq!(video.category, Category::Uncategorized);
        assert_eq!(video.priority, Priority::Medium);
        assert!(!video.is_processed);
        assert_eq!(video.transcript_clean, None);
        assert_eq!(video.summary, None);
    }

    #[test]
    fn test_duplicate_video_id_is_rejected() {
        let mut conn = get_test_db_connection();
        let channel = insert_channel(&mut conn, "UC1");
        insert_video(&mut conn, channel.id, "v1", 0);

        let now = chrono::Utc::now().naive_utc();
        let dup = NewVideo {
            video_id: "v1",
            channel_id: channel.id,
            title: "again",
            description: None,
            url: "https://www.youtube.com/watch?v=v1",
            duration: None,
            published_at: now,
            thumbnail: None,
            created_at: now,
            updated_at: now,
        };
        let err = dup.insert(&mut conn).unwrap_err();
        assert!(matches!(
            err,
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                _
            )
        ));
    }

    #[test]
    fn test_video_requires_existing_channel() {
        let mut conn = get_test_db_connection();
        let now = chrono::Utc::now().naive_utc();
        let orphan = NewVideo {
            video_id: "orphan",
            channel_id: 42,
            title: "no channel",
            description: None,
            url: "https://www.youtube.com/watch?v=orphan",
            duration: None,
            published_at: now,
            thumbnail: None,
            created_at: now,
            updated_at: now,
        };
        assert!(orphan.insert(&mut conn).is_err());
    }

    #[test]
    fn test_partial_update_only_touches_set_fields() {
        let mut conn = get_test_db_connection();
        let channel = insert_channel(&mut conn, "UC1");
        let video = insert_video(&mut conn, channel.id, "v1", 0);

        let update = PartialVideo {
            transcript_raw: Some("raw".to_string()),
            transcript_clean: Some("clean".to_string()),
            ..Default::default()
        };
        let updated = Video::update(&mut conn, video.id, &update).unwrap();
        assert_eq!(updated.transcript_clean.as_deref(), Some("clean"));
        assert_eq!(updated.title, video.title);
        assert!(!updated.is_processed);
    }

    #[test]
    fn test_recent_for_channel_orders_by_publish_date() {
        let mut conn = get_test_db_connection();
        let channel = insert_channel(&mut conn, "UC1");
        for (i, vid) in ["a", "b", "c", "d", "e", "f"].iter().enumerate() {
            insert_video(&mut conn, channel.id, vid, i as i64);
        }

        let recent = Video::recent_for_channel(&mut conn, channel.id, 5).unwrap();
        let ids: Vec<&str> = recent.iter().map(|v| v.video_id.as_str()).collect();
        assert_eq!(ids, vec!["f", "e", "d", "c", "b"]);
    }

    #[test]
    fn test_get_by_video_id_missing_is_none() {
        let mut conn = get_test_db_connection();
        assert_eq!(Video::get_by_video_id(&mut conn, "nope").unwrap(), None);
    }

    #[test]
    fn test_category_round_trips_through_text() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), *category);
        }
        assert!("tools".parse::<Category>().is_err());
        assert_eq!(
            serde_json::to_string(&Priority::Critical).unwrap(),
            "\"CRITICAL\""
        );
    }
}
