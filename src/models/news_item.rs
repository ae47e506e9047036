use super::channel::Channel;
use super::video::{Priority, Video, VideoWithChannel};
use crate::schema::*;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, Queryable, Selectable, Identifiable, Associations, PartialEq)]
#[diesel(belongs_to(Video))]
#[diesel(table_name = news_items)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: i32,
    pub video_id: i32,
    pub title: String,
    pub summary: String,
    pub importance: Priority,
    pub is_notified: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = news_items)]
pub struct NewNewsItem<'a> {
    pub video_id: i32,
    pub title: &'a str,
    pub summary: &'a str,
    pub importance: Priority,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Serialize)]
pub struct NewsWithSource {
    #[serde(flatten)]
    pub news: NewsItem,
    pub video: VideoWithChannel,
}

impl<'a> NewNewsItem<'a> {
    pub fn insert(&self, conn: &mut SqliteConnection) -> QueryResult<NewsItem> {
        use crate::schema::news_items::dsl::*;
        diesel::insert_into(news_items)
            .values(self)
            .returning(NewsItem::as_returning())
            .get_result(conn)
    }
}

impl NewsItem {
    pub fn count(conn: &mut SqliteConnection) -> QueryResult<i64> {
        use crate::schema::news_items::dsl::news_items;
        news_items.count().get_result(conn)
    }

    /// News rated HIGH or CRITICAL.
    pub fn count_high_priority(conn: &mut SqliteConnection) -> QueryResult<i64> {
        use crate::schema::news_items::dsl::{importance, news_items};
        news_items
            .filter(importance.eq_any([Priority::High, Priority::Critical]))
            .count()
            .get_result(conn)
    }

    pub fn count_for_video(conn: &mut SqliteConnection, video_pk: i32) -> QueryResult<i64> {
        use crate::schema::news_items::dsl::{news_items, video_id};
        news_items.filter(video_id.eq(video_pk)).count().get_result(conn)
    }

    pub fn recent_with_source(
        conn: &mut SqliteConnection,
        limit: Option<i64>,
    ) -> QueryResult<Vec<NewsWithSource>> {
        let mut query = news_items::table
            .inner_join(videos::table.inner_join(channels::table))
            .select((NewsItem::as_select(), Video::as_select(), Channel::as_select()))
            .order((news_items::created_at.desc(), news_items::id.desc()))
            .into_boxed();
        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        let rows = query.load::<(NewsItem, Video, Channel)>(conn)?;
        Ok(rows
            .into_iter()
            .map(|(news, video, channel)| NewsWithSource {
                news,
                video: VideoWithChannel { video, channel },
            })
            .collect())
    }
}
