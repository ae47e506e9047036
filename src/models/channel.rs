use super::video::{Video, VideoWithEntities};
use crate::schema::*;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// How many of a channel's videos are embedded in the channel list.
pub const VIDEOS_PER_CHANNEL: i64 = 5;

#[derive(Debug, Clone, Serialize, Queryable, Selectable, Identifiable, PartialEq)]
#[diesel(table_name = channels)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: i32,
    /// YouTube channel id, e.g. `UC...`
    pub channel_id: String,
    pub name: String,
    pub url: String,
    pub description: Option<String>,
    pub language: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = channels)]
pub struct NewChannel<'a> {
    pub channel_id: &'a str,
    pub name: &'a str,
    pub url: &'a str,
    pub description: Option<&'a str>,
    pub language: &'a str,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Default, Deserialize, AsChangeset)]
#[diesel(table_name = channels)]
#[serde(rename_all = "camelCase")]
pub struct PartialChannel {
    pub is_active: Option<bool>,
    #[serde(skip)]
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize)]
pub struct ChannelWithVideos {
    #[serde(flatten)]
    pub channel: Channel,
    pub videos: Vec<VideoWithEntities>,
}

impl<'a> NewChannel<'a> {
    pub fn insert(&self, conn: &mut SqliteConnection) -> QueryResult<Channel> {
        use crate::schema::channels::dsl::*;
        diesel::insert_into(channels)
            .values(self)
            .returning(Channel::as_returning())
            .get_result(conn)
    }
}

impl Channel {
    pub fn get_by_id(conn: &mut SqliteConnection, channel_pk: i32) -> QueryResult<Option<Channel>> {
        use crate::schema::channels::dsl::channels;
        channels
            .find(channel_pk)
            .select(Channel::as_select())
            .first(conn)
            .optional()
    }

    pub fn get_by_channel_id(
        conn: &mut SqliteConnection,
        external_id: &str,
    ) -> QueryResult<Option<Channel>> {
        use crate::schema::channels::dsl::{channel_id, channels};
        channels
            .filter(channel_id.eq(external_id))
            .select(Channel::as_select())
            .first(conn)
            .optional()
    }

    /// Active channels, newest first.
    pub fn get_active(conn: &mut SqliteConnection) -> QueryResult<Vec<Channel>> {
        use crate::schema::channels::dsl::{channels, created_at, id, is_active};
        channels
            .filter(is_active.eq(true))
            .order((created_at.desc(), id.desc()))
            .select(Channel::as_select())
            .load(conn)
    }

    pub fn count_active(conn: &mut SqliteConnection) -> QueryResult<i64> {
        use crate::schema::channels::dsl::{channels, is_active};
        channels.filter(is_active.eq(true)).count().get_result(conn)
    }

    pub fn update(
        conn: &mut SqliteConnection,
        channel_pk: i32,
        update: &PartialChannel,
    ) -> QueryResult<Channel> {
        use crate::schema::channels::dsl::{channels, id};
        diesel::update(channels.filter(id.eq(channel_pk)))
            .set(update)
            .returning(Channel::as_returning())
            .get_result(conn)
    }

    /// Active channels with their most recent videos and the tools and news
    /// extracted from those videos.
    pub fn list_with_recent_videos(
        conn: &mut SqliteConnection,
    ) -> QueryResult<Vec<ChannelWithVideos>> {
        let channels = Channel::get_active(conn)?;
        let mut result = Vec::with_capacity(channels.len());
        for channel in channels {
            let recent = Video::recent_for_channel(conn, channel.id, VIDEOS_PER_CHANNEL)?;
            let videos = Video::with_entities(conn, recent)?;
            result.push(ChannelWithVideos { channel, videos });
        }
        Ok(result)
    }
}
