use super::video::{Video, VideoWithChannel};
use super::{channel::Channel, CategoryCount};
use crate::schema::*;
use chrono::NaiveDateTime;
use diesel::{
    backend::Backend,
    deserialize::{self, FromSql},
    dsl::count,
    prelude::*,
    serialize::{self, IsNull, Output, ToSql},
    sql_types::Text,
    sqlite::Sqlite,
    AsExpression, FromSqlRow,
};
use serde::{Deserialize, Serialize};

text_enum! {
    ToolCategory {
        Video => "VIDEO",
        Image => "IMAGE",
        Text => "TEXT",
        Audio => "AUDIO",
        Code => "CODE",
        Data => "DATA",
        Design => "DESIGN",
        Productivity => "PRODUCTIVITY",
        Other => "OTHER",
    }
}

/// Ordered feature strings, stored as a JSON array in a TEXT column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(transparent)]
pub struct FeatureList(pub Vec<String>);

impl ToSql<Text, Sqlite> for FeatureList {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
        out.set_value(serde_json::to_string(&self.0)?);
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Sqlite> for FeatureList {
    fn from_sql(bytes: <Sqlite as Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let text = <String as FromSql<Text, Sqlite>>::from_sql(bytes)?;
        Ok(FeatureList(serde_json::from_str(&text)?))
    }
}

#[derive(Debug, Clone, Serialize, Queryable, Selectable, Identifiable, Associations, PartialEq)]
#[diesel(belongs_to(Video))]
#[diesel(table_name = tools)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub id: i32,
    pub video_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub category: ToolCategory,
    pub url: Option<String>,
    pub pricing: Option<String>,
    pub features: FeatureList,
    /// Never set by classification
    pub is_new: bool,
    pub is_notified: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = tools)]
pub struct NewTool<'a> {
    pub video_id: i32,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub category: ToolCategory,
    pub url: Option<&'a str>,
    pub pricing: Option<&'a str>,
    pub features: FeatureList,
    pub created_at: NaiveDateTime,
}

/// A tool with the video it was mentioned in and that video's channel.
#[derive(Debug, Serialize)]
pub struct ToolWithSource {
    #[serde(flatten)]
    pub tool: Tool,
    pub video: VideoWithChannel,
}

impl<'a> NewTool<'a> {
    pub fn insert(&self, conn: &mut SqliteConnection) -> QueryResult<Tool> {
        use crate::schema::tools::dsl::*;
        diesel::insert_into(tools)
            .values(self)
            .returning(Tool::as_returning())
            .get_result(conn)
    }
}

impl Tool {
    pub fn count(conn: &mut SqliteConnection) -> QueryResult<i64> {
        use crate::schema::tools::dsl::tools;
        tools.count().get_result(conn)
    }

    pub fn count_new(conn: &mut SqliteConnection) -> QueryResult<i64> {
        use crate::schema::tools::dsl::{is_new, tools};
        tools.filter(is_new.eq(true)).count().get_result(conn)
    }

    pub fn count_for_video(conn: &mut SqliteConnection, video_pk: i32) -> QueryResult<i64> {
        use crate::schema::tools::dsl::{tools, video_id};
        tools.filter(video_id.eq(video_pk)).count().get_result(conn)
    }

    pub fn count_by_category(
        conn: &mut SqliteConnection,
    ) -> QueryResult<Vec<CategoryCount<ToolCategory>>> {
        use crate::schema::tools::dsl::{category, id, tools};
        let rows = tools
            .group_by(category)
            .select((category, count(id)))
            .order(category.asc())
            .load::<(ToolCategory, i64)>(conn)?;
        Ok(rows.into_iter().map(CategoryCount::from).collect())
    }

    /// Newest tools first, each with its source video and channel. `None`
    /// returns every tool.
    pub fn recent_with_source(
        conn: &mut SqliteConnection,
        limit: Option<i64>,
    ) -> QueryResult<Vec<ToolWithSource>> {
        let mut query = tools::table
            .inner_join(videos::table.inner_join(channels::table))
            .select((Tool::as_select(), Video::as_select(), Channel::as_select()))
            .order((tools::created_at.desc(), tools::id.desc()))
            .into_boxed();
        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        let rows = query.load::<(Tool, Video, Channel)>(conn)?;
        Ok(rows
            .into_iter()
            .map(|(tool, video, channel)| ToolWithSource {
                tool,
                video: VideoWithChannel { video, channel },
            })
            .collect())
    }
}
