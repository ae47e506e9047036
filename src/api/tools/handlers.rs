use crate::errors::AppResult;
use crate::models::tool::Tool;
use crate::RqDbPool;
use actix_web::{get, HttpResponse};

/// Every extracted tool, newest first, with its source video and channel.
#[get("")]
pub async fn list_tools(pool: RqDbPool) -> AppResult<HttpResponse> {
    let mut conn = pool.get()?;
    let tools = Tool::recent_with_source(&mut conn, None)?;
    Ok(HttpResponse::Ok().json(tools))
}
