use crate::errors::AppResult;
use crate::models::news_item::NewsItem;
use crate::RqDbPool;
use actix_web::{get, HttpResponse};

#[get("")]
pub async fn list_news(pool: RqDbPool) -> AppResult<HttpResponse> {
    let mut conn = pool.get()?;
    let news = NewsItem::recent_with_source(&mut conn, None)?;
    Ok(HttpResponse::Ok().json(news))
}
