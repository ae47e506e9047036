use super::types::{AddChannelRequest, RqChannelId};
use crate::errors::{AppError, AppResult};
use crate::ingest::Ingestor;
use crate::models::channel::{Channel, PartialChannel};
use crate::RqDbPool;
use actix_web::{get, patch, post, web, HttpResponse};

#[get("")]
pub async fn list_channels(pool: RqDbPool) -> AppResult<HttpResponse> {
    let mut conn = pool.get()?;
    let channels = Channel::list_with_recent_videos(&mut conn)?;
    Ok(HttpResponse::Ok().json(channels))
}

#[post("")]
pub async fn add_channel(
    pool: RqDbPool,
    ingestor: web::Data<Ingestor>,
    body: web::Json<AddChannelRequest>,
) -> AppResult<HttpResponse> {
    let url = body
        .url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::validation("Channel URL is required"))?;

    let registered = ingestor.register_channel(&pool, url).await?;
    Ok(HttpResponse::Ok().json(registered))
}

/// Only `isActive` can change; deactivated channels disappear from listings.
#[patch("/{id}")]
pub async fn update_channel(
    pool: RqDbPool,
    path: RqChannelId,
    body: web::Json<PartialChannel>,
) -> AppResult<HttpResponse> {
    let channel_pk = path.into_inner();
    let mut update = body.into_inner();
    if update.is_active.is_none() {
        return Err(AppError::validation("Nothing to update"));
    }
    update.updated_at = Some(chrono::Utc::now().naive_utc());

    let mut conn = pool.get()?;
    if Channel::get_by_id(&mut conn, channel_pk)?.is_none() {
        return Err(AppError::not_found("Channel"));
    }
    let channel = Channel::update(&mut conn, channel_pk, &update)?;
    log::info!("Channel {} set active={}", channel.channel_id, channel.is_active);

    Ok(HttpResponse::Ok().json(channel))
}
