use super::types::{
    RqVideoId, VideoIdRequest, VideoResponse, ALREADY_PROCESSED, PROCESSED, TRANSCRIPT_ONLY,
};
use crate::errors::{AppError, AppResult};
use crate::ingest::{AnalyzeOutcome, Ingestor, ProcessOutcome};
use crate::models::video::Video;
use crate::RqDbPool;
use actix_web::{get, post, web, HttpResponse};

/// Transcript plus classification for one registered video.
#[post("/process")]
pub async fn process_video(
    pool: RqDbPool,
    ingestor: web::Data<Ingestor>,
    body: web::Json<VideoIdRequest>,
) -> AppResult<HttpResponse> {
    let video_id = body.require_video_id()?;

    let response = match ingestor.process_video(&pool, video_id).await? {
        ProcessOutcome::AlreadyProcessed(video) => VideoResponse {
            success: true,
            video: Some(video),
            analysis: None,
            message: ALREADY_PROCESSED,
        },
        ProcessOutcome::Processed { video, analysis } => VideoResponse {
            success: true,
            video: Some(video),
            analysis: Some(analysis),
            message: PROCESSED,
        },
        ProcessOutcome::TranscriptOnly(video) => VideoResponse {
            success: true,
            video: Some(video),
            analysis: None,
            message: TRANSCRIPT_ONLY,
        },
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Classification only, for a video whose transcript is already stored.
#[post("/analyze-video")]
pub async fn analyze_video(
    pool: RqDbPool,
    ingestor: web::Data<Ingestor>,
    body: web::Json<VideoIdRequest>,
) -> AppResult<HttpResponse> {
    let video_id = body.require_video_id()?;

    let response = match ingestor.analyze_video(&pool, video_id).await? {
        AnalyzeOutcome::AlreadyProcessed => VideoResponse {
            success: true,
            video: None,
            analysis: None,
            message: ALREADY_PROCESSED,
        },
        AnalyzeOutcome::Analyzed { video, analysis } => VideoResponse {
            success: true,
            video: Some(video),
            analysis: Some(analysis),
            message: PROCESSED,
        },
    };

    Ok(HttpResponse::Ok().json(response))
}

#[get("/{video_id}")]
pub async fn get_video(pool: RqDbPool, path: RqVideoId) -> AppResult<HttpResponse> {
    let mut conn = pool.get()?;
    let video = Video::get_by_video_id(&mut conn, &path)?
        .ok_or_else(|| AppError::not_found("Video"))?;
    let detail = Video::detail(&mut conn, video)?;
    Ok(HttpResponse::Ok().json(detail))
}
