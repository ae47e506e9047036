use super::{channels, dashboard, news, tools, videos};
use crate::errors::AppError;
use actix_governor::governor::middleware::StateInformationMiddleware;
use actix_governor::{GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor};
use actix_web::{web, Scope};

pub type RateLimiterConfig = GovernorConfig<PeerIpKeyExtractor, StateInformationMiddleware>;

/// Per-IP limit for `/api`: bursts of 20, refilled at one request every 100ms.
pub fn rate_limiter() -> Option<RateLimiterConfig> {
    GovernorConfigBuilder::default()
        .per_millisecond(100)
        .burst_size(20)
        .use_headers()
        .finish()
}

/// Malformed JSON bodies get the same `{"error": ...}` shape as every other failure.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| {
            AppError::Validation {
                message: format!("Invalid request body: {err}"),
            }
            .into()
        })
}

pub fn routes() -> Scope {
    web::scope("/api")
        .app_data(json_config())
        .service(channels::routes())
        .service(dashboard::routes())
        .service(tools::routes())
        .service(news::routes())
        .service(videos::routes())
        .service(videos::handlers::analyze_video)
}
