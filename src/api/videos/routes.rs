use super::handlers;
use actix_web::{web, Scope};

pub fn routes() -> Scope {
    web::scope("/videos")
        .service(handlers::process_video)
        .service(handlers::get_video)
}
