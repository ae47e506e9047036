use super::handlers;
use actix_web::{web, Scope};

pub fn routes() -> Scope {
    web::scope("/channels")
        .service(handlers::list_channels)
        .service(handlers::add_channel)
        .service(handlers::update_channel)
}
