use crate::errors::AppResult;
use crate::models::stats::DashboardData;
use crate::RqDbPool;
use actix_web::{get, HttpResponse};

#[get("")]
pub async fn get_dashboard(pool: RqDbPool) -> AppResult<HttpResponse> {
    let mut conn = pool.get()?;
    let data = DashboardData::load(&mut conn)?;
    Ok(HttpResponse::Ok().json(data))
}
