use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AddChannelRequest {
    #[serde(default)]
    pub url: Option<String>,
}

pub type RqChannelId = actix_web::web::Path<i32>;
