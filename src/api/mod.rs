pub mod channels;
pub mod dashboard;
pub mod health;
pub mod news;
pub mod routes;
pub mod tools;
pub mod videos;

pub use routes::routes;
