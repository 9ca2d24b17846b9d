// JSON API: read-only endpoints mirroring the web flows

pub mod handlers;
pub mod models;
pub mod routes;
