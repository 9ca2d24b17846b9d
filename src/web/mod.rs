// Web UI: askama-templated pages

pub mod handlers;
