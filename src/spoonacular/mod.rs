// Spoonacular API integration

pub mod client;
pub mod failure;
pub mod models;

pub use client::SpoonacularClient;
pub use failure::UpstreamFailure;
