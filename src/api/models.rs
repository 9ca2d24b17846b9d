use serde::{Deserialize, Serialize};

/// Search request parameters
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default = "default_page")]
    pub page: usize,
}

fn default_page() -> usize {
    1
}

/// Search response
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub results: Vec<RecipeCard>,
    pub pagination: Pagination,
}

/// Recipe card for search results
#[derive(Debug, Clone, Serialize)]
pub struct RecipeCard {
    pub id: i64,
    pub title: String,
    pub image: Option<String>,
    pub ready_in_minutes: Option<i64>,
    pub servings: Option<i64>,
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
}

/// Fridge search request parameters
#[derive(Debug, Clone, Deserialize)]
pub struct FridgeParams {
    #[serde(default)]
    pub ingredients: String,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Fridge search response
#[derive(Debug, Clone, Serialize)]
pub struct FridgeResponse {
    pub ingredients: Vec<String>,
    pub results: Vec<FridgeCard>,
}

/// Recipe card for fridge results, with ingredient match counts
#[derive(Debug, Clone, Serialize)]
pub struct FridgeCard {
    pub id: i64,
    pub title: String,
    pub image: Option<String>,
    pub used_ingredient_count: u32,
    pub missed_ingredient_count: Option<u32>,
    pub missed_ingredients: Vec<String>,
}

/// Full recipe details
#[derive(Debug, Clone, Serialize)]
pub struct RecipeDetail {
    pub id: i64,
    pub title: String,
    pub image: Option<String>,
    pub image_candidates: Vec<String>,
    pub summary: Option<String>,
    pub ready_in_minutes: Option<i64>,
    pub servings: Option<i64>,
    pub health_score: Option<f64>,
    pub vegan: bool,
    pub vegetarian: bool,
    pub gluten_free: bool,
    pub dairy_free: bool,
    pub ingredients: Vec<IngredientDetail>,
    pub instructions: Option<String>,
    pub steps: Vec<StepDetail>,
    pub source_url: Option<String>,
}

/// Ingredient with quantity
#[derive(Debug, Clone, Serialize)]
pub struct IngredientDetail {
    pub name: String,
    pub amount: Option<f64>,
    pub unit: Option<String>,
}

/// A numbered instruction step
#[derive(Debug, Clone, Serialize)]
pub struct StepDetail {
    pub number: u32,
    pub step: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
}
