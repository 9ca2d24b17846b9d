use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::search::{offset_for_page, parse_ingredient_list, rank_by_missing_ingredients};
use crate::spoonacular::SpoonacularClient;
use crate::utils::cuisines::is_supported_cuisine;
use crate::utils::sanitize::{html_to_text, sanitize_html};
use crate::{api::models::*, Error, Result};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<SpoonacularClient>,
    pub settings: crate::config::Settings,
}

/// GET /api/search - Search recipes by keyword and cuisine
pub async fn search_recipes(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>> {
    debug!("Search request: {:?}", params);

    let query = params.q.trim();
    let cuisine = normalize_cuisine(params.cuisine.as_deref())?;

    if query.is_empty() && cuisine.is_none() {
        return Err(Error::Validation(
            "Provide a search query or a cuisine filter".to_string(),
        ));
    }

    let page_size = state.settings.pagination.page_size;
    let page = params.page.max(1);
    let offset = offset_for_page(page, page_size);

    let data = state
        .client
        .complex_search(query, cuisine.as_deref(), offset, page_size)
        .await?;

    // Trust the page size the API actually applied, if it reports one
    let limit = if data.number > 0 { data.number } else { page_size };
    let total = if data.total_results > 0 {
        data.total_results
    } else {
        data.results.len()
    };
    let total_pages = total
        .div_ceil(limit)
        .min(state.settings.pagination.max_pages);

    let results = data
        .results
        .into_iter()
        .map(|recipe| RecipeCard {
            id: recipe.id,
            title: recipe.title,
            image: recipe.image,
            ready_in_minutes: recipe.ready_in_minutes,
            servings: recipe.servings,
        })
        .collect();

    Ok(Json(SearchResponse {
        results,
        pagination: Pagination {
            page,
            limit,
            total,
            total_pages,
        },
    }))
}

/// GET /api/fridge - Find recipes by available ingredients
pub async fn fridge_recipes(
    State(state): State<AppState>,
    Query(params): Query<FridgeParams>,
) -> Result<Json<FridgeResponse>> {
    debug!("Fridge request: {:?}", params);

    let ingredients = parse_ingredient_list(&params.ingredients);
    if ingredients.is_empty() {
        return Err(Error::Validation(
            "Provide at least one ingredient".to_string(),
        ));
    }

    let fridge_limit = state.settings.pagination.fridge_limit;
    let limit = params
        .limit
        .unwrap_or(fridge_limit)
        .clamp(1, fridge_limit);

    let mut matches = state.client.find_by_ingredients(&ingredients, limit).await?;
    rank_by_missing_ingredients(&mut matches);

    let results = matches
        .into_iter()
        .map(|recipe| FridgeCard {
            id: recipe.id,
            title: recipe.title,
            image: recipe.image,
            used_ingredient_count: recipe.used_ingredient_count.unwrap_or(0),
            missed_ingredient_count: recipe.missed_ingredient_count,
            missed_ingredients: recipe
                .missed_ingredients
                .into_iter()
                .map(|i| i.name)
                .collect(),
        })
        .collect();

    Ok(Json(FridgeResponse {
        ingredients,
        results,
    }))
}

/// GET /api/recipes/:id - Get recipe details
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<RecipeDetail>> {
    debug!("Get recipe request: {}", id);

    let recipe = state
        .client
        .recipe_information(id)
        .await
        .map_err(|e| match &e {
            Error::Upstream(failure) if failure.status == Some(404) => {
                Error::NotFound(format!("Recipe {id} not found"))
            }
            _ => e,
        })?;

    let image_candidates = recipe.image_candidates();
    let steps = recipe
        .instruction_steps()
        .iter()
        .map(|step| StepDetail {
            number: step.number,
            step: step.step.clone(),
        })
        .collect();

    let instructions = recipe
        .instructions
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(sanitize_html);

    let ingredients = recipe
        .extended_ingredients
        .iter()
        .map(|i| IngredientDetail {
            name: i.name.clone(),
            amount: i.amount,
            unit: i.unit.clone(),
        })
        .collect();

    Ok(Json(RecipeDetail {
        id: recipe.id,
        title: recipe.title.clone(),
        image: recipe.image.clone(),
        image_candidates,
        summary: recipe.summary.as_deref().map(html_to_text),
        ready_in_minutes: recipe.ready_in_minutes,
        servings: recipe.servings,
        health_score: recipe.health_score,
        vegan: recipe.vegan,
        vegetarian: recipe.vegetarian,
        gluten_free: recipe.gluten_free,
        dairy_free: recipe.dairy_free,
        ingredients,
        instructions,
        steps,
        source_url: recipe.source_url.clone(),
    }))
}

/// GET /health - Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}

/// Validate and lowercase a cuisine filter value.
pub fn normalize_cuisine(cuisine: Option<&str>) -> Result<Option<String>> {
    match cuisine.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => {
            if is_supported_cuisine(value) {
                Ok(Some(value.to_lowercase()))
            } else {
                Err(Error::Validation(format!("Unknown cuisine: {value}")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_cuisine() {
        assert_eq!(normalize_cuisine(None).unwrap(), None);
        assert_eq!(normalize_cuisine(Some("")).unwrap(), None);
        assert_eq!(normalize_cuisine(Some("  ")).unwrap(), None);
        assert_eq!(
            normalize_cuisine(Some("Italian")).unwrap(),
            Some("italian".to_string())
        );
        assert!(normalize_cuisine(Some("klingon")).is_err());
    }
}
