use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse},
};
use serde::{Deserialize, Deserializer};

use crate::api::handlers::{normalize_cuisine, AppState};
use crate::search::{
    offset_for_page, page_window, parse_ingredient_list, rank_by_missing_ingredients, PageItem,
    PageWindow,
};
use crate::utils::cuisines::CUISINES;
use crate::utils::sanitize::{html_to_text, sanitize_html};
use crate::{error::Error, Result};

const SEARCH_ERROR_FALLBACK: &str = "Something went wrong while searching. Check the API key.";
const FRIDGE_ERROR_FALLBACK: &str = "Something went wrong while matching ingredients.";
const DETAIL_ERROR_FALLBACK: &str = "Failed to load recipe details.";

/// Deserialize optional string, treating empty strings as None
fn deserialize_optional_string<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => Ok(Some(s.to_string())),
    }
}

/// Search page template
#[derive(Template)]
#[template(path = "search.html")]
struct SearchTemplate {
    query: String,
    cuisines: Vec<CuisineOption>,
    searched: bool,
    has_error: bool,
    error: String,
    has_results: bool,
    no_results: bool,
    result_count_label: String,
    results: Vec<RecipeCardData>,
    pager: PagerData,
}

#[derive(Clone)]
#[allow(dead_code)] // Fields are used by Askama templates
struct CuisineOption {
    value: String,
    label: String,
    selected: bool,
}

#[derive(Clone)]
#[allow(dead_code)] // Fields are used by Askama templates
struct RecipeCardData {
    id: i64,
    title: String,
    has_image: bool,
    image: String,
    ready_label: String,
}

#[derive(Clone, Default)]
#[allow(dead_code)] // Fields are used by Askama templates
struct PagerData {
    has_pager: bool,
    items: Vec<PageLinkData>,
    has_prev: bool,
    prev_href: String,
    has_next: bool,
    next_href: String,
}

#[derive(Clone)]
#[allow(dead_code)] // Fields are used by Askama templates
struct PageLinkData {
    gap: bool,
    current: bool,
    label: String,
    href: String,
}

#[derive(Deserialize)]
pub struct SearchPageParams {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    q: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    cuisine: Option<String>,
    #[serde(default = "default_page")]
    page: usize,
}

fn default_page() -> usize {
    1
}

/// GET / - Search page
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<SearchPageParams>,
) -> Result<impl IntoResponse> {
    let query = params.q.clone().unwrap_or_default().trim().to_string();
    let cuisine = normalize_cuisine(params.cuisine.as_deref())?;
    let page = params.page.max(1);

    let mut searched = false;
    let mut error = String::new();
    let mut results = vec![];
    let mut total = 0;
    let mut pager = PagerData::default();

    // An empty query with no cuisine renders the landing state
    if !query.is_empty() || cuisine.is_some() {
        searched = true;

        let page_size = state.settings.pagination.page_size;
        let offset = offset_for_page(page, page_size);

        match state
            .client
            .complex_search(&query, cuisine.as_deref(), offset, page_size)
            .await
        {
            Ok(data) => {
                let limit = if data.number > 0 { data.number } else { page_size };
                total = if data.total_results > 0 {
                    data.total_results
                } else {
                    data.results.len()
                };

                results = data
                    .results
                    .into_iter()
                    .map(|recipe| RecipeCardData {
                        id: recipe.id,
                        title: recipe.title,
                        has_image: recipe.image.is_some(),
                        image: recipe.image.unwrap_or_default(),
                        ready_label: recipe
                            .ready_in_minutes
                            .map(|m| format!("{m} min"))
                            .unwrap_or_default(),
                    })
                    .collect();

                // Cap the reachable pages so a huge total can't produce an absurd pager
                let capped_total =
                    total.min(state.settings.pagination.max_pages.saturating_mul(limit));
                let window = page_window(capped_total, offset, limit);
                pager = build_pager(window, |target| {
                    search_href(&query, cuisine.as_deref(), target)
                });
            }
            Err(e) => {
                error = e.user_message(SEARCH_ERROR_FALLBACK);
            }
        }
    }

    let result_count_label = if total == 1 {
        "1 recipe found".to_string()
    } else {
        format!("{total} recipes found")
    };

    let template = SearchTemplate {
        cuisines: cuisine_options(cuisine.as_deref()),
        searched,
        has_error: !error.is_empty(),
        has_results: error.is_empty() && !results.is_empty(),
        no_results: searched && error.is_empty() && results.is_empty(),
        result_count_label,
        error,
        query,
        results,
        pager,
    };

    render(template)
}

/// Fridge page template
#[derive(Template)]
#[template(path = "fridge.html")]
struct FridgeTemplate {
    ingredients_raw: String,
    searched: bool,
    has_error: bool,
    error: String,
    has_results: bool,
    no_results: bool,
    result_count_label: String,
    results: Vec<FridgeCardData>,
}

#[derive(Clone)]
#[allow(dead_code)] // Fields are used by Askama templates
struct FridgeCardData {
    id: i64,
    title: String,
    has_image: bool,
    image: String,
    missing_label: String,
    has_missing: bool,
    missing_names: String,
}

#[derive(Deserialize)]
pub struct FridgePageParams {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    ingredients: Option<String>,
}

/// GET /fridge - Find recipes by available ingredients
pub async fn fridge_page(
    State(state): State<AppState>,
    Query(params): Query<FridgePageParams>,
) -> Result<impl IntoResponse> {
    let ingredients_raw = params.ingredients.clone().unwrap_or_default();
    let ingredients = parse_ingredient_list(&ingredients_raw);

    let mut searched = false;
    let mut error = String::new();
    let mut results = vec![];

    if !ingredients.is_empty() {
        searched = true;

        match state
            .client
            .find_by_ingredients(&ingredients, state.settings.pagination.fridge_limit)
            .await
        {
            Ok(mut matches) => {
                rank_by_missing_ingredients(&mut matches);

                results = matches
                    .into_iter()
                    .map(|recipe| {
                        let missing_names: Vec<String> = recipe
                            .missed_ingredients
                            .iter()
                            .map(|i| i.name.clone())
                            .collect();

                        FridgeCardData {
                            id: recipe.id,
                            title: recipe.title,
                            has_image: recipe.image.is_some(),
                            image: recipe.image.unwrap_or_default(),
                            missing_label: missing_label(recipe.missed_ingredient_count),
                            has_missing: !missing_names.is_empty(),
                            missing_names: missing_names.join(", "),
                        }
                    })
                    .collect();
            }
            Err(e) => {
                error = e.user_message(FRIDGE_ERROR_FALLBACK);
            }
        }
    }

    let result_count_label = if results.len() == 1 {
        "1 recipe found".to_string()
    } else {
        format!("{} recipes found", results.len())
    };

    let template = FridgeTemplate {
        ingredients_raw,
        searched,
        has_error: !error.is_empty(),
        has_results: error.is_empty() && !results.is_empty(),
        no_results: searched && error.is_empty() && results.is_empty(),
        result_count_label,
        error,
        results,
    };

    render(template)
}

/// Recipe detail page template
#[derive(Template)]
#[template(path = "recipe.html")]
struct RecipeTemplate {
    has_error: bool,
    error: String,
    title: String,
    has_image: bool,
    image: String,
    has_summary: bool,
    summary: String,
    has_ready_time: bool,
    ready_label: String,
    has_servings: bool,
    servings_label: String,
    has_health_score: bool,
    health_label: String,
    has_diet_info: bool,
    vegan: bool,
    vegetarian: bool,
    gluten_free: bool,
    dairy_free: bool,
    ingredients: Vec<IngredientLine>,
    has_instructions_html: bool,
    instructions_html: String,
    has_steps: bool,
    steps: Vec<StepLine>,
    has_source: bool,
    source_url: String,
}

#[derive(Clone)]
#[allow(dead_code)] // Fields are used by Askama templates
struct IngredientLine {
    amount: String,
    name: String,
}

#[derive(Clone)]
#[allow(dead_code)] // Fields are used by Askama templates
struct StepLine {
    number: u32,
    text: String,
}

/// GET /recipes/:id - Recipe detail page
pub async fn recipe_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let recipe = match state.client.recipe_information(id).await {
        Ok(recipe) => recipe,
        Err(e) => {
            let template = error_recipe_template(e.user_message(DETAIL_ERROR_FALLBACK));
            return render(template);
        }
    };

    let summary = recipe
        .summary
        .as_deref()
        .map(html_to_text)
        .unwrap_or_default();

    let instructions_html = recipe
        .instructions
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(sanitize_html)
        .unwrap_or_default();

    let steps: Vec<StepLine> = recipe
        .instruction_steps()
        .iter()
        .map(|step| StepLine {
            number: step.number,
            text: step.step.clone(),
        })
        .collect();

    let ingredients = recipe
        .extended_ingredients
        .iter()
        .map(|i| {
            let amount = match (i.amount, i.unit.as_deref()) {
                (Some(amount), Some(unit)) if !unit.is_empty() => format!("{amount} {unit}"),
                (Some(amount), _) => amount.to_string(),
                _ => String::new(),
            };
            IngredientLine {
                amount,
                name: i.name.clone(),
            }
        })
        .collect();

    let image = recipe.image_candidates().into_iter().next();
    let has_ready_time = recipe.ready_in_minutes.is_some_and(|m| m > 0);
    let has_servings = recipe.servings.is_some_and(|s| s > 0);
    let has_health_score = recipe.health_score.is_some_and(|h| h.is_finite() && h > 0.0);

    let template = RecipeTemplate {
        has_error: false,
        error: String::new(),
        title: recipe.title.clone(),
        has_image: image.is_some(),
        image: image.unwrap_or_default(),
        has_summary: !summary.is_empty(),
        summary,
        has_ready_time,
        ready_label: recipe
            .ready_in_minutes
            .map(|m| format!("{m} min"))
            .unwrap_or_default(),
        has_servings,
        servings_label: recipe
            .servings
            .map(|s| format!("{s} servings"))
            .unwrap_or_default(),
        has_health_score,
        health_label: recipe
            .health_score
            .map(|h| format!("Health score {}", h.round() as i64))
            .unwrap_or_default(),
        has_diet_info: recipe.vegan || recipe.vegetarian || recipe.gluten_free || recipe.dairy_free,
        vegan: recipe.vegan,
        vegetarian: recipe.vegetarian,
        gluten_free: recipe.gluten_free,
        dairy_free: recipe.dairy_free,
        ingredients,
        has_instructions_html: !instructions_html.is_empty(),
        instructions_html,
        has_steps: !steps.is_empty(),
        steps,
        has_source: recipe.source_url.is_some(),
        source_url: recipe.source_url.unwrap_or_default(),
    };

    render(template)
}

/// About page template
#[derive(Template)]
#[template(path = "about.html")]
struct AboutTemplate {}

/// GET /about - About page
pub async fn about_page() -> Result<impl IntoResponse> {
    render(AboutTemplate {})
}

// Helper functions

fn render<T: Template>(template: T) -> Result<Html<String>> {
    Ok(Html(template.render().map_err(|e| {
        Error::Internal(format!("Template render failed: {e}"))
    })?))
}

fn cuisine_options(selected: Option<&str>) -> Vec<CuisineOption> {
    CUISINES
        .iter()
        .map(|cuisine| {
            let value = cuisine.to_lowercase();
            CuisineOption {
                selected: selected == Some(value.as_str()),
                value,
                label: cuisine.to_string(),
            }
        })
        .collect()
}

fn search_href(query: &str, cuisine: Option<&str>, page: usize) -> String {
    let mut href = format!("/?q={}", urlencoding::encode(query));
    if let Some(cuisine) = cuisine {
        href.push_str(&format!("&cuisine={}", urlencoding::encode(cuisine)));
    }
    if page > 1 {
        href.push_str(&format!("&page={page}"));
    }
    href
}

fn build_pager(window: Option<PageWindow>, make_href: impl Fn(usize) -> String) -> PagerData {
    let Some(window) = window else {
        return PagerData::default();
    };

    let items = window
        .items
        .iter()
        .map(|item| match item {
            PageItem::Page(page) => PageLinkData {
                gap: false,
                current: *page == window.current_page,
                label: page.to_string(),
                href: make_href(*page),
            },
            PageItem::Ellipsis => PageLinkData {
                gap: true,
                current: false,
                label: "...".to_string(),
                href: String::new(),
            },
        })
        .collect();

    PagerData {
        has_pager: true,
        items,
        has_prev: window.prev_page().is_some(),
        prev_href: window.prev_page().map(&make_href).unwrap_or_default(),
        has_next: window.next_page().is_some(),
        next_href: window.next_page().map(&make_href).unwrap_or_default(),
    }
}

fn missing_label(missed: Option<u32>) -> String {
    match missed {
        Some(0) => "You have everything".to_string(),
        Some(1) => "Missing 1 ingredient".to_string(),
        Some(n) => format!("Missing {n} ingredients"),
        None => "Missing count unavailable".to_string(),
    }
}

fn error_recipe_template(error: String) -> RecipeTemplate {
    RecipeTemplate {
        has_error: true,
        error,
        title: String::new(),
        has_image: false,
        image: String::new(),
        has_summary: false,
        summary: String::new(),
        has_ready_time: false,
        ready_label: String::new(),
        has_servings: false,
        servings_label: String::new(),
        has_health_score: false,
        health_label: String::new(),
        has_diet_info: false,
        vegan: false,
        vegetarian: false,
        gluten_free: false,
        dairy_free: false,
        ingredients: vec![],
        has_instructions_html: false,
        instructions_html: String::new(),
        has_steps: false,
        steps: vec![],
        has_source: false,
        source_url: String::new(),
    }
}
