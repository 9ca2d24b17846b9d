use crate::api::handlers::normalize_cuisine;
use crate::config::Settings;
use crate::search::{
    offset_for_page, page_window, parse_ingredient_list, rank_by_missing_ingredients,
};
use crate::spoonacular::SpoonacularClient;
use crate::utils::sanitize::{html_to_text, truncate};
use crate::{Error, Result};

/// Search for recipes by keyword and optional cuisine
pub async fn search(
    settings: &Settings,
    query: &str,
    cuisine: Option<String>,
    page: usize,
) -> Result<()> {
    let cuisine = normalize_cuisine(cuisine.as_deref())?;

    let term = query.trim();
    if term.is_empty() && cuisine.is_none() {
        return Err(Error::Validation(
            "Provide a search query or a cuisine filter".to_string(),
        ));
    }

    let client = SpoonacularClient::new(settings.spoonacular.clone())?;
    let page_size = settings.pagination.page_size;
    let offset = offset_for_page(page.max(1), page_size);

    let data = client
        .complex_search(term, cuisine.as_deref(), offset, page_size)
        .await?;

    if data.results.is_empty() {
        println!("No recipes found");
        return Ok(());
    }

    let total = if data.total_results > 0 {
        data.total_results
    } else {
        data.results.len()
    };

    println!("\nFound {} recipes:\n", total);
    println!("{:<10} {:<50} {:<10} {:<10}", "ID", "Title", "Ready", "Serves");
    println!("{}", "-".repeat(80));

    for recipe in &data.results {
        println!(
            "{:<10} {:<50} {:<10} {:<10}",
            recipe.id,
            truncate(&recipe.title, 48),
            recipe
                .ready_in_minutes
                .map(|m| format!("{m} min"))
                .unwrap_or_default(),
            recipe.servings.map(|s| s.to_string()).unwrap_or_default(),
        );
    }

    let limit = if data.number > 0 { data.number } else { page_size };
    if let Some(window) = page_window(total, offset, limit) {
        println!(
            "\nPage {} of {}",
            window.current_page, window.total_pages
        );
    }
    println!("\nTo view a recipe: spoonsearch show <ID>");

    Ok(())
}

/// Find recipes by available ingredients
pub async fn fridge(settings: &Settings, ingredients: &str, limit: Option<usize>) -> Result<()> {
    let parsed = parse_ingredient_list(ingredients);
    if parsed.is_empty() {
        return Err(Error::Validation(
            "Provide at least one ingredient".to_string(),
        ));
    }

    let fridge_limit = settings.pagination.fridge_limit;
    let limit = limit.unwrap_or(fridge_limit).clamp(1, fridge_limit);

    let client = SpoonacularClient::new(settings.spoonacular.clone())?;
    let mut matches = client.find_by_ingredients(&parsed, limit).await?;

    if matches.is_empty() {
        println!("No recipes found for: {}", parsed.join(", "));
        return Ok(());
    }

    rank_by_missing_ingredients(&mut matches);

    println!("\nSearching with: {}\n", parsed.join(", "));
    println!("{:<10} {:<50} {:<10}", "ID", "Title", "Missing");
    println!("{}", "-".repeat(70));

    for recipe in &matches {
        println!(
            "{:<10} {:<50} {:<10}",
            recipe.id,
            truncate(&recipe.title, 48),
            recipe
                .missed_ingredient_count
                .map(|n| n.to_string())
                .unwrap_or_else(|| "?".to_string()),
        );

        let missing: Vec<&str> = recipe
            .missed_ingredients
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        if !missing.is_empty() {
            println!("           needs: {}", truncate(&missing.join(", "), 60));
        }
    }

    println!("\nTo view a recipe: spoonsearch show <ID>");

    Ok(())
}

/// Show full details for a recipe
pub async fn show(settings: &Settings, recipe_id: i64) -> Result<()> {
    let client = SpoonacularClient::new(settings.spoonacular.clone())?;

    let recipe = client
        .recipe_information(recipe_id)
        .await
        .map_err(|e| match &e {
            Error::Upstream(failure) if failure.status == Some(404) => {
                Error::NotFound(format!("Recipe {recipe_id} not found"))
            }
            _ => e,
        })?;

    println!("\n{}", recipe.title);
    println!("{}", "=".repeat(recipe.title.chars().count().max(8)));

    let mut facts = vec![];
    if let Some(minutes) = recipe.ready_in_minutes.filter(|m| *m > 0) {
        facts.push(format!("{minutes} min"));
    }
    if let Some(servings) = recipe.servings.filter(|s| *s > 0) {
        facts.push(format!("{servings} servings"));
    }
    if let Some(score) = recipe.health_score.filter(|h| h.is_finite() && *h > 0.0) {
        facts.push(format!("health score {}", score.round() as i64));
    }
    if !facts.is_empty() {
        println!("{}", facts.join(" | "));
    }

    let mut diets = vec![];
    if recipe.vegan {
        diets.push("vegan");
    }
    if recipe.vegetarian {
        diets.push("vegetarian");
    }
    if recipe.gluten_free {
        diets.push("gluten free");
    }
    if recipe.dairy_free {
        diets.push("dairy free");
    }
    if !diets.is_empty() {
        println!("Diet: {}", diets.join(", "));
    }

    if let Some(summary) = &recipe.summary {
        let text = html_to_text(summary);
        if !text.is_empty() {
            println!("\n{text}");
        }
    }

    if !recipe.extended_ingredients.is_empty() {
        println!("\nIngredients:");
        for ingredient in &recipe.extended_ingredients {
            match (ingredient.amount, ingredient.unit.as_deref()) {
                (Some(amount), Some(unit)) if !unit.is_empty() => {
                    println!("  - {amount} {unit} {}", ingredient.name);
                }
                (Some(amount), _) => println!("  - {amount} {}", ingredient.name),
                _ => println!("  - {}", ingredient.name),
            }
        }
    }

    let steps = recipe.instruction_steps();
    if !steps.is_empty() {
        println!("\nInstructions:");
        for step in steps {
            println!("  {}. {}", step.number, step.step);
        }
    } else if let Some(instructions) = &recipe.instructions {
        let text = html_to_text(instructions);
        if !text.is_empty() {
            println!("\nInstructions:\n{text}");
        } else {
            println!("\nNo cooking instructions are available for this recipe.");
        }
    } else {
        println!("\nNo cooking instructions are available for this recipe.");
    }

    if let Some(source) = &recipe.source_url {
        println!("\nSource: {source}");
    }

    Ok(())
}
