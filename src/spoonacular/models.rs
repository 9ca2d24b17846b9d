use serde::{Deserialize, Serialize};

const IMAGE_SIZES: &[&str] = &["636x393", "556x370", "480x360", "312x231"];

/// Response from /recipes/complexSearch
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexSearchResponse {
    #[serde(default)]
    pub results: Vec<SearchRecipe>,
    #[serde(default)]
    pub offset: usize,
    #[serde(default)]
    pub number: usize,
    #[serde(default)]
    pub total_results: usize,
}

/// One search hit (complexSearch with addRecipeInformation=true)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRecipe {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    pub image: Option<String>,
    pub image_type: Option<String>,
    pub ready_in_minutes: Option<i64>,
    pub servings: Option<i64>,
}

/// One match from /recipes/findByIngredients
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientMatch {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    pub image: Option<String>,
    pub image_type: Option<String>,
    pub used_ingredient_count: Option<u32>,
    pub missed_ingredient_count: Option<u32>,
    #[serde(default)]
    pub missed_ingredients: Vec<IngredientRef>,
    #[serde(default)]
    pub used_ingredients: Vec<IngredientRef>,
}

/// Ingredient reference inside a findByIngredients match
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientRef {
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
}

/// Response from /recipes/{id}/information
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeInformation {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    pub image: Option<String>,
    pub image_type: Option<String>,
    pub summary: Option<String>,
    pub ready_in_minutes: Option<i64>,
    pub servings: Option<i64>,
    pub health_score: Option<f64>,
    #[serde(default)]
    pub vegan: bool,
    #[serde(default)]
    pub vegetarian: bool,
    #[serde(default)]
    pub gluten_free: bool,
    #[serde(default)]
    pub dairy_free: bool,
    pub instructions: Option<String>,
    #[serde(default)]
    pub analyzed_instructions: Vec<InstructionBlock>,
    #[serde(default)]
    pub extended_ingredients: Vec<ExtendedIngredient>,
    pub source_url: Option<String>,
}

/// A block of analyzed instructions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstructionBlock {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub steps: Vec<InstructionStep>,
}

/// A single numbered instruction step
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstructionStep {
    pub number: u32,
    #[serde(default)]
    pub step: String,
}

/// Ingredient with amount and unit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedIngredient {
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    pub amount: Option<f64>,
    pub unit: Option<String>,
    pub original: Option<String>,
}

impl RecipeInformation {
    /// Candidate image URLs for this recipe, most preferred first.
    ///
    /// Spoonacular image links rot: the recipe's own `image` URL comes
    /// first, followed by constructed URLs on both known image hosts
    /// across the standard size variants. De-duplicated, order preserved.
    pub fn image_candidates(&self) -> Vec<String> {
        let ext = self.image_type.as_deref().unwrap_or("jpg");

        let mut candidates = Vec::new();
        if let Some(image) = &self.image {
            if !image.is_empty() {
                candidates.push(image.clone());
            }
        }

        for size in IMAGE_SIZES {
            candidates.push(format!(
                "https://img.spoonacular.com/recipes/{}-{}.{}",
                self.id, size, ext
            ));
            candidates.push(format!(
                "https://spoonacular.com/recipeImages/{}-{}.{}",
                self.id, size, ext
            ));
        }

        let mut seen = std::collections::HashSet::new();
        candidates.retain(|url| seen.insert(url.clone()));
        candidates
    }

    /// Numbered steps from the first analyzed-instructions block.
    pub fn instruction_steps(&self) -> &[InstructionStep] {
        self.analyzed_instructions
            .first()
            .map(|block| block.steps.as_slice())
            .unwrap_or(&[])
    }
}
