//! Ranking for fridge-search results.

use crate::spoonacular::models::IngredientMatch;

/// Sort recipes so the ones missing the fewest ingredients come first.
///
/// A recipe without a missing-ingredient count sorts after every recipe
/// that has one. Ties break on case-insensitive title order; full ties
/// keep the API's order (the sort is stable).
pub fn rank_by_missing_ingredients(recipes: &mut [IngredientMatch]) {
    recipes.sort_by(|a, b| {
        let missing_a = a.missed_ingredient_count.unwrap_or(u32::MAX);
        let missing_b = b.missed_ingredient_count.unwrap_or(u32::MAX);
        missing_a
            .cmp(&missing_b)
            .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(id: i64, title: &str, missed: Option<u32>) -> IngredientMatch {
        IngredientMatch {
            id,
            title: title.to_string(),
            missed_ingredient_count: missed,
            ..Default::default()
        }
    }

    fn ids(recipes: &[IngredientMatch]) -> Vec<i64> {
        recipes.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_sorts_ascending_by_missing_count() {
        let mut recipes = vec![
            recipe(1, "Paella", Some(4)),
            recipe(2, "Omelette", Some(0)),
            recipe(3, "Risotto", Some(2)),
        ];
        rank_by_missing_ingredients(&mut recipes);
        assert_eq!(ids(&recipes), vec![2, 3, 1]);
    }

    #[test]
    fn test_missing_count_sorts_last() {
        let mut recipes = vec![
            recipe(1, "Mystery stew", None),
            recipe(2, "Omelette", Some(7)),
        ];
        rank_by_missing_ingredients(&mut recipes);
        assert_eq!(ids(&recipes), vec![2, 1]);
    }

    #[test]
    fn test_ties_break_on_case_insensitive_title() {
        let mut recipes = vec![
            recipe(1, "zucchini bake", Some(1)),
            recipe(2, "Apple pie", Some(1)),
            recipe(3, "banana bread", Some(1)),
        ];
        rank_by_missing_ingredients(&mut recipes);
        assert_eq!(ids(&recipes), vec![2, 3, 1]);
    }

    #[test]
    fn test_full_ties_keep_api_order() {
        let mut recipes = vec![
            recipe(10, "Pasta", Some(1)),
            recipe(20, "Pasta", Some(1)),
            recipe(30, "Pasta", Some(1)),
        ];
        rank_by_missing_ingredients(&mut recipes);
        assert_eq!(ids(&recipes), vec![10, 20, 30]);
    }
}
