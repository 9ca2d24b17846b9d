use crate::config::SpoonacularConfig;
use crate::spoonacular::failure::UpstreamFailure;
use crate::spoonacular::models::{ComplexSearchResponse, IngredientMatch, RecipeInformation};
use crate::{Error, Result};
use reqwest::{header, Client};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Typed client for the Spoonacular REST API.
///
/// Transport-level failures are retried with exponential backoff;
/// non-success responses are never retried and surface as
/// `Error::Upstream` with status, Retry-After and body captured.
pub struct SpoonacularClient {
    client: Client,
    config: SpoonacularConfig,
    initial_backoff: Duration,
}

impl SpoonacularClient {
    pub fn new(config: SpoonacularConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(Error::Http)?;

        Ok(Self {
            client,
            config,
            initial_backoff: Duration::from_secs(1),
        })
    }

    /// Search recipes by keyword and optional cuisine.
    pub async fn complex_search(
        &self,
        query: &str,
        cuisine: Option<&str>,
        offset: usize,
        number: usize,
    ) -> Result<ComplexSearchResponse> {
        let mut params = vec![
            ("query", query.to_string()),
            ("number", number.to_string()),
            ("offset", offset.to_string()),
            ("addRecipeInformation", "true".to_string()),
        ];
        if let Some(cuisine) = cuisine {
            if !cuisine.is_empty() {
                params.push(("cuisine", cuisine.to_string()));
            }
        }

        self.get("/recipes/complexSearch", params).await
    }

    /// Find recipes that use the given ingredients, ranked by the API
    /// to maximize used ingredients (ranking=1), ignoring pantry staples.
    pub async fn find_by_ingredients(
        &self,
        ingredients: &[String],
        limit: usize,
    ) -> Result<Vec<IngredientMatch>> {
        let params = vec![
            ("ingredients", ingredients.join(",")),
            ("number", limit.to_string()),
            ("ranking", "1".to_string()),
            ("ignorePantry", "true".to_string()),
        ];

        self.get("/recipes/findByIngredients", params).await
    }

    /// Fetch full recipe details.
    pub async fn recipe_information(&self, id: i64) -> Result<RecipeInformation> {
        let path = format!("/recipes/{id}/information");
        let params = vec![("includeNutrition", "false".to_string())];

        self.get(&path, params).await
    }

    /// Make a GET request, retrying transport failures with backoff.
    async fn get<T>(&self, path: &str, params: Vec<(&str, String)>) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let mut retries = 0;
        let mut backoff = self.initial_backoff;

        loop {
            match self.get_once(path, &params).await {
                Ok(result) => return Ok(result),
                Err(e) if retries < self.config.max_retries && Self::is_retryable(&e) => {
                    retries += 1;
                    warn!(
                        "Request to {} failed (attempt {}/{}): {}. Retrying in {:?}",
                        path,
                        retries,
                        self.config.max_retries,
                        e.log_safe(),
                        backoff
                    );
                    sleep(backoff).await;
                    backoff *= 2; // Exponential backoff
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn get_once<T>(&self, path: &str, params: &[(&str, String)]) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        // Log the path only: the full URL carries the API key
        debug!("Spoonacular request: GET {}", path);

        let url = format!("{}{}", self.config.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(&[("apiKey", self.config.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .map(String::from);

            let body = response.text().await.unwrap_or_default();
            debug!("Spoonacular error response: {} on {}", status, path);

            return Err(Error::Upstream(UpstreamFailure::from_response(
                status.as_u16(),
                retry_after,
                body,
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| Error::Internal(format!("Failed to parse Spoonacular response: {e}")))
    }

    fn is_retryable(error: &Error) -> bool {
        match error {
            // Retry on network errors and timeouts, never on API errors
            Error::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SpoonacularConfig {
        SpoonacularConfig {
            api_key: "test-key".to_string(),
            base_url: "https://api.spoonacular.com".to_string(),
            timeout_seconds: 30,
            max_retries: 3,
            user_agent: "Spoonsearch-test/0.1".to_string(),
        }
    }

    #[test]
    fn test_client_creation() {
        let client = SpoonacularClient::new(test_config());
        assert!(client.is_ok());
    }

    #[test]
    fn test_upstream_errors_are_not_retryable() {
        let err = Error::Upstream(UpstreamFailure::from_response(500, None, String::new()));
        assert!(!SpoonacularClient::is_retryable(&err));
    }
}
