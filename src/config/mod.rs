use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub spoonacular: SpoonacularConfig,
    pub server: ServerConfig,
    pub pagination: PaginationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpoonacularConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout_seconds: u64,
    pub max_retries: u32,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub external_url: Option<String>,
    pub api_rate_limit: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    pub page_size: usize,
    pub fridge_limit: usize,
    pub max_pages: usize, // Maximum pages to prevent overflow
    pub max_request_body_size: usize,
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("SPOONACULAR_API_KEY").unwrap_or_default();

        let base_url = std::env::var("SPOONACULAR_BASE_URL")
            .unwrap_or_else(|_| "https://api.spoonacular.com".to_string());

        let timeout_seconds = std::env::var("SPOONACULAR_TIMEOUT")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid SPOONACULAR_TIMEOUT value".to_string()))?;

        let max_retries = std::env::var("SPOONACULAR_MAX_RETRIES")
            .unwrap_or_else(|_| "3".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid SPOONACULAR_MAX_RETRIES value".to_string()))?;

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid PORT value".to_string()))?;

        let external_url = std::env::var("EXTERNAL_URL").ok();

        let api_rate_limit = std::env::var("API_RATE_LIMIT")
            .unwrap_or_else(|_| "100".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid API_RATE_LIMIT value".to_string()))?;

        let page_size = std::env::var("PAGE_SIZE")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid PAGE_SIZE value".to_string()))?;

        let fridge_limit = std::env::var("FRIDGE_LIMIT")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid FRIDGE_LIMIT value".to_string()))?;

        let max_pages = std::env::var("MAX_PAGES")
            .unwrap_or_else(|_| "10000".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid MAX_PAGES value".to_string()))?;

        let max_request_body_size = std::env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| "1048576".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid MAX_REQUEST_BODY_SIZE value".to_string()))?;

        Ok(Settings {
            spoonacular: SpoonacularConfig {
                api_key,
                base_url,
                timeout_seconds,
                max_retries,
                user_agent: format!("Spoonsearch/{}", env!("CARGO_PKG_VERSION")),
            },
            server: ServerConfig {
                host,
                port,
                external_url,
                api_rate_limit,
            },
            pagination: PaginationConfig {
                page_size,
                fridge_limit,
                max_pages,
                max_request_body_size,
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::Config("Port must be non-zero".to_string()));
        }

        if self.pagination.page_size == 0 {
            return Err(Error::Config("Page size must be non-zero".to_string()));
        }

        if self.pagination.fridge_limit == 0 {
            return Err(Error::Config("Fridge limit must be non-zero".to_string()));
        }

        if self.spoonacular.api_key.trim().is_empty() {
            return Err(Error::Config(
                "SPOONACULAR_API_KEY must be set".to_string(),
            ));
        }

        let base = url::Url::parse(&self.spoonacular.base_url)?;
        match base.scheme() {
            "http" | "https" => {}
            _ => {
                return Err(Error::Config(
                    "SPOONACULAR_BASE_URL must use http or https".to_string(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_settings() -> Settings {
        Settings {
            spoonacular: SpoonacularConfig {
                api_key: "test-key".to_string(),
                base_url: "https://api.spoonacular.com".to_string(),
                timeout_seconds: 30,
                max_retries: 3,
                user_agent: "test".to_string(),
            },
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                external_url: None,
                api_rate_limit: 100,
            },
            pagination: PaginationConfig {
                page_size: 5,
                fridge_limit: 24,
                max_pages: 10000,
                max_request_body_size: 1048576,
            },
        }
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = test_settings();
        assert!(settings.validate().is_ok());

        settings.server.port = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_settings_rejects_missing_api_key() {
        let mut settings = test_settings();
        settings.spoonacular.api_key = "  ".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_settings_rejects_bad_base_url() {
        let mut settings = test_settings();

        settings.spoonacular.base_url = "not a url".to_string();
        assert!(settings.validate().is_err());

        settings.spoonacular.base_url = "ftp://api.spoonacular.com".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_settings_rejects_zero_page_size() {
        let mut settings = test_settings();
        settings.pagination.page_size = 0;
        assert!(settings.validate().is_err());
    }
}
