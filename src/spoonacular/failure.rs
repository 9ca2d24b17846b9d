use regex::Regex;
use serde_json::Value;

const QUOTA_HINT_PATTERN: &str = r"(?i)(quota|limit|daily points|points|credit|exceeded)";
const API_KEY_HINT_PATTERN: &str = r"(?i)(api key|unauthorized|forbidden|invalid key)";

/// A failed call to the Spoonacular API: either a non-success response
/// (status, Retry-After header and raw body captured) or no response at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamFailure {
    pub status: Option<u16>,
    pub retry_after: Option<String>,
    pub body: Option<String>,
}

impl UpstreamFailure {
    pub fn from_response(status: u16, retry_after: Option<String>, body: String) -> Self {
        Self {
            status: Some(status),
            retry_after,
            body: Some(body),
        }
    }

    /// A transport-level failure: the request never produced a response.
    pub fn transport() -> Self {
        Self {
            status: None,
            retry_after: None,
            body: None,
        }
    }

    /// Short description for logs. Never includes the response body,
    /// which may echo request parameters back.
    pub fn summary(&self) -> String {
        match self.status {
            Some(status) => format!("HTTP {status}"),
            None => "no response".to_string(),
        }
    }

    /// Extract the message the API put in the response body, if any.
    /// Accepts a JSON object with a string `message` or `error` field,
    /// a bare JSON string, or a plain-text body.
    fn body_message(&self) -> String {
        let Some(raw) = self.body.as_deref() else {
            return String::new();
        };

        match serde_json::from_str::<Value>(raw) {
            Ok(Value::String(s)) => s.trim().to_string(),
            Ok(Value::Object(map)) => {
                if let Some(Value::String(msg)) = map.get("message") {
                    msg.trim().to_string()
                } else if let Some(Value::String(msg)) = map.get("error") {
                    msg.trim().to_string()
                } else {
                    String::new()
                }
            }
            // Other JSON scalars carry no message
            Ok(_) => String::new(),
            // Not JSON at all: treat the body as the message
            Err(_) => raw.trim().to_string(),
        }
    }

    /// Map this failure to a user-facing message.
    ///
    /// Fixed precedence: rate limiting, quota exhaustion, bad API key,
    /// server errors, network errors, then whatever message the API
    /// provided, then the caller's fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        let api_message = self.body_message();
        let quota_re = Regex::new(QUOTA_HINT_PATTERN).unwrap();
        let key_re = Regex::new(API_KEY_HINT_PATTERN).unwrap();
        let is_quota_error = quota_re.is_match(&api_message);
        let is_api_key_error = key_re.is_match(&api_message);

        if self.status == Some(429) {
            if let Some(retry_after) = &self.retry_after {
                return format!("Too many requests to the API. Try again in {retry_after}s.");
            }
            return "Too many requests to the API. Wait a few seconds then try again.".to_string();
        }

        if self.status == Some(402) || is_quota_error {
            return "API quota reached. Try again later or use an API key with more credits."
                .to_string();
        }

        if self.status == Some(401) || (self.status == Some(403) && is_api_key_error) {
            return "Invalid or missing API key. Check SPOONACULAR_API_KEY.".to_string();
        }

        if self.status.is_some_and(|s| s >= 500) {
            return "The Spoonacular service is currently unavailable. Try again later."
                .to_string();
        }

        if self.status.is_none() {
            return "Unable to contact the API. Check your Internet connection.".to_string();
        }

        if !api_message.is_empty() {
            return api_message;
        }

        fallback.to_string()
    }
}

impl std::fmt::Display for UpstreamFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            self.user_message("The recipe API request failed.")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACK: &str = "fallback";

    #[test]
    fn test_rate_limited_without_retry_after() {
        let failure = UpstreamFailure::from_response(429, None, String::new());
        assert_eq!(
            failure.user_message(FALLBACK),
            "Too many requests to the API. Wait a few seconds then try again."
        );
    }

    #[test]
    fn test_rate_limited_with_retry_after() {
        let failure = UpstreamFailure::from_response(429, Some("30".to_string()), String::new());
        assert_eq!(
            failure.user_message(FALLBACK),
            "Too many requests to the API. Try again in 30s."
        );
    }

    #[test]
    fn test_quota_status() {
        let failure = UpstreamFailure::from_response(402, None, String::new());
        assert_eq!(
            failure.user_message(FALLBACK),
            "API quota reached. Try again later or use an API key with more credits."
        );
    }

    #[test]
    fn test_quota_hint_in_body() {
        let failure = UpstreamFailure::from_response(
            400,
            None,
            r#"{"error": "Daily points exceeded."}"#.to_string(),
        );
        assert_eq!(
            failure.user_message(FALLBACK),
            "API quota reached. Try again later or use an API key with more credits."
        );
    }

    #[test]
    fn test_unauthorized_status() {
        let failure = UpstreamFailure::from_response(401, None, String::new());
        assert_eq!(
            failure.user_message(FALLBACK),
            "Invalid or missing API key. Check SPOONACULAR_API_KEY."
        );
    }

    #[test]
    fn test_forbidden_with_key_hint() {
        let failure = UpstreamFailure::from_response(
            403,
            None,
            r#"{"message": "Invalid API key."}"#.to_string(),
        );
        assert_eq!(
            failure.user_message(FALLBACK),
            "Invalid or missing API key. Check SPOONACULAR_API_KEY."
        );
    }

    #[test]
    fn test_forbidden_without_key_hint_falls_through() {
        let failure = UpstreamFailure::from_response(
            403,
            None,
            r#"{"message": "Nothing to see here"}"#.to_string(),
        );
        assert_eq!(failure.user_message(FALLBACK), "Nothing to see here");
    }

    #[test]
    fn test_server_error() {
        let failure = UpstreamFailure::from_response(500, None, String::new());
        assert_eq!(
            failure.user_message(FALLBACK),
            "The Spoonacular service is currently unavailable. Try again later."
        );
    }

    #[test]
    fn test_network_error() {
        let failure = UpstreamFailure::transport();
        assert_eq!(
            failure.user_message(FALLBACK),
            "Unable to contact the API. Check your Internet connection."
        );
    }

    #[test]
    fn test_api_message_passthrough() {
        let failure = UpstreamFailure::from_response(
            400,
            None,
            r#"{"message": "Custom API message"}"#.to_string(),
        );
        assert_eq!(failure.user_message(FALLBACK), "Custom API message");
    }

    #[test]
    fn test_plain_text_body() {
        let failure =
            UpstreamFailure::from_response(400, None, "  Text response message  ".to_string());
        assert_eq!(failure.user_message(FALLBACK), "Text response message");
    }

    #[test]
    fn test_json_string_body() {
        let failure =
            UpstreamFailure::from_response(400, None, r#""  quoted message  ""#.to_string());
        assert_eq!(failure.user_message(FALLBACK), "quoted message");
    }

    #[test]
    fn test_fallback_when_nothing_matches() {
        let failure = UpstreamFailure::from_response(400, None, String::new());
        assert_eq!(failure.user_message(FALLBACK), FALLBACK);
    }

    #[test]
    fn test_rate_limit_wins_over_quota_hint() {
        // 429 takes precedence even when the body also mentions the quota
        let failure = UpstreamFailure::from_response(
            429,
            None,
            r#"{"message": "Your daily quota is exceeded"}"#.to_string(),
        );
        assert_eq!(
            failure.user_message(FALLBACK),
            "Too many requests to the API. Wait a few seconds then try again."
        );
    }

    #[test]
    fn test_summary_never_includes_body() {
        let failure =
            UpstreamFailure::from_response(400, None, "apiKey=super-secret".to_string());
        assert_eq!(failure.summary(), "HTTP 400");
    }
}
