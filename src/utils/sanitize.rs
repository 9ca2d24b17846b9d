// Sanitization utilities
use ammonia;
use regex::Regex;

/// Sanitize HTML content using ammonia library for comprehensive XSS protection
pub fn sanitize_html(text: &str) -> String {
    ammonia::clean(text)
}

/// Reduce an HTML fragment to plain text: tags stripped, entities kept
/// decoded by the source, whitespace collapsed.
pub fn html_to_text(html: &str) -> String {
    let tag_re = Regex::new(r"<[^>]+>").unwrap();
    let space_re = Regex::new(r"\s+").unwrap();

    let without_tags = tag_re.replace_all(html, " ");
    space_re.replace_all(&without_tags, " ").trim().to_string()
}

/// Truncate text to a maximum length, on a character boundary
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_html() {
        // ammonia should remove script tags entirely
        assert!(!sanitize_html("<script>alert('xss')</script>").contains("script"));

        // ammonia should allow safe HTML
        let safe_html = "<p>Hello <strong>world</strong></p>";
        let sanitized = sanitize_html(safe_html);
        assert!(sanitized.contains("<p>"));
        assert!(sanitized.contains("<strong>"));
    }

    #[test]
    fn test_html_to_text() {
        assert_eq!(
            html_to_text("<b>Pasta</b> is a <a href=\"#\">classic</a>."),
            "Pasta is a classic ."
        );
        assert_eq!(html_to_text("  already   plain \n text "), "already plain text");
        assert_eq!(html_to_text(""), "");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        // Multibyte titles must not split a character
        assert_eq!(truncate("crème brûlée à la maison", 10), "crème b...");
    }
}
