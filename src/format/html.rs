//! HTML dashboard.
//!
//! A static page shell with the initial result inlined as JSON. The page
//! script re-fetches the JSON endpoint and keeps the inlined data if that
//! fails.

use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};

use crate::location::LocationResult;

const TEMPLATE: &str = include_str!("dashboard.html");
const INITIAL_DATA: &str = "__INITIAL_DATA__";
pub const CONTENT_TYPE_HTML: &str = "text/html; charset=utf-8";

/// Serialize the result for embedding inside a `<script>` element.
fn inline_json(result: &LocationResult) -> String {
    serde_json::to_string(result)
        .unwrap_or_else(|_| "{}".to_string())
        .replace('<', "\\u003c")
}

pub fn render(result: &LocationResult) -> String {
    TEMPLATE.replacen(INITIAL_DATA, &inline_json(result), 1)
}

pub fn response(result: &LocationResult) -> Response {
    ([(CONTENT_TYPE, CONTENT_TYPE_HTML)], render(result)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Timestamp;

    #[test]
    fn test_initial_data_is_inlined() {
        let result = LocationResult {
            country: Some("NZ".into()),
            ..LocationResult::stamped(Timestamp::Iso("2024-01-01T00:00:00.000Z".into()))
        };

        let page = render(&result);
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains(r#"let locationData = {"timestamp":"2024-01-01T00:00:00.000Z","country":"NZ"};"#));
        assert!(!page.contains(INITIAL_DATA));
    }

    #[test]
    fn test_script_breakout_is_escaped() {
        let result = LocationResult {
            user_agent: Some("</script><script>alert(1)</script>".into()),
            ..LocationResult::default()
        };

        let page = render(&result);
        assert!(!page.contains("</script><script>alert(1)"));
        assert!(page.contains(r"\u003c/script>\u003cscript>alert(1)\u003c/script>"));
    }

    #[test]
    fn test_content_type() {
        let response = response(&LocationResult::default());
        assert_eq!(response.headers()[CONTENT_TYPE], CONTENT_TYPE_HTML);
    }
}
