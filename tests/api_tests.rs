use axum::body::Body;
use axum::http::{Request, StatusCode};
use mockito::Matcher;
use serde_json::Value;
use spoonsearch::api::handlers::AppState;
use spoonsearch::api::routes::create_router;
use spoonsearch::config::{PaginationConfig, ServerConfig, Settings, SpoonacularConfig};
use spoonsearch::spoonacular::SpoonacularClient;
use std::sync::Arc;
use tower::ServiceExt;

fn test_settings(base_url: String) -> Settings {
    Settings {
        spoonacular: SpoonacularConfig {
            api_key: "test-key".to_string(),
            base_url,
            timeout_seconds: 5,
            max_retries: 0,
            user_agent: "Spoonsearch-test/0.1".to_string(),
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

fn test_app(base_url: String) -> axum::Router {
    let settings = test_settings(base_url);
    let client = SpoonacularClient::new(settings.spoonacular.clone()).unwrap();
    let state = AppState {
        client: Arc::new(client),
        settings,
    };
    create_router(state.clone(), &state.settings)
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_api_search_end_to_end() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/recipes/complexSearch")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("query".into(), "pasta".into()),
            Matcher::UrlEncoded("offset".into(), "0".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "results": [
                    {"id": 716429, "title": "Pasta with Garlic", "readyInMinutes": 45, "servings": 2}
                ],
                "offset": 0,
                "number": 5,
                "totalResults": 86
            }"#,
        )
        .create_async()
        .await;

    let app = test_app(server.url());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/search?q=pasta")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["results"][0]["title"], "Pasta with Garlic");
    assert_eq!(body["pagination"]["total"], 86);
    assert_eq!(body["pagination"]["total_pages"], 18);
    assert_eq!(body["pagination"]["page"], 1);
}

#[tokio::test]
async fn test_api_fridge_normalizes_and_ranks() {
    let mut server = mockito::Server::new_async().await;
    // The raw input has duplicates and mixed case; the client must
    // receive the normalized list
    server
        .mock("GET", "/recipes/findByIngredients")
        .match_query(Matcher::UrlEncoded(
            "ingredients".into(),
            "tomato,rice".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[
                {"id": 1, "title": "Paella", "usedIngredientCount": 2, "missedIngredientCount": 3,
                 "missedIngredients": [{"name": "saffron"}, {"name": "shrimp"}, {"name": "peas"}]},
                {"id": 2, "title": "Tomato Rice", "usedIngredientCount": 2, "missedIngredientCount": 0,
                 "missedIngredients": []}
            ]"#,
        )
        .create_async()
        .await;

    let app = test_app(server.url());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/fridge?ingredients=Tomato,%20rice,,tomato")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["ingredients"], serde_json::json!(["tomato", "rice"]));
    // Fewest missing ingredients first
    assert_eq!(body["results"][0]["id"], 2);
    assert_eq!(body["results"][1]["id"], 1);
    assert_eq!(body["results"][1]["missed_ingredients"][0], "saffron");
}

#[tokio::test]
async fn test_api_recipe_detail_end_to_end() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/recipes/716429/information")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "id": 716429,
                "title": "Pasta with Garlic",
                "summary": "A <b>classic</b> dish.",
                "vegetarian": true,
                "extendedIngredients": [{"name": "pasta", "amount": 200.0, "unit": "g"}],
                "analyzedInstructions": [
                    {"name": "", "steps": [{"number": 1, "step": "Boil the pasta."}]}
                ]
            }"#,
        )
        .create_async()
        .await;

    let app = test_app(server.url());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/recipes/716429")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["title"], "Pasta with Garlic");
    // Summary is reduced to plain text
    assert_eq!(body["summary"], "A classic dish.");
    assert_eq!(body["vegetarian"], true);
    assert_eq!(body["steps"][0]["step"], "Boil the pasta.");
}

#[tokio::test]
async fn test_api_surfaces_upstream_rate_limiting() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/recipes/complexSearch")
        .match_query(Matcher::Any)
        .with_status(429)
        .with_header("retry-after", "12")
        .create_async()
        .await;

    let app = test_app(server.url());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/search?q=pasta")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = json_body(response).await;
    assert_eq!(
        body["error"],
        "Too many requests to the API. Try again in 12s."
    );
}

#[tokio::test]
async fn test_web_search_page_renders_results() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/recipes/complexSearch")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "results": [{"id": 7, "title": "Garlic Bread"}],
                "offset": 0,
                "number": 5,
                "totalResults": 1
            }"#,
        )
        .create_async()
        .await;

    let app = test_app(server.url());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/?q=garlic")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Garlic Bread"));
    assert!(html.contains("1 recipe found"));
}
