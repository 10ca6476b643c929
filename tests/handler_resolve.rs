mod common;

use axum::Router;
use axum_test::TestServer;
use url_shortener::api::routes::url_routes;
use url_shortener::state::AppState;

fn server(state: AppState) -> TestServer {
    let app = Router::new().nest("/api", url_routes()).with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_resolve_returns_original_url() {
    let (state, _store) = common::create_test_state();
    let server = server(state);

    let short_link = server
        .post("/api/urls")
        .text("https://example.com/target?q=1")
        .await
        .text();
    let code = short_link.strip_prefix(common::TEST_BASE_URL).unwrap();

    let response = server.get(&format!("/api/urls/{code}")).await;

    response.assert_status_ok();
    assert_eq!(response.text(), "https://example.com/target?q=1");
}

#[tokio::test]
async fn test_resolve_unknown_code() {
    let (state, _store) = common::create_test_state();
    let server = server(state);

    let response = server.get("/api/urls/zzzzzzzz").await;

    response.assert_status_not_found();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
    assert_eq!(json["error"]["message"], "Data not found in the database");
    assert_eq!(json["error"]["details"]["code"], "zzzzzzzz");
}

#[tokio::test]
async fn test_resolve_is_case_sensitive() {
    let (state, _store) = common::create_test_state();
    let server = server(state);

    let short_link = server
        .post("/api/urls")
        .text("https://example.com/case")
        .await
        .text();
    let code = short_link.strip_prefix(common::TEST_BASE_URL).unwrap();

    let flipped: String = code
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect();

    if flipped != code {
        server
            .get(&format!("/api/urls/{flipped}"))
            .await
            .assert_status_not_found();
    }
}

#[tokio::test]
async fn test_resolve_store_unavailable() {
    let server = server(common::create_unavailable_state());

    let response = server.get("/api/urls/abcdEFGH").await;

    response.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["message"], "Error communicating with database");
}

#[tokio::test]
async fn test_resolve_code_with_nul_byte_is_not_found() {
    let (state, _store) = common::create_test_state();
    let server = server(state);

    server.get("/api/urls/ab%00cd").await.assert_status_not_found();
    server
        .get("/api/urls/ab%00cdefg")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_resolve_malformed_code_skips_store() {
    let server = server(common::create_unavailable_state());

    server
        .get("/api/urls/toolongcode")
        .await
        .assert_status_not_found();
}
