//! CORS middleware tests
//!
//! Preflight and simple requests against the middleware built from `[cors]`.

use actix_web::http::header;
use actix_web::http::{Method, StatusCode};
use actix_web::test::{self, TestRequest};
use actix_web::{App, HttpResponse, web};

use quicklink::config::CorsConfig;
use quicklink::runtime::modes::server::build_cors_middleware;

// =============================================================================
// Test Setup
// =============================================================================

async fn ok_handler() -> HttpResponse {
    HttpResponse::Ok().body("OK")
}

macro_rules! cors_app {
    ($config:expr) => {{
        test::init_service(
            App::new()
                .wrap(build_cors_middleware(&$config))
                .route("/shorten", web::post().to(ok_handler))
                .route("/stats", web::get().to(ok_handler)),
        )
        .await
    }};
}

fn preflight(origin: &str) -> TestRequest {
    TestRequest::default()
        .method(Method::OPTIONS)
        .uri("/shorten")
        .insert_header((header::ORIGIN, origin))
        .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
        .insert_header((header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type"))
}

fn allow_origin<B>(resp: &actix_web::dev::ServiceResponse<B>) -> Option<String> {
    resp.headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

// =============================================================================
// Preflight
// =============================================================================

#[actix_rt::test]
async fn test_preflight_exact_origin() {
    let app = cors_app!(CorsConfig::default());

    let resp = test::call_service(&app, preflight("http://localhost:3000").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(allow_origin(&resp).as_deref(), Some("http://localhost:3000"));
    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .map(|v| v.as_bytes()),
        Some(&b"true"[..])
    );
}

#[actix_rt::test]
async fn test_preflight_wildcard_origin() {
    let app = cors_app!(CorsConfig::default());

    let resp =
        test::call_service(&app, preflight("https://preview-42.vercel.app").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        allow_origin(&resp).as_deref(),
        Some("https://preview-42.vercel.app")
    );
}

#[actix_rt::test]
async fn test_preflight_unknown_origin_rejected() {
    let app = cors_app!(CorsConfig::default());

    let resp = test::call_service(&app, preflight("https://evil.example").to_request()).await;
    assert!(allow_origin(&resp).is_none());
}

// =============================================================================
// Simple requests
// =============================================================================

#[actix_rt::test]
async fn test_simple_request_gets_allow_origin() {
    let app = cors_app!(CorsConfig::default());

    let req = TestRequest::get()
        .uri("/stats")
        .insert_header((header::ORIGIN, "http://127.0.0.1:8000"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(allow_origin(&resp).as_deref(), Some("http://127.0.0.1:8000"));
}

#[actix_rt::test]
async fn test_same_origin_request_passes() {
    let app = cors_app!(CorsConfig::default());

    let req = TestRequest::get().uri("/stats").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_any_origin_drops_credentials() {
    let config = CorsConfig {
        allowed_origins: vec!["*".to_string()],
        allow_credentials: true,
    };
    let app = cors_app!(config);

    let resp = test::call_service(&app, preflight("https://anywhere.dev").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(allow_origin(&resp).is_some());
    assert!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .is_none()
    );
}
