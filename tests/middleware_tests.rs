//! Middleware tests
//!
//! TimingMiddleware must be transparent: status, headers and body pass
//! through unchanged, including error responses.

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, HttpResponse, web};

use quicklink::api::middleware::TimingMiddleware;

async fn ok_handler() -> HttpResponse {
    HttpResponse::Ok().insert_header(("X-Test", "1")).body("OK")
}

async fn failing_handler() -> HttpResponse {
    HttpResponse::InternalServerError().body("boom")
}

macro_rules! timed_app {
    () => {{
        test::init_service(
            App::new()
                .wrap(TimingMiddleware)
                .route("/ok", web::get().to(ok_handler))
                .route("/fail", web::get().to(failing_handler)),
        )
        .await
    }};
}

#[actix_rt::test]
async fn test_passes_response_through() {
    let app = timed_app!();

    let req = TestRequest::get().uri("/ok").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("X-Test").unwrap(), "1");
    assert_eq!(test::read_body(resp).await, "OK");
}

#[actix_rt::test]
async fn test_server_errors_pass_through() {
    let app = timed_app!();

    let req = TestRequest::get().uri("/fail").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(test::read_body(resp).await, "boom");
}

#[actix_rt::test]
async fn test_unmatched_route() {
    let app = timed_app!();

    let req = TestRequest::get().uri("/missing").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
