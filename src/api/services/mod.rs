pub mod frontend;
pub mod health;
pub mod helpers;
pub mod redirect;
pub mod shorten;
pub mod stats;
pub mod types;

pub use frontend::FrontendService;
pub use health::HealthService;
pub use redirect::RedirectService;
pub use shorten::ShortenService;
pub use stats::StatsService;

use actix_web::web;

/// Register every public route.
///
/// Fixed paths are registered before the `/{code}` catch-all so that
/// `/stats` and `/health` are never looked up as short codes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(helpers::json_error_handler))
        .route("/", web::get().to(FrontendService::handle_index))
        .route("/shorten", web::post().to(ShortenService::shorten))
        .route("/stats", web::get().to(StatsService::get_stats))
        .route("/health", web::get().to(HealthService::health_check))
        .route("/{code}", web::get().to(RedirectService::handle_redirect));
}
