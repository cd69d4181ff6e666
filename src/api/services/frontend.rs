use actix_web::HttpResponse;
use rust_embed::Embed;
use tracing::trace;

use crate::config::try_get_config;

#[derive(Embed)]
#[folder = "assets/"]
struct FrontendAssets;

pub struct FrontendService;

impl FrontendService {
    /// 首页：内嵌的单页应用
    pub async fn handle_index() -> HttpResponse {
        trace!("Serving landing page");

        let html = match FrontendAssets::get("index.html") {
            Some(content) => String::from_utf8_lossy(&content.data).into_owned(),
            None => include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/index.html"))
                .to_string(),
        };

        HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(Self::render(&html))
    }

    fn render(template: &str) -> String {
        let (name, version) = match try_get_config() {
            Some(config) => (config.app.name.clone(), config.app.version.clone()),
            None => (
                "URL Shortener".to_string(),
                env!("CARGO_PKG_VERSION").to_string(),
            ),
        };
        template
            .replace("%APP_NAME%", &name)
            .replace("%VERSION%", &version)
    }
}
