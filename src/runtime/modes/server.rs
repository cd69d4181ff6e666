//! Server mode
//!
//! Configures and starts the HTTP server with all routes.

use actix_cors::Cors;
use actix_web::{
    App, HttpServer,
    dev::RequestHead,
    http::header::HeaderValue,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::api::middleware::TimingMiddleware;
use crate::api::services::configure_routes;
use crate::config::{CorsConfig, get_config};
use crate::runtime::lifetime;

/// Validate CORS configuration at startup (runs once)
pub fn validate_cors_config(cors_config: &CorsConfig) {
    if cors_config.allowed_origins.is_empty() {
        warn!("CORS allowed_origins is empty. No cross-origin requests will be allowed.");
    }

    let is_any_origin = cors_config.allowed_origins.iter().any(|o| o == "*");
    if is_any_origin && cors_config.allow_credentials {
        error!(
            "SECURITY WARNING: allow_any_origin + allow_credentials is a dangerous combination! \
            Disabling credentials for safety."
        );
    }
}

/// Match `origin` against an allow-list entry that may contain `*` wildcards.
///
/// Each `*` stands for one or more characters.
pub fn origin_matches(pattern: &str, origin: &str) -> bool {
    if !pattern.contains('*') {
        return pattern == origin;
    }

    let mut parts = pattern.split('*');
    let first = parts.next().unwrap_or_default();
    let Some(mut rest) = origin.strip_prefix(first) else {
        return false;
    };

    let middle: Vec<&str> = parts.collect();
    let Some((last, inner)) = middle.split_last() else {
        return true;
    };

    for part in inner {
        let Some(after_wildcard) = skip_one_char(rest) else {
            return false;
        };
        match after_wildcard.find(part) {
            Some(pos) => rest = &after_wildcard[pos + part.len()..],
            None => return false,
        }
    }

    skip_one_char(rest).is_some_and(|tail| tail.ends_with(last))
}

fn skip_one_char(s: &str) -> Option<&str> {
    let mut chars = s.chars();
    chars.next()?;
    Some(chars.as_str())
}

/// Build CORS middleware from configuration
pub fn build_cors_middleware(cors_config: &CorsConfig) -> Cors {
    let mut cors = Cors::default().allow_any_method().allow_any_header();

    let is_any_origin = cors_config.allowed_origins.iter().any(|o| o == "*");

    if is_any_origin {
        cors = cors.allow_any_origin();
    } else {
        let mut patterns = Vec::new();
        for origin in &cors_config.allowed_origins {
            if origin.contains('*') {
                patterns.push(origin.clone());
            } else {
                cors = cors.allowed_origin(origin);
            }
        }

        if !patterns.is_empty() {
            cors = cors.allowed_origin_fn(move |origin: &HeaderValue, _req_head: &RequestHead| {
                origin
                    .to_str()
                    .map(|o| patterns.iter().any(|p| origin_matches(p, o)))
                    .unwrap_or(false)
            });
        }
    }

    // allow_any_origin 与 credentials 组合会让任意站点携带凭据，强制关闭
    if cors_config.allow_credentials && !is_any_origin {
        cors = cors.supports_credentials();
    }

    cors
}

/// Run the HTTP server
///
/// 1. Loads the link data and builds the registry
/// 2. Configures and starts the HTTP server
/// 3. Flushes the registry on Ctrl+C
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let config = get_config();

    let startup = lifetime::startup::prepare_server_startup(&config)
        .await
        .map_err(|e| {
            error!("Server startup failed: {}", e);
            e
        })?;

    let registry = startup.registry.clone();
    info!(
        "Link data: {} / {}",
        startup.store.data_file().display(),
        startup.store.stats_file().display()
    );

    let cors_config = config.cors.clone();
    validate_cors_config(&cors_config);

    let workers = config.server.workers.clamp(1, 32);
    if config.server.debug {
        warn!("Debug mode enabled");
    }
    info!("{} v{} using {} workers", config.app.name, config.app.version, workers);

    let app_registry = registry.clone();
    let server = HttpServer::new(move || {
        let cors = build_cors_middleware(&cors_config);

        App::new()
            .wrap(TimingMiddleware)
            .wrap(cors)
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add(("Cache-Control", "no-cache, no-store, must-revalidate")))
            .app_data(web::Data::new(app_registry.clone()))
            .app_data(web::PayloadConfig::new(64 * 1024))
            .configure(configure_routes)
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .workers(workers);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);
    let server = server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run();

    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown(registry) => {
            warn!("Graceful shutdown complete");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_origin() {
        assert!(origin_matches("http://localhost:3000", "http://localhost:3000"));
        assert!(!origin_matches("http://localhost:3000", "http://localhost:3001"));
    }

    #[test]
    fn test_wildcard_subdomain() {
        assert!(origin_matches("https://*.vercel.app", "https://my-app.vercel.app"));
        assert!(!origin_matches("https://*.vercel.app", "https://vercel.app.evil.com"));
        assert!(!origin_matches("https://*.vercel.app", "http://my-app.vercel.app"));
    }

    #[test]
    fn test_wildcard_needs_at_least_one_char() {
        assert!(!origin_matches("https://*.vercel.app", "https://.vercel.app"));
        assert!(origin_matches("https://*.vercel.app", "https://a.vercel.app"));
        assert!(!origin_matches("https://*.*.example.com", "https://a..example.com"));
        assert!(!origin_matches("*", ""));
    }

    #[test]
    fn test_multiple_wildcards() {
        assert!(origin_matches("https://*.*.example.com", "https://a.b.example.com"));
        assert!(origin_matches("*", "https://anything.dev"));
    }
}
