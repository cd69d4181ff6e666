use actix_web::{HttpResponse, web};
use std::sync::Arc;
use tracing::trace;

use super::types::HealthResponse;
use crate::services::LinkRegistry;

pub struct HealthService;

impl HealthService {
    pub async fn health_check(registry: web::Data<Arc<LinkRegistry>>) -> HttpResponse {
        trace!("Received health check request");

        HttpResponse::Ok().json(HealthResponse {
            status: "healthy".to_string(),
            total_urls: registry.total_urls(),
        })
    }
}
