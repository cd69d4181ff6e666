use actix_web::{HttpResponse, web};
use std::sync::Arc;

use super::types::StatsResponse;
use crate::services::LinkRegistry;

pub struct StatsService;

impl StatsService {
    pub async fn get_stats(registry: web::Data<Arc<LinkRegistry>>) -> HttpResponse {
        HttpResponse::Ok().json(StatsResponse::from(registry.stats()))
    }
}
