use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use tracing::trace;

use super::helpers::request_base_url;
use super::types::{ShortenRequest, ShortenResponse};
use crate::errors::QuicklinkError;
use crate::services::LinkRegistry;

pub struct ShortenService;

impl ShortenService {
    pub async fn shorten(
        req: HttpRequest,
        body: web::Json<ShortenRequest>,
        registry: web::Data<Arc<LinkRegistry>>,
    ) -> Result<HttpResponse, QuicklinkError> {
        let ShortenRequest { url, custom_code } = body.into_inner();
        trace!("Shorten request for {}", url);

        // 写文件是阻塞操作，放到线程池执行
        let registry = registry.get_ref().clone();
        let link =
            web::block(move || registry.create_short_link(&url, custom_code.as_deref())).await??;
        let short_url = format!("{}/{}", request_base_url(&req), link.code);

        Ok(HttpResponse::Ok().json(ShortenResponse {
            short_url,
            original_url: link.target_url,
            short_code: link.code,
        }))
    }
}
