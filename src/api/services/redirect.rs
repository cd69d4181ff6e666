use actix_web::{HttpResponse, web};
use std::sync::Arc;
use tracing::trace;

use crate::errors::QuicklinkError;
use crate::services::LinkRegistry;
use crate::utils::encode_location;

pub struct RedirectService;

impl RedirectService {
    /// `302` to the target URL; every successful lookup counts as one click.
    pub async fn handle_redirect(
        path: web::Path<String>,
        registry: web::Data<Arc<LinkRegistry>>,
    ) -> Result<HttpResponse, QuicklinkError> {
        let code = path.into_inner();
        trace!("Redirect lookup: {}", code);

        let registry = registry.get_ref().clone();
        let target = web::block(move || registry.resolve(&code)).await??;

        Ok(HttpResponse::Found()
            .insert_header(("Location", encode_location(&target).into_owned()))
            .finish())
    }
}
