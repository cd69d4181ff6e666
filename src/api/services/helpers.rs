//! 错误映射与通用响应构造

use actix_web::error::{BlockingError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use tracing::{debug, error};

use super::types::ErrorDetail;
use crate::errors::QuicklinkError;

const INTERNAL_ERROR_DETAIL: &str = "Internal Server Error";

impl ResponseError for QuicklinkError {
    fn status_code(&self) -> StatusCode {
        match self {
            QuicklinkError::InvalidUrl(_)
            | QuicklinkError::InvalidCode(_)
            | QuicklinkError::CodeTaken(_) => StatusCode::BAD_REQUEST,
            QuicklinkError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let detail = if self.is_client_error() {
            self.message().to_string()
        } else {
            // 内部错误不向调用方暴露细节
            error!("Request failed: {}", self);
            INTERNAL_ERROR_DETAIL.to_string()
        };
        HttpResponse::build(self.status_code()).json(ErrorDetail::new(detail))
    }
}

impl From<BlockingError> for QuicklinkError {
    fn from(err: BlockingError) -> Self {
        QuicklinkError::internal(format!("Blocking task failed: {}", err))
    }
}

/// Turn a rejected JSON body into `422 {"detail": ...}`.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!("Rejected request body: {}", err);
    let response =
        HttpResponse::UnprocessableEntity().json(ErrorDetail::new(err.to_string()));
    actix_web::error::InternalError::from_response(err, response).into()
}

/// `scheme://host` of the incoming request, without a trailing slash.
pub fn request_base_url(req: &HttpRequest) -> String {
    let info = req.connection_info();
    format!("{}://{}", info.scheme(), info.host())
        .trim_end_matches('/')
        .to_string()
}
