//! API 帮助函数

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use serde::Serialize;
use tracing::{error, warn};

use super::types::ErrorBody;
use crate::errors::{LessonLinkerError, Result};

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(status: StatusCode, data: &T) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(data)
}

/// 200 OK
pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::OK, &data)
}

/// 201 Created
pub fn created_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::CREATED, &data)
}

/// 从 LessonLinkerError 构建错误响应（自动映射 HTTP 状态码）
///
/// 内部错误记录完整信息，响应中只返回概括消息。
pub fn error_response(err: &LessonLinkerError) -> HttpResponse {
    if err.is_internal() {
        error!("{} {}", err.code(), err);
    } else {
        warn!("{} {}", err.code(), err);
    }

    json_response(
        err.http_status(),
        &ErrorBody {
            error: err.public_message().to_string(),
        },
    )
}

/// 统一 Result → HttpResponse 转换（成功时 200）
pub fn api_result<T: Serialize>(result: Result<T>) -> HttpResponse {
    match result {
        Ok(data) => success_response(data),
        Err(e) => error_response(&e),
    }
}

/// JSON 请求体解析失败时返回 400 + `{"error": ...}`
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = format!("Invalid JSON body: {}", err);
    warn!("{}", message);
    let response = json_response(StatusCode::BAD_REQUEST, &ErrorBody { error: message });
    InternalError::from_response(err, response).into()
}

/// 生成跳转链接所用的对外地址：优先配置，其次请求的 scheme + host
pub fn request_base_url(req: &HttpRequest, configured: Option<&str>) -> String {
    match configured.map(str::trim).filter(|s| !s.is_empty()) {
        Some(base) => base.trim_end_matches('/').to_string(),
        None => {
            let conn = req.connection_info();
            format!("{}://{}", conn.scheme(), conn.host())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_error_response_body_and_status() {
        let resp = error_response(&LessonLinkerError::not_found("School not found"));
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = to_bytes(resp.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "School not found");
    }

    #[actix_web::test]
    async fn test_error_response_hides_store_details() {
        let resp = error_response(&LessonLinkerError::database_operation("disk I/O error"));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(resp.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "Internal server error");
    }

    #[test]
    fn test_request_base_url_prefers_config() {
        let req = TestRequest::default()
            .insert_header(("Host", "dashboard.local:5000"))
            .to_http_request();
        assert_eq!(
            request_base_url(&req, Some("https://go.example.org/")),
            "https://go.example.org"
        );
        assert_eq!(request_base_url(&req, None), "http://dashboard.local:5000");
        assert_eq!(request_base_url(&req, Some("  ")), "http://dashboard.local:5000");
    }
}
