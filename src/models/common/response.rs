use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::RecordsError;
use crate::models::ErrorCode;

// 统一的API响应结构
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct ApiResponse<T: TS> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T: TS> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error(code: ErrorCode, data: T, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }
}

/// 将存储层错误映射为统一的错误响应
///
/// 校验失败 400，资源不存在 404，唯一约束冲突 409，其余 500；
/// `conflict_code` 用于冲突，`fallback_code` 用于其余错误。
pub fn storage_error_response(
    err: &RecordsError,
    conflict_code: ErrorCode,
    fallback_code: ErrorCode,
) -> HttpResponse {
    let (status, code) = match err {
        RecordsError::Validation(_) => (StatusCode::BAD_REQUEST, ErrorCode::BadRequest),
        RecordsError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NotFound),
        RecordsError::Conflict(_) => (StatusCode::CONFLICT, conflict_code),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, fallback_code),
    };
    HttpResponse::build(status).json(ApiResponse::error_empty(code, err.message()))
}
