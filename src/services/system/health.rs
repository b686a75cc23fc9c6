use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use tracing::warn;

use super::SystemService;
use crate::models::system::responses::HealthResponse;
use crate::models::{AppStartTime, ApiResponse, ErrorCode};

/// 数据库不可用时返回 503，数据体仍然携带版本与运行时长
pub async fn health_check(
    service: &SystemService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let now = chrono::Utc::now();

    let uptime_seconds = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|start| (now - start.start_datetime).num_seconds())
        .unwrap_or_default();

    let database_ok = match storage.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!("Health check: database unavailable: {}", e);
            false
        }
    };

    let response = HealthResponse {
        status: if database_ok { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if database_ok { "ok" } else { "unavailable" }.to_string(),
        uptime_seconds,
        timestamp: now,
    };

    if database_ok {
        Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Service is healthy")))
    } else {
        Ok(HttpResponse::ServiceUnavailable().json(ApiResponse::error(
            ErrorCode::InternalServerError,
            response,
            "Database is unavailable",
        )))
    }
}
