use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::StatsService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_dashboard_stats(
    service: &StatsService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.dashboard_stats().await {
        Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            stats,
            "Statistics retrieved successfully",
        ))),
        Err(e) => {
            error!("Dashboard statistics query failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::StatsQueryFailed,
                    format!("获取统计数据失败: {e}"),
                )),
            )
        }
    }
}
