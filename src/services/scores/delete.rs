use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ScoreService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_score(
    service: &ScoreService,
    request: &HttpRequest,
    score_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_score(score_id).await {
        Ok(true) => {
            info!("Score {} deleted", score_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Score deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ScoreNotFound,
            "Score not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::ScoreDeleteFailed,
                format!("Score deletion failed: {e}"),
            )),
        ),
    }
}
