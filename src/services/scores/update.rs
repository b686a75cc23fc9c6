use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ScoreService;
use super::create::{ensure_references, invalid_field, out_of_range};
use crate::models::common::response::storage_error_response;
use crate::models::scores::requests::UpdateScoreRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::{validate_required, validate_score};

pub async fn update_score(
    service: &ScoreService,
    request: &HttpRequest,
    score_id: i64,
    update_data: UpdateScoreRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if let Some(semester) = &update_data.semester
        && let Err(msg) = validate_required("semester", semester)
    {
        return Ok(invalid_field(msg));
    }
    if let Some(score) = update_data.score
        && let Err(msg) = validate_score(score)
    {
        return Ok(out_of_range(msg));
    }

    if let Err(response) =
        ensure_references(&storage, update_data.student_id, update_data.course_id).await
    {
        return Ok(response);
    }

    match storage.update_score(score_id, update_data).await {
        Ok(Some(score)) => {
            info!("Score {} updated", score_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(score, "Score updated successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ScoreNotFound,
            "Score not found",
        ))),
        Err(e) => {
            error!("Score {} update failed: {}", score_id, e);
            Ok(storage_error_response(
                &e,
                ErrorCode::ScoreAlreadyExists,
                ErrorCode::ScoreUpdateFailed,
            ))
        }
    }
}
