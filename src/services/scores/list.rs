use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ScoreService;
use crate::models::scores::requests::{ScoreListQuery, ScoreQueryParams};
use crate::models::{ApiResponse, ErrorCode};

pub async fn list_scores(
    service: &ScoreService,
    request: &HttpRequest,
    query: ScoreQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let list_query = ScoreListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        student_no: query.student_no,
        course_code: query.course_code,
        semester: query.semester,
    };

    match storage.list_scores_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Score list retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve score list: {e}"),
            )),
        ),
    }
}
