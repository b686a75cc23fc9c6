use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseService;
use super::create::invalid_field;
use crate::models::common::response::storage_error_response;
use crate::models::courses::requests::UpdateCourseRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::{validate_credit, validate_hours, validate_required};

pub async fn update_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
    update_data: UpdateCourseRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    for (field, value) in [
        ("course_code", &update_data.course_code),
        ("name", &update_data.name),
        ("teacher", &update_data.teacher),
    ] {
        if let Some(value) = value
            && let Err(msg) = validate_required(field, value)
        {
            return Ok(invalid_field(msg));
        }
    }
    if let Some(credit) = update_data.credit
        && let Err(msg) = validate_credit(credit)
    {
        return Ok(invalid_field(msg));
    }
    if let Some(hours) = update_data.hours
        && let Err(msg) = validate_hours(hours)
    {
        return Ok(invalid_field(msg));
    }

    match storage.update_course(course_id, update_data).await {
        Ok(Some(course)) => {
            info!("Course {} updated", course_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(course, "Course updated successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CourseNotFound,
            "Course not found",
        ))),
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::CourseAlreadyExists,
            ErrorCode::CourseUpdateFailed,
        )),
    }
}
