use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::StudentService;
use super::create::{ensure_class_exists, invalid_field};
use crate::models::common::response::storage_error_response;
use crate::models::students::requests::UpdateStudentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::{validate_age, validate_phone, validate_required};

pub async fn update_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
    update_data: UpdateStudentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if let Some(student_no) = &update_data.student_no
        && let Err(msg) = validate_required("student_no", student_no)
    {
        return Ok(invalid_field(msg));
    }
    if let Some(name) = &update_data.name
        && let Err(msg) = validate_required("name", name)
    {
        return Ok(invalid_field(msg));
    }
    if let Some(age) = update_data.age
        && let Err(msg) = validate_age(age)
    {
        return Ok(invalid_field(msg));
    }
    if let Some(phone) = &update_data.phone
        && let Err(msg) = validate_phone(phone)
    {
        return Ok(invalid_field(msg));
    }

    if let Some(class_id) = update_data.class_id
        && let Err(response) = ensure_class_exists(&storage, class_id).await
    {
        return Ok(response);
    }

    match storage.update_student(student_id, update_data).await {
        Ok(Some(student)) => {
            info!("Student {} updated", student_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(student, "Student updated successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "Student not found",
        ))),
        Err(e) => {
            error!("Student {} update failed: {}", student_id, e);
            Ok(storage_error_response(
                &e,
                ErrorCode::StudentAlreadyExists,
                ErrorCode::StudentUpdateFailed,
            ))
        }
    }
}
