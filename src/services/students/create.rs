use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::StudentService;
use crate::models::common::response::storage_error_response;
use crate::models::students::requests::CreateStudentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::validate::{validate_age, validate_phone, validate_required};

pub async fn create_student(
    service: &StudentService,
    request: &HttpRequest,
    student_data: CreateStudentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if let Err(msg) = validate_required("student_no", &student_data.student_no) {
        return Ok(invalid_field(msg));
    }
    if let Err(msg) = validate_required("name", &student_data.name) {
        return Ok(invalid_field(msg));
    }
    if let Err(msg) = validate_age(student_data.age) {
        return Ok(invalid_field(msg));
    }
    if let Err(msg) = validate_phone(&student_data.phone) {
        return Ok(invalid_field(msg));
    }

    if let Err(response) = ensure_class_exists(&storage, student_data.class_id).await {
        return Ok(response);
    }

    match storage.create_student(student_data).await {
        Ok(student) => {
            info!(
                "Student {} created in class {}",
                student.student_no, student.class_id
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(student, "Student created successfully")))
        }
        Err(e) => {
            error!("Student creation failed: {}", e);
            Ok(storage_error_response(
                &e,
                ErrorCode::StudentAlreadyExists,
                ErrorCode::StudentCreationFailed,
            ))
        }
    }
}

pub(crate) fn invalid_field(msg: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::StudentFieldInvalid,
        msg,
    ))
}

/// 所属班级必须存在
pub(crate) async fn ensure_class_exists(
    storage: &Arc<dyn Storage>,
    class_id: i64,
) -> Result<(), HttpResponse> {
    match storage.get_class_by_id(class_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(invalid_field(format!("Class {class_id} does not exist"))),
        Err(e) => Err(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to check class: {e}"),
            )),
        ),
    }
}
