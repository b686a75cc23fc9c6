use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassService;
use crate::models::classes::requests::CreateClassRequest;
use crate::models::common::response::storage_error_response;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_required;

pub async fn create_class(
    service: &ClassService,
    request: &HttpRequest,
    class_data: CreateClassRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    // 必填字段校验
    for (field, value) in [
        ("class_code", &class_data.class_code),
        ("name", &class_data.name),
        ("teacher", &class_data.teacher),
    ] {
        if let Err(msg) = validate_required(field, value) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ClassFieldInvalid, msg)));
        }
    }

    match storage.create_class(class_data).await {
        Ok(class) => {
            info!("Class {} created successfully", class.class_code);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(class, "Class created successfully")))
        }
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::ClassAlreadyExists,
            ErrorCode::ClassCreationFailed,
        )),
    }
}
