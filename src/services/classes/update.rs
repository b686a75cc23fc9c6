use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassService;
use crate::models::classes::requests::UpdateClassRequest;
use crate::models::common::response::storage_error_response;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::validate_required;

pub async fn update_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    update_data: UpdateClassRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    // 提供的字段不能为空
    for (field, value) in [
        ("class_code", &update_data.class_code),
        ("name", &update_data.name),
        ("teacher", &update_data.teacher),
    ] {
        if let Some(value) = value
            && let Err(msg) = validate_required(field, value)
        {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ClassFieldInvalid, msg)));
        }
    }

    match storage.update_class(class_id, update_data).await {
        Ok(Some(class)) => {
            info!("Class {} updated", class_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(class, "Class updated successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassNotFound,
            "Class not found",
        ))),
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::ClassAlreadyExists,
            ErrorCode::ClassUpdateFailed,
        )),
    }
}
