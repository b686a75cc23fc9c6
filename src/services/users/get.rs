use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{UserService, user_not_found};
use crate::models::common::response::storage_error_response;
use crate::models::users::responses::UserResponse;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_user(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserResponse { user },
            "用户信息获取成功",
        ))),
        Ok(None) => Ok(user_not_found(user_id)),
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::Conflict,
            ErrorCode::InternalServerError,
        )),
    }
}
