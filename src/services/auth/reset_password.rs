use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use crate::models::users::requests::UpdateUserRequest;
use crate::models::{ApiResponse, ErrorCode, auth::ResetPasswordRequest};
use crate::utils::password::hash_password;
use crate::utils::validate::validate_password_simple;

use super::AuthService;

/// 用户名、邮箱、手机号三者都匹配时才允许设置新密码
pub async fn handle_reset_password(
    service: &AuthService,
    reset_request: ResetPasswordRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if let Err(msg) = validate_password_simple(&reset_request.new_password) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserPasswordInvalid, msg)));
    }

    let user = match storage
        .find_user_for_password_reset(
            reset_request.username.trim(),
            reset_request.email.trim(),
            reset_request.phone.trim(),
        )
        .await
    {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ResetPasswordFailed,
                "Username, email and phone do not match any account",
            )));
        }
        Err(e) => {
            error!("Password reset lookup failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ResetPasswordFailed,
                    format!("Password reset failed: {e}"),
                )),
            );
        }
    };

    let password_hash = match hash_password(&reset_request.new_password) {
        Ok(hash) => hash,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ResetPasswordFailed,
                    format!("密码哈希失败: {e}"),
                )),
            );
        }
    };

    let update = UpdateUserRequest {
        password: Some(password_hash),
        ..Default::default()
    };

    match storage.update_user(user.id, update).await {
        Ok(Some(_)) => {
            info!("Password reset for user {}", user.username);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("密码重置成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "用户不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::ResetPasswordFailed,
                format!("Password reset failed: {e}"),
            )),
        ),
    }
}
