use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{SEEDED_ADMIN_ID, UserService, user_not_found};
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_user(
    service: &UserService,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let current_user_id = RequireJWT::extract_user_id(request);
    if let Err(msg) = check_deletable(current_user_id, user_id) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CanNotDeleteCurrentUser,
            msg,
        )));
    }

    let storage = service.get_storage(request)?;

    match storage.delete_user(user_id).await {
        Ok(true) => {
            info!("User {} deleted by {:?}", user_id, current_user_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("用户已删除")))
        }
        Ok(false) => Ok(user_not_found(user_id)),
        Err(e) => {
            error!("User {} deletion failed: {}", user_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::UserDeleteFailed,
                    format!("User deletion failed: {e}"),
                )),
            )
        }
    }
}

/// 不能删除自己，也不能删除默认管理员
fn check_deletable(current_user_id: Option<i64>, target_id: i64) -> Result<(), &'static str> {
    if target_id == SEEDED_ADMIN_ID {
        return Err("The default administrator cannot be deleted");
    }
    if current_user_id == Some(target_id) {
        return Err("Cannot delete current user");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cannot_delete_self_or_default_admin() {
        assert!(check_deletable(Some(5), 5).is_err());
        assert!(check_deletable(Some(5), SEEDED_ADMIN_ID).is_err());
        assert!(check_deletable(None, SEEDED_ADMIN_ID).is_err());
        assert!(check_deletable(Some(5), 6).is_ok());
    }
}
