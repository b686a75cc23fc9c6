use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::common::response::storage_error_response;
use crate::models::{
    ApiResponse, ErrorCode,
    users::requests::{UserListParams, UserListQuery},
};

/// 管理员查看账号列表，按用户名或邮箱搜索，可按角色和状态筛选
pub async fn list_users(
    service: &UserService,
    query: UserListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let list_query = UserListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        role: query.role,
        status: query.status,
        search: query
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
    };

    match storage.list_users_with_pagination(list_query).await {
        Ok(users) => Ok(HttpResponse::Ok().json(ApiResponse::success(users, "用户列表获取成功"))),
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::Conflict,
            ErrorCode::InternalServerError,
        )),
    }
}
