use super::entities::Class;
use crate::models::common::PaginatedResponse;

// 班级列表响应
pub type ClassListResponse = PaginatedResponse<Class>;
