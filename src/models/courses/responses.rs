use super::entities::Course;
use crate::models::common::PaginatedResponse;

// 课程列表响应
pub type CourseListResponse = PaginatedResponse<Course>;
