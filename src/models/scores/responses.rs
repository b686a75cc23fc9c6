use super::entities::Score;
use crate::models::common::PaginatedResponse;

// 成绩列表响应
pub type ScoreListResponse = PaginatedResponse<Score>;
