use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

// 成绩查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/score.ts")]
pub struct ScoreQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    /// 学号模糊搜索
    pub student_no: Option<String>,
    /// 课程编号模糊搜索
    pub course_code: Option<String>,
    /// 学期精确匹配
    pub semester: Option<String>,
}

// 创建成绩请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/score.ts")]
pub struct CreateScoreRequest {
    pub student_id: i64,
    pub course_id: i64,
    #[serde(default)]
    pub semester: String,
    pub score: f64,
}

// 更新成绩请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/score.ts")]
pub struct UpdateScoreRequest {
    pub student_id: Option<i64>,
    pub course_id: Option<i64>,
    pub semester: Option<String>,
    pub score: Option<f64>,
}

// 成绩列表查询参数（用于存储层）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/score.ts")]
pub struct ScoreListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_no: Option<String>,
    pub course_code: Option<String>,
    pub semester: Option<String>,
}
