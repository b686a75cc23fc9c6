use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

// 课程查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub name: Option<String>,
    pub course_code: Option<String>,
}

// 创建课程请求
//
// 课程编号、名称、教师、学分和课时都是必填项，学分与课时必须为正数。
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CreateCourseRequest {
    #[serde(default)]
    pub course_code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub teacher: String,
    pub credit: f64,
    pub hours: i32,
    #[serde(default)]
    pub description: Option<String>,
}

// 更新课程请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct UpdateCourseRequest {
    pub course_code: Option<String>,
    pub name: Option<String>,
    pub teacher: Option<String>,
    pub credit: Option<f64>,
    pub hours: Option<i32>,
    pub description: Option<String>,
}

// 课程列表查询参数（用于存储层）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub name: Option<String>,
    pub course_code: Option<String>,
}
