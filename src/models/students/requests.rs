use super::entities::Gender;
use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_optional_string_to_i64;
use serde::Deserialize;
use ts_rs::TS;

// 学生查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    /// 姓名模糊搜索
    pub name: Option<String>,
    /// 学号模糊搜索
    pub student_no: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string_to_i64")]
    pub class_id: Option<i64>,
}

// 创建学生请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct CreateStudentRequest {
    pub student_no: String,
    pub name: String,
    pub gender: Gender,
    pub age: i32,
    pub class_id: i64,
    pub phone: String,
}

// 更新学生请求，修改 class_id 即为调班
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct UpdateStudentRequest {
    pub student_no: Option<String>,
    pub name: Option<String>,
    pub gender: Option<Gender>,
    pub age: Option<i32>,
    pub class_id: Option<i64>,
    pub phone: Option<String>,
}

// 学生列表查询参数（用于存储层）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub name: Option<String>,
    pub student_no: Option<String>,
    pub class_id: Option<i64>,
}
