use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 成绩，附带学生与课程的展示字段
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/score.ts")]
pub struct Score {
    pub id: i64,
    pub student_id: i64,
    pub student_no: String,
    pub student_name: String,
    pub course_id: i64,
    pub course_code: String,
    pub course_name: String,
    pub semester: String,
    pub score: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
