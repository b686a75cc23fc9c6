use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 仪表盘统计数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/stats.ts")]
pub struct DashboardStats {
    pub overview: Overview,
    pub class_distribution: Vec<NamedCount>,
    pub score_distribution: Vec<NamedCount>,
    pub course_average: Vec<CourseAverage>,
    pub gender_ratio: Vec<GenderCount>,
}

/// 总览
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/stats.ts")]
pub struct Overview {
    pub total_students: i64,
    pub total_courses: i64,
    pub total_classes: i64,
    /// 全部成绩平均分，保留一位小数；没有成绩时为 0
    pub average_score: f64,
}

/// 名称与计数，用于班级分布和分数段分布
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/stats.ts")]
pub struct NamedCount {
    pub name: String,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/stats.ts")]
pub struct CourseAverage {
    pub name: String,
    /// 没有成绩的课程为 null
    pub average: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/stats.ts")]
pub struct GenderCount {
    pub gender: String,
    pub value: i64,
}
