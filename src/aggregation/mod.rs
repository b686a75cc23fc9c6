//! 仪表盘统计
//!
//! 存储层读取一份 [`StatsSnapshot`]，这里只做纯计算，
//! 相同的快照总是得到相同的 [`DashboardStats`]。

use std::collections::BTreeMap;

use crate::models::stats::{CourseAverage, DashboardStats, GenderCount, NamedCount, Overview};

/// 分数段，前四段左闭右开，最后一段包含 100
pub const SCORE_BUCKETS: [(&str, f64, f64); 5] = [
    ("0-60", 0.0, 60.0),
    ("60-70", 60.0, 70.0),
    ("70-80", 70.0, 80.0),
    ("80-90", 80.0, 90.0),
    ("90-100", 90.0, 100.0),
];

/// 统计所需的数据库快照
#[derive(Debug, Clone, Default)]
pub struct StatsSnapshot {
    /// (班级ID, 班级名称)，按 ID 排序
    pub classes: Vec<(i64, String)>,
    /// (课程ID, 课程名称)，按 ID 排序
    pub courses: Vec<(i64, String)>,
    /// 每个学生的 (班级ID, 性别)
    pub students: Vec<(i64, String)>,
    /// 每条成绩的 (课程ID, 分数)
    pub scores: Vec<(i64, f64)>,
}

/// 分数所在的分数段下标，超出 [0, 100] 的分数不计入任何分数段
pub fn bucket_index(score: f64) -> Option<usize> {
    SCORE_BUCKETS
        .iter()
        .enumerate()
        .position(|(i, &(_, low, high))| {
            let last = i == SCORE_BUCKETS.len() - 1;
            score >= low && (score < high || (last && score <= high))
        })
}

/// 保留一位小数
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

pub fn compute_dashboard_stats(snapshot: &StatsSnapshot) -> DashboardStats {
    let all_scores: Vec<f64> = snapshot.scores.iter().map(|&(_, s)| s).collect();

    let overview = Overview {
        total_students: snapshot.students.len() as i64,
        total_courses: snapshot.courses.len() as i64,
        total_classes: snapshot.classes.len() as i64,
        average_score: mean(&all_scores).map(round1).unwrap_or(0.0),
    };

    // 直接按学生记录计数，不读取 student_count 缓存
    let class_distribution = snapshot
        .classes
        .iter()
        .map(|(id, name)| NamedCount {
            name: name.clone(),
            value: snapshot.students.iter().filter(|(c, _)| c == id).count() as i64,
        })
        .collect();

    let mut bucket_counts = [0i64; SCORE_BUCKETS.len()];
    for score in &all_scores {
        if let Some(i) = bucket_index(*score) {
            bucket_counts[i] += 1;
        }
    }
    let score_distribution = SCORE_BUCKETS
        .iter()
        .zip(bucket_counts)
        .map(|(&(name, _, _), value)| NamedCount {
            name: name.to_string(),
            value,
        })
        .collect();

    let course_average = snapshot
        .courses
        .iter()
        .map(|(id, name)| {
            let values: Vec<f64> = snapshot
                .scores
                .iter()
                .filter(|(c, _)| c == id)
                .map(|&(_, s)| s)
                .collect();
            CourseAverage {
                name: name.clone(),
                average: mean(&values),
            }
        })
        .collect();

    let mut genders: BTreeMap<&str, i64> = BTreeMap::new();
    for (_, gender) in &snapshot.students {
        *genders.entry(gender.as_str()).or_default() += 1;
    }
    let gender_ratio = genders
        .into_iter()
        .map(|(gender, value)| GenderCount {
            gender: gender.to_string(),
            value,
        })
        .collect();

    DashboardStats {
        overview,
        class_distribution,
        score_distribution,
        course_average,
        gender_ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket_values(stats: &DashboardStats) -> Vec<i64> {
        stats.score_distribution.iter().map(|b| b.value).collect()
    }

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(bucket_index(0.0), Some(0));
        assert_eq!(bucket_index(59.9), Some(0));
        assert_eq!(bucket_index(60.0), Some(1));
        assert_eq!(bucket_index(89.99), Some(3));
        assert_eq!(bucket_index(90.0), Some(4));
        assert_eq!(bucket_index(100.0), Some(4));
        assert_eq!(bucket_index(100.5), None);
        assert_eq!(bucket_index(-1.0), None);
    }

    #[test]
    fn test_score_distribution_and_course_average() {
        let snapshot = StatsSnapshot {
            courses: vec![(1, "数学".to_string())],
            scores: [55.0, 65.0, 75.0, 85.0, 95.0, 100.0]
                .into_iter()
                .map(|s| (1, s))
                .collect(),
            ..Default::default()
        };

        let stats = compute_dashboard_stats(&snapshot);
        assert_eq!(bucket_values(&stats), vec![1, 1, 1, 1, 2]);
        assert_eq!(
            stats
                .score_distribution
                .iter()
                .map(|b| b.name.as_str())
                .collect::<Vec<_>>(),
            vec!["0-60", "60-70", "70-80", "80-90", "90-100"]
        );

        let average = stats.course_average[0].average.unwrap();
        assert!((average - 475.0 / 6.0).abs() < 1e-9);
        assert_eq!(stats.overview.average_score, 79.2);
    }

    #[test]
    fn test_empty_store() {
        let snapshot = StatsSnapshot {
            courses: vec![(1, "英语".to_string())],
            ..Default::default()
        };

        let stats = compute_dashboard_stats(&snapshot);
        assert_eq!(stats.overview.average_score, 0.0);
        assert_eq!(stats.course_average[0].average, None);
        assert_eq!(bucket_values(&stats), vec![0, 0, 0, 0, 0]);
        assert!(stats.gender_ratio.is_empty());
    }

    #[test]
    fn test_class_distribution_counts_students_live() {
        let snapshot = StatsSnapshot {
            classes: vec![(1, "一班".to_string()), (2, "二班".to_string())],
            students: vec![
                (1, "male".to_string()),
                (1, "female".to_string()),
                (1, "female".to_string()),
            ],
            ..Default::default()
        };

        let stats = compute_dashboard_stats(&snapshot);
        assert_eq!(stats.overview.total_students, 3);
        assert_eq!(stats.overview.total_classes, 2);
        assert_eq!(stats.class_distribution[0].value, 3);
        assert_eq!(stats.class_distribution[1].value, 0);
        assert_eq!(
            stats.gender_ratio,
            vec![
                GenderCount {
                    gender: "female".to_string(),
                    value: 2
                },
                GenderCount {
                    gender: "male".to_string(),
                    value: 1
                },
            ]
        );
    }
}
