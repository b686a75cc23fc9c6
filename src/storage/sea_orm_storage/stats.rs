//! 仪表盘统计查询

use super::SeaOrmStorage;
use crate::aggregation::{StatsSnapshot, compute_dashboard_stats};
use crate::entity::{classes, courses, scores, students};
use crate::errors::{RecordsError, Result};
use crate::models::stats::DashboardStats;
use crate::models::students::entities::Gender;
use sea_orm::{EntityTrait, QueryOrder, QuerySelect, TransactionTrait};

impl SeaOrmStorage {
    /// 读取统计快照并计算仪表盘数据
    pub async fn dashboard_stats_impl(&self) -> Result<DashboardStats> {
        let snapshot = self.stats_snapshot().await?;
        Ok(compute_dashboard_stats(&snapshot))
    }

    /// 四次读取在同一个事务中完成，保证来自同一份数据
    async fn stats_snapshot(&self) -> Result<StatsSnapshot> {
        let txn = self.db.begin().await?;

        let classes: Vec<(i64, String)> = classes::Entity::find()
            .select_only()
            .column(classes::Column::Id)
            .column(classes::Column::Name)
            .order_by_asc(classes::Column::Id)
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| RecordsError::database_operation(format!("统计班级失败: {e}")))?;

        let courses: Vec<(i64, String)> = courses::Entity::find()
            .select_only()
            .column(courses::Column::Id)
            .column(courses::Column::Name)
            .order_by_asc(courses::Column::Id)
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| RecordsError::database_operation(format!("统计课程失败: {e}")))?;

        let raw_students: Vec<(i64, String)> = students::Entity::find()
            .select_only()
            .column(students::Column::ClassId)
            .column(students::Column::Gender)
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| RecordsError::database_operation(format!("统计学生失败: {e}")))?;

        let scores: Vec<(i64, f64)> = scores::Entity::find()
            .select_only()
            .column(scores::Column::CourseId)
            .column(scores::Column::Score)
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| RecordsError::database_operation(format!("统计成绩失败: {e}")))?;

        txn.commit().await?;

        // 性别按学生接口相同的规则归一化
        let students = raw_students
            .into_iter()
            .map(|(class_id, gender)| Ok((class_id, Gender::from_stored(&gender)?.to_string())))
            .collect::<Result<Vec<_>>>()?;

        Ok(StatsSnapshot {
            classes,
            courses,
            students,
            scores,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::memory_storage;
    use crate::models::classes::requests::CreateClassRequest;
    use crate::models::courses::requests::CreateCourseRequest;
    use crate::models::scores::requests::CreateScoreRequest;
    use crate::models::students::entities::Gender;
    use crate::models::students::requests::CreateStudentRequest;
    use crate::entity::students;
    use sea_orm::{ActiveModelTrait, Set};

    async fn insert_raw_student(
        storage: &super::super::SeaOrmStorage,
        no: &str,
        class_id: i64,
        gender: &str,
    ) -> i64 {
        students::ActiveModel {
            student_no: Set(no.to_string()),
            name: Set(format!("导入{no}")),
            gender: Set(gender.to_string()),
            age: Set(19),
            class_id: Set(class_id),
            phone: Set("13800000000".to_string()),
            created_at: Set(0),
            updated_at: Set(0),
            ..Default::default()
        }
        .insert(&storage.db)
        .await
        .unwrap()
        .id
    }

    async fn class_c1(storage: &super::super::SeaOrmStorage) -> i64 {
        storage
            .create_class_impl(CreateClassRequest {
                class_code: "C1".to_string(),
                name: "一班".to_string(),
                teacher: "王老师".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_legacy_gender_labels_merge_with_canonical() {
        let storage = memory_storage().await;
        let class_id = class_c1(&storage).await;

        storage
            .create_student_impl(CreateStudentRequest {
                student_no: "S1".to_string(),
                name: "学生1".to_string(),
                gender: Gender::Female,
                age: 18,
                class_id,
                phone: "13800000000".to_string(),
            })
            .await
            .unwrap();
        let imported = insert_raw_student(&storage, "S2", class_id, "女").await;

        let student = storage.get_student_by_id_impl(imported).await.unwrap().unwrap();
        assert_eq!(student.gender, Gender::Female);

        let stats = storage.dashboard_stats_impl().await.unwrap();
        assert_eq!(stats.gender_ratio.len(), 1);
        assert_eq!(stats.gender_ratio[0].gender, "female");
        assert_eq!(stats.gender_ratio[0].value, 2);
    }

    #[tokio::test]
    async fn test_unknown_stored_gender_is_rejected_everywhere() {
        let storage = memory_storage().await;
        let class_id = class_c1(&storage).await;
        let imported = insert_raw_student(&storage, "S9", class_id, "other").await;

        let err = storage.get_student_by_id_impl(imported).await.unwrap_err();
        assert_eq!(err.code(), "E003");

        let err = storage.dashboard_stats_impl().await.unwrap_err();
        assert_eq!(err.code(), "E003");
    }

    #[tokio::test]
    async fn test_empty_store() {
        let storage = memory_storage().await;
        let stats = storage.dashboard_stats_impl().await.unwrap();

        assert_eq!(stats.overview.total_students, 0);
        assert_eq!(stats.overview.average_score, 0.0);
        assert_eq!(stats.score_distribution.len(), 5);
        assert!(stats.class_distribution.is_empty());
        assert!(stats.course_average.is_empty());
    }

    #[tokio::test]
    async fn test_dashboard_from_store() {
        let storage = memory_storage().await;
        let class_id = storage
            .create_class_impl(CreateClassRequest {
                class_code: "C1".to_string(),
                name: "一班".to_string(),
                teacher: "王老师".to_string(),
            })
            .await
            .unwrap()
            .id;
        let math = storage
            .create_course_impl(CreateCourseRequest {
                course_code: "MATH".to_string(),
                name: "数学".to_string(),
                teacher: "李老师".to_string(),
                credit: 4.0,
                hours: 64,
                description: None,
            })
            .await
            .unwrap()
            .id;
        storage
            .create_course_impl(CreateCourseRequest {
                course_code: "ART".to_string(),
                name: "美术".to_string(),
                teacher: "赵老师".to_string(),
                credit: 1.0,
                hours: 16,
                description: None,
            })
            .await
            .unwrap();

        let values = [55.0, 65.0, 75.0, 85.0, 95.0, 100.0];
        for (i, value) in values.iter().enumerate() {
            let student_id = storage
                .create_student_impl(CreateStudentRequest {
                    student_no: format!("S{i}"),
                    name: format!("学生{i}"),
                    gender: if i % 2 == 0 { Gender::Male } else { Gender::Female },
                    age: 18,
                    class_id,
                    phone: "13800000000".to_string(),
                })
                .await
                .unwrap()
                .id;
            storage
                .create_score_impl(CreateScoreRequest {
                    student_id,
                    course_id: math,
                    semester: "2024-1".to_string(),
                    score: *value,
                })
                .await
                .unwrap();
        }

        let stats = storage.dashboard_stats_impl().await.unwrap();
        assert_eq!(stats.overview.total_students, 6);
        assert_eq!(stats.overview.total_courses, 2);
        assert_eq!(stats.overview.total_classes, 1);
        assert_eq!(stats.class_distribution[0].value, 6);
        assert_eq!(
            stats
                .score_distribution
                .iter()
                .map(|b| b.value)
                .collect::<Vec<_>>(),
            vec![1, 1, 1, 1, 2]
        );

        let math_average = stats.course_average[0].average.unwrap();
        assert!((math_average - 475.0 / 6.0).abs() < 1e-9);
        assert_eq!(stats.course_average[1].name, "美术");
        assert_eq!(stats.course_average[1].average, None);
        assert_eq!(stats.gender_ratio.len(), 2);
    }
}
