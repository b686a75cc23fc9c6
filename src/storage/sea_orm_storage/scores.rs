//! 成绩存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::scores::{ActiveModel, Column, Entity as Scores, Model, Relation};
use crate::entity::{courses, students};
use crate::errors::{RecordsError, Result};
use crate::models::{
    PaginationInfo, PaginationQuery,
    scores::{
        entities::Score,
        requests::{CreateScoreRequest, ScoreListQuery, UpdateScoreRequest},
        responses::ScoreListResponse,
    },
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set,
};

/// 成绩展示所需的学生与课程信息
#[derive(Default)]
struct ScoreLabels {
    students: HashMap<i64, (String, String)>,
    courses: HashMap<i64, (String, String)>,
}

impl ScoreLabels {
    fn apply(&self, model: Model) -> Score {
        let (student_no, student_name) = self
            .students
            .get(&model.student_id)
            .cloned()
            .unwrap_or_default();
        let (course_code, course_name) = self
            .courses
            .get(&model.course_id)
            .cloned()
            .unwrap_or_default();

        Score {
            id: model.id,
            student_id: model.student_id,
            student_no,
            student_name,
            course_id: model.course_id,
            course_code,
            course_name,
            semester: model.semester,
            score: model.score,
            created_at: chrono::DateTime::<chrono::Utc>::from_timestamp(model.created_at, 0)
                .unwrap_or_default(),
            updated_at: chrono::DateTime::<chrono::Utc>::from_timestamp(model.updated_at, 0)
                .unwrap_or_default(),
        }
    }
}

impl SeaOrmStorage {
    /// 录入成绩
    pub async fn create_score_impl(&self, req: CreateScoreRequest) -> Result<Score> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(req.student_id),
            course_id: Set(req.course_id),
            semester: Set(req.semester),
            score: Set(req.score),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await?;

        self.label_one(result).await
    }

    /// 通过 ID 获取成绩
    pub async fn get_score_by_id_impl(&self, score_id: i64) -> Result<Option<Score>> {
        let result = Scores::find_by_id(score_id)
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询成绩失败: {e}")))?;

        match result {
            Some(model) => self.label_one(model).await.map(Some),
            None => Ok(None),
        }
    }

    /// 查找同一学生、课程、学期的成绩
    pub async fn find_score_impl(
        &self,
        student_id: i64,
        course_id: i64,
        semester: &str,
    ) -> Result<Option<Score>> {
        let result = Scores::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::Semester.eq(semester))
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询成绩失败: {e}")))?;

        match result {
            Some(model) => self.label_one(model).await.map(Some),
            None => Ok(None),
        }
    }

    /// 分页列出成绩
    ///
    /// 学号和课程编号为模糊匹配，学期为精确匹配。
    pub async fn list_scores_with_pagination_impl(
        &self,
        query: ScoreListQuery,
    ) -> Result<ScoreListResponse> {
        let (page, size) = PaginationQuery::normalized(query.page, query.size);

        let mut select = Scores::find()
            .join(JoinType::InnerJoin, Relation::Student.def())
            .join(JoinType::InnerJoin, Relation::Course.def());

        if let Some(ref student_no) = query.student_no
            && !student_no.trim().is_empty()
        {
            select = select
                .filter(students::Column::StudentNo.like(contains_pattern(student_no.trim())));
        }

        if let Some(ref course_code) = query.course_code
            && !course_code.trim().is_empty()
        {
            select =
                select.filter(courses::Column::CourseCode.like(contains_pattern(course_code.trim())));
        }

        if let Some(ref semester) = query.semester
            && !semester.trim().is_empty()
        {
            select = select.filter(Column::Semester.eq(semester.trim()));
        }

        select = select.order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询成绩总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询成绩页数失败: {e}")))?;

        let scores = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询成绩列表失败: {e}")))?;

        let labels = self.labels_for(&scores).await?;

        Ok(ScoreListResponse {
            items: scores.into_iter().map(|m| labels.apply(m)).collect(),
            pagination: PaginationInfo::from_counts(page, size, total, pages),
        })
    }

    /// 更新成绩
    pub async fn update_score_impl(
        &self,
        score_id: i64,
        update: UpdateScoreRequest,
    ) -> Result<Option<Score>> {
        let existing = Scores::find_by_id(score_id)
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询成绩失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(score_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(student_id) = update.student_id {
            model.student_id = Set(student_id);
        }

        if let Some(course_id) = update.course_id {
            model.course_id = Set(course_id);
        }

        if let Some(semester) = update.semester {
            model.semester = Set(semester);
        }

        if let Some(score) = update.score {
            model.score = Set(score);
        }

        let result = model.update(&self.db).await?;

        self.label_one(result).await.map(Some)
    }

    /// 删除成绩
    pub async fn delete_score_impl(&self, score_id: i64) -> Result<bool> {
        let result = Scores::delete_by_id(score_id)
            .exec(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("删除成绩失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    async fn label_one(&self, model: Model) -> Result<Score> {
        let labels = self.labels_for(std::slice::from_ref(&model)).await?;
        Ok(labels.apply(model))
    }

    /// 批量读取一页成绩涉及的学生和课程
    async fn labels_for(&self, scores: &[Model]) -> Result<ScoreLabels> {
        if scores.is_empty() {
            return Ok(ScoreLabels::default());
        }

        let student_ids: Vec<i64> = scores.iter().map(|s| s.student_id).collect();
        let course_ids: Vec<i64> = scores.iter().map(|s| s.course_id).collect();

        let student_rows: Vec<(i64, String, String)> = students::Entity::find()
            .select_only()
            .column(students::Column::Id)
            .column(students::Column::StudentNo)
            .column(students::Column::Name)
            .filter(students::Column::Id.is_in(student_ids))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询学生信息失败: {e}")))?;

        let course_rows: Vec<(i64, String, String)> = courses::Entity::find()
            .select_only()
            .column(courses::Column::Id)
            .column(courses::Column::CourseCode)
            .column(courses::Column::Name)
            .filter(courses::Column::Id.is_in(course_ids))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询课程信息失败: {e}")))?;

        Ok(ScoreLabels {
            students: student_rows
                .into_iter()
                .map(|(id, no, name)| (id, (no, name)))
                .collect(),
            courses: course_rows
                .into_iter()
                .map(|(id, code, name)| (id, (code, name)))
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::SeaOrmStorage;
    use super::super::test_support::memory_storage;
    use crate::models::classes::requests::CreateClassRequest;
    use crate::models::courses::requests::CreateCourseRequest;
    use crate::models::scores::requests::{CreateScoreRequest, ScoreListQuery};
    use crate::models::students::entities::Gender;
    use crate::models::students::requests::CreateStudentRequest;

    async fn seed(storage: &SeaOrmStorage) -> (i64, i64) {
        let class_id = storage
            .create_class_impl(CreateClassRequest {
                class_code: "C1".to_string(),
                name: "一班".to_string(),
                teacher: "王老师".to_string(),
            })
            .await
            .unwrap()
            .id;
        let student_id = storage
            .create_student_impl(CreateStudentRequest {
                student_no: "2024001".to_string(),
                name: "张三".to_string(),
                gender: Gender::Male,
                age: 19,
                class_id,
                phone: "13800000000".to_string(),
            })
            .await
            .unwrap()
            .id;
        let course_id = storage
            .create_course_impl(CreateCourseRequest {
                course_code: "MATH101".to_string(),
                name: "高等数学".to_string(),
                teacher: "李老师".to_string(),
                credit: 4.0,
                hours: 64,
                description: Some("必修".to_string()),
            })
            .await
            .unwrap()
            .id;
        (student_id, course_id)
    }

    #[tokio::test]
    async fn test_score_carries_labels() {
        let storage = memory_storage().await;
        let (student_id, course_id) = seed(&storage).await;

        let score = storage
            .create_score_impl(CreateScoreRequest {
                student_id,
                course_id,
                semester: "2024-1".to_string(),
                score: 88.5,
            })
            .await
            .unwrap();
        assert_eq!(score.student_no, "2024001");
        assert_eq!(score.student_name, "张三");
        assert_eq!(score.course_code, "MATH101");
        assert_eq!(score.course_name, "高等数学");
    }

    #[tokio::test]
    async fn test_duplicate_triple_is_conflict() {
        let storage = memory_storage().await;
        let (student_id, course_id) = seed(&storage).await;
        let request = CreateScoreRequest {
            student_id,
            course_id,
            semester: "2024-1".to_string(),
            score: 70.0,
        };

        storage.create_score_impl(request.clone()).await.unwrap();
        let err = storage.create_score_impl(request).await.unwrap_err();
        assert_eq!(err.code(), "E006");

        // 换一个学期则允许
        storage
            .create_score_impl(CreateScoreRequest {
                student_id,
                course_id,
                semester: "2024-2".to_string(),
                score: 75.0,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_list_filters_by_joined_columns() {
        let storage = memory_storage().await;
        let (student_id, course_id) = seed(&storage).await;
        for semester in ["2024-1", "2024-2"] {
            storage
                .create_score_impl(CreateScoreRequest {
                    student_id,
                    course_id,
                    semester: semester.to_string(),
                    score: 60.0,
                })
                .await
                .unwrap();
        }

        let by_code = storage
            .list_scores_with_pagination_impl(ScoreListQuery {
                course_code: Some("MATH".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_code.pagination.total, 2);

        let by_semester = storage
            .list_scores_with_pagination_impl(ScoreListQuery {
                semester: Some("2024-2".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_semester.pagination.total, 1);

        let none = storage
            .list_scores_with_pagination_impl(ScoreListQuery {
                student_no: Some("999".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(none.pagination.total, 0);
        assert!(none.items.is_empty());
    }
}
