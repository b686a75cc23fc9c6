//! 学生存储操作
//!
//! 每次写入都在一个事务中完成：先写学生行，再调用 roster 重算受影响班级的人数。
//! 事务期间只能使用事务句柄，不能再访问 `self.db`。

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::classes::{self, Entity as Classes};
use crate::entity::students::{ActiveModel, Column, Entity as Students, Model};
use crate::errors::{RecordsError, Result};
use crate::models::{
    PaginationInfo, PaginationQuery,
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
        responses::StudentListResponse,
    },
};
use crate::roster;
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use tracing::debug;

impl SeaOrmStorage {
    /// 创建学生并重算所在班级人数
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_no: Set(req.student_no),
            name: Set(req.name),
            gender: Set(req.gender.to_string()),
            age: Set(req.age),
            class_id: Set(req.class_id),
            phone: Set(req.phone),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let txn = self.db.begin().await?;
        let saved = model.insert(&txn).await?;
        let change = roster::on_student_saved(&txn, None, &saved, true).await?;
        txn.commit().await?;

        debug!("学生 {} 已创建: {:?}", saved.id, change);
        self.with_class_name(saved).await
    }

    /// 通过 ID 获取学生
    pub async fn get_student_by_id_impl(&self, student_id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(student_id)
            .find_also_related(Classes)
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询学生失败: {e}")))?;

        result
            .map(|(student, class)| student.into_student(class.map(|c| c.name)))
            .transpose()
    }

    /// 通过学号获取学生
    pub async fn get_student_by_no_impl(&self, student_no: &str) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::StudentNo.eq(student_no))
            .find_also_related(Classes)
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询学生失败: {e}")))?;

        result
            .map(|(student, class)| student.into_student(class.map(|c| c.name)))
            .transpose()
    }

    /// 分页列出学生
    pub async fn list_students_with_pagination_impl(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        let (page, size) = PaginationQuery::normalized(query.page, query.size);

        let mut select = Students::find();

        if let Some(ref name) = query.name
            && !name.trim().is_empty()
        {
            select = select.filter(Column::Name.like(contains_pattern(name.trim())));
        }

        if let Some(ref student_no) = query.student_no
            && !student_no.trim().is_empty()
        {
            select = select.filter(Column::StudentNo.like(contains_pattern(student_no.trim())));
        }

        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }

        select = select.order_by_asc(Column::Id);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询学生总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询学生页数失败: {e}")))?;

        let students = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询学生列表失败: {e}")))?;

        let class_names = self
            .class_names(students.iter().map(|s| s.class_id).collect())
            .await?;

        let items = students
            .into_iter()
            .map(|s| {
                let class_name = class_names.get(&s.class_id).cloned();
                s.into_student(class_name)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(StudentListResponse {
            items,
            pagination: PaginationInfo::from_counts(page, size, total, pages),
        })
    }

    /// 更新学生信息
    ///
    /// 旧的班级引用在同一事务内从数据库读出，与更新后的值一起交给 roster 判断是否调班。
    pub async fn update_student_impl(
        &self,
        student_id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        let txn = self.db.begin().await?;

        let Some(existing) = Students::find_by_id(student_id).one(&txn).await? else {
            return Ok(None);
        };
        let previous_class_id = Some(existing.class_id);

        let mut model: ActiveModel = existing.into();

        if let Some(student_no) = update.student_no {
            model.student_no = Set(student_no);
        }

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(gender) = update.gender {
            model.gender = Set(gender.to_string());
        }

        if let Some(age) = update.age {
            model.age = Set(age);
        }

        if let Some(class_id) = update.class_id {
            model.class_id = Set(class_id);
        }

        if let Some(phone) = update.phone {
            model.phone = Set(phone);
        }

        model.updated_at = Set(chrono::Utc::now().timestamp());

        let saved = model.update(&txn).await?;
        let change = roster::on_student_saved(&txn, previous_class_id, &saved, false).await?;
        txn.commit().await?;

        debug!("学生 {} 已更新: {:?}", saved.id, change);
        self.with_class_name(saved).await.map(Some)
    }

    /// 删除学生并重算原班级人数，成绩由外键级联删除
    pub async fn delete_student_impl(&self, student_id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;

        let Some(existing) = Students::find_by_id(student_id).one(&txn).await? else {
            return Ok(false);
        };

        let result = Students::delete_by_id(student_id).exec(&txn).await?;
        let change = roster::on_student_deleted(&txn, &existing).await?;
        txn.commit().await?;

        debug!("学生 {} 已删除: {:?}", student_id, change);
        Ok(result.rows_affected > 0)
    }

    async fn with_class_name(&self, student: Model) -> Result<Student> {
        let class_name = Classes::find_by_id(student.class_id)
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询班级失败: {e}")))?
            .map(|c| c.name);

        student.into_student(class_name)
    }

    /// 批量读取班级名称
    async fn class_names(&self, mut class_ids: Vec<i64>) -> Result<HashMap<i64, String>> {
        class_ids.sort_unstable();
        class_ids.dedup();
        if class_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i64, String)> = Classes::find()
            .select_only()
            .column(classes::Column::Id)
            .column(classes::Column::Name)
            .filter(classes::Column::Id.is_in(class_ids))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询班级名称失败: {e}")))?;

        Ok(rows.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::SeaOrmStorage;
    use super::super::test_support::memory_storage;
    use crate::entity::classes::Entity as Classes;
    use crate::entity::students::{Column as StudentColumn, Entity as Students};
    use crate::models::classes::requests::CreateClassRequest;
    use crate::models::courses::requests::CreateCourseRequest;
    use crate::models::scores::requests::CreateScoreRequest;
    use crate::models::students::entities::Gender;
    use crate::models::students::requests::{CreateStudentRequest, UpdateStudentRequest};
    use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

    async fn new_class(storage: &SeaOrmStorage, code: &str) -> i64 {
        storage
            .create_class_impl(CreateClassRequest {
                class_code: code.to_string(),
                name: format!("{code} 班"),
                teacher: "王老师".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    async fn new_student(storage: &SeaOrmStorage, no: &str, class_id: i64) -> i64 {
        storage
            .create_student_impl(CreateStudentRequest {
                student_no: no.to_string(),
                name: format!("学生{no}"),
                gender: Gender::Female,
                age: 18,
                class_id,
                phone: "13800000000".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    async fn stored_count(storage: &SeaOrmStorage, class_id: i64) -> i64 {
        Classes::find_by_id(class_id)
            .one(&storage.db)
            .await
            .unwrap()
            .unwrap()
            .student_count
    }

    async fn assert_counts_consistent(storage: &SeaOrmStorage) {
        for class in Classes::find().all(&storage.db).await.unwrap() {
            let live = Students::find()
                .filter(StudentColumn::ClassId.eq(class.id))
                .count(&storage.db)
                .await
                .unwrap() as i64;
            assert_eq!(class.student_count, live, "班级 {} 人数不一致", class.id);
        }
    }

    fn move_to(class_id: i64) -> UpdateStudentRequest {
        UpdateStudentRequest {
            class_id: Some(class_id),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_roster_lifecycle() {
        let storage = memory_storage().await;
        let c1 = new_class(&storage, "C1").await;
        let c2 = new_class(&storage, "C2").await;
        assert_eq!(stored_count(&storage, c1).await, 0);

        let s1 = new_student(&storage, "S1", c1).await;
        assert_eq!(stored_count(&storage, c1).await, 1);

        let moved = storage
            .update_student_impl(s1, move_to(c2))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(moved.class_name.as_deref(), Some("C2 班"));
        assert_eq!(stored_count(&storage, c1).await, 0);
        assert_eq!(stored_count(&storage, c2).await, 1);

        assert!(storage.delete_student_impl(s1).await.unwrap());
        assert_eq!(stored_count(&storage, c2).await, 0);
        assert_counts_consistent(&storage).await;
    }

    #[tokio::test]
    async fn test_reassignment_touches_only_two_classes() {
        let storage = memory_storage().await;
        let a = new_class(&storage, "A").await;
        let b = new_class(&storage, "B").await;
        let other = new_class(&storage, "O").await;
        let s1 = new_student(&storage, "1", a).await;
        new_student(&storage, "2", a).await;
        new_student(&storage, "3", b).await;
        new_student(&storage, "4", other).await;

        storage.update_student_impl(s1, move_to(b)).await.unwrap();

        assert_eq!(stored_count(&storage, a).await, 1);
        assert_eq!(stored_count(&storage, b).await, 2);
        assert_eq!(stored_count(&storage, other).await, 1);
        assert_counts_consistent(&storage).await;
    }

    #[tokio::test]
    async fn test_update_without_class_change_keeps_count() {
        let storage = memory_storage().await;
        let a = new_class(&storage, "A").await;
        let s1 = new_student(&storage, "1", a).await;

        let updated = storage
            .update_student_impl(
                s1,
                UpdateStudentRequest {
                    name: Some("改名".to_string()),
                    class_id: Some(a),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "改名");
        assert_eq!(stored_count(&storage, a).await, 1);
    }

    #[tokio::test]
    async fn test_move_to_missing_class_rolls_back() {
        let storage = memory_storage().await;
        let a = new_class(&storage, "A").await;
        let s1 = new_student(&storage, "1", a).await;

        let err = storage
            .update_student_impl(s1, move_to(9999))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E004");

        let student = storage.get_student_by_id_impl(s1).await.unwrap().unwrap();
        assert_eq!(student.class_id, a);
        assert_eq!(stored_count(&storage, a).await, 1);
    }

    #[tokio::test]
    async fn test_recount_is_idempotent() {
        let storage = memory_storage().await;
        let a = new_class(&storage, "A").await;
        new_student(&storage, "1", a).await;
        new_student(&storage, "2", a).await;

        let first = crate::roster::recount_class(&storage.db, Some(a))
            .await
            .unwrap();
        let second = crate::roster::recount_class(&storage.db, Some(a))
            .await
            .unwrap();
        assert_eq!(first, Some(2));
        assert_eq!(first, second);
        assert_eq!(stored_count(&storage, a).await, 2);

        assert_eq!(
            crate::roster::recount_class(&storage.db, None)
                .await
                .unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_recount_missing_class_fails() {
        let storage = memory_storage().await;
        let err = crate::roster::recount_class(&storage.db, Some(42))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E007");
    }

    #[tokio::test]
    async fn test_delete_class_cascades_students_and_scores() {
        let storage = memory_storage().await;
        let a = new_class(&storage, "A").await;
        let b = new_class(&storage, "B").await;
        let s1 = new_student(&storage, "1", a).await;
        let s2 = new_student(&storage, "2", a).await;
        let s3 = new_student(&storage, "3", b).await;
        let course = storage
            .create_course_impl(CreateCourseRequest {
                course_code: "MATH".to_string(),
                name: "数学".to_string(),
                teacher: "李老师".to_string(),
                credit: 3.0,
                hours: 48,
                description: None,
            })
            .await
            .unwrap()
            .id;
        for student_id in [s1, s2, s3] {
            storage
                .create_score_impl(CreateScoreRequest {
                    student_id,
                    course_id: course,
                    semester: "2024-1".to_string(),
                    score: 80.0,
                })
                .await
                .unwrap();
        }

        assert!(storage.delete_class_impl(a).await.unwrap());

        assert!(storage.get_student_by_id_impl(s1).await.unwrap().is_none());
        assert!(storage.get_student_by_id_impl(s2).await.unwrap().is_none());
        let scores = crate::entity::scores::Entity::find()
            .all(&storage.db)
            .await
            .unwrap();
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].student_id, s3);
        assert_counts_consistent(&storage).await;
    }

    #[tokio::test]
    async fn test_delete_student_cascades_scores() {
        let storage = memory_storage().await;
        let a = new_class(&storage, "A").await;
        let s1 = new_student(&storage, "1", a).await;
        for (code, semester) in [("M1", "2024-1"), ("M2", "2024-1"), ("M1", "2024-2")] {
            let course_id = match storage.get_course_by_code_impl(code).await.unwrap() {
                Some(course) => course.id,
                None => {
                    storage
                        .create_course_impl(CreateCourseRequest {
                            course_code: code.to_string(),
                            name: code.to_string(),
                            teacher: "李老师".to_string(),
                            credit: 2.0,
                            hours: 32,
                            description: None,
                        })
                        .await
                        .unwrap()
                        .id
                }
            };
            storage
                .create_score_impl(CreateScoreRequest {
                    student_id: s1,
                    course_id,
                    semester: semester.to_string(),
                    score: 90.0,
                })
                .await
                .unwrap();
        }

        assert!(storage.delete_student_impl(s1).await.unwrap());
        let remaining = crate::entity::scores::Entity::find()
            .count(&storage.db)
            .await
            .unwrap();
        assert_eq!(remaining, 0);
        assert_eq!(stored_count(&storage, a).await, 0);
    }

    #[tokio::test]
    async fn test_list_carries_class_name_and_filters() {
        let storage = memory_storage().await;
        let a = new_class(&storage, "A").await;
        let b = new_class(&storage, "B").await;
        new_student(&storage, "2024001", a).await;
        new_student(&storage, "2024002", b).await;

        let result = storage
            .list_students_with_pagination_impl(crate::models::students::requests::StudentListQuery {
                class_id: Some(b),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(result.pagination.total, 1);
        assert_eq!(result.items[0].student_no, "2024002");
        assert_eq!(result.items[0].class_name.as_deref(), Some("B 班"));
    }
}
