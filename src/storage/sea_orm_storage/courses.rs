//! 课程存储操作

use super::SeaOrmStorage;
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::errors::{RecordsError, Result};
use crate::models::{
    PaginationInfo, PaginationQuery,
    courses::{
        entities::Course,
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::CourseListResponse,
    },
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_code: Set(req.course_code),
            name: Set(req.name),
            teacher: Set(req.teacher),
            credit: Set(req.credit),
            hours: Set(req.hours),
            description: Set(req.description),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await?;

        Ok(result.into_course())
    }

    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, course_id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 通过课程编号获取课程
    pub async fn get_course_by_code_impl(&self, course_code: &str) -> Result<Option<Course>> {
        let result = Courses::find()
            .filter(Column::CourseCode.eq(course_code))
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 分页列出课程
    pub async fn list_courses_with_pagination_impl(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        let (page, size) = PaginationQuery::normalized(query.page, query.size);

        let mut select = Courses::find();

        if let Some(ref name) = query.name
            && !name.trim().is_empty()
        {
            select = select.filter(Column::Name.like(contains_pattern(name.trim())));
        }

        if let Some(ref course_code) = query.course_code
            && !course_code.trim().is_empty()
        {
            select = select.filter(Column::CourseCode.like(contains_pattern(course_code.trim())));
        }

        select = select.order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询课程总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询课程页数失败: {e}")))?;

        let courses = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| RecordsError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(CourseListResponse {
            items: courses.into_iter().map(|m| m.into_course()).collect(),
            pagination: PaginationInfo::from_counts(page, size, total, pages),
        })
    }

    /// 更新课程信息
    pub async fn update_course_impl(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        let existing = self.get_course_by_id_impl(course_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(course_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(course_code) = update.course_code {
            model.course_code = Set(course_code);
        }

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(teacher) = update.teacher {
            model.teacher = Set(teacher);
        }

        if let Some(credit) = update.credit {
            model.credit = Set(credit);
        }

        if let Some(hours) = update.hours {
            model.hours = Set(hours);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        model.update(&self.db).await?;

        self.get_course_by_id_impl(course_id).await
    }

    /// 删除课程，成绩由外键级联删除
    pub async fn delete_course_impl(&self, course_id: i64) -> Result<bool> {
        let result = Courses::delete_by_id(course_id)
            .exec(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("删除课程失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
