use std::sync::Arc;

use crate::models::{
    classes::{
        entities::Class,
        requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
        responses::ClassListResponse,
    },
    courses::{
        entities::Course,
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::CourseListResponse,
    },
    scores::{
        entities::Score,
        requests::{CreateScoreRequest, ScoreListQuery, UpdateScoreRequest},
        responses::ScoreListResponse,
    },
    stats::DashboardStats,
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
        responses::StudentListResponse,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（密码已由服务层哈希）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 用户名、邮箱、手机号三者同时匹配的用户，用于找回密码
    async fn find_user_for_password_reset(
        &self,
        username: &str,
        email: &str,
        phone: &str,
    ) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 班级管理方法
    // 创建班级
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class>;
    // 通过ID获取班级信息
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>>;
    // 通过班级编号获取班级信息
    async fn get_class_by_code(&self, class_code: &str) -> Result<Option<Class>>;
    // 列出班级
    async fn list_classes_with_pagination(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse>;
    // 更新班级信息
    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>>;
    // 删除班级，级联删除学生及其成绩
    async fn delete_class(&self, class_id: i64) -> Result<bool>;
    // 重新统计所有班级人数
    async fn recount_all_classes(&self) -> Result<usize>;

    /// 学生管理方法，写操作会在同一事务内维护班级人数
    // 创建学生
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student>;
    // 通过ID获取学生信息
    async fn get_student_by_id(&self, student_id: i64) -> Result<Option<Student>>;
    // 通过学号获取学生信息
    async fn get_student_by_no(&self, student_no: &str) -> Result<Option<Student>>;
    // 列出学生
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;
    // 更新学生信息，包括调班
    async fn update_student(
        &self,
        student_id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>>;
    // 删除学生，级联删除成绩
    async fn delete_student(&self, student_id: i64) -> Result<bool>;

    /// 课程管理方法
    // 创建课程
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course>;
    // 通过ID获取课程信息
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    // 通过课程编号获取课程信息
    async fn get_course_by_code(&self, course_code: &str) -> Result<Option<Course>>;
    // 列出课程
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse>;
    // 更新课程信息
    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>>;
    // 删除课程，级联删除成绩
    async fn delete_course(&self, course_id: i64) -> Result<bool>;

    /// 成绩管理方法
    // 录入成绩
    async fn create_score(&self, score: CreateScoreRequest) -> Result<Score>;
    // 通过ID获取成绩
    async fn get_score_by_id(&self, score_id: i64) -> Result<Option<Score>>;
    // 查找同一学生、课程、学期的成绩
    async fn find_score(
        &self,
        student_id: i64,
        course_id: i64,
        semester: &str,
    ) -> Result<Option<Score>>;
    // 列出成绩
    async fn list_scores_with_pagination(
        &self,
        query: ScoreListQuery,
    ) -> Result<ScoreListResponse>;
    // 更新成绩
    async fn update_score(
        &self,
        score_id: i64,
        update: UpdateScoreRequest,
    ) -> Result<Option<Score>>;
    // 删除成绩
    async fn delete_score(&self, score_id: i64) -> Result<bool>;

    /// 统计方法
    // 仪表盘统计
    async fn dashboard_stats(&self) -> Result<DashboardStats>;
    // 数据库连通性检查
    async fn ping(&self) -> Result<()>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
