pub mod auth;
pub mod classes;
pub mod common;
pub mod courses;
pub mod scores;
pub mod stats;
pub mod students;
pub mod system;
pub mod users;

pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

/// 程序启动时间，用于健康检查中的运行时长
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
///
/// 0 表示成功；1xxx 通用，2xxx 认证，3xxx 用户，4xxx 班级，
/// 5xxx 学生，6xxx 课程，7xxx 成绩，8xxx 统计。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    AuthFailed = 2000,
    RegisterFailed = 2001,
    PasswordMismatch = 2002,
    ResetPasswordFailed = 2003,

    UserNotFound = 3000,
    UserAlreadyExists = 3001,
    UserNameInvalid = 3002,
    UserEmailInvalid = 3003,
    UserPasswordInvalid = 3004,
    UserPhoneInvalid = 3005,
    UserNameAlreadyExists = 3006,
    UserEmailAlreadyExists = 3007,
    UserCreationFailed = 3008,
    UserUpdateFailed = 3009,
    UserDeleteFailed = 3010,
    CanNotDeleteCurrentUser = 3011,

    ClassNotFound = 4000,
    ClassAlreadyExists = 4001,
    ClassFieldInvalid = 4002,
    ClassCreationFailed = 4003,
    ClassUpdateFailed = 4004,
    ClassDeleteFailed = 4005,

    StudentNotFound = 5000,
    StudentAlreadyExists = 5001,
    StudentFieldInvalid = 5002,
    StudentCreationFailed = 5003,
    StudentUpdateFailed = 5004,
    StudentDeleteFailed = 5005,

    CourseNotFound = 6000,
    CourseAlreadyExists = 6001,
    CourseFieldInvalid = 6002,
    CourseCreationFailed = 6003,
    CourseUpdateFailed = 6004,
    CourseDeleteFailed = 6005,

    ScoreNotFound = 7000,
    ScoreAlreadyExists = 7001,
    ScoreFieldInvalid = 7002,
    ScoreOutOfRange = 7003,
    ScoreCreationFailed = 7004,
    ScoreUpdateFailed = 7005,
    ScoreDeleteFailed = 7006,

    StatsQueryFailed = 8000,
}
