pub mod auth;

pub mod users;

pub mod classes;

pub mod students;

pub mod courses;

pub mod scores;

pub mod stats;

pub mod system;

pub use auth::configure_auth_routes;
pub use classes::configure_classes_routes;
pub use courses::configure_courses_routes;
pub use scores::configure_scores_routes;
pub use stats::configure_stats_routes;
pub use students::configure_students_routes;
pub use system::configure_system_routes;
pub use users::configure_user_routes;

use actix_web::web;

/// 注册全部 API 路由
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_auth_routes)
        .configure(configure_user_routes)
        .configure(configure_classes_routes)
        .configure(configure_students_routes)
        .configure(configure_courses_routes)
        .configure(configure_scores_routes)
        .configure(configure_stats_routes)
        .configure(configure_system_routes);
}
