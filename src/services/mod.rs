pub mod auth;
pub mod classes;
pub mod courses;
pub mod scores;
pub mod stats;
pub mod students;
pub mod system;
pub mod users;

pub use auth::AuthService;
pub use classes::ClassService;
pub use courses::CourseService;
pub use scores::ScoreService;
pub use stats::StatsService;
pub use students::StudentService;
pub use system::SystemService;
pub use users::UserService;

use actix_web::{HttpRequest, Result as ActixResult, error::ErrorInternalServerError, web};
use std::sync::Arc;

use crate::storage::Storage;

/// 优先使用服务自带的存储，否则从 app_data 中获取
pub(crate) fn storage_from(
    storage: &Option<Arc<dyn Storage>>,
    request: &HttpRequest,
) -> ActixResult<Arc<dyn Storage>> {
    if let Some(storage) = storage {
        return Ok(storage.clone());
    }
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| ErrorInternalServerError("Storage not found in app data"))
}
