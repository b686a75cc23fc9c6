use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseService;
use crate::models::common::response::storage_error_response;
use crate::models::courses::requests::CreateCourseRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::{validate_credit, validate_hours, validate_required};

pub async fn create_course(
    service: &CourseService,
    request: &HttpRequest,
    course_data: CreateCourseRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    for (field, value) in [
        ("course_code", &course_data.course_code),
        ("name", &course_data.name),
        ("teacher", &course_data.teacher),
    ] {
        if let Err(msg) = validate_required(field, value) {
            return Ok(invalid_field(msg));
        }
    }
    if let Err(msg) = validate_credit(course_data.credit) {
        return Ok(invalid_field(msg));
    }
    if let Err(msg) = validate_hours(course_data.hours) {
        return Ok(invalid_field(msg));
    }

    match storage.create_course(course_data).await {
        Ok(course) => {
            info!("Course {} created successfully", course.course_code);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(course, "Course created successfully")))
        }
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::CourseAlreadyExists,
            ErrorCode::CourseCreationFailed,
        )),
    }
}

pub(crate) fn invalid_field(msg: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::CourseFieldInvalid,
        msg,
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::courses::requests::CourseListQuery;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support::memory_storage;
    use actix_web::{http::StatusCode, test::TestRequest, web};

    fn course(code: &str, credit: f64, hours: i32) -> CreateCourseRequest {
        CreateCourseRequest {
            course_code: code.to_string(),
            name: "高等数学".to_string(),
            teacher: "李老师".to_string(),
            credit,
            hours,
            description: None,
        }
    }

    #[tokio::test]
    async fn test_non_positive_credit_or_hours_is_not_persisted() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        let req = TestRequest::default()
            .app_data(web::Data::new(storage.clone()))
            .to_http_request();
        let service = CourseService::new_lazy();

        for data in [
            course("M1", 0.0, 64),
            course("M2", -2.0, 64),
            course("M3", 4.0, 0),
        ] {
            let resp = create_course(&service, &req, data).await.unwrap();
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        }

        let listed = storage
            .list_courses_with_pagination(CourseListQuery::default())
            .await
            .unwrap();
        assert_eq!(listed.pagination.total, 0);

        let resp = create_course(&service, &req, course("M4", 0.5, 16))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
    }
}
