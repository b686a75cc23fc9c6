use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ScoreService;
use crate::models::common::response::storage_error_response;
use crate::models::scores::requests::CreateScoreRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::validate::{validate_required, validate_score};

pub async fn create_score(
    service: &ScoreService,
    request: &HttpRequest,
    score_data: CreateScoreRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if let Err(msg) = validate_required("semester", &score_data.semester) {
        return Ok(invalid_field(msg));
    }
    if let Err(msg) = validate_score(score_data.score) {
        return Ok(out_of_range(msg));
    }

    // 学生与课程必须存在
    if let Err(response) = ensure_references(
        &storage,
        Some(score_data.student_id),
        Some(score_data.course_id),
    )
    .await
    {
        return Ok(response);
    }

    match storage.create_score(score_data).await {
        Ok(score) => {
            info!(
                "Score recorded for student {} in course {} ({})",
                score.student_no, score.course_code, score.semester
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(score, "Score created successfully")))
        }
        Err(e) => {
            error!("Score creation failed: {}", e);
            Ok(storage_error_response(
                &e,
                ErrorCode::ScoreAlreadyExists,
                ErrorCode::ScoreCreationFailed,
            ))
        }
    }
}

pub(crate) fn invalid_field(msg: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::ScoreFieldInvalid, msg))
}

pub(crate) fn out_of_range(msg: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::ScoreOutOfRange, msg))
}

pub(crate) async fn ensure_references(
    storage: &Arc<dyn Storage>,
    student_id: Option<i64>,
    course_id: Option<i64>,
) -> Result<(), HttpResponse> {
    if let Some(student_id) = student_id {
        match storage.get_student_by_id(student_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Err(invalid_field(format!("Student {student_id} does not exist")));
            }
            Err(e) => return Err(lookup_failed(e)),
        }
    }

    if let Some(course_id) = course_id {
        match storage.get_course_by_id(course_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Err(invalid_field(format!("Course {course_id} does not exist")));
            }
            Err(e) => return Err(lookup_failed(e)),
        }
    }

    Ok(())
}

fn lookup_failed(e: crate::errors::RecordsError) -> HttpResponse {
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        format!("Failed to check score references: {e}"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::classes::requests::CreateClassRequest;
    use crate::models::courses::requests::CreateCourseRequest;
    use crate::models::scores::requests::ScoreListQuery;
    use crate::models::students::{entities::Gender, requests::CreateStudentRequest};
    use crate::storage::sea_orm_storage::test_support::memory_storage;
    use actix_web::{http::StatusCode, test::TestRequest, web};

    async fn seeded_storage() -> (Arc<dyn Storage>, i64, i64) {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        let class = storage
            .create_class(CreateClassRequest {
                class_code: "C1".to_string(),
                name: "一班".to_string(),
                teacher: "王老师".to_string(),
            })
            .await
            .unwrap();
        let student = storage
            .create_student(CreateStudentRequest {
                student_no: "S1".to_string(),
                name: "学生1".to_string(),
                gender: Gender::Male,
                age: 18,
                class_id: class.id,
                phone: "13800000000".to_string(),
            })
            .await
            .unwrap();
        let course = storage
            .create_course(CreateCourseRequest {
                course_code: "MATH".to_string(),
                name: "高等数学".to_string(),
                teacher: "李老师".to_string(),
                credit: 4.0,
                hours: 64,
                description: None,
            })
            .await
            .unwrap();
        (storage, student.id, course.id)
    }

    #[tokio::test]
    async fn test_out_of_range_score_is_not_persisted() {
        let (storage, student_id, course_id) = seeded_storage().await;
        let req = TestRequest::default()
            .app_data(web::Data::new(storage.clone()))
            .to_http_request();
        let service = ScoreService::new_lazy();

        for score in [101.0, -1.0, f64::NAN] {
            let resp = create_score(
                &service,
                &req,
                CreateScoreRequest {
                    student_id,
                    course_id,
                    semester: "2024-1".to_string(),
                    score,
                },
            )
            .await
            .unwrap();
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        }

        let listed = storage
            .list_scores_with_pagination(ScoreListQuery::default())
            .await
            .unwrap();
        assert_eq!(listed.pagination.total, 0);

        let resp = create_score(
            &service,
            &req,
            CreateScoreRequest {
                student_id,
                course_id,
                semester: "2024-1".to_string(),
                score: 100.0,
            },
        )
        .await
        .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_unknown_student_is_rejected_before_insert() {
        let (storage, _, course_id) = seeded_storage().await;
        let req = TestRequest::default()
            .app_data(web::Data::new(storage.clone()))
            .to_http_request();

        let resp = create_score(
            &ScoreService::new_lazy(),
            &req,
            CreateScoreRequest {
                student_id: 999,
                course_id,
                semester: "2024-1".to_string(),
                score: 80.0,
            },
        )
        .await
        .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let listed = storage
            .list_scores_with_pagination(ScoreListQuery::default())
            .await
            .unwrap();
        assert!(listed.items.is_empty());
    }
}
