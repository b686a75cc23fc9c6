use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::scores::requests::{CreateScoreRequest, ScoreQueryParams, UpdateScoreRequest};
use crate::models::users::entities::UserRole;
use crate::services::ScoreService;
use crate::utils::SafeIDI64;

static SCORE_SERVICE: Lazy<ScoreService> = Lazy::new(ScoreService::new_lazy);

pub async fn list_scores(
    req: HttpRequest,
    query: web::Query<ScoreQueryParams>,
) -> ActixResult<HttpResponse> {
    SCORE_SERVICE.list_scores(&req, query.into_inner()).await
}

pub async fn create_score(
    req: HttpRequest,
    score_data: web::Json<CreateScoreRequest>,
) -> ActixResult<HttpResponse> {
    SCORE_SERVICE
        .create_score(&req, score_data.into_inner())
        .await
}

pub async fn get_score(req: HttpRequest, score_id: SafeIDI64) -> ActixResult<HttpResponse> {
    SCORE_SERVICE.get_score(&req, score_id.0).await
}

pub async fn update_score(
    req: HttpRequest,
    score_id: SafeIDI64,
    update_data: web::Json<UpdateScoreRequest>,
) -> ActixResult<HttpResponse> {
    SCORE_SERVICE
        .update_score(&req, score_id.0, update_data.into_inner())
        .await
}

pub async fn delete_score(req: HttpRequest, score_id: SafeIDI64) -> ActixResult<HttpResponse> {
    SCORE_SERVICE.delete_score(&req, score_id.0).await
}

// 配置路由
pub fn configure_scores_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/scores")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("").route(web::get().to(list_scores)).route(
                    web::post()
                        .to(create_score)
                        .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_score))
                    .route(
                        web::put()
                            .to(update_score)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_score)
                            .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                    ),
            ),
    );
}
