pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::scores::requests::{CreateScoreRequest, ScoreQueryParams, UpdateScoreRequest};
use crate::storage::Storage;

pub struct ScoreService {
    storage: Option<Arc<dyn Storage>>,
}

impl ScoreService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        super::storage_from(&self.storage, request)
    }

    pub async fn list_scores(
        &self,
        request: &HttpRequest,
        query: ScoreQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_scores(self, request, query).await
    }

    // 录入成绩
    pub async fn create_score(
        &self,
        request: &HttpRequest,
        score_data: CreateScoreRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_score(self, request, score_data).await
    }

    pub async fn get_score(&self, request: &HttpRequest, score_id: i64) -> ActixResult<HttpResponse> {
        get::get_score(self, request, score_id).await
    }

    pub async fn update_score(
        &self,
        request: &HttpRequest,
        score_id: i64,
        update_data: UpdateScoreRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_score(self, request, score_id, update_data).await
    }

    pub async fn delete_score(
        &self,
        request: &HttpRequest,
        score_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_score(self, request, score_id).await
    }
}
