use crate::{
    error::ApiError,
    models::RecommendationRequest,
    services::LiveRecommendationService,
};
use actix_web::{
    web::{self, Json},
    HttpResponse,
};

pub fn recommendations_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/recommend-books").route(web::post().to(recommend_books)));
}

/// Recommend books based on titles the reader already enjoyed
pub async fn recommend_books(
    request: Json<RecommendationRequest>,
    recommendation_service: web::Data<LiveRecommendationService>,
) -> Result<HttpResponse, ApiError> {
    let response = recommendation_service.recommend(&request.books).await?;

    Ok(HttpResponse::Ok().json(response))
}
