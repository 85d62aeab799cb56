use crate::{error::ApiError, services::LiveSuggestionService};
use actix_web::{web, HttpResponse};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SuggestionParams {
    #[serde(default)]
    q: String,
}

pub fn suggestions_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/book-suggestions").route(web::get().to(book_suggestions)));
}

/// Suggest real book titles completing a partial search string
pub async fn book_suggestions(
    params: web::Query<SuggestionParams>,
    suggestion_service: web::Data<LiveSuggestionService>,
) -> Result<HttpResponse, ApiError> {
    let suggestions = suggestion_service.suggest(&params.q).await?;

    Ok(HttpResponse::Ok().json(suggestions))
}
