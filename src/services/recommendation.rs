use tracing::debug;

use crate::error::{ApiError, Result};
use crate::models::RecommendationResponse;
use crate::parser;
use crate::services::completion::{ChatMessage, CompletionApi, CompletionRequest};

/// Upper bound on the inbound title list.
pub const MAX_INPUT_BOOKS: usize = 10;
/// Upper bound on the outbound recommendation list.
pub const MAX_RECOMMENDATIONS: usize = 5;

const MAX_OUTPUT_TOKENS: u32 = 1000;
const TEMPERATURE: f32 = 0.7;

const SYSTEM_PROMPT: &str =
    "You are a well-read librarian who recommends books based on what a reader already enjoyed.";

/// Turns a list of liked books into a bounded list of recommendations by
/// prompting the completion service and parsing whatever comes back.
pub struct RecommendationService<C> {
    completion: C,
}

impl<C: CompletionApi> RecommendationService<C> {
    pub fn new(completion: C) -> Self {
        Self { completion }
    }

    pub async fn recommend(&self, books: &[String]) -> Result<RecommendationResponse> {
        if books.is_empty() {
            return Err(ApiError::InvalidInput(
                "At least one book title is required".to_string(),
            ));
        }
        if books.len() > MAX_INPUT_BOOKS {
            return Err(ApiError::InvalidInput(format!(
                "No more than {} book titles are allowed",
                MAX_INPUT_BOOKS
            )));
        }

        let request = CompletionRequest {
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(build_prompt(books)),
            ],
            max_tokens: MAX_OUTPUT_TOKENS,
            temperature: TEMPERATURE,
            json_response: true,
        };

        let raw = self.completion.complete(request).await?;
        debug!("completion returned {} bytes", raw.len());

        let mut recommendations = parser::parse_recommendations(&raw);
        recommendations.truncate(MAX_RECOMMENDATIONS);

        Ok(RecommendationResponse {
            input_books: books.to_vec(),
            recommendations,
        })
    }
}

fn build_prompt(books: &[String]) -> String {
    format!(
        "A reader enjoyed the following books: {}. Recommend exactly {} other books \
         they might like. Respond with a JSON object of the shape \
         {{\"recommendations\": [{{\"title\": \"...\", \"author\": \"...\", \
         \"reason\": \"...\", \"genre\": \"...\"}}]}} and nothing else.",
        books.join(", "),
        MAX_RECOMMENDATIONS
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct StubCompletion {
        response: &'static str,
    }

    #[async_trait]
    impl CompletionApi for StubCompletion {
        async fn complete(&self, _request: CompletionRequest) -> Result<String> {
            Ok(self.response.to_string())
        }
    }

    struct FailingCompletion;

    #[async_trait]
    impl CompletionApi for FailingCompletion {
        async fn complete(&self, _request: CompletionRequest) -> Result<String> {
            Err(ApiError::ExternalServiceError("boom".to_string()))
        }
    }

    fn titles(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("Book {}", i)).collect()
    }

    #[tokio::test]
    async fn empty_book_list_is_rejected() {
        let service = RecommendationService::new(StubCompletion { response: "" });

        let err = service.recommend(&[]).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn more_than_ten_books_are_rejected() {
        let service = RecommendationService::new(StubCompletion { response: "" });

        let err = service.recommend(&titles(11)).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn recommendations_are_truncated_to_five_in_order() {
        let response = r#"{"recommendations": [
            {"title": "One"}, {"title": "Two"}, {"title": "Three"},
            {"title": "Four"}, {"title": "Five"}, {"title": "Six"}, {"title": "Seven"}
        ]}"#;
        let service = RecommendationService::new(StubCompletion { response });

        let result = service.recommend(&titles(3)).await.unwrap();
        let got: Vec<&str> = result
            .recommendations
            .iter()
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(got, vec!["One", "Two", "Three", "Four", "Five"]);
    }

    #[tokio::test]
    async fn input_books_are_echoed_unmodified() {
        let books = vec!["  Dune ".to_string(), "Foundation".to_string()];
        let service = RecommendationService::new(StubCompletion {
            response: r#"{"recommendations": []}"#,
        });

        let result = service.recommend(&books).await.unwrap();
        assert_eq!(result.input_books, books);
        assert!(result.recommendations.is_empty());
    }

    #[tokio::test]
    async fn free_text_responses_are_parsed_heuristically() {
        let service = RecommendationService::new(StubCompletion {
            response: "1. Dune\nAuthor: Frank Herbert",
        });

        let result = service.recommend(&titles(1)).await.unwrap();
        assert_eq!(result.recommendations.len(), 1);
        assert_eq!(result.recommendations[0].title, "Dune");
        assert_eq!(result.recommendations[0].author, "Frank Herbert");
    }

    #[tokio::test]
    async fn external_failures_are_propagated() {
        let service = RecommendationService::new(FailingCompletion);

        let err = service.recommend(&titles(1)).await.unwrap_err();
        assert!(matches!(err, ApiError::ExternalServiceError(_)));
    }
}
