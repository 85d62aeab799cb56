use crate::error::Result;
use crate::services::completion::{ChatMessage, CompletionApi, CompletionRequest};

/// Upper bound on the outbound suggestion list.
pub const MAX_SUGGESTIONS: usize = 8;

/// Queries shorter than this never reach the completion service.
const MIN_QUERY_CHARS: usize = 2;

const MAX_OUTPUT_TOKENS: u32 = 200;
const TEMPERATURE: f32 = 0.5;

/// Completes a partial title query into a bounded list of real book titles.
pub struct SuggestionService<C> {
    completion: C,
}

impl<C: CompletionApi> SuggestionService<C> {
    pub fn new(completion: C) -> Self {
        Self { completion }
    }

    pub async fn suggest(&self, query: &str) -> Result<Vec<String>> {
        if query.chars().count() < MIN_QUERY_CHARS {
            return Ok(Vec::new());
        }

        let request = CompletionRequest {
            messages: vec![ChatMessage::user(build_prompt(query))],
            max_tokens: MAX_OUTPUT_TOKENS,
            temperature: TEMPERATURE,
            json_response: false,
        };

        let raw = self.completion.complete(request).await?;

        Ok(raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .take(MAX_SUGGESTIONS)
            .collect())
    }
}

fn build_prompt(query: &str) -> String {
    format!(
        "List {} real book titles matching the partial search \"{}\". \
         Answer with one title per line, no numbering and no commentary.",
        MAX_SUGGESTIONS, query
    )
}
