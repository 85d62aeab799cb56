pub mod completion;
pub mod recommendation;
pub mod suggestion;

// Re-export public types
pub use completion::{CompletionApi, CompletionClient};
pub use recommendation::RecommendationService;
pub use suggestion::SuggestionService;

/// Concrete service types wired to the live completion client.
pub type LiveRecommendationService = RecommendationService<CompletionClient>;
pub type LiveSuggestionService = SuggestionService<CompletionClient>;
