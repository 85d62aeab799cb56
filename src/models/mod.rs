use serde::{Deserialize, Serialize};

/// One suggested book as produced by the response parser.
///
/// Only `title` is ever guaranteed to be non-empty; the other fields default
/// to empty strings when the model response did not carry them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecommendation {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub genre: String,
}

/// Request structure for book recommendations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationRequest {
    /// Titles the reader already enjoyed, 1 to 10 entries
    pub books: Vec<String>,
}

/// Response structure for book recommendations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    /// The validated input list, echoed back unmodified
    pub input_books: Vec<String>,
    /// At most five recommended books
    pub recommendations: Vec<BookRecommendation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_serializes_with_camel_case_keys() {
        let response = RecommendationResponse {
            input_books: vec!["Dune".to_string()],
            recommendations: vec![BookRecommendation {
                title: "Foundation".to_string(),
                ..Default::default()
            }],
        };

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("inputBooks").is_some());
        assert_eq!(json["recommendations"][0]["title"], "Foundation");
    }

    #[test]
    fn recommendation_fields_default_to_empty() {
        let record: BookRecommendation = serde_json::from_str(r#"{"title": "Dune"}"#).unwrap();
        assert_eq!(record.title, "Dune");
        assert_eq!(record.author, "");
        assert_eq!(record.reason, "");
        assert_eq!(record.genre, "");
    }
}
