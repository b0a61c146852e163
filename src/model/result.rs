use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body returned by `POST /classify`, on success and on failure alike.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassifyResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub original_text: Option<String>,
    /// FastAPI puts a string here for `HTTPException`, a list for validation errors.
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ClassifyResponse {
    pub fn detail_message(&self) -> Option<String> {
        match &self.detail {
            Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }
}

/// Body returned by `GET /`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiStatus {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub category: String,
    pub response: String,
    pub preview: Option<String>,
    pub received_at: DateTime<Utc>,
}

impl ClassificationResult {
    pub fn badge(&self) -> CategoryBadge {
        CategoryBadge::new(&self.category)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBadge {
    pub label: String,
    pub variant: String,
}

impl CategoryBadge {
    pub fn new(category: &str) -> Self {
        Self {
            label: category.to_string(),
            variant: format!("category-{}", category.to_lowercase()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badge_variant_is_lowercased_category() {
        let badge = CategoryBadge::new("Produtivo");
        assert_eq!(badge.label, "Produtivo");
        assert_eq!(badge.variant, "category-produtivo");
    }

    #[test]
    fn decodes_success_body() {
        let body: ClassifyResponse = serde_json::from_str(
            r#"{"success":true,"category":"Improdutivo","response":"Obrigado!","original_text":"Feliz natal"}"#,
        )
        .unwrap();
        assert!(body.success);
        assert_eq!(body.category.as_deref(), Some("Improdutivo"));
        assert_eq!(body.original_text.as_deref(), Some("Feliz natal"));
        assert_eq!(body.detail_message(), None);
    }

    #[test]
    fn only_string_detail_is_used() {
        let with_string: ClassifyResponse =
            serde_json::from_str(r#"{"detail":"Formato não suportado"}"#).unwrap();
        assert_eq!(
            with_string.detail_message().as_deref(),
            Some("Formato não suportado")
        );

        let with_list: ClassifyResponse =
            serde_json::from_str(r#"{"detail":[{"loc":["body","file"],"msg":"bad"}]}"#).unwrap();
        assert_eq!(with_list.detail_message(), None);

        let empty: ClassifyResponse = serde_json::from_str(r#"{"detail":""}"#).unwrap();
        assert_eq!(empty.detail_message(), None);
    }

    #[test]
    fn missing_success_means_failure() {
        let body: ClassifyResponse = serde_json::from_str("{}").unwrap();
        assert!(!body.success);
    }
}
