//! Data Transfer Objects
//!
//! Wire shapes of the portfolio REST API.
//! Every response is wrapped in an [`Envelope`]; list endpoints put a
//! [`Page`] inside it.

use serde::{Deserialize, Serialize};

use crate::listing::ListQuery;

// ============================================
// ENVELOPE
// ============================================

/// Standard response wrapper: `{status, data, message}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub status: EnvelopeStatus,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// `status` is sent either as a word (`"success"`) or as an HTTP-like code
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum EnvelopeStatus {
    Code(u16),
    Text(String),
}

impl Default for EnvelopeStatus {
    fn default() -> Self {
        EnvelopeStatus::Text("success".to_string())
    }
}

impl EnvelopeStatus {
    /// Whether the envelope reports success
    pub fn is_success(&self) -> bool {
        match self {
            EnvelopeStatus::Code(code) => (200..300).contains(code),
            EnvelopeStatus::Text(text) => matches!(
                text.to_lowercase().as_str(),
                "success" | "ok" | "created"
            ),
        }
    }
}

impl<T> Envelope<T> {
    /// Build a successful envelope (used by test doubles and the site)
    pub fn success(data: T) -> Self {
        Self {
            status: EnvelopeStatus::default(),
            data: Some(data),
            message: None,
        }
    }

    /// Builder: attach a message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

// ============================================
// PAGINATION
// ============================================

/// One server-side page of records
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// An empty page
    pub fn empty() -> Self {
        Self {
            content: Vec::new(),
            total_elements: 0,
            total_pages: 0,
        }
    }

    /// Convert the records while keeping the counts
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}

/// Pagination metadata describing a windowed result set
///
/// Always taken from the server response, never computed from the
/// locally held rows.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Zero-based page index
    pub current_page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_records: u64,
}

impl PaginationMeta {
    /// Combine the request that was sent with the counts the server returned
    pub fn from_page<T>(page: &Page<T>, query: &ListQuery) -> Self {
        Self {
            current_page: query.page,
            page_size: query.size,
            total_pages: page.total_pages,
            total_records: page.total_elements,
        }
    }

    /// Empty metadata for a given page size
    pub fn empty(page_size: u32) -> Self {
        Self {
            page_size,
            ..Default::default()
        }
    }

    pub fn has_next(&self) -> bool {
        self.current_page.saturating_add(1) < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 0
    }
}

// ============================================
// AUTH DTOs
// ============================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Password reset link request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Password reset with the emailed token
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
    pub confirm_password: String,
}

/// The authenticated user as reported by the API
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Profile the user's portfolio records belong to
    #[serde(default)]
    pub profile_id: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Successful login payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthPayload {
    pub token: String,
    pub user: AuthUser,
}

/// Status change request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: crate::model::Status,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_status_forms() {
        let text: Envelope<u32> =
            serde_json::from_str(r#"{"status": "success", "data": 1}"#).unwrap();
        assert!(text.status.is_success());

        let code: Envelope<u32> =
            serde_json::from_str(r#"{"status": 201, "data": 1}"#).unwrap();
        assert!(code.status.is_success());

        let failed: Envelope<u32> =
            serde_json::from_str(r#"{"status": "error", "message": "nope"}"#).unwrap();
        assert!(!failed.status.is_success());
        assert!(failed.data.is_none());
        assert_eq!(failed.message.as_deref(), Some("nope"));
    }

    #[test]
    fn test_page_payload() {
        let json = r#"{
            "status": "success",
            "data": {"content": [1, 2, 3], "totalElements": 13, "totalPages": 5},
            "message": "Fetched"
        }"#;

        let envelope: Envelope<Page<u32>> = serde_json::from_str(json).unwrap();
        let page = envelope.data.unwrap();
        assert_eq!(page.content, vec![1, 2, 3]);
        assert_eq!(page.total_elements, 13);
        assert_eq!(page.total_pages, 5);
    }

    #[test]
    fn test_meta_comes_from_server_counts() {
        let page = Page {
            content: vec!["a", "b"],
            total_elements: 42,
            total_pages: 5,
        };
        let query = ListQuery::default().with_page(4).with_size(10);

        let meta = PaginationMeta::from_page(&page, &query);
        assert_eq!(meta.current_page, 4);
        assert_eq!(meta.page_size, 10);
        assert_eq!(meta.total_records, 42);
        assert_eq!(meta.total_pages, 5);
        assert!(!meta.has_next());
        assert!(meta.has_previous());
    }
}
