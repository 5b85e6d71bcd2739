//! Portfolio REST API access
//!
//! Client side of the REST conventions the admin relies on.
//!
//! # Conventions
//!
//! - Paths use `:param` placeholders, substituted before each call
//!   (`/achievements/:id`)
//! - List endpoints accept `page, size, sortBy, sortDir, search, status, profileId`
//! - Every response is `{status, data, message}`; pages are
//!   `{content, totalElements, totalPages}`
//! - The bearer token of the current [`Session`](crate::auth::Session) is
//!   attached to every request
//!
//! # Example
//!
//! ```rust,ignore
//! use folio::api::{ApiClient, Page};
//! use folio::config::ApiConfig;
//!
//! let client = ApiClient::new(&ApiConfig::default())?;
//! let page: Page<serde_json::Value> = client.get("/skills", &[]).await?;
//! ```

pub mod client;
pub mod dto;
pub mod error;
pub mod paths;

pub use client::ApiClient;
pub use dto::{
    AuthPayload, AuthUser, Envelope, EnvelopeStatus, ForgotPasswordRequest, LoginRequest, Page,
    PaginationMeta, RegisterRequest, ResetPasswordRequest, StatusUpdate,
};
pub use error::{ApiError, ApiResult, GENERIC_ERROR};
pub use paths::{encode_query, parse_query, PathTemplate};
