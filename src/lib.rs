//! # Folio
//!
//! Portfolio management admin - the client core behind the `folio` CLI and
//! the `folio-site` public portfolio server.
//!
//! ## Features
//!
//! - **Typed entities**: achievements, testimonials, links, templates, resumes,
//!   education, experience and skills, with a shared status lifecycle
//! - **Generic table**: one renderer for every entity, client or server paging
//! - **List pages**: URL-carried filters and pagination, last-request-wins
//! - **Forms**: add/edit/view modes with client-side validation
//! - **Media upload**: multipart uploads to the media host
//!
//! ## Modules
//!
//! - [`api`]: REST client, envelopes and path templates
//! - [`services`]: per-entity CRUD and status calls
//! - [`listing`]: list page state and fetching
//! - [`table`]: schema-driven table rendering
//! - [`forms`]: entity forms and validation
//! - [`site`]: public portfolio server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use folio::api::ApiClient;
//! use folio::auth::AuthService;
//! use folio::config::Config;
//! use folio::listing::ListQuery;
//! use folio::services::{EntityService, SkillResource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default()?;
//!     let client = ApiClient::new(&config.api)?;
//!
//!     // Sign in; the session is attached to every later request
//!     AuthService::new(client.clone())
//!         .login("ada@example.com", "analytical-engine")
//!         .await?;
//!
//!     // First page of skills, newest first
//!     let skills = EntityService::<SkillResource>::new(client);
//!     let page = skills.list(&ListQuery::default()).await?;
//!
//!     println!("{} skills", page.total_elements);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod forms;
pub mod listing;
pub mod logging;
pub mod model;
pub mod notify;
pub mod portfolio;
pub mod routing;
pub mod services;
pub mod site;
pub mod table;
pub mod upload;

#[cfg(test)]
mod test_support;

// Re-export top-level types for convenience
pub use api::{ApiClient, ApiError, ApiResult, Page, PaginationMeta};

pub use auth::{AuthService, Session, SessionStore};

pub use config::Config;

pub use forms::{Form, FormError, FormState, Mode, ValidationErrors};

pub use listing::{ListPage, ListQuery, LoadOutcome, RecordSource, SortDir};

pub use model::{Entity, Profile, RecordMeta, Status};

pub use notify::{Notifications, Toast, ToastLevel};

pub use portfolio::{PortfolioService, PortfolioSource, PublicPortfolio};

pub use routing::AdminRoute;

pub use services::{EntityService, Resource};

pub use site::{build_router, serve, SiteError, SiteState};

pub use table::{CellValue, Column, Pager, Paging, Table, TableSchema};

pub use upload::{MediaUploader, UploadError, UploadSlot, UploadedMedia};
