//! Portfolio Routes
//!
//! - GET /:username - Rendered portfolio page
//! - GET /api/v1/portfolio/:username - Visible portfolio as JSON

use axum::{
    extract::{Path, State},
    response::Html,
    Json,
};
use std::sync::Arc;

use crate::portfolio::PublicPortfolio;
use crate::site::error::{SiteError, SiteResult};
use crate::site::render;
use crate::site::state::SiteState;

/// Usernames are short slugs; anything else cannot exist upstream
fn check_username(username: &str) -> SiteResult<()> {
    let valid = !username.is_empty()
        && username.len() <= 64
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(SiteError::NotFound(format!("Portfolio '{}'", username)))
    }
}

async fn load(state: &SiteState, username: &str) -> SiteResult<PublicPortfolio> {
    check_username(username)?;
    let portfolio = state.portfolios.fetch(username).await?;
    Ok(portfolio.visible())
}

/// GET /:username
pub async fn page(
    State(state): State<Arc<SiteState>>,
    Path(username): Path<String>,
) -> SiteResult<Html<String>> {
    let portfolio = load(&state, &username).await?;
    tracing::debug!(username = %username, "Rendering portfolio page");
    Ok(Html(render::portfolio_page(&portfolio)))
}

/// GET /api/v1/portfolio/:username
pub async fn json(
    State(state): State<Arc<SiteState>>,
    Path(username): Path<String>,
) -> SiteResult<Json<PublicPortfolio>> {
    Ok(Json(load(&state, &username).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_username() {
        assert!(check_username("ada").is_ok());
        assert!(check_username("ada.lovelace_1").is_ok());
        assert!(check_username("").is_err());
        assert!(check_username("<script>").is_err());
        assert!(check_username(&"a".repeat(65)).is_err());
    }
}
