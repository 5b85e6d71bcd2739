//! Public portfolio
//!
//! Everything a visitor sees for one profile, fetched in one call from
//! `GET /public/portfolio/:username`. Only `ACTIVE` records are shown,
//! in `orderIndex` order.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::api::paths::PUBLIC_PORTFOLIO;
use crate::api::{ApiClient, ApiResult, PathTemplate};
use crate::model::{
    Achievement, Education, Entity, Experience, Navlink, Profile, Resume, Skill, SocialLink,
    Template, Testimonial,
};

/// A profile and all of its sections
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PublicPortfolio {
    pub profile: Profile,
    #[serde(default)]
    pub template: Option<Template>,
    #[serde(default)]
    pub navlinks: Vec<Navlink>,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    #[serde(default)]
    pub educations: Vec<Education>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
    #[serde(default)]
    pub resumes: Vec<Resume>,
}

fn visible<E: Entity>(records: &[E]) -> Vec<E> {
    let mut shown: Vec<E> = records
        .iter()
        .filter(|r| r.status().is_public())
        .cloned()
        .collect();
    shown.sort_by_key(|r| r.order_index());
    shown
}

impl PublicPortfolio {
    /// Only what visitors may see, each section in display order
    pub fn visible(&self) -> PublicPortfolio {
        PublicPortfolio {
            profile: self.profile.clone(),
            template: self
                .template
                .clone()
                .filter(|t| t.status().is_public()),
            navlinks: visible(&self.navlinks),
            social_links: visible(&self.social_links),
            experiences: visible(&self.experiences),
            educations: visible(&self.educations),
            skills: visible(&self.skills),
            achievements: visible(&self.achievements),
            testimonials: visible(&self.testimonials),
            resumes: visible(&self.resumes),
        }
    }

    /// Primary resume, falling back to the first one
    pub fn primary_resume(&self) -> Option<&Resume> {
        self.resumes
            .iter()
            .find(|r| r.is_primary)
            .or_else(|| self.resumes.first())
    }

    pub fn is_empty(&self) -> bool {
        self.navlinks.is_empty()
            && self.social_links.is_empty()
            && self.experiences.is_empty()
            && self.educations.is_empty()
            && self.skills.is_empty()
            && self.achievements.is_empty()
            && self.testimonials.is_empty()
            && self.resumes.is_empty()
    }
}

/// Where public portfolios come from
#[async_trait]
pub trait PortfolioSource: Send + Sync {
    async fn fetch(&self, username: &str) -> ApiResult<PublicPortfolio>;

    /// Whether the source answers at all
    async fn ready(&self) -> bool {
        true
    }
}

/// Public portfolio calls
#[derive(Clone)]
pub struct PortfolioService {
    client: ApiClient,
}

impl PortfolioService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PortfolioSource for PortfolioService {
    async fn fetch(&self, username: &str) -> ApiResult<PublicPortfolio> {
        let path = PathTemplate::new(PUBLIC_PORTFOLIO).render(&[("username", username)])?;
        self.client.get(&path, &[]).await
    }

    async fn ready(&self) -> bool {
        self.client.health_check().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::model::{RecordMeta, Status};
    use crate::test_support::{MockApi, MOCK_USERNAME};

    fn skill(id: &str, order: i32, status: Status) -> Skill {
        Skill {
            meta: RecordMeta::new(id).order_index(order).status(status),
            name: id.to_string(),
            category: None,
            proficiency: None,
            icon_url: None,
        }
    }

    #[test]
    fn test_visible_filters_and_orders() {
        let portfolio = PublicPortfolio {
            skills: vec![
                skill("c", 3, Status::Active),
                skill("hidden", 0, Status::Inactive),
                skill("a", 1, Status::Active),
                skill("gone", 2, Status::Deleted),
                skill("b", 2, Status::Active),
            ],
            ..Default::default()
        };

        let names: Vec<String> = portfolio
            .visible()
            .skills
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_primary_resume() {
        let resume = |id: &str, primary: bool| Resume {
            meta: RecordMeta::new(id),
            title: id.to_string(),
            file_url: format!("https://media.example.com/{}.pdf", id),
            public_id: None,
            is_primary: primary,
        };

        let mut portfolio = PublicPortfolio {
            resumes: vec![resume("old", false), resume("new", true)],
            ..Default::default()
        };
        assert_eq!(portfolio.primary_resume().map(|r| r.title.as_str()), Some("new"));

        portfolio.resumes[1].is_primary = false;
        assert_eq!(portfolio.primary_resume().map(|r| r.title.as_str()), Some("old"));
    }

    #[tokio::test]
    async fn test_fetch_from_api() {
        let mock = MockApi::start().await;
        let service = PortfolioService::new(mock.client());

        let portfolio = service.fetch(MOCK_USERNAME).await.unwrap();
        assert_eq!(portfolio.profile.username, MOCK_USERNAME);
        assert!(!portfolio.skills.is_empty());
        assert!(service.ready().await);

        let err = service.fetch("nobody").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
