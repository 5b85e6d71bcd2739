//! Portfolio records
//!
//! Flat records as the REST API returns them. Wire names are camelCase;
//! every record embeds the same [`RecordMeta`] block.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::Status;

/// Fields shared by every record
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecordMeta {
    /// Server-assigned identifier
    pub id: String,
    /// Owning profile
    #[serde(default)]
    pub profile_id: Option<String>,
    /// Lifecycle status
    #[serde(default)]
    pub status: Status,
    /// Position within its section (ascending)
    #[serde(default)]
    pub order_index: i32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl RecordMeta {
    /// Create metadata for a record with the given id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Builder: set status
    pub fn status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Builder: set ordering index
    pub fn order_index(mut self, index: i32) -> Self {
        self.order_index = index;
        self
    }

    /// Builder: set owning profile
    pub fn profile(mut self, profile_id: impl Into<String>) -> Self {
        self.profile_id = Some(profile_id.into());
        self
    }
}

/// Common view over every record type
pub trait Entity:
    Clone + std::fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Shared metadata
    fn meta(&self) -> &RecordMeta;

    /// Primary label used in listings and the public view
    fn title(&self) -> &str;

    fn id(&self) -> &str {
        &self.meta().id
    }

    fn status(&self) -> Status {
        self.meta().status
    }

    fn order_index(&self) -> i32 {
        self.meta().order_index
    }
}

/// An award, certification or other milestone
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub achieved_on: Option<NaiveDate>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// A quote from a client or colleague
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: String,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    pub message: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// 1-5 stars
    #[serde(default)]
    pub rating: Option<u8>,
}

/// Link to an external profile (GitHub, LinkedIn, ...)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub platform: String,
    pub url: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Navigation entry of the public site
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Navlink {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub label: String,
    pub path: String,
    #[serde(default)]
    pub is_external: bool,
}

/// Layout template for the public portfolio
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub preview_url: Option<String>,
}

/// Uploaded resume document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub title: String,
    pub file_url: String,
    /// Media host identifier of the uploaded file
    #[serde(default)]
    pub public_id: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub institution: String,
    pub degree: String,
    #[serde(default)]
    pub field_of_study: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub company: String,
    pub role: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub currently_working: bool,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    /// 0-100
    #[serde(default)]
    pub proficiency: Option<u8>,
    #[serde(default)]
    pub icon_url: Option<String>,
}

/// Public owner of a portfolio
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl Profile {
    /// Name to display: full name when present, otherwise the username
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

impl Entity for Achievement {
    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn title(&self) -> &str {
        &self.title
    }
}

impl Entity for Testimonial {
    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn title(&self) -> &str {
        &self.name
    }
}

impl Entity for SocialLink {
    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn title(&self) -> &str {
        &self.platform
    }
}

impl Entity for Navlink {
    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn title(&self) -> &str {
        &self.label
    }
}

impl Entity for Template {
    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn title(&self) -> &str {
        &self.name
    }
}

impl Entity for Resume {
    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn title(&self) -> &str {
        &self.title
    }
}

impl Entity for Education {
    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn title(&self) -> &str {
        &self.institution
    }
}

impl Entity for Experience {
    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn title(&self) -> &str {
        &self.company
    }
}

impl Entity for Skill {
    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn title(&self) -> &str {
        &self.name
    }
}
