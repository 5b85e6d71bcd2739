//! Entity services
//!
//! One generic service drives every portfolio entity. The per-entity
//! differences (paths, forms, table columns, filters) live in the
//! [`Resource`] implementations in [`resources`].
//!
//! Records are never hard-deleted from the client: status changes go
//! through `PUT /<entity>/:id/status`. Resumes are the only resource
//! that can be deleted.

pub mod resources;

pub use resources::{
    AchievementResource, EducationResource, ExperienceResource, NavlinkResource,
    ResumeResource, SkillResource, SocialLinkResource, TemplateResource, TestimonialResource,
};

use async_trait::async_trait;
use serde_json::Value;
use std::marker::PhantomData;

use crate::api::{ApiClient, ApiError, ApiResult, Page, PathTemplate, StatusUpdate};
use crate::forms::Form;
use crate::listing::{ListQuery, RecordSource};
use crate::model::{Entity, Status};
use crate::table::{Row, TableSchema};

/// Static description of one entity type
pub trait Resource: Send + Sync + 'static {
    type Record: Entity;
    type Form: Form<Record = Self::Record>;

    /// Singular display name
    const NAME: &'static str;

    /// Collection segment used by both the API and the admin routes
    const PLURAL: &'static str;

    /// List filters accepted besides `status`
    const FILTERS: &'static [&'static str] = &[];

    /// Whether `DELETE` is offered
    const HARD_DELETE: bool = false;

    /// Columns of the list table
    fn schema() -> TableSchema;

    /// One table row, aligned to [`Resource::schema`]
    fn row(record: &Self::Record) -> Row;
}

/// CRUD and status calls for one entity
pub struct EntityService<R: Resource> {
    client: ApiClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Clone for EntityService<R> {
    fn clone(&self) -> Self {
        Self::new(self.client.clone())
    }
}

impl<R: Resource> EntityService<R> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    fn collection_path() -> String {
        format!("/{}", R::PLURAL)
    }

    fn item_path(id: &str) -> ApiResult<String> {
        PathTemplate::owned(format!("/{}/:id", R::PLURAL)).render(&[("id", id)])
    }

    fn status_path(id: &str) -> ApiResult<String> {
        PathTemplate::owned(format!("/{}/:id/status", R::PLURAL)).render(&[("id", id)])
    }

    /// One page of records, scoped to the session's profile
    pub async fn list(&self, query: &ListQuery) -> ApiResult<Page<R::Record>> {
        let mut params = query.to_params();
        if let Some(profile_id) = self.client.profile_id().await {
            params.retain(|(key, _)| key != "profileId");
            params.push(("profileId".to_string(), profile_id));
        }

        tracing::debug!(entity = R::PLURAL, page = query.page, size = query.size, "Listing");
        self.client.get(&Self::collection_path(), &params).await
    }

    pub async fn get(&self, id: &str) -> ApiResult<R::Record> {
        self.client.get(&Self::item_path(id)?, &[]).await
    }

    /// Validate and create. Nothing is sent when validation fails.
    pub async fn create(&self, form: &R::Form) -> ApiResult<R::Record> {
        form.validate()?;
        let body = self.body(form).await?;

        let record: R::Record = self.client.post(&Self::collection_path(), &body).await?;
        tracing::info!(entity = R::PLURAL, id = record.id(), "Created");
        Ok(record)
    }

    /// Validate and update. Nothing is sent when validation fails.
    pub async fn update(&self, id: &str, form: &R::Form) -> ApiResult<R::Record> {
        let path = Self::item_path(id)?;
        form.validate()?;
        let body = self.body(form).await?;

        let record: R::Record = self.client.put(&path, &body).await?;
        tracing::info!(entity = R::PLURAL, id = record.id(), "Updated");
        Ok(record)
    }

    /// Move a record to another lifecycle status
    pub async fn set_status(&self, id: &str, status: Status) -> ApiResult<R::Record> {
        let path = Self::status_path(id)?;
        let record: R::Record = self.client.put(&path, &StatusUpdate { status }).await?;
        tracing::info!(entity = R::PLURAL, id = id, status = %status, "Status changed");
        Ok(record)
    }

    /// Hard delete, for resources that allow it
    pub async fn delete(&self, id: &str) -> ApiResult<String> {
        if !R::HARD_DELETE {
            return Err(ApiError::Unsupported(format!(
                "{} records cannot be deleted; change their status instead",
                R::NAME
            )));
        }
        let path = Self::item_path(id)?;
        let message = self.client.delete(&path).await?;
        tracing::info!(entity = R::PLURAL, id = id, "Deleted");
        Ok(message)
    }

    /// Form body with the owning profile attached
    async fn body(&self, form: &R::Form) -> ApiResult<Value> {
        let mut body = serde_json::to_value(form)?;
        if let (Some(profile_id), Value::Object(map)) =
            (self.client.profile_id().await, &mut body)
        {
            map.insert("profileId".to_string(), Value::String(profile_id));
        }
        Ok(body)
    }
}

#[async_trait]
impl<R: Resource> RecordSource for EntityService<R> {
    type Record = R::Record;

    fn base_path(&self) -> &str {
        R::PLURAL
    }

    fn filter_keys(&self) -> &'static [&'static str] {
        R::FILTERS
    }

    async fn fetch(&self, query: &ListQuery) -> ApiResult<Page<R::Record>> {
        self.list(query).await
    }
}
