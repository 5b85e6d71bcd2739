//! One form per portfolio record type

use chrono::NaiveDate;
use serde::Serialize;

use super::rules::{self, optional_text, parse_bool, parse_date, parse_number, parse_order};
use super::{Form, FormError, ValidationErrors};
use crate::model::{
    Achievement, Education, Experience, Navlink, Resume, Skill, SocialLink, Template, Testimonial,
};

fn unknown(key: &str) -> FormError {
    FormError::UnknownField(key.to_string())
}

// ============================================
// Achievement
// ============================================

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AchievementForm {
    pub title: String,
    pub description: Option<String>,
    pub issuer: Option<String>,
    pub achieved_on: Option<NaiveDate>,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub order_index: i32,
}

impl Form for AchievementForm {
    type Record = Achievement;

    const FIELDS: &'static [&'static str] = &[
        "title",
        "description",
        "issuer",
        "achievedOn",
        "url",
        "imageUrl",
        "orderIndex",
    ];

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FormError> {
        match key {
            "title" => self.title = value.trim().to_string(),
            "description" => self.description = optional_text(value),
            "issuer" => self.issuer = optional_text(value),
            "achievedOn" => self.achieved_on = parse_date(key, value)?,
            "url" => self.url = optional_text(value),
            "imageUrl" => self.image_url = optional_text(value),
            "orderIndex" => self.order_index = parse_order(key, value)?,
            _ => return Err(unknown(key)),
        }
        Ok(())
    }

    fn from_record(record: &Achievement) -> Self {
        Self {
            title: record.title.clone(),
            description: record.description.clone(),
            issuer: record.issuer.clone(),
            achieved_on: record.achieved_on,
            url: record.url.clone(),
            image_url: record.image_url.clone(),
            order_index: record.meta.order_index,
        }
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        rules::required(&mut errors, "title", "Title", &self.title);
        rules::min_len(&mut errors, "title", "Title", &self.title, 3);
        rules::max_len(&mut errors, "title", "Title", &self.title, 120);
        rules::optional_url(&mut errors, "url", "URL", self.url.as_deref());
        rules::optional_url(&mut errors, "imageUrl", "Image", self.image_url.as_deref());
        errors.into_result()
    }
}

// ============================================
// Testimonial
// ============================================

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialForm {
    pub name: String,
    pub designation: Option<String>,
    pub company: Option<String>,
    pub message: String,
    pub avatar_url: Option<String>,
    pub rating: Option<u8>,
    pub order_index: i32,
}

impl Form for TestimonialForm {
    type Record = Testimonial;

    const FIELDS: &'static [&'static str] = &[
        "name",
        "designation",
        "company",
        "message",
        "avatarUrl",
        "rating",
        "orderIndex",
    ];

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FormError> {
        match key {
            "name" => self.name = value.trim().to_string(),
            "designation" => self.designation = optional_text(value),
            "company" => self.company = optional_text(value),
            "message" => self.message = value.trim().to_string(),
            "avatarUrl" => self.avatar_url = optional_text(value),
            "rating" => self.rating = parse_number(key, value)?,
            "orderIndex" => self.order_index = parse_order(key, value)?,
            _ => return Err(unknown(key)),
        }
        Ok(())
    }

    fn from_record(record: &Testimonial) -> Self {
        Self {
            name: record.name.clone(),
            designation: record.designation.clone(),
            company: record.company.clone(),
            message: record.message.clone(),
            avatar_url: record.avatar_url.clone(),
            rating: record.rating,
            order_index: record.meta.order_index,
        }
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        rules::required(&mut errors, "name", "Name", &self.name);
        rules::required(&mut errors, "message", "Message", &self.message);
        rules::min_len(&mut errors, "message", "Message", &self.message, 10);
        rules::optional_url(&mut errors, "avatarUrl", "Avatar", self.avatar_url.as_deref());
        rules::range(&mut errors, "rating", "Rating", self.rating, 1, 5);
        errors.into_result()
    }
}

// ============================================
// Social link
// ============================================

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinkForm {
    pub platform: String,
    pub url: String,
    pub icon: Option<String>,
    pub order_index: i32,
}

impl Form for SocialLinkForm {
    type Record = SocialLink;

    const FIELDS: &'static [&'static str] = &["platform", "url", "icon", "orderIndex"];

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FormError> {
        match key {
            "platform" => self.platform = value.trim().to_string(),
            "url" => self.url = value.trim().to_string(),
            "icon" => self.icon = optional_text(value),
            "orderIndex" => self.order_index = parse_order(key, value)?,
            _ => return Err(unknown(key)),
        }
        Ok(())
    }

    fn from_record(record: &SocialLink) -> Self {
        Self {
            platform: record.platform.clone(),
            url: record.url.clone(),
            icon: record.icon.clone(),
            order_index: record.meta.order_index,
        }
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        rules::required(&mut errors, "platform", "Platform", &self.platform);
        rules::url(&mut errors, "url", "URL", &self.url);
        errors.into_result()
    }
}

// ============================================
// Navigation link
// ============================================

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NavlinkForm {
    pub label: String,
    pub path: String,
    pub is_external: bool,
    pub order_index: i32,
}

impl Form for NavlinkForm {
    type Record = Navlink;

    const FIELDS: &'static [&'static str] = &["label", "path", "isExternal", "orderIndex"];

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FormError> {
        match key {
            "label" => self.label = value.trim().to_string(),
            "path" => self.path = value.trim().to_string(),
            "isExternal" => self.is_external = parse_bool(key, value)?,
            "orderIndex" => self.order_index = parse_order(key, value)?,
            _ => return Err(unknown(key)),
        }
        Ok(())
    }

    fn from_record(record: &Navlink) -> Self {
        Self {
            label: record.label.clone(),
            path: record.path.clone(),
            is_external: record.is_external,
            order_index: record.meta.order_index,
        }
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        rules::required(&mut errors, "label", "Label", &self.label);
        if self.is_external {
            rules::url(&mut errors, "path", "Path", &self.path);
        } else if rules::required(&mut errors, "path", "Path", &self.path)
            && !self.path.starts_with('/')
        {
            errors.add("path", "Internal paths must start with '/'");
        }
        errors.into_result()
    }
}

// ============================================
// Template
// ============================================

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TemplateForm {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub preview_url: Option<String>,
    pub order_index: i32,
}

impl Form for TemplateForm {
    type Record = Template;

    const FIELDS: &'static [&'static str] =
        &["name", "slug", "description", "previewUrl", "orderIndex"];

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FormError> {
        match key {
            "name" => self.name = value.trim().to_string(),
            "slug" => self.slug = optional_text(value),
            "description" => self.description = optional_text(value),
            "previewUrl" => self.preview_url = optional_text(value),
            "orderIndex" => self.order_index = parse_order(key, value)?,
            _ => return Err(unknown(key)),
        }
        Ok(())
    }

    fn from_record(record: &Template) -> Self {
        Self {
            name: record.name.clone(),
            slug: record.slug.clone(),
            description: record.description.clone(),
            preview_url: record.preview_url.clone(),
            order_index: record.meta.order_index,
        }
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        rules::required(&mut errors, "name", "Name", &self.name);
        rules::min_len(&mut errors, "name", "Name", &self.name, 3);
        if let Some(slug) = &self.slug {
            if !rules::is_slug(slug) {
                errors.add("slug", "Slug may only contain lowercase letters, digits and dashes");
            }
        }
        rules::optional_url(&mut errors, "previewUrl", "Preview", self.preview_url.as_deref());
        errors.into_result()
    }
}

// ============================================
// Resume
// ============================================

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResumeForm {
    pub title: String,
    pub file_url: String,
    pub public_id: Option<String>,
    pub is_primary: bool,
    pub order_index: i32,
}

impl Form for ResumeForm {
    type Record = Resume;

    const FIELDS: &'static [&'static str] =
        &["title", "fileUrl", "publicId", "isPrimary", "orderIndex"];

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FormError> {
        match key {
            "title" => self.title = value.trim().to_string(),
            "fileUrl" => self.file_url = value.trim().to_string(),
            "publicId" => self.public_id = optional_text(value),
            "isPrimary" => self.is_primary = parse_bool(key, value)?,
            "orderIndex" => self.order_index = parse_order(key, value)?,
            _ => return Err(unknown(key)),
        }
        Ok(())
    }

    fn from_record(record: &Resume) -> Self {
        Self {
            title: record.title.clone(),
            file_url: record.file_url.clone(),
            public_id: record.public_id.clone(),
            is_primary: record.is_primary,
            order_index: record.meta.order_index,
        }
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        rules::required(&mut errors, "title", "Title", &self.title);
        rules::url(&mut errors, "fileUrl", "File", &self.file_url);
        errors.into_result()
    }
}

// ============================================
// Education
// ============================================

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EducationForm {
    pub institution: String,
    pub degree: String,
    pub field_of_study: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub grade: Option<String>,
    pub description: Option<String>,
    pub order_index: i32,
}

impl Form for EducationForm {
    type Record = Education;

    const FIELDS: &'static [&'static str] = &[
        "institution",
        "degree",
        "fieldOfStudy",
        "startDate",
        "endDate",
        "grade",
        "description",
        "orderIndex",
    ];

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FormError> {
        match key {
            "institution" => self.institution = value.trim().to_string(),
            "degree" => self.degree = value.trim().to_string(),
            "fieldOfStudy" => self.field_of_study = optional_text(value),
            "startDate" => self.start_date = parse_date(key, value)?,
            "endDate" => self.end_date = parse_date(key, value)?,
            "grade" => self.grade = optional_text(value),
            "description" => self.description = optional_text(value),
            "orderIndex" => self.order_index = parse_order(key, value)?,
            _ => return Err(unknown(key)),
        }
        Ok(())
    }

    fn from_record(record: &Education) -> Self {
        Self {
            institution: record.institution.clone(),
            degree: record.degree.clone(),
            field_of_study: record.field_of_study.clone(),
            start_date: record.start_date,
            end_date: record.end_date,
            grade: record.grade.clone(),
            description: record.description.clone(),
            order_index: record.meta.order_index,
        }
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        rules::required(&mut errors, "institution", "Institution", &self.institution);
        rules::required(&mut errors, "degree", "Degree", &self.degree);
        if self.start_date.is_none() {
            errors.add("startDate", "Start date is required");
        }
        rules::date_order(&mut errors, "endDate", self.start_date, self.end_date);
        errors.into_result()
    }
}

// ============================================
// Experience
// ============================================

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceForm {
    pub company: String,
    pub role: String,
    pub location: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub currently_working: bool,
    pub description: Option<String>,
    pub order_index: i32,
}

impl Form for ExperienceForm {
    type Record = Experience;

    const FIELDS: &'static [&'static str] = &[
        "company",
        "role",
        "location",
        "startDate",
        "endDate",
        "currentlyWorking",
        "description",
        "orderIndex",
    ];

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FormError> {
        match key {
            "company" => self.company = value.trim().to_string(),
            "role" => self.role = value.trim().to_string(),
            "location" => self.location = optional_text(value),
            "startDate" => self.start_date = parse_date(key, value)?,
            "endDate" => self.end_date = parse_date(key, value)?,
            "currentlyWorking" => {
                self.currently_working = parse_bool(key, value)?;
                if self.currently_working {
                    self.end_date = None;
                }
            }
            "description" => self.description = optional_text(value),
            "orderIndex" => self.order_index = parse_order(key, value)?,
            _ => return Err(unknown(key)),
        }
        Ok(())
    }

    fn from_record(record: &Experience) -> Self {
        Self {
            company: record.company.clone(),
            role: record.role.clone(),
            location: record.location.clone(),
            start_date: record.start_date,
            end_date: record.end_date,
            currently_working: record.currently_working,
            description: record.description.clone(),
            order_index: record.meta.order_index,
        }
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        rules::required(&mut errors, "company", "Company", &self.company);
        rules::required(&mut errors, "role", "Role", &self.role);
        if self.start_date.is_none() {
            errors.add("startDate", "Start date is required");
        }
        if self.currently_working && self.end_date.is_some() {
            errors.add("endDate", "Current positions have no end date");
        }
        rules::date_order(&mut errors, "endDate", self.start_date, self.end_date);
        errors.into_result()
    }
}

// ============================================
// Skill
// ============================================

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SkillForm {
    pub name: String,
    pub category: Option<String>,
    pub proficiency: Option<u8>,
    pub icon_url: Option<String>,
    pub order_index: i32,
}

impl Form for SkillForm {
    type Record = Skill;

    const FIELDS: &'static [&'static str] =
        &["name", "category", "proficiency", "iconUrl", "orderIndex"];

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FormError> {
        match key {
            "name" => self.name = value.trim().to_string(),
            "category" => self.category = optional_text(value),
            "proficiency" => self.proficiency = parse_number(key, value)?,
            "iconUrl" => self.icon_url = optional_text(value),
            "orderIndex" => self.order_index = parse_order(key, value)?,
            _ => return Err(unknown(key)),
        }
        Ok(())
    }

    fn from_record(record: &Skill) -> Self {
        Self {
            name: record.name.clone(),
            category: record.category.clone(),
            proficiency: record.proficiency,
            icon_url: record.icon_url.clone(),
            order_index: record.meta.order_index,
        }
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        rules::required(&mut errors, "name", "Name", &self.name);
        rules::range(&mut errors, "proficiency", "Proficiency", self.proficiency, 0, 100);
        rules::optional_url(&mut errors, "iconUrl", "Icon", self.icon_url.as_deref());
        errors.into_result()
    }
}
