//! Per-entity resource definitions

use crate::forms::{
    AchievementForm, EducationForm, ExperienceForm, NavlinkForm, ResumeForm, SkillForm,
    SocialLinkForm, TemplateForm, TestimonialForm,
};
use crate::model::{
    Achievement, Education, Experience, Navlink, Resume, Skill, SocialLink, Template, Testimonial,
};
use crate::table::{Align, CellValue, Column, Row, TableSchema};

use super::Resource;

fn status_column() -> Column {
    Column::new("Status", "status").width(8)
}

fn order_column() -> Column {
    Column::number("Order", "orderIndex")
}

fn created_column() -> Column {
    Column::date("Created", "createdAt")
}

/// `2019-09 – present` style period
fn period(row: &[CellValue], start: usize, end: usize) -> String {
    let month = |value: Option<&CellValue>| match value {
        Some(CellValue::Date(d)) => Some(d.format("%Y-%m").to_string()),
        _ => None,
    };
    match (month(row.get(start)), month(row.get(end))) {
        (Some(from), Some(to)) => format!("{} – {}", from, to),
        (Some(from), None) => format!("{} – present", from),
        (None, Some(to)) => format!("until {}", to),
        (None, None) => "-".to_string(),
    }
}

fn created(meta: &crate::model::RecordMeta) -> CellValue {
    meta.created_at.map(|dt| dt.date_naive()).into()
}

// ============================================
// Resources
// ============================================

pub struct AchievementResource;

impl Resource for AchievementResource {
    type Record = Achievement;
    type Form = AchievementForm;

    const NAME: &'static str = "Achievement";
    const PLURAL: &'static str = "achievements";
    const FILTERS: &'static [&'static str] = &["issuer"];

    fn schema() -> TableSchema {
        TableSchema::new(vec![
            Column::new("Title", "title"),
            Column::new("Issuer", "issuer"),
            Column::date("Achieved", "achievedOn"),
            status_column(),
            order_column(),
            created_column(),
        ])
    }

    fn row(r: &Achievement) -> Row {
        vec![
            r.title.as_str().into(),
            r.issuer.clone().into(),
            r.achieved_on.into(),
            r.meta.status.into(),
            r.meta.order_index.into(),
            created(&r.meta),
        ]
    }
}

pub struct TestimonialResource;

impl Resource for TestimonialResource {
    type Record = Testimonial;
    type Form = TestimonialForm;

    const NAME: &'static str = "Testimonial";
    const PLURAL: &'static str = "testimonials";
    const FILTERS: &'static [&'static str] = &["company"];

    fn schema() -> TableSchema {
        TableSchema::new(vec![
            Column::new("Name", "name"),
            Column::new("Company", "company"),
            Column::custom("Rating", "rating", |value, _| match value {
                CellValue::Number(n) => "★".repeat(*n as usize),
                _ => "-".to_string(),
            }),
            status_column(),
            order_column(),
            created_column(),
        ])
    }

    fn row(r: &Testimonial) -> Row {
        vec![
            r.name.as_str().into(),
            r.company.clone().into(),
            r.rating.into(),
            r.meta.status.into(),
            r.meta.order_index.into(),
            created(&r.meta),
        ]
    }
}

pub struct SocialLinkResource;

impl Resource for SocialLinkResource {
    type Record = SocialLink;
    type Form = SocialLinkForm;

    const NAME: &'static str = "Social link";
    const PLURAL: &'static str = "social-links";
    const FILTERS: &'static [&'static str] = &["platform"];

    fn schema() -> TableSchema {
        TableSchema::new(vec![
            Column::new("Platform", "platform"),
            Column::new("URL", "url"),
            status_column(),
            order_column(),
        ])
    }

    fn row(r: &SocialLink) -> Row {
        vec![
            r.platform.as_str().into(),
            r.url.as_str().into(),
            r.meta.status.into(),
            r.meta.order_index.into(),
        ]
    }
}

pub struct NavlinkResource;

impl Resource for NavlinkResource {
    type Record = Navlink;
    type Form = NavlinkForm;

    const NAME: &'static str = "Navigation link";
    const PLURAL: &'static str = "navlinks";

    fn schema() -> TableSchema {
        TableSchema::new(vec![
            Column::new("Label", "label"),
            Column::new("Path", "path"),
            Column::new("External", "isExternal").align(Align::Center),
            status_column(),
            order_column(),
        ])
    }

    fn row(r: &Navlink) -> Row {
        vec![
            r.label.as_str().into(),
            r.path.as_str().into(),
            r.is_external.into(),
            r.meta.status.into(),
            r.meta.order_index.into(),
        ]
    }
}

pub struct TemplateResource;

impl Resource for TemplateResource {
    type Record = Template;
    type Form = TemplateForm;

    const NAME: &'static str = "Template";
    const PLURAL: &'static str = "templates";

    fn schema() -> TableSchema {
        TableSchema::new(vec![
            Column::new("Name", "name"),
            Column::new("Slug", "slug"),
            status_column(),
            created_column(),
        ])
    }

    fn row(r: &Template) -> Row {
        vec![
            r.name.as_str().into(),
            r.slug.clone().into(),
            r.meta.status.into(),
            created(&r.meta),
        ]
    }
}

pub struct ResumeResource;

impl Resource for ResumeResource {
    type Record = Resume;
    type Form = ResumeForm;

    const NAME: &'static str = "Resume";
    const PLURAL: &'static str = "resumes";
    const HARD_DELETE: bool = true;

    fn schema() -> TableSchema {
        TableSchema::new(vec![
            Column::new("Title", "title"),
            Column::new("Primary", "isPrimary").align(Align::Center),
            Column::new("File", "fileUrl"),
            status_column(),
            created_column(),
        ])
    }

    fn row(r: &Resume) -> Row {
        vec![
            r.title.as_str().into(),
            r.is_primary.into(),
            r.file_url.as_str().into(),
            r.meta.status.into(),
            created(&r.meta),
        ]
    }
}

pub struct EducationResource;

impl Resource for EducationResource {
    type Record = Education;
    type Form = EducationForm;

    const NAME: &'static str = "Education";
    const PLURAL: &'static str = "educations";
    const FILTERS: &'static [&'static str] = &["institution"];

    fn schema() -> TableSchema {
        TableSchema::new(vec![
            Column::new("Institution", "institution"),
            Column::new("Degree", "degree"),
            Column::custom("Period", "startDate", |_, row| period(row, 2, 6)),
            status_column(),
            order_column(),
            created_column(),
            // shown on its own and read by the period column
            Column::date("Until", "endDate"),
        ])
    }

    fn row(r: &Education) -> Row {
        vec![
            r.institution.as_str().into(),
            r.degree.as_str().into(),
            r.start_date.into(),
            r.meta.status.into(),
            r.meta.order_index.into(),
            created(&r.meta),
            r.end_date.into(),
        ]
    }
}

pub struct ExperienceResource;

impl Resource for ExperienceResource {
    type Record = Experience;
    type Form = ExperienceForm;

    const NAME: &'static str = "Experience";
    const PLURAL: &'static str = "experiences";
    const FILTERS: &'static [&'static str] = &["company"];

    fn schema() -> TableSchema {
        TableSchema::new(vec![
            Column::new("Company", "company"),
            Column::new("Role", "role"),
            Column::custom("Period", "startDate", |_, row| period(row, 2, 6)),
            status_column(),
            order_column(),
            created_column(),
            Column::date("Until", "endDate"),
        ])
    }

    fn row(r: &Experience) -> Row {
        vec![
            r.company.as_str().into(),
            r.role.as_str().into(),
            r.start_date.into(),
            r.meta.status.into(),
            r.meta.order_index.into(),
            created(&r.meta),
            if r.currently_working {
                CellValue::Empty
            } else {
                r.end_date.into()
            },
        ]
    }
}

pub struct SkillResource;

impl Resource for SkillResource {
    type Record = Skill;
    type Form = SkillForm;

    const NAME: &'static str = "Skill";
    const PLURAL: &'static str = "skills";
    const FILTERS: &'static [&'static str] = &["category"];

    fn schema() -> TableSchema {
        TableSchema::new(vec![
            Column::new("Name", "name"),
            Column::new("Category", "category"),
            Column::custom("Proficiency", "proficiency", |value, _| match value {
                CellValue::Number(n) => format!("{}%", n),
                _ => "-".to_string(),
            })
            .align(Align::Right),
            status_column(),
            order_column(),
        ])
    }

    fn row(r: &Skill) -> Row {
        vec![
            r.name.as_str().into(),
            r.category.clone().into(),
            r.proficiency.into(),
            r.meta.status.into(),
            r.meta.order_index.into(),
        ]
    }
}
