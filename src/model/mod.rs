//! Portfolio data model
//!
//! - [`Status`]: record lifecycle
//! - [`Entity`]: common view over every record type
//! - One struct per portfolio section (achievements, skills, ...)

mod entities;
mod status;

pub use entities::{
    Achievement, Education, Entity, Experience, Navlink, Profile, RecordMeta, Resume, Skill,
    SocialLink, Template, Testimonial,
};
pub use status::{ParseStatusError, Status};
