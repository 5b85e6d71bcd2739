//! Admin routes
//!
//! Client-side paths of the admin. Each entity has `list`, `add`,
//! `:id/edit` and `:id` routes; list routes carry their filter and
//! pagination state in the query string so they can be shared.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::listing::ListQuery;

/// Route segments of every entity, in menu order
pub const ENTITY_ROUTES: [&str; 9] = [
    "achievements",
    "testimonials",
    "social-links",
    "navlinks",
    "templates",
    "resumes",
    "educations",
    "experiences",
    "skills",
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("Unknown route: {0}")]
    Unknown(String),

    #[error("Unknown entity: {0}")]
    UnknownEntity(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminRoute {
    Dashboard,
    Login,
    Register,
    ForgotPassword,
    ResetPassword { token: Option<String> },
    List { entity: String, query: ListQuery },
    Add { entity: String },
    Edit { entity: String, id: String },
    View { entity: String, id: String },
}

impl AdminRoute {
    /// Parse a path with optional query string
    pub fn parse(route: &str) -> Result<Self, RouteError> {
        let route = route.trim();
        let (path, query) = route.split_once('?').unwrap_or((route, ""));
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let parsed = match segments.as_slice() {
            [] | ["dashboard"] => AdminRoute::Dashboard,
            ["login"] => AdminRoute::Login,
            ["register"] => AdminRoute::Register,
            ["forgot-password"] => AdminRoute::ForgotPassword,
            ["reset-password"] => AdminRoute::ResetPassword {
                token: crate::api::parse_query(query)
                    .into_iter()
                    .find(|(key, value)| key == "token" && !value.is_empty())
                    .map(|(_, value)| value),
            },
            [entity, rest @ ..] => {
                let entity = known_entity(entity)?;
                match rest {
                    [] | ["list"] => AdminRoute::List {
                        entity,
                        query: ListQuery::from_query_string(query),
                    },
                    ["add"] => AdminRoute::Add { entity },
                    [id, "edit"] => AdminRoute::Edit {
                        entity,
                        id: decode(id),
                    },
                    [id] => AdminRoute::View {
                        entity,
                        id: decode(id),
                    },
                    _ => return Err(RouteError::Unknown(route.to_string())),
                }
            }
        };

        Ok(parsed)
    }

    /// Entity segment, for entity routes
    pub fn entity(&self) -> Option<&str> {
        match self {
            AdminRoute::List { entity, .. }
            | AdminRoute::Add { entity }
            | AdminRoute::Edit { entity, .. }
            | AdminRoute::View { entity, .. } => Some(entity),
            _ => None,
        }
    }

    /// Whether the route needs a logged-in session
    pub fn requires_auth(&self) -> bool {
        !matches!(
            self,
            AdminRoute::Login
                | AdminRoute::Register
                | AdminRoute::ForgotPassword
                | AdminRoute::ResetPassword { .. }
        )
    }
}

fn known_entity(segment: &str) -> Result<String, RouteError> {
    if ENTITY_ROUTES.contains(&segment) {
        Ok(segment.to_string())
    } else {
        Err(RouteError::UnknownEntity(segment.to_string()))
    }
}

fn decode(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}

impl fmt::Display for AdminRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdminRoute::Dashboard => f.write_str("/dashboard"),
            AdminRoute::Login => f.write_str("/login"),
            AdminRoute::Register => f.write_str("/register"),
            AdminRoute::ForgotPassword => f.write_str("/forgot-password"),
            AdminRoute::ResetPassword { token: None } => f.write_str("/reset-password"),
            AdminRoute::ResetPassword { token: Some(token) } => {
                write!(f, "/reset-password?token={}", urlencoding::encode(token))
            }
            AdminRoute::List { entity, query } => {
                let query = query.to_query_string();
                if query.is_empty() {
                    write!(f, "/{}/list", entity)
                } else {
                    write!(f, "/{}/list?{}", entity, query)
                }
            }
            AdminRoute::Add { entity } => write!(f, "/{}/add", entity),
            AdminRoute::Edit { entity, id } => {
                write!(f, "/{}/{}/edit", entity, urlencoding::encode(id))
            }
            AdminRoute::View { entity, id } => write!(f, "/{}/{}", entity, urlencoding::encode(id)),
        }
    }
}

impl FromStr for AdminRoute {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::SortDir;

    #[test]
    fn test_entity_routes() {
        assert_eq!(
            AdminRoute::parse("/skills/add").unwrap(),
            AdminRoute::Add {
                entity: "skills".to_string()
            }
        );
        assert_eq!(
            AdminRoute::parse("/skills/s1/edit").unwrap(),
            AdminRoute::Edit {
                entity: "skills".to_string(),
                id: "s1".to_string()
            }
        );
        assert_eq!(
            AdminRoute::parse("/skills/s1").unwrap(),
            AdminRoute::View {
                entity: "skills".to_string(),
                id: "s1".to_string()
            }
        );
    }

    #[test]
    fn test_list_route_carries_query() {
        let route = AdminRoute::parse("/achievements/list?page=2&sortDir=asc&status=ACTIVE").unwrap();

        match &route {
            AdminRoute::List { entity, query } => {
                assert_eq!(entity, "achievements");
                assert_eq!(query.page, 2);
                assert_eq!(query.sort_dir, SortDir::Asc);
                assert_eq!(query.filter("status"), Some("ACTIVE"));
            }
            other => panic!("expected list route, got {:?}", other),
        }

        let rebuilt = AdminRoute::parse(&route.to_string()).unwrap();
        assert_eq!(rebuilt, route);
    }

    #[test]
    fn test_auth_routes() {
        assert_eq!(AdminRoute::parse("/").unwrap(), AdminRoute::Dashboard);
        assert_eq!(AdminRoute::parse("/login").unwrap(), AdminRoute::Login);
        assert_eq!(
            AdminRoute::parse("/reset-password?token=abc").unwrap(),
            AdminRoute::ResetPassword {
                token: Some("abc".to_string())
            }
        );
        assert!(!AdminRoute::Login.requires_auth());
        assert!(AdminRoute::Dashboard.requires_auth());
    }

    #[test]
    fn test_unknown_routes() {
        assert_eq!(
            AdminRoute::parse("/widgets/list"),
            Err(RouteError::UnknownEntity("widgets".to_string()))
        );
        assert!(matches!(
            AdminRoute::parse("/skills/s1/edit/extra"),
            Err(RouteError::Unknown(_))
        ));
    }

    #[test]
    fn test_ids_are_encoded() {
        let route = AdminRoute::Edit {
            entity: "resumes".to_string(),
            id: "a b".to_string(),
        };
        assert_eq!(route.to_string(), "/resumes/a%20b/edit");
        assert_eq!(AdminRoute::parse(&route.to_string()).unwrap(), route);
    }
}
