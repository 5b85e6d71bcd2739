//! HTML rendering of a public portfolio
//!
//! Every piece of record text is escaped; links are only emitted for
//! `http(s)` URLs and site-relative paths.

use chrono::NaiveDate;

use crate::model::{Entity, Experience};
use crate::portfolio::PublicPortfolio;

/// Escape text for HTML content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Link target safe to emit, or `#`
fn safe_href(url: &str) -> String {
    let trimmed = url.trim();
    let lower = trimmed.to_lowercase();
    let site_relative =
        trimmed.starts_with('/') && !trimmed.starts_with("//") && !trimmed.starts_with("/\\");
    if lower.starts_with("https://") || lower.starts_with("http://") || site_relative {
        escape(trimmed)
    } else {
        "#".to_string()
    }
}

fn link(url: &str, text: &str) -> String {
    format!(
        r#"<a href="{}" rel="noopener">{}</a>"#,
        safe_href(url),
        escape(text)
    )
}

fn month(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format("%b %Y").to_string())
}

fn period(start: Option<NaiveDate>, end: Option<NaiveDate>, ongoing: bool) -> String {
    let end = if ongoing {
        Some("Present".to_string())
    } else {
        month(end)
    };
    match (month(start), end) {
        (Some(from), Some(to)) => format!("{} – {}", from, to),
        (Some(from), None) => from,
        (None, Some(to)) => to,
        (None, None) => String::new(),
    }
}

fn section(out: &mut String, id: &str, title: &str, items: Vec<String>) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!(
        "<section id=\"{}\">\n<h2>{}</h2>\n<ul>\n",
        id,
        escape(title)
    ));
    for item in items {
        out.push_str("<li>");
        out.push_str(&item);
        out.push_str("</li>\n");
    }
    out.push_str("</ul>\n</section>\n");
}

fn experience_item(e: &Experience) -> String {
    let mut item = format!(
        "<strong>{}</strong> · {}",
        escape(&e.role),
        escape(&e.company)
    );
    let when = period(e.start_date, e.end_date, e.currently_working);
    if !when.is_empty() {
        item.push_str(&format!(" <small>{}</small>", escape(&when)));
    }
    if let Some(description) = &e.description {
        item.push_str(&format!("<p>{}</p>", escape(description)));
    }
    item
}

/// Full page for a (visible) portfolio
pub fn portfolio_page(portfolio: &PublicPortfolio) -> String {
    let profile = &portfolio.profile;
    let name = escape(profile.display_name());
    let mut out = String::new();

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    out.push_str(&format!("<title>{} – Portfolio</title>\n", name));
    if let Some(template) = &portfolio.template {
        if let Some(slug) = &template.slug {
            out.push_str(&format!(
                "<meta name=\"template\" content=\"{}\">\n",
                escape(slug)
            ));
        }
    }
    out.push_str("</head>\n<body>\n<header>\n");

    if !portfolio.navlinks.is_empty() {
        out.push_str("<nav>");
        for nav in &portfolio.navlinks {
            out.push_str(&link(&nav.path, &nav.label));
        }
        out.push_str("</nav>\n");
    }

    if let Some(avatar) = &profile.avatar_url {
        out.push_str(&format!(
            "<img class=\"avatar\" src=\"{}\" alt=\"{}\">\n",
            safe_href(avatar),
            name
        ));
    }
    out.push_str(&format!("<h1>{}</h1>\n", name));
    if let Some(headline) = &profile.headline {
        out.push_str(&format!("<p class=\"headline\">{}</p>\n", escape(headline)));
    }
    if let Some(location) = &profile.location {
        out.push_str(&format!("<p class=\"location\">{}</p>\n", escape(location)));
    }
    out.push_str("</header>\n<main>\n");

    if let Some(bio) = &profile.bio {
        out.push_str(&format!(
            "<section id=\"about\">\n<h2>About</h2>\n<p>{}</p>\n</section>\n",
            escape(bio)
        ));
    }

    section(
        &mut out,
        "experience",
        "Experience",
        portfolio.experiences.iter().map(experience_item).collect(),
    );

    section(
        &mut out,
        "education",
        "Education",
        portfolio
            .educations
            .iter()
            .map(|e| {
                let mut item = format!(
                    "<strong>{}</strong> · {}",
                    escape(&e.degree),
                    escape(&e.institution)
                );
                if let Some(field) = &e.field_of_study {
                    item.push_str(&format!(", {}", escape(field)));
                }
                let when = period(e.start_date, e.end_date, false);
                if !when.is_empty() {
                    item.push_str(&format!(" <small>{}</small>", escape(&when)));
                }
                item
            })
            .collect(),
    );

    section(
        &mut out,
        "skills",
        "Skills",
        portfolio
            .skills
            .iter()
            .map(|s| match s.proficiency {
                Some(level) => format!("{} <small>{}%</small>", escape(&s.name), level),
                None => escape(&s.name),
            })
            .collect(),
    );

    section(
        &mut out,
        "achievements",
        "Achievements",
        portfolio
            .achievements
            .iter()
            .map(|a| {
                let title = match &a.url {
                    Some(url) => link(url, a.title()),
                    None => escape(a.title()),
                };
                match &a.issuer {
                    Some(issuer) => format!("{} · {}", title, escape(issuer)),
                    None => title,
                }
            })
            .collect(),
    );

    section(
        &mut out,
        "testimonials",
        "Testimonials",
        portfolio
            .testimonials
            .iter()
            .map(|t| {
                let mut by = escape(&t.name);
                if let Some(company) = &t.company {
                    by.push_str(&format!(", {}", escape(company)));
                }
                format!("<blockquote>{}</blockquote><cite>{}</cite>", escape(&t.message), by)
            })
            .collect(),
    );

    if let Some(resume) = portfolio.primary_resume() {
        out.push_str(&format!(
            "<section id=\"resume\">\n<h2>Resume</h2>\n<p>{}</p>\n</section>\n",
            link(&resume.file_url, &resume.title)
        ));
    }

    out.push_str("</main>\n<footer>\n");
    for social in &portfolio.social_links {
        out.push_str(&link(&social.url, &social.platform));
        out.push('\n');
    }
    out.push_str("</footer>\n</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Profile, RecordMeta, SocialLink};

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_unsafe_links_neutralised() {
        assert_eq!(safe_href("javascript:alert(1)"), "#");
        assert_eq!(safe_href("https://example.com/?a=1&b=2"), "https://example.com/?a=1&amp;b=2");
        assert_eq!(safe_href("/blog"), "/blog");
        assert_eq!(safe_href("//evil.example/x"), "#");
        assert_eq!(safe_href("/\\evil.example"), "#");
    }

    #[test]
    fn test_period() {
        let start = NaiveDate::from_ymd_opt(2021, 3, 1);
        let end = NaiveDate::from_ymd_opt(2023, 6, 30);
        assert_eq!(period(start, end, false), "Mar 2021 – Jun 2023");
        assert_eq!(period(start, None, true), "Mar 2021 – Present");
        assert_eq!(period(None, None, false), "");
    }

    #[test]
    fn test_page_contents_escaped() {
        let portfolio = PublicPortfolio {
            profile: Profile {
                id: "p1".to_string(),
                username: "ada".to_string(),
                full_name: Some("Ada <Lovelace>".to_string()),
                bio: Some("Writes <b>programs</b>".to_string()),
                ..Default::default()
            },
            social_links: vec![SocialLink {
                meta: RecordMeta::new("l1"),
                platform: "GitHub".to_string(),
                url: "javascript:steal()".to_string(),
                icon: None,
            }],
            ..Default::default()
        };

        let html = portfolio_page(&portfolio);
        assert!(html.contains("<h1>Ada &lt;Lovelace&gt;</h1>"));
        assert!(html.contains("Writes &lt;b&gt;programs&lt;/b&gt;"));
        assert!(html.contains(r##"<a href="#" rel="noopener">GitHub</a>"##));
        assert!(!html.contains("javascript:"));
        assert!(!html.contains("id=\"skills\""));
    }
}
