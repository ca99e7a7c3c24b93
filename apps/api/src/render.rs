//! Rendering gateway — turns a stored resume record into a standalone HTML
//! page for one of the fixed template variants.
//!
//! Template identifiers form a closed enum checked at the boundary; unknown
//! identifiers are rejected before they reach any dispatch or storage.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::models::resume::ResumeData;

/// The fixed template registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    Modern,
    Creative,
    Minimal,
    Tech,
}

impl TemplateId {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateId::Modern => "modern",
            TemplateId::Creative => "creative",
            TemplateId::Minimal => "minimal",
            TemplateId::Tech => "tech",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TemplateId::Modern => "Modern Professional",
            TemplateId::Creative => "Creative Design",
            TemplateId::Minimal => "Minimal Clean",
            TemplateId::Tech => "Tech Focused",
        }
    }

    pub fn all() -> [TemplateId; 4] {
        [
            TemplateId::Modern,
            TemplateId::Creative,
            TemplateId::Minimal,
            TemplateId::Tech,
        ]
    }

    /// Accent colour used by the page header.
    fn accent(&self) -> &'static str {
        match self {
            TemplateId::Modern => "#2563eb",
            TemplateId::Creative => "#db2777",
            TemplateId::Minimal => "#111827",
            TemplateId::Tech => "#059669",
        }
    }

    fn font_stack(&self) -> &'static str {
        match self {
            TemplateId::Tech => "'JetBrains Mono', 'Fira Code', monospace",
            TemplateId::Creative => "'Georgia', serif",
            _ => "'Inter', 'Helvetica Neue', sans-serif",
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateId {
    type Err = UnknownTemplate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "modern" => Ok(TemplateId::Modern),
            "creative" => Ok(TemplateId::Creative),
            "minimal" => Ok(TemplateId::Minimal),
            "tech" => Ok(TemplateId::Tech),
            _ => Err(UnknownTemplate(s.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown template identifier: {0}")]
pub struct UnknownTemplate(pub String);

/// Renders the portfolio page. `show_branding` is true whenever the owning
/// account is not premium; it forces the attribution footer.
pub fn render_portfolio(
    template: TemplateId,
    title: &str,
    data: &ResumeData,
    show_branding: bool,
) -> String {
    let mut body = String::new();

    body.push_str(&format!(
        "<header class=\"hero\"><h1>{}</h1>",
        escape_html(&data.name)
    ));
    let mut contact = Vec::new();
    if !data.email.is_empty() {
        contact.push(escape_html(&data.email));
    }
    if !data.phone.is_empty() {
        contact.push(escape_html(&data.phone));
    }
    if !contact.is_empty() {
        body.push_str(&format!("<p class=\"contact\">{}</p>", contact.join(" · ")));
    }
    body.push_str("</header>");

    if !data.summary.is_empty() {
        body.push_str(&format!(
            "<section><h2>Summary</h2><p>{}</p></section>",
            escape_html(&data.summary)
        ));
    }

    push_list_section(&mut body, "Experience", &data.experience);
    push_list_section(&mut body, "Education", &data.education);
    push_list_section(&mut body, "Skills", &data.skills);
    push_list_section(&mut body, "Projects", &data.projects);

    if show_branding {
        body.push_str(
            "<footer class=\"branding\"><p>Built with FolioHost — \
             <a href=\"/\">create your own portfolio</a></p></footer>",
        );
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n\
         <style>\n\
         body {{ font-family: {font}; max-width: 48rem; margin: 0 auto; padding: 2rem; color: #1f2937; }}\n\
         .hero h1 {{ color: {accent}; margin-bottom: 0.25rem; }}\n\
         .contact {{ color: #6b7280; }}\n\
         h2 {{ border-bottom: 2px solid {accent}; padding-bottom: 0.25rem; }}\n\
         .branding {{ margin-top: 3rem; font-size: 0.8rem; color: #9ca3af; text-align: center; }}\n\
         </style>\n</head>\n<body class=\"tpl-{tpl}\">\n{body}\n</body>\n</html>\n",
        title = escape_html(title),
        font = template.font_stack(),
        accent = template.accent(),
        tpl = template.as_str(),
        body = body,
    )
}

fn push_list_section(body: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    body.push_str(&format!("<section><h2>{heading}</h2><ul>"));
    for item in items {
        body.push_str(&format!("<li>{}</li>", escape_html(item)));
    }
    body.push_str("</ul></section>");
}

/// Minimal HTML escaping for user-provided text nodes.
fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data() -> ResumeData {
        ResumeData {
            name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            phone: "555-123-4567".into(),
            summary: "Engineer.".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_from_str_known_identifiers() {
        for id in TemplateId::all() {
            assert_eq!(TemplateId::from_str(id.as_str()).unwrap(), id);
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!(TemplateId::from_str("../../etc/passwd").is_err());
        assert!(TemplateId::from_str("MODERN").is_err());
        assert!(TemplateId::from_str("").is_err());
    }

    #[test]
    fn test_branding_footer_gated_on_flag() {
        let with = render_portfolio(TemplateId::Modern, "Jane", &sample_data(), true);
        let without = render_portfolio(TemplateId::Modern, "Jane", &sample_data(), false);
        assert!(with.contains("Built with FolioHost"));
        assert!(!without.contains("Built with FolioHost"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let mut data = sample_data();
        data.name = "<script>alert(1)</script>".into();
        let html = render_portfolio(TemplateId::Minimal, "x", &data, false);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_empty_sections_omitted() {
        let html = render_portfolio(TemplateId::Tech, "Jane", &sample_data(), false);
        assert!(!html.contains("<h2>Experience</h2>"));
        assert!(!html.contains("<h2>Skills</h2>"));
    }

    #[test]
    fn test_populated_lists_rendered() {
        let mut data = sample_data();
        data.skills = vec!["Rust".into(), "SQL".into()];
        let html = render_portfolio(TemplateId::Creative, "Jane", &data, false);
        assert!(html.contains("<h2>Skills</h2>"));
        assert!(html.contains("<li>Rust</li>"));
    }
}
