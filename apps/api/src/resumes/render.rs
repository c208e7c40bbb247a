//! Renders a résumé document as a standalone, print-ready HTML page.

use std::fmt::Write;

use crate::models::resume::ResumeDocument;

const STYLE: &str = r#"
body { font-family: "Inter", "Helvetica Neue", Arial, sans-serif; font-size: 11pt; line-height: 1.35; color: #1a1a1a; margin: 0; }
main { max-width: 7.5in; margin: 0 auto; padding: 0.5in 0; }
h1 { font-size: 20pt; margin: 0; }
h2 { font-size: 12pt; text-transform: uppercase; letter-spacing: 0.05em; border-bottom: 1px solid #999; margin: 14pt 0 4pt; }
.contact { color: #444; margin-top: 2pt; }
.entry { margin-bottom: 6pt; }
.entry-head { display: flex; justify-content: space-between; font-weight: 600; }
.muted { color: #555; font-weight: normal; }
ul { margin: 2pt 0 0 14pt; padding: 0; }
.cover-letter { page-break-before: always; white-space: pre-wrap; }
@page { size: letter; margin: 0.5in; }
"#;

pub fn render_html(resume: &ResumeDocument) -> String {
    let mut html = String::with_capacity(8 * 1024);
    let title = if resume.contact.name.trim().is_empty() {
        "Resume".to_string()
    } else {
        escape(&resume.contact.name)
    };

    // Writes to a String cannot fail.
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n<main>\n"
    );

    render_header(&mut html, resume);

    if !resume.summary.trim().is_empty() {
        let _ = write!(html, "<h2>Summary</h2>\n<p>{}</p>\n", escape(&resume.summary));
    }

    render_skills(&mut html, resume);
    render_experience(&mut html, resume);
    render_projects(&mut html, resume);
    render_education(&mut html, resume);
    render_certifications(&mut html, resume);

    if let Some(letter) = resume.cover_letter.as_deref().filter(|l| !l.trim().is_empty()) {
        let _ = write!(
            html,
            "<section class=\"cover-letter\">\n<h2>Cover Letter</h2>\n<p>{}</p>\n</section>\n",
            escape(letter)
        );
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn render_header(html: &mut String, resume: &ResumeDocument) {
    let contact = &resume.contact;
    let _ = writeln!(html, "<header>\n<h1>{}</h1>", escape(&contact.name));

    let details: Vec<String> = [
        &contact.email,
        &contact.phone,
        &contact.location,
        &contact.linkedin,
        &contact.github,
        &contact.website,
    ]
    .into_iter()
    .flatten()
    .filter(|d| !d.trim().is_empty())
    .map(|d| escape(d))
    .collect();

    if !details.is_empty() {
        let _ = writeln!(html, "<div class=\"contact\">{}</div>", details.join(" · "));
    }
    html.push_str("</header>\n");
}

fn render_skills(html: &mut String, resume: &ResumeDocument) {
    let skills = &resume.skills;
    if skills.technical.is_empty() && skills.soft.is_empty() {
        return;
    }
    html.push_str("<h2>Skills</h2>\n");
    if !skills.technical.is_empty() {
        let _ = writeln!(html, "<p><strong>Technical:</strong> {}</p>", join_escaped(&skills.technical));
    }
    if !skills.soft.is_empty() {
        let _ = writeln!(html, "<p><strong>Soft:</strong> {}</p>", join_escaped(&skills.soft));
    }
}

fn render_experience(html: &mut String, resume: &ResumeDocument) {
    if resume.work_experience.is_empty() {
        return;
    }
    html.push_str("<h2>Experience</h2>\n");
    for job in &resume.work_experience {
        let end = job.end_date.as_deref().unwrap_or("Present");
        let _ = write!(
            html,
            "<div class=\"entry\">\n<div class=\"entry-head\"><span>{} <span class=\"muted\">{}</span></span><span class=\"muted\">{}</span></div>\n",
            escape(&job.title),
            escape(&at_place(&job.company, job.location.as_deref())),
            escape(&date_range(job.start_date.as_deref(), Some(end))),
        );
        render_list(html, &job.responsibilities);
        html.push_str("</div>\n");
    }
}

fn render_projects(html: &mut String, resume: &ResumeDocument) {
    if resume.projects.is_empty() {
        return;
    }
    html.push_str("<h2>Projects</h2>\n");
    for project in &resume.projects {
        let _ = write!(
            html,
            "<div class=\"entry\">\n<div class=\"entry-head\"><span>{}</span><span class=\"muted\">{}</span></div>\n",
            escape(&project.name),
            project.url.as_deref().map(escape).unwrap_or_default(),
        );
        if !project.description.trim().is_empty() {
            let _ = writeln!(html, "<p>{}</p>", escape(&project.description));
        }
        if !project.technologies.is_empty() {
            let _ = writeln!(html, "<p class=\"muted\">{}</p>", join_escaped(&project.technologies));
        }
        html.push_str("</div>\n");
    }
}

fn render_education(html: &mut String, resume: &ResumeDocument) {
    if resume.education.is_empty() {
        return;
    }
    html.push_str("<h2>Education</h2>\n");
    for edu in &resume.education {
        let degree = match edu.field.as_deref().filter(|f| !f.trim().is_empty()) {
            Some(field) => format!("{}, {}", edu.degree, field),
            None => edu.degree.clone(),
        };
        let _ = write!(
            html,
            "<div class=\"entry\">\n<div class=\"entry-head\"><span>{} <span class=\"muted\">{}</span></span><span class=\"muted\">{}</span></div>\n",
            escape(&edu.institution),
            escape(&degree),
            escape(&date_range(edu.start_date.as_deref(), edu.end_date.as_deref())),
        );
        if let Some(grade) = edu.grade.as_deref().filter(|g| !g.trim().is_empty()) {
            let _ = writeln!(html, "<p class=\"muted\">{}</p>", escape(grade));
        }
        html.push_str("</div>\n");
    }
}

fn render_certifications(html: &mut String, resume: &ResumeDocument) {
    if resume.certifications.is_empty() {
        return;
    }
    html.push_str("<h2>Certifications</h2>\n<ul>\n");
    for cert in &resume.certifications {
        let mut line = escape(&cert.name);
        if let Some(issuer) = cert.issuer.as_deref().filter(|i| !i.trim().is_empty()) {
            let _ = write!(line, ", {}", escape(issuer));
        }
        if let Some(date) = cert.date.as_deref().filter(|d| !d.trim().is_empty()) {
            let _ = write!(line, " ({})", escape(date));
        }
        let _ = writeln!(html, "<li>{line}</li>");
    }
    html.push_str("</ul>\n");
}

fn render_list(html: &mut String, items: &[String]) {
    if items.is_empty() {
        return;
    }
    html.push_str("<ul>\n");
    for item in items {
        let _ = writeln!(html, "<li>{}</li>", escape(item));
    }
    html.push_str("</ul>\n");
}

fn at_place(name: &str, location: Option<&str>) -> String {
    match location.filter(|l| !l.trim().is_empty()) {
        Some(location) => format!("{name}, {location}"),
        None => name.to_string(),
    }
}

fn date_range(start: Option<&str>, end: Option<&str>) -> String {
    match (start.filter(|s| !s.is_empty()), end.filter(|e| !e.is_empty())) {
        (Some(s), Some(e)) => format!("{s} – {e}"),
        (Some(s), None) => s.to_string(),
        (None, Some(e)) => e.to_string(),
        (None, None) => String::new(),
    }
}

fn join_escaped(items: &[String]) -> String {
    items.iter().map(|s| escape(s)).collect::<Vec<_>>().join(", ")
}

/// Escapes text for use in HTML element content and quoted attributes.
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
