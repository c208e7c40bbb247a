//! Fetches a job posting page and reduces it to readable text.

use reqwest::Client;
use tracing::info;

use crate::errors::AppError;

/// Elements whose content is never visible text.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "svg", "template"];

/// Downloads `url` and returns its visible text.
pub async fn fetch_page_text(http: &Client, url: &str) -> Result<String, AppError> {
    let parsed = reqwest::Url::parse(url.trim())
        .map_err(|e| AppError::Validation(format!("Invalid url '{url}': {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AppError::Validation(format!(
            "Only http and https urls are supported, got '{}'",
            parsed.scheme()
        )));
    }

    let response = http
        .get(parsed.clone())
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to fetch {parsed}: {e}")))?;

    let html = response
        .text()
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to read {parsed}: {e}")))?;

    let text = html_to_text(&html);
    info!("Scraped {} characters of text from {}", text.len(), parsed);

    if text.is_empty() {
        return Err(AppError::Validation(format!(
            "No readable text found at {parsed}"
        )));
    }
    Ok(text)
}

/// Strips tags, drops non-visible elements, decodes common entities and
/// collapses whitespace.
pub fn html_to_text(html: &str) -> String {
    let lower = html.to_ascii_lowercase();
    let mut text = String::with_capacity(html.len() / 2);
    let mut pos = 0;

    while pos < html.len() {
        let Some(offset) = html[pos..].find('<') else {
            text.push_str(&html[pos..]);
            break;
        };
        text.push_str(&html[pos..pos + offset]);
        pos += offset;

        if let Some(element) = skipped_element_at(&lower[pos + 1..]) {
            let closing = format!("</{element}");
            pos = match lower[pos..].find(&closing) {
                Some(end) => pos + end + closing.len(),
                None => html.len(),
            };
        }

        pos = match html[pos..].find('>') {
            Some(end) => pos + end + 1,
            None => html.len(),
        };
        text.push(' ');
    }

    collapse_whitespace(&decode_entities(&text))
}

fn skipped_element_at(tag: &str) -> Option<&'static str> {
    SKIPPED_ELEMENTS.iter().copied().find(|name| {
        tag.strip_prefix(name)
            .and_then(|rest| rest.chars().next())
            .is_some_and(|c| c == '>' || c == '/' || c.is_whitespace())
    })
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
