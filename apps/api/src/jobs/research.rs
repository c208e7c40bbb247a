//! Company research: best-effort aggregation from a public instant-answer search API.
//!
//! Never fails: upstream problems produce an empty result and a warning.

use std::collections::HashSet;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

const SEARCH_API_URL: &str = "https://api.duckduckgo.com/";
const MAX_SOURCES: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyResearch {
    pub company_name: String,
    pub summary: Option<String>,
    pub sources: Vec<ResearchSource>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResearchSource {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Default, Deserialize)]
struct InstantAnswer {
    #[serde(rename = "AbstractText", default)]
    abstract_text: String,
    #[serde(rename = "AbstractSource", default)]
    abstract_source: String,
    #[serde(rename = "AbstractURL", default)]
    abstract_url: String,
    #[serde(rename = "RelatedTopics", default)]
    related_topics: Vec<RelatedTopic>,
}

/// Either a single topic or a named group of topics.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RelatedTopic {
    Group {
        #[serde(rename = "Topics")]
        topics: Vec<RelatedTopic>,
    },
    Topic {
        #[serde(rename = "Text", default)]
        text: String,
        #[serde(rename = "FirstURL", default)]
        first_url: String,
    },
}

pub async fn research_company(http: &Client, company_name: &str) -> CompanyResearch {
    let query = format!("{company_name} company");
    let result = http
        .get(SEARCH_API_URL)
        .query(&[
            ("q", query.as_str()),
            ("format", "json"),
            ("no_html", "1"),
            ("skip_disambig", "1"),
        ])
        .send()
        .await
        .and_then(|r| r.error_for_status());

    let answer = match result {
        Ok(response) => match response.json::<InstantAnswer>().await {
            Ok(answer) => answer,
            Err(e) => {
                warn!("Company research for '{company_name}' returned unreadable data: {e}");
                InstantAnswer::default()
            }
        },
        Err(e) => {
            warn!("Company research for '{company_name}' failed: {e}");
            InstantAnswer::default()
        }
    };

    aggregate(company_name, answer)
}

fn aggregate(company_name: &str, answer: InstantAnswer) -> CompanyResearch {
    let mut sources = Vec::new();
    if !answer.abstract_url.is_empty() {
        let title = if answer.abstract_source.is_empty() {
            company_name.to_string()
        } else {
            answer.abstract_source.clone()
        };
        sources.push(ResearchSource {
            title,
            url: answer.abstract_url.clone(),
        });
    }
    collect_topics(answer.related_topics, &mut sources);
    let mut seen = HashSet::new();
    sources.retain(|s| seen.insert(s.url.clone()));
    sources.truncate(MAX_SOURCES);

    let summary = Some(answer.abstract_text.trim().to_string()).filter(|s| !s.is_empty());

    CompanyResearch {
        company_name: company_name.to_string(),
        summary,
        sources,
    }
}

fn collect_topics(topics: Vec<RelatedTopic>, out: &mut Vec<ResearchSource>) {
    for topic in topics {
        match topic {
            RelatedTopic::Group { topics } => collect_topics(topics, out),
            RelatedTopic::Topic { text, first_url } => {
                if !first_url.is_empty() && !text.is_empty() {
                    out.push(ResearchSource {
                        title: text,
                        url: first_url,
                    });
                }
            }
        }
    }
}
