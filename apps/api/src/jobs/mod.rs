// Jobs: CRUD over saved postings plus the LLM-backed inference endpoints.

pub mod cache;
pub mod compatibility;
pub mod handlers;
pub mod inference;
pub mod prompts;
pub mod research;
pub mod scrape;
