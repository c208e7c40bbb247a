// The main résumé: upload, parse, replace, and original-file download.

pub mod handlers;
pub mod parse;
pub mod prompts;
