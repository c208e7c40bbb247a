// Saved résumé snapshots, tailoring, and HTML/PDF output.

pub mod handlers;
pub mod print;
pub mod prompts;
pub mod render;
pub mod tailoring;
