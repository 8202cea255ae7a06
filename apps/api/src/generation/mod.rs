// Generation stages: company summary, keyword matching, résumé tailoring,
// cover letter drafting and style transfer.
// All generation calls go through the TextGenerator trait.

pub mod cover_letter;
pub mod insights;
pub mod keywords;
pub mod prompts;
pub mod resume;
pub mod style;
