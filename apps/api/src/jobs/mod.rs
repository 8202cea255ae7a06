//! Job Extractor: turns a fetched job page into a structured `JobPosting`.
//!
//! Pure: no network, no filesystem. Fetching is the Page Fetcher's concern, so
//! every error raised here is either an unsupported site or missing markup.

pub mod extractor;
pub mod source;

pub use extractor::{extract_job, ExtractedJob};
pub use source::detect_source;
