use std::fmt;

/// Job sites whose posting markup we know how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobSource {
    LinkedIn,
}

impl fmt::Display for JobSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobSource::LinkedIn => f.write_str("LinkedIn"),
        }
    }
}

/// A scraped job posting. Immutable once extracted.
#[derive(Debug, Clone, PartialEq)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub source: JobSource,
    pub link: String,
}
