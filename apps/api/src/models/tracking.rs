use serde::{Deserialize, Serialize};

/// One row of the append-only application tracking log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingRecord {
    pub timestamp: String,
    pub company: String,
    pub title: String,
    pub status: String,
    pub location: String,
    pub source: String,
    pub link: String,
    pub folder: String,
    pub notes: String,
}
