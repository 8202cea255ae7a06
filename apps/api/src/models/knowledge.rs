use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One accomplishment from the knowledge base.
///
/// Only `result` is required; any other fields (project, situation, skills...)
/// are carried through untouched into the cover-letter prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Accomplishment {
    pub result: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

pub type KnowledgeBase = Vec<Accomplishment>;
