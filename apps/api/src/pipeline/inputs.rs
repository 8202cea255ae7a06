//! Load phase inputs: the master profile, the knowledge base and the style sample.

use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::info;

use crate::errors::PipelineError;
use crate::models::knowledge::KnowledgeBase;
use crate::models::profile::CandidateProfile;

#[derive(Debug, Clone)]
pub struct CandidateInputs {
    pub profile: CandidateProfile,
    pub knowledge_base: KnowledgeBase,
    pub style_sample: String,
}

/// Reads all three inputs, failing on the first one that is missing or unreadable.
pub async fn load_inputs(
    profile_path: &Path,
    knowledge_base_path: &Path,
    writing_style_path: &Path,
) -> Result<CandidateInputs, PipelineError> {
    let profile: CandidateProfile = read_json(profile_path).await?;
    let knowledge_base: KnowledgeBase = read_json(knowledge_base_path).await?;
    let style_sample = read_text(writing_style_path).await?;

    info!(
        "Loaded profile ({} roles), {} accomplishments, {} chars of style sample",
        profile.work_experience.len(),
        knowledge_base.len(),
        style_sample.len()
    );

    Ok(CandidateInputs {
        profile,
        knowledge_base,
        style_sample,
    })
}

async fn read_text(path: &Path) -> Result<String, PipelineError> {
    tokio::fs::read_to_string(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => PipelineError::MissingInputFile(path.to_path_buf()),
        _ => PipelineError::InvalidInputFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    })
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, PipelineError> {
    let raw = read_text(path).await?;
    serde_json::from_str(&raw).map_err(|e| PipelineError::InvalidInputFile {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
