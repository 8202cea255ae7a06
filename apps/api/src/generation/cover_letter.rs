//! Cover Letter Composer: draft stage then style stage, strictly in sequence.
//!
//! The style stage is allowed to fail: the unrevised draft is returned instead
//! and the composer still succeeds. A failed draft stage is a hard failure.

use tracing::{info, warn};

use crate::errors::PipelineError;
use crate::generation::insights::CompanyInsights;
use crate::generation::prompts::{fill, COVER_LETTER_PROMPT_TEMPLATE};
use crate::generation::style::apply_writing_style;
use crate::llm_client::TextGenerator;
use crate::models::job::JobPosting;
use crate::models::knowledge::KnowledgeBase;
use crate::recorder::naming::artifact_file_name;

#[derive(Debug, Clone)]
pub struct CoverLetter {
    pub company: String,
    pub text: String,
    /// False when the style stage was skipped or fell back to the draft.
    pub style_applied: bool,
}

impl CoverLetter {
    pub fn file_name(&self) -> String {
        artifact_file_name("Cover_Letter", &self.company, "txt")
    }
}

pub async fn compose_cover_letter(
    job: &JobPosting,
    insights: &CompanyInsights,
    knowledge_base: &KnowledgeBase,
    style_sample: &str,
    llm: &dyn TextGenerator,
) -> Result<CoverLetter, PipelineError> {
    info!("Drafting cover letter for {} at {}", job.title, job.company);

    let knowledge_json = serde_json::to_string_pretty(knowledge_base).map_err(|e| {
        PipelineError::UnexpectedFailure(format!("Failed to serialize knowledge base: {e}"))
    })?;

    let prompt = fill(
        COVER_LETTER_PROMPT_TEMPLATE,
        &[
            ("job_title", job.title.as_str()),
            ("company_name", job.company.as_str()),
            ("company_insights", insights.as_str()),
            ("knowledge_base", knowledge_json.as_str()),
            ("job_description", job.description.as_str()),
        ],
    );

    let draft = llm
        .complete(&prompt)
        .await
        .map_err(|e| PipelineError::TailoringFailure {
            target: "cover letter draft".to_string(),
            reason: e.to_string(),
        })?;

    if style_sample.trim().is_empty() {
        warn!("Writing-style sample is empty, keeping the unrevised draft");
        return Ok(CoverLetter {
            company: job.company.clone(),
            text: draft,
            style_applied: false,
        });
    }

    let (text, style_applied) =
        match apply_writing_style(&draft, style_sample, "cover letter", llm).await {
            Ok(revised) => (revised, true),
            Err(e) => {
                warn!("Could not apply writing style, keeping the unrevised draft: {e}");
                (draft, false)
            }
        };

    Ok(CoverLetter {
        company: job.company.clone(),
        text,
        style_applied,
    })
}
