//! Company Insight Summarizer.
//!
//! Absent or blank company text short-circuits to a fixed sentinel with no
//! generation call. Otherwise the text is capped before it is sent.

use std::fmt;

use tracing::info;

use crate::errors::PipelineError;
use crate::generation::prompts::{fill, COMPANY_INSIGHTS_PROMPT_TEMPLATE};
use crate::llm_client::TextGenerator;

/// Summary used when there is no company text to work from.
pub const NO_COMPANY_INFORMATION: &str = "No company information available.";

/// Company text beyond this many characters is not sent.
pub const MAX_COMPANY_TEXT_CHARS: usize = 4000;

/// Opaque mission/values summary of the target company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyInsights(String);

impl CompanyInsights {
    pub fn unavailable() -> Self {
        Self(NO_COMPANY_INFORMATION.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_unavailable(&self) -> bool {
        self.0 == NO_COMPANY_INFORMATION
    }
}

impl fmt::Display for CompanyInsights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub async fn summarize_company(
    about_text: Option<&str>,
    llm: &dyn TextGenerator,
) -> Result<CompanyInsights, PipelineError> {
    let Some(text) = about_text.map(str::trim).filter(|t| !t.is_empty()) else {
        info!("No company text available, skipping company summary");
        return Ok(CompanyInsights::unavailable());
    };

    info!("Summarizing company information ({} chars)", text.chars().count());
    let prompt = fill(
        COMPANY_INSIGHTS_PROMPT_TEMPLATE,
        &[("about_text", truncate_chars(text, MAX_COMPANY_TEXT_CHARS))],
    );

    llm.complete(&prompt)
        .await
        .map(CompanyInsights)
        .map_err(|e| PipelineError::SummarizationFailure(e.to_string()))
}

/// Longest prefix of `text` holding at most `max` characters.
fn truncate_chars(text: &str, max: usize) -> &str {
    text.char_indices()
        .nth(max)
        .map(|(idx, _)| &text[..idx])
        .unwrap_or(text)
}
