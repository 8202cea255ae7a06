//! Style transfer: revises generated text toward the author's own voice
//! while keeping every skill, metric and technical term.

use tracing::info;

use crate::generation::prompts::{fill, STYLE_TRANSFER_PROMPT_TEMPLATE};
use crate::llm_client::prompts::PRESERVATION_INSTRUCTION;
use crate::llm_client::{LlmError, TextGenerator};

pub async fn apply_writing_style(
    draft: &str,
    style_examples: &str,
    text_type: &str,
    llm: &dyn TextGenerator,
) -> Result<String, LlmError> {
    info!("Applying personal writing style to the {text_type}");
    let prompt = fill(
        STYLE_TRANSFER_PROMPT_TEMPLATE,
        &[
            ("text_type", text_type),
            ("preservation_instruction", PRESERVATION_INSTRUCTION),
            ("style_examples", style_examples),
            ("draft", draft),
        ],
    );
    llm.complete(&prompt).await
}
