// Shared prompt constants and prompt-building utilities.
// Each stage that needs generation calls defines its own prompts next to it.
// This file contains cross-cutting prompt fragments.

/// System prompt sent with every completion.
pub const WRITER_SYSTEM: &str = "You are a meticulous career-writing assistant. \
    Respond with the requested text only. \
    Do NOT add preambles, explanations, or apologies. \
    Do NOT invent employers, dates, or metrics that are not in the provided material.";

/// Instruction appended to every rewrite that must keep factual content intact.
pub const PRESERVATION_INSTRUCTION: &str = "\
    CRITICALLY, do not remove any key skills, metrics, or technical terms from the original text.";
