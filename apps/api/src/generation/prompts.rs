// All prompt templates for the generation stages.
// Placeholders are `{name}` and are filled with `fill` before sending.

/// Company summary prompt. Replace: {about_text}
pub const COMPANY_INSIGHTS_PROMPT_TEMPLATE: &str = r#"You are a sharp business analyst. Read the following text from a company's website.
Summarize the company's core mission, key values, and primary business goals in 3-4 bullet points.

WEBSITE TEXT:
---
{about_text}
---"#;

/// Professional summary rewrite. Replace: {company_name}, {company_insights}, {summary}
pub const SUMMARY_REWRITE_PROMPT_TEMPLATE: &str = r#"Rewrite the following professional summary to be tailored for a job application at {company_name}.
Subtly incorporate the company's values and mission, which are summarized here: "{company_insights}".
Keep it concise and impactful.

ORIGINAL SUMMARY:
---
{summary}
---

REVISED SUMMARY:"#;

/// Work-experience rewrite, one call per entry.
/// Replace: {keywords}, {company}, {company_description}, {bullets}, {min_bullets}, {max_bullets}
pub const EXPERIENCE_REWRITE_PROMPT_TEMPLATE: &str = r#"You are an expert resume writer. Your task is to rewrite a description of a past work experience to be highly relevant for a new job application.

TARGET KEYWORDS FOR THE NEW JOB:
---
{keywords}
---

ORIGINAL WORK EXPERIENCE DATA:
- Company: {company}
- Company Description: {company_description}
- My Accomplishments:
{bullets}
---

INSTRUCTIONS:
1. First, write a single, concise paragraph (2-3 sentences) that describes the company. You MUST enhance this description by naturally weaving in some of the TARGET KEYWORDS.
2. Second, write {min_bullets}-{max_bullets} bullet points that describe my accomplishments. You MUST rewrite these bullet points to be more impactful and to integrate the TARGET KEYWORDS where they fit naturally. Focus on achievements and metrics.

Provide only the rewritten paragraph and the bullet points."#;

/// Shown in place of the keyword list when nothing matched.
pub const NO_KEYWORDS_PLACEHOLDER: &str =
    "(no direct keyword matches; emphasize transferable achievements)";

/// Cover letter draft, problem/solution framing.
/// Replace: {job_title}, {company_name}, {company_insights}, {knowledge_base}, {job_description}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Act as a professional career coach writing a cover letter for the {job_title} role at {company_name}.
The tone must be professional and confident.
Structure the letter using the "Problem-Solution" framework.

First, identify the company's core need from the job description: "{job_description}"
Then, write the cover letter. Acknowledge their need and frame my experience as the direct solution.
To make your points, you MUST select the single most relevant accomplishment from the "Knowledge Base" provided below and weave its specific 'result' into the letter to provide a concrete, metric-driven example.
Also, subtly reference the company's values, which are: "{company_insights}".

Address the letter to "[Hiring Manager Name]".

--- KNOWLEDGE BASE OF ACCOMPLISHMENTS ---
{knowledge_base}
--- END KNOWLEDGE BASE ---"#;

/// Style transfer. Replace: {style_examples}, {text_type}, {preservation_instruction}, {draft}
pub const STYLE_TRANSFER_PROMPT_TEMPLATE: &str = r#"You are a writing expert specializing in style transfer. Your goal is to revise an AI-generated text to match the personal writing style of the author.
It should sound confident, professional, and human.

First, carefully analyze the following examples of the author's writing to understand their tone, phrasing, and rhythm:
--- STYLE EXAMPLES ---
{style_examples}
--- END STYLE EXAMPLES ---

Now, using that style, revise the following AI-generated {text_type}.
{preservation_instruction}

--- AI DRAFT TO REVISE ---
{draft}
--- END AI DRAFT ---"#;

/// Fills `{key}` placeholders in one pass over `template`.
///
/// Inserted values are never rescanned, so a value that itself contains a
/// placeholder is sent literally. Braces that do not name a known key are kept.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let hit = tail.find('}').and_then(|close| {
            let key = &tail[1..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, value)| (close, *value))
        });
        match hit {
            Some((close, value)) => {
                out.push_str(value);
                rest = &tail[close + 1..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
