//! Content Rewriter: builds a résumé tailored to one company.
//!
//! Flow: rewrite summary (1 call) → rewrite each work-experience entry
//! (1 call per entry, input order) → assemble the Markdown document.
//!
//! All-or-nothing: the first failed call aborts the build and nothing is returned
//! for persisting.

use tracing::info;

use crate::errors::PipelineError;
use crate::generation::insights::CompanyInsights;
use crate::generation::keywords::MatchedKeywords;
use crate::generation::prompts::{
    fill, EXPERIENCE_REWRITE_PROMPT_TEMPLATE, NO_KEYWORDS_PLACEHOLDER,
    SUMMARY_REWRITE_PROMPT_TEMPLATE,
};
use crate::llm_client::TextGenerator;
use crate::models::profile::{CandidateProfile, WorkExperience};
use crate::recorder::naming::artifact_file_name;

/// A fully assembled résumé, not yet written anywhere.
#[derive(Debug, Clone)]
pub struct TailoredResume {
    pub company: String,
    pub document: String,
}

impl TailoredResume {
    pub fn file_name(&self) -> String {
        artifact_file_name("CV", &self.company, "md")
    }
}

pub async fn build_tailored_resume(
    profile: &CandidateProfile,
    keywords: &MatchedKeywords,
    company_name: &str,
    insights: &CompanyInsights,
    bullet_count: usize,
    llm: &dyn TextGenerator,
) -> Result<TailoredResume, PipelineError> {
    info!("Tailoring professional summary for {company_name}");
    let summary_prompt = fill(
        SUMMARY_REWRITE_PROMPT_TEMPLATE,
        &[
            ("company_name", company_name),
            ("company_insights", insights.as_str()),
            ("summary", profile.summary.as_str()),
        ],
    );
    let summary = llm
        .complete(&summary_prompt)
        .await
        .map_err(|e| PipelineError::TailoringFailure {
            target: "professional summary".to_string(),
            reason: e.to_string(),
        })?;

    let keyword_list = keyword_list(keywords);
    let mut sections = Vec::with_capacity(profile.work_experience.len());

    for job in &profile.work_experience {
        info!("Tailoring experience from: {}", job.company);
        let prompt = build_experience_prompt(job, &keyword_list, bullet_count);
        let rewritten = llm
            .complete(&prompt)
            .await
            .map_err(|e| PipelineError::TailoringFailure {
                target: format!("experience at {}", job.company),
                reason: e.to_string(),
            })?;
        sections.push(rewritten);
    }

    info!(
        "Tailored resume for {company_name}: summary + {} experience sections",
        sections.len()
    );

    Ok(TailoredResume {
        company: company_name.to_string(),
        document: render_document(profile, &summary, &sections),
    })
}

fn keyword_list(keywords: &MatchedKeywords) -> String {
    if keywords.is_empty() {
        NO_KEYWORDS_PLACEHOLDER.to_string()
    } else {
        keywords.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
    }
}

fn build_experience_prompt(job: &WorkExperience, keyword_list: &str, bullet_count: usize) -> String {
    let bullets = job
        .bullet_points
        .iter()
        .map(|b| format!("- {}", b.text))
        .collect::<Vec<_>>()
        .join("\n");

    let min_bullets = bullet_count.saturating_sub(1).max(1).to_string();
    let max_bullets = bullet_count.to_string();

    fill(
        EXPERIENCE_REWRITE_PROMPT_TEMPLATE,
        &[
            ("keywords", keyword_list),
            ("company", job.company.as_str()),
            ("company_description", job.company_description.as_str()),
            ("bullets", bullets.as_str()),
            ("min_bullets", min_bullets.as_str()),
            ("max_bullets", max_bullets.as_str()),
        ],
    )
}

/// Header, summary, one section per entry (same order as `profile.work_experience`),
/// skills, and education when present.
fn render_document(profile: &CandidateProfile, summary: &str, sections: &[String]) -> String {
    let contact = &profile.contact_info;
    let mut doc = format!("# {}\n\n{}\n\n", contact.name, contact.contact_line());

    doc.push_str("## Professional Summary\n\n");
    doc.push_str(summary.trim());
    doc.push_str("\n\n## Work Experience\n\n");

    for (job, body) in profile.work_experience.iter().zip(sections) {
        doc.push_str(&format!(
            "### {} | {}\n\n*{}*\n\n{}\n\n",
            job.title,
            job.company,
            job.dates,
            body.trim()
        ));
    }

    let skills = &profile.skills;
    if !skills.technical_skills.is_empty() || !skills.soft_skills.is_empty() {
        doc.push_str("## Skills\n\n");
        if !skills.technical_skills.is_empty() {
            doc.push_str(&format!("**Technical:** {}\n\n", skills.technical_skills.join(", ")));
        }
        if !skills.soft_skills.is_empty() {
            doc.push_str(&format!("**Soft skills:** {}\n\n", skills.soft_skills.join(", ")));
        }
    }

    if !profile.education.is_empty() {
        doc.push_str("## Education\n\n");
        for edu in &profile.education {
            match &edu.dates {
                Some(dates) => {
                    doc.push_str(&format!("- {}, {} ({dates})\n", edu.degree, edu.institution))
                }
                None => doc.push_str(&format!("- {}, {}\n", edu.degree, edu.institution)),
            }
        }
        doc.push('\n');
    }

    doc.trim_end().to_string() + "\n"
}
