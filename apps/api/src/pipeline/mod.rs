//! Orchestrator: runs one job/company URL pair through the whole pipeline.
//!
//! Flow: Load → Acquire → Analyze → Produce → Record.
//!
//! Phases run strictly in order and never loop back. The first failing phase
//! ends the run. `run` never returns an error: every outcome, good or bad, is a
//! `RunOutcome`. Nothing touches the output folder or the tracking log before
//! Record, so a failed run leaves no artifacts behind.

pub mod inputs;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::errors::PipelineError;
use crate::fetcher::{html::page_text, PageFetcher};
use crate::generation::cover_letter::compose_cover_letter;
use crate::generation::insights::{summarize_company, CompanyInsights};
use crate::generation::keywords::{match_keywords, MatchedKeywords, SkillSet};
use crate::generation::resume::build_tailored_resume;
use crate::jobs::{detect_source, extract_job, ExtractedJob};
use crate::llm_client::TextGenerator;
use crate::pipeline::inputs::{load_inputs, CandidateInputs};
use crate::recorder::{ApplicationArtifact, ApplicationRecorder};

/// Explicit pipeline configuration, handed in at construction.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub profile_path: PathBuf,
    pub knowledge_base_path: PathBuf,
    pub writing_style_path: PathBuf,
    pub output_root: PathBuf,
    pub tracking_log_path: PathBuf,
    /// Target number of bullets per rewritten work-experience entry.
    pub bullet_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Load,
    Acquire,
    Analyze,
    Produce,
    Record,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Load => "Load",
            Phase::Acquire => "Acquire",
            Phase::Analyze => "Analyze",
            Phase::Produce => "Produce",
            Phase::Record => "Record",
        };
        f.write_str(name)
    }
}

/// Terminal state of a run.
#[derive(Debug)]
pub enum RunOutcome {
    Completed(ApplicationArtifact),
    Failed { phase: Phase, error: PipelineError },
}

/// What the user-facing surface shows: a success flag and a message it can
/// display verbatim, plus the cover-letter preview on success.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationResult {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<Phase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_letter_text: Option<String>,
}

impl From<RunOutcome> for ApplicationResult {
    fn from(outcome: RunOutcome) -> Self {
        match outcome {
            RunOutcome::Completed(artifact) => {
                let folder = artifact.folder.display().to_string();
                ApplicationResult {
                    success: true,
                    message: format!(
                        "Successfully generated and logged application in folder: {folder}"
                    ),
                    phase: None,
                    error_kind: None,
                    folder_path: Some(folder),
                    cover_letter_text: Some(artifact.cover_letter_text),
                }
            }
            RunOutcome::Failed { phase, error } => {
                let message = match phase {
                    Phase::Acquire => {
                        format!("Could not scrape the job URL. Please check the link. {error}")
                    }
                    _ => format!("{phase} phase failed: {error}"),
                };
                ApplicationResult {
                    success: false,
                    message,
                    phase: Some(phase),
                    error_kind: Some(error.kind()),
                    folder_path: None,
                    cover_letter_text: None,
                }
            }
        }
    }
}

/// Output of the Analyze phase.
struct Analysis {
    insights: CompanyInsights,
    keywords: MatchedKeywords,
}

pub struct Orchestrator {
    config: PipelineConfig,
    fetcher: Arc<dyn PageFetcher>,
    llm: Arc<dyn TextGenerator>,
    recorder: ApplicationRecorder,
}

impl Orchestrator {
    pub fn new(
        config: PipelineConfig,
        fetcher: Arc<dyn PageFetcher>,
        llm: Arc<dyn TextGenerator>,
    ) -> Self {
        let recorder =
            ApplicationRecorder::new(config.output_root.clone(), config.tracking_log_path.clone());
        Self {
            config,
            fetcher,
            llm,
            recorder,
        }
    }

    /// Runs all phases for one posting.
    ///
    /// `company_url` is the page used for company insights; when it is blank the
    /// company-profile link discovered on the job page is used instead.
    pub async fn run(&self, job_url: &str, company_url: Option<&str>) -> RunOutcome {
        let span = info_span!("application_run", run_id = %Uuid::new_v4());

        async {
            info!("Starting application run for {job_url}");
            match self.run_phases(job_url, company_url).await {
                Ok(artifact) => {
                    info!(
                        "Application run completed: {}",
                        artifact.folder.display()
                    );
                    RunOutcome::Completed(artifact)
                }
                Err((phase, error)) => {
                    error!("Application run failed in {phase} phase: {error}");
                    RunOutcome::Failed { phase, error }
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn run_phases(
        &self,
        job_url: &str,
        company_url: Option<&str>,
    ) -> Result<ApplicationArtifact, (Phase, PipelineError)> {
        info!("Phase: {}", Phase::Load);
        let inputs = load_inputs(
            &self.config.profile_path,
            &self.config.knowledge_base_path,
            &self.config.writing_style_path,
        )
        .await
        .map_err(at(Phase::Load))?;

        info!("Phase: {}", Phase::Acquire);
        let job = self.acquire(job_url).await.map_err(at(Phase::Acquire))?;

        info!("Phase: {}", Phase::Analyze);
        let analysis = self
            .analyze(&job, company_url, &inputs)
            .await
            .map_err(at(Phase::Analyze))?;

        info!("Phase: {}", Phase::Produce);
        let resume = build_tailored_resume(
            &inputs.profile,
            &analysis.keywords,
            &job.posting.company,
            &analysis.insights,
            self.config.bullet_count,
            self.llm.as_ref(),
        )
        .await
        .map_err(at(Phase::Produce))?;

        let cover_letter = compose_cover_letter(
            &job.posting,
            &analysis.insights,
            &inputs.knowledge_base,
            &inputs.style_sample,
            self.llm.as_ref(),
        )
        .await
        .map_err(at(Phase::Produce))?;
        if !cover_letter.style_applied {
            info!("Cover letter kept as unrevised draft");
        }

        info!("Phase: {}", Phase::Record);
        self.recorder
            .record(&job.posting, &resume, &cover_letter)
            .await
            .map_err(at(Phase::Record))
    }

    async fn acquire(&self, job_url: &str) -> Result<ExtractedJob, PipelineError> {
        // Reject unsupported sites before paying for a browser session.
        detect_source(job_url)?;

        let html = self
            .fetcher
            .fetch(job_url)
            .await
            .map_err(|e| PipelineError::FetchFailure {
                url: job_url.to_string(),
                reason: e.to_string(),
            })?;

        let job = extract_job(&html, job_url)?;
        info!(
            "Acquired posting '{}' at '{}' ({})",
            job.posting.title, job.posting.company, job.posting.location
        );
        Ok(job)
    }

    async fn analyze(
        &self,
        job: &ExtractedJob,
        company_url: Option<&str>,
        inputs: &CandidateInputs,
    ) -> Result<Analysis, PipelineError> {
        let target = company_url
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .or(job.company_url.as_deref());

        let about_text = match target {
            Some(url) => match self.fetcher.fetch(url).await {
                Ok(html) => Some(page_text(&html)),
                Err(e) => {
                    warn!("Could not research company website {url}: {e}");
                    None
                }
            },
            None => {
                warn!("No company URL available for {}", job.posting.company);
                None
            }
        };

        let insights = summarize_company(about_text.as_deref(), self.llm.as_ref()).await?;
        if insights.is_unavailable() {
            warn!("Tailoring without company insights");
        }

        let skills = SkillSet::from_profile(&inputs.profile.skills);
        if skills.is_empty() {
            warn!("Candidate profile lists no skills; nothing to match");
        }
        let keywords = match_keywords(&job.posting.description, &skills);
        info!(
            "Found {} of {} skills in the posting: {}",
            keywords.len(),
            skills.len(),
            keywords.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
        );

        Ok(Analysis { insights, keywords })
    }
}

fn at(phase: Phase) -> impl FnOnce(PipelineError) -> (Phase, PipelineError) {
    move |error| (phase, error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::insights::NO_COMPANY_INFORMATION;
    use crate::models::tracking::TrackingRecord;
    use crate::testing::{ScriptedGenerator, StaticFetcher};
    use std::path::Path;

    const JOB_URL: &str = "https://www.linkedin.com/jobs/view/4012345678/";
    const ABOUT_URL: &str = "https://acme.example/about";
    const DISCOVERED_URL: &str = "https://www.linkedin.com/company/acme-analytics";

    const JOB_PAGE: &str = r#"<html><body>
        <h1 class="top-card-layout__title">Data Engineer</h1>
        <a class="topcard__org-name-link" href="https://www.linkedin.com/company/acme-analytics">Acme Analytics</a>
        <span class="topcard__flavor topcard__flavor--bullet">Remote</span>
        <div class="show-more-less-html__markup"><p>Seeking a Python and SQL engineer</p></div>
    </body></html>"#;

    const ABOUT_PAGE: &str =
        "<html><body><h1>About Acme</h1><p>Our mission is trustworthy data.</p></body></html>";

    const PROFILE: &str = r#"{
        "contact_info": {"name": "Ada Lovelace", "email": "ada@example.com"},
        "summary": "Engineer who loves data.",
        "work_experience": [
            {"title": "Engineer", "company": "Globex", "company_description": "Logistics",
             "dates": "2020 - 2024", "bullet_points": [{"text": "Built ETL jobs"}]}
        ],
        "skills": {"technical_skills": ["Python", "SQL", "Java"], "soft_skills": ["Mentoring"]}
    }"#;

    struct Fixture {
        dir: tempfile::TempDir,
        config: PipelineConfig,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let root = dir.path();
            std::fs::write(root.join("master_resume.json"), PROFILE).unwrap();
            std::fs::write(
                root.join("knowledge_base.json"),
                r#"[{"project": "Billing", "result": "Cut invoice errors by 35%"}]"#,
            )
            .unwrap();
            std::fs::write(root.join("my_writing_style.txt"), "I keep it short.").unwrap();

            let config = PipelineConfig {
                profile_path: root.join("master_resume.json"),
                knowledge_base_path: root.join("knowledge_base.json"),
                writing_style_path: root.join("my_writing_style.txt"),
                output_root: root.join("applications"),
                tracking_log_path: root.join("applications_log.csv"),
                bullet_count: 4,
            };
            Self { dir, config }
        }

        fn orchestrator(
            &self,
            fetcher: Arc<StaticFetcher>,
            llm: Arc<ScriptedGenerator>,
        ) -> Orchestrator {
            Orchestrator::new(self.config.clone(), fetcher, llm)
        }

        fn log_rows(&self) -> Vec<TrackingRecord> {
            csv::Reader::from_path(&self.config.tracking_log_path)
                .unwrap()
                .deserialize()
                .collect::<Result<_, _>>()
                .unwrap()
        }

        fn root(&self) -> &Path {
            self.dir.path()
        }
    }

    fn full_fetcher() -> Arc<StaticFetcher> {
        Arc::new(
            StaticFetcher::new()
                .with_page(JOB_URL, JOB_PAGE)
                .with_page(ABOUT_URL, ABOUT_PAGE),
        )
    }

    fn writer() -> ScriptedGenerator {
        ScriptedGenerator::new()
            .reply_when("WEBSITE TEXT", "- Mission: trustworthy data")
            .reply_when("KNOWLEDGE BASE OF ACCOMPLISHMENTS", "Draft letter")
            .reply_when("STYLE EXAMPLES", "Final letter in my voice")
    }

    fn failed(outcome: RunOutcome) -> (Phase, PipelineError) {
        match outcome {
            RunOutcome::Failed { phase, error } => (phase, error),
            RunOutcome::Completed(a) => panic!("expected failure, run completed: {a:?}"),
        }
    }

    fn completed(outcome: RunOutcome) -> ApplicationArtifact {
        match outcome {
            RunOutcome::Completed(a) => a,
            RunOutcome::Failed { phase, error } => panic!("run failed in {phase}: {error}"),
        }
    }

    #[tokio::test]
    async fn test_full_run_completes_and_logs_once() {
        let fx = Fixture::new();
        let llm = Arc::new(writer());
        let orchestrator = fx.orchestrator(full_fetcher(), llm.clone());

        let artifact = completed(orchestrator.run(JOB_URL, Some(ABOUT_URL)).await);

        assert_eq!(
            artifact.folder,
            fx.config.output_root.join("Acme_Analytics_Data_Engineer")
        );
        assert!(artifact.resume_path.exists());
        assert_eq!(artifact.cover_letter_text, "Final letter in my voice");
        assert_eq!(
            std::fs::read_to_string(&artifact.cover_letter_path).unwrap(),
            "Final letter in my voice"
        );

        let rows = fx.log_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].company, "Acme Analytics");
        assert_eq!(rows[0].title, "Data Engineer");
        assert_eq!(rows[0].link, JOB_URL);

        let calls = llm.calls();
        // summary of company, resume summary, one experience entry, draft, style
        assert_eq!(calls.len(), 5);
        assert!(calls[0].contains("Our mission is trustworthy data."));
        let experience_prompt = calls
            .iter()
            .find(|c| c.contains("ORIGINAL WORK EXPERIENCE DATA"))
            .unwrap();
        assert!(experience_prompt.contains("Python, SQL"));
        assert!(!experience_prompt.contains("Java"));
    }

    #[tokio::test]
    async fn test_missing_profile_fails_load_and_names_file() {
        let fx = Fixture::new();
        std::fs::remove_file(&fx.config.profile_path).unwrap();
        let fetcher = full_fetcher();
        let orchestrator = fx.orchestrator(fetcher.clone(), Arc::new(writer()));

        let (phase, error) = failed(orchestrator.run(JOB_URL, Some(ABOUT_URL)).await);
        assert_eq!(phase, Phase::Load);
        assert_eq!(error.kind(), "MissingInputFile");
        assert!(error.to_string().contains("master_resume.json"));
        assert!(fetcher.fetched().is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_site_fails_acquire_without_fetching() {
        let fx = Fixture::new();
        let fetcher = full_fetcher();
        let orchestrator = fx.orchestrator(fetcher.clone(), Arc::new(writer()));

        let (phase, error) = failed(
            orchestrator
                .run("https://jobs.lever.co/acme/123", Some(ABOUT_URL))
                .await,
        );
        assert_eq!(phase, Phase::Acquire);
        assert_eq!(error.kind(), "UnsupportedSource");
        assert!(fetcher.fetched().is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_job_page_is_fetch_failure() {
        let fx = Fixture::new();
        let fetcher = Arc::new(StaticFetcher::new().with_page(ABOUT_URL, ABOUT_PAGE));
        let orchestrator = fx.orchestrator(fetcher, Arc::new(writer()));

        let (phase, error) = failed(orchestrator.run(JOB_URL, Some(ABOUT_URL)).await);
        assert_eq!(phase, Phase::Acquire);
        assert_eq!(error.kind(), "FetchFailure");
    }

    #[tokio::test]
    async fn test_unparseable_job_page_leaves_no_artifacts() {
        let fx = Fixture::new();
        let fetcher = Arc::new(
            StaticFetcher::new().with_page(JOB_URL, "<html><body>Sign in</body></html>"),
        );
        let llm = Arc::new(writer());
        let orchestrator = fx.orchestrator(fetcher, llm.clone());

        let (phase, error) = failed(orchestrator.run(JOB_URL, Some(ABOUT_URL)).await);
        assert_eq!(phase, Phase::Acquire);
        assert_eq!(error.kind(), "ExtractionFailure");
        assert_eq!(llm.call_count(), 0);
        assert!(!fx.config.output_root.exists());
        assert!(!fx.config.tracking_log_path.exists());
    }

    #[tokio::test]
    async fn test_unreachable_company_page_uses_sentinel_and_completes() {
        let fx = Fixture::new();
        let fetcher = Arc::new(StaticFetcher::new().with_page(JOB_URL, JOB_PAGE));
        let llm = Arc::new(writer());
        let orchestrator = fx.orchestrator(fetcher, llm.clone());

        completed(orchestrator.run(JOB_URL, Some(ABOUT_URL)).await);

        let calls = llm.calls();
        assert!(!calls.iter().any(|c| c.contains("WEBSITE TEXT")));
        let summary_prompt = calls.iter().find(|c| c.contains("ORIGINAL SUMMARY")).unwrap();
        assert!(summary_prompt.contains(NO_COMPANY_INFORMATION));
    }

    #[tokio::test]
    async fn test_blank_company_url_falls_back_to_discovered_link() {
        let fx = Fixture::new();
        let fetcher = Arc::new(
            StaticFetcher::new()
                .with_page(JOB_URL, JOB_PAGE)
                .with_page(DISCOVERED_URL, ABOUT_PAGE),
        );
        let orchestrator = fx.orchestrator(fetcher.clone(), Arc::new(writer()));

        completed(orchestrator.run(JOB_URL, Some("  ")).await);
        assert_eq!(fetcher.fetched(), vec![JOB_URL.to_string(), DISCOVERED_URL.to_string()]);
    }

    #[tokio::test]
    async fn test_style_stage_failure_still_completes_with_draft() {
        let fx = Fixture::new();
        let llm = Arc::new(
            ScriptedGenerator::new()
                .reply_when("KNOWLEDGE BASE OF ACCOMPLISHMENTS", "Draft letter")
                .fail_when("STYLE EXAMPLES"),
        );
        let orchestrator = fx.orchestrator(full_fetcher(), llm);

        let artifact = completed(orchestrator.run(JOB_URL, Some(ABOUT_URL)).await);
        assert_eq!(artifact.cover_letter_text, "Draft letter");
        assert_eq!(fx.log_rows().len(), 1);
    }

    #[tokio::test]
    async fn test_tailoring_failure_fails_produce_and_writes_nothing() {
        let fx = Fixture::new();
        let llm = Arc::new(writer().fail_when("Company: Globex"));
        let orchestrator = fx.orchestrator(full_fetcher(), llm);

        let (phase, error) = failed(orchestrator.run(JOB_URL, Some(ABOUT_URL)).await);
        assert_eq!(phase, Phase::Produce);
        assert_eq!(error.kind(), "TailoringFailure");
        assert!(!fx.config.output_root.exists());
        assert!(!fx.config.tracking_log_path.exists());
    }

    #[tokio::test]
    async fn test_summarization_failure_fails_analyze() {
        let fx = Fixture::new();
        let llm = Arc::new(ScriptedGenerator::new().fail_when("WEBSITE TEXT"));
        let orchestrator = fx.orchestrator(full_fetcher(), llm);

        let (phase, error) = failed(orchestrator.run(JOB_URL, Some(ABOUT_URL)).await);
        assert_eq!(phase, Phase::Analyze);
        assert_eq!(error.kind(), "SummarizationFailure");
    }

    #[tokio::test]
    async fn test_repeated_runs_reuse_folder_and_append_rows() {
        let fx = Fixture::new();
        let orchestrator = fx.orchestrator(full_fetcher(), Arc::new(writer()));

        let first = completed(orchestrator.run(JOB_URL, Some(ABOUT_URL)).await);
        let second = completed(orchestrator.run(JOB_URL, Some(ABOUT_URL)).await);
        assert_eq!(first.folder, second.folder);
        assert_eq!(fx.log_rows().len(), 2);
        assert!(fx.root().join("applications").is_dir());
    }

    #[test]
    fn test_failed_outcome_becomes_user_facing_result() {
        let result = ApplicationResult::from(RunOutcome::Failed {
            phase: Phase::Load,
            error: PipelineError::MissingInputFile(PathBuf::from("master_resume.json")),
        });
        assert!(!result.success);
        assert_eq!(result.phase, Some(Phase::Load));
        assert_eq!(result.error_kind, Some("MissingInputFile"));
        assert!(result.message.contains("master_resume.json"));
        assert!(result.cover_letter_text.is_none());
    }

    #[test]
    fn test_acquire_failure_message_asks_to_check_link() {
        let result = ApplicationResult::from(RunOutcome::Failed {
            phase: Phase::Acquire,
            error: PipelineError::ExtractionFailure("job title".to_string()),
        });
        assert!(result
            .message
            .starts_with("Could not scrape the job URL. Please check the link."));
    }

    #[test]
    fn test_completed_outcome_carries_preview() {
        let result = ApplicationResult::from(RunOutcome::Completed(ApplicationArtifact {
            folder: PathBuf::from("applications/Acme_Data_Engineer"),
            resume_path: PathBuf::from("applications/Acme_Data_Engineer/CV_for_Acme.md"),
            cover_letter_path: PathBuf::from(
                "applications/Acme_Data_Engineer/Cover_Letter_for_Acme.txt",
            ),
            cover_letter_text: "Dear [Hiring Manager Name],".to_string(),
        }));
        assert!(result.success);
        assert_eq!(
            result.message,
            "Successfully generated and logged application in folder: applications/Acme_Data_Engineer"
        );
        assert_eq!(result.cover_letter_text.as_deref(), Some("Dear [Hiring Manager Name],"));

        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("phase").is_none());
    }
}
