//! Application Recorder: per-application folder, artifact files, tracking row.
//!
//! The tracking row is appended only after both artifacts are on disk. A
//! failure after the first write removes whatever artifacts were written, so a
//! failed record leaves neither files nor a row. The folder itself is kept.

pub mod naming;
pub mod tracking_log;

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::errors::PipelineError;
use crate::generation::cover_letter::CoverLetter;
use crate::generation::resume::TailoredResume;
use crate::models::job::JobPosting;
use crate::models::tracking::TrackingRecord;

const GENERATED_STATUS: &str = "Generated";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Where one application's files ended up.
#[derive(Debug, Clone)]
pub struct ApplicationArtifact {
    pub folder: PathBuf,
    pub resume_path: PathBuf,
    pub cover_letter_path: PathBuf,
    pub cover_letter_text: String,
}

#[derive(Debug, Clone)]
pub struct ApplicationRecorder {
    output_root: PathBuf,
    tracking_log_path: PathBuf,
}

impl ApplicationRecorder {
    pub fn new(output_root: impl Into<PathBuf>, tracking_log_path: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
            tracking_log_path: tracking_log_path.into(),
        }
    }

    /// Creates `{output_root}/{company}_{title}` if absent. Idempotent.
    pub async fn setup_folder(&self, job: &JobPosting) -> Result<PathBuf, PipelineError> {
        let folder = self
            .output_root
            .join(naming::folder_name(&job.company, &job.title));
        tokio::fs::create_dir_all(&folder)
            .await
            .map_err(|e| PipelineError::ArtifactWriteFailure {
                path: folder.clone(),
                reason: e.to_string(),
            })?;
        Ok(folder)
    }

    /// Persists both artifacts, then appends the tracking row.
    pub async fn record(
        &self,
        job: &JobPosting,
        resume: &TailoredResume,
        cover_letter: &CoverLetter,
    ) -> Result<ApplicationArtifact, PipelineError> {
        let folder = self.setup_folder(job).await?;

        let resume_path = folder.join(resume.file_name());
        write_artifact(&resume_path, &resume.document).await?;
        info!("Saved tailored resume: {}", resume_path.display());

        let cover_letter_path = folder.join(cover_letter.file_name());
        if let Err(e) = write_artifact(&cover_letter_path, &cover_letter.text).await {
            remove_artifacts(&[resume_path.as_path()]).await;
            return Err(e);
        }
        info!("Saved cover letter: {}", cover_letter_path.display());

        let record = tracking_record(job, &folder, chrono::Local::now());
        if let Err(e) = self.append_tracking_record(record).await {
            remove_artifacts(&[resume_path.as_path(), cover_letter_path.as_path()]).await;
            return Err(e);
        }
        info!(
            "Application logged in '{}'",
            self.tracking_log_path.display()
        );

        Ok(ApplicationArtifact {
            folder,
            resume_path,
            cover_letter_path,
            cover_letter_text: cover_letter.text.clone(),
        })
    }

    async fn append_tracking_record(&self, record: TrackingRecord) -> Result<(), PipelineError> {
        let path = self.tracking_log_path.clone();
        let log_path = path.clone();
        tokio::task::spawn_blocking(move || tracking_log::append_record(&log_path, &record))
            .await
            .map_err(|e| PipelineError::UnexpectedFailure(format!("Tracking log task failed: {e}")))?
            .map_err(|e| PipelineError::LoggingFailure {
                path,
                reason: e.to_string(),
            })
    }
}

async fn write_artifact(path: &Path, contents: &str) -> Result<(), PipelineError> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|e| PipelineError::ArtifactWriteFailure {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

async fn remove_artifacts(paths: &[&Path]) {
    for path in paths {
        if let Err(e) = tokio::fs::remove_file(path).await {
            warn!("Could not remove {}: {e}", path.display());
        }
    }
}

fn tracking_record<Tz>(job: &JobPosting, folder: &Path, at: chrono::DateTime<Tz>) -> TrackingRecord
where
    Tz: chrono::TimeZone,
    Tz::Offset: std::fmt::Display,
{
    TrackingRecord {
        timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
        company: job.company.clone(),
        title: job.title.clone(),
        status: GENERATED_STATUS.to_string(),
        location: or_na(&job.location),
        source: job.source.to_string(),
        link: job.link.clone(),
        folder: folder.display().to_string(),
        notes: String::new(),
    }
}

fn or_na(value: &str) -> String {
    if value.trim().is_empty() {
        "N/A".to_string()
    } else {
        value.to_string()
    }
}
