use url::Url;

use crate::errors::PipelineError;
use crate::models::job::JobSource;

/// Resolves the job site a URL belongs to.
///
/// Only LinkedIn (`linkedin.com` and its subdomains) is supported.
pub fn detect_source(job_url: &str) -> Result<JobSource, PipelineError> {
    let url = Url::parse(job_url.trim())
        .map_err(|_| PipelineError::UnsupportedSource(job_url.to_string()))?;

    let host = url
        .host_str()
        .map(str::to_ascii_lowercase)
        .ok_or_else(|| PipelineError::UnsupportedSource(job_url.to_string()))?;

    if host == "linkedin.com" || host.ends_with(".linkedin.com") {
        Ok(JobSource::LinkedIn)
    } else {
        Err(PipelineError::UnsupportedSource(host))
    }
}
