use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

use crate::errors::PipelineError;
use crate::jobs::source::detect_source;
use crate::models::job::{JobPosting, JobSource};

// LinkedIn public job page markup.
const LINKEDIN_TITLE: &str = "h1.top-card-layout__title";
const LINKEDIN_COMPANY_LINK: &str = "a.topcard__org-name-link";
const LINKEDIN_LOCATION: &str = "span.topcard__flavor.topcard__flavor--bullet";
const LINKEDIN_DESCRIPTION: &str = "div.show-more-less-html__markup";

const UNKNOWN_LOCATION: &str = "N/A";

/// A parsed posting plus the company-profile link found on the page, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedJob {
    pub posting: JobPosting,
    pub company_url: Option<String>,
}

/// Parses fetched job-page HTML into a `JobPosting`.
///
/// Fails with `UnsupportedSource` for sites outside the supported set and with
/// `ExtractionFailure` naming the first required element (title, company name,
/// description) that is missing.
pub fn extract_job(html: &str, job_url: &str) -> Result<ExtractedJob, PipelineError> {
    match detect_source(job_url)? {
        JobSource::LinkedIn => extract_linkedin(html, job_url),
    }
}

fn extract_linkedin(html: &str, job_url: &str) -> Result<ExtractedJob, PipelineError> {
    let doc = Html::parse_document(html);

    let title = first_match(&doc, LINKEDIN_TITLE)?
        .map(inline_text)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| PipelineError::ExtractionFailure("job title".to_string()))?;

    let company_link = first_match(&doc, LINKEDIN_COMPANY_LINK)?;
    let company = company_link
        .map(inline_text)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| PipelineError::ExtractionFailure("company name".to_string()))?;
    let company_url = company_link
        .and_then(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .and_then(|href| absolute_link(job_url, href));

    let location = first_match(&doc, LINKEDIN_LOCATION)?
        .map(inline_text)
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| UNKNOWN_LOCATION.to_string());

    let description = first_match(&doc, LINKEDIN_DESCRIPTION)?
        .map(block_text)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| PipelineError::ExtractionFailure("job description".to_string()))?;

    debug!("Extracted LinkedIn posting '{title}' at '{company}'");

    Ok(ExtractedJob {
        posting: JobPosting {
            title,
            company,
            location,
            description,
            source: JobSource::LinkedIn,
            link: job_url.to_string(),
        },
        company_url,
    })
}

fn first_match<'a>(doc: &'a Html, css: &str) -> Result<Option<ElementRef<'a>>, PipelineError> {
    let selector = Selector::parse(css)
        .map_err(|e| PipelineError::UnexpectedFailure(format!("invalid selector {css}: {e}")))?;
    Ok(doc.select(&selector).next())
}

/// `href` resolved against the page it was found on.
fn absolute_link(page_url: &str, href: &str) -> Option<String> {
    let resolved = Url::parse(page_url.trim()).ok()?.join(href);
    match resolved {
        Ok(url) => Some(url.into()),
        Err(e) => {
            debug!("Ignoring unusable company link '{href}': {e}");
            None
        }
    }
}

/// Text of a single-line element, whitespace collapsed.
fn inline_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text of a block element, one trimmed text node per line.
fn block_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
