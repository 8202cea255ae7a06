/// Reduces a company name or job title to a filesystem-safe component.
///
/// Keeps alphanumerics, spaces and underscores, trims the ends, then turns each
/// run of spaces into a single underscore. Applying it twice changes nothing.
pub fn sanitize_name(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '_')
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join("_")
}

/// `{company}_{title}`, both sanitized.
pub fn folder_name(company: &str, title: &str) -> String {
    format!("{}_{}", sanitize_name(company), sanitize_name(title))
}

/// `{prefix}_for_{company}.{extension}`, e.g. `CV_for_Acme_Inc.md`.
pub fn artifact_file_name(prefix: &str, company: &str, extension: &str) -> String {
    format!("{prefix}_for_{}.{extension}", sanitize_name(company))
}
