use scraper::{Html, Selector};

/// Returns the visible text of a page's `<body>`, whitespace-normalised.
/// Pages without a body (or unparsable fragments) yield an empty string.
pub fn page_text(html: &str) -> String {
    let doc = Html::parse_document(html);

    let Ok(body) = Selector::parse("body") else {
        return String::new();
    };

    doc.select(&body)
        .flat_map(|n| n.text())
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
