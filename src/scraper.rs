use scraper::{Html, Selector};

/// Containers that usually hold the job description, in priority order.
const DESCRIPTION_SELECTORS: &[&str] = &[
    "article",
    "main",
    ".job-description",
    ".job-details",
    "#job-description",
    "#job-details",
    "div[class*='description']",
    "div[class*='details']",
];

/// Fetches a job posting and returns its description text.
pub fn scrape_job_url(url: &str) -> anyhow::Result<String> {
    tracing::info!(url, "fetching job description");
    let response = reqwest::blocking::get(url)?.error_for_status()?;
    let body = response.text()?;
    description_from_html(&body)
}

/// Pulls description text out of a posting page.
///
/// Tries the known containers first, then every `<p>`, then the whole `<body>`.
pub fn description_from_html(html: &str) -> anyhow::Result<String> {
    let document = Html::parse_document(html);
    let mut extracted_text = String::new();

    for sel_str in DESCRIPTION_SELECTORS {
        let Ok(selector) = Selector::parse(sel_str) else {
            continue;
        };
        for element in document.select(&selector) {
            extracted_text.push_str(&element.text().collect::<Vec<_>>().join(" "));
            extracted_text.push_str("\n\n");
        }
        // First selector with content is taken as the description.
        if !extracted_text.trim().is_empty() {
            tracing::debug!(selector = sel_str, "matched description container");
            break;
        }
    }

    if extracted_text.trim().is_empty() {
        if let Ok(p_selector) = Selector::parse("p") {
            for element in document.select(&p_selector) {
                extracted_text.push_str(&element.text().collect::<Vec<_>>().join(" "));
                extracted_text.push('\n');
            }
        }
    }

    if extracted_text.trim().is_empty() {
        let body_selector = Selector::parse("body")
            .map_err(|e| anyhow::anyhow!("invalid body selector: {e}"))?;
        if let Some(body_element) = document.select(&body_selector).next() {
            extracted_text = body_element.text().collect::<Vec<_>>().join(" ");
        }
    }

    let cleaned_text = extracted_text.trim().to_string();
    if cleaned_text.is_empty() {
        anyhow::bail!("could not extract any meaningful content from the page");
    }
    Ok(cleaned_text)
}
