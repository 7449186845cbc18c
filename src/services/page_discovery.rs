use itertools::Itertools;
use scraper::{Html, Selector};
use url::Url;

use super::{stripped_text, FetchError, PageFetcher};

/// Link href or text fragments that point at an about/team style page.
pub const RELEVANT_PAGE_KEYWORDS: [&str; 9] = [
    "about",
    "team",
    "founder",
    "leadership",
    "company",
    "who-we-are",
    "our-story",
    "management",
    "executives",
];

/// Fetches the homepage and returns the same-site links that look like founder pages.
pub async fn discover_subpages(
    fetcher: &PageFetcher,
    homepage_url: &str,
) -> Result<Vec<String>, FetchError> {
    let base = Url::parse(homepage_url).map_err(|source| FetchError::InvalidUrl {
        url: homepage_url.to_string(),
        source,
    })?;

    let html_content = fetcher.fetch(homepage_url).await?;
    let links = extract_relevant_links(&html_content, &base);

    log::debug!("Found {} relevant subpages on {}", links.len(), homepage_url);

    Ok(links)
}

pub fn extract_relevant_links(html_content: &str, base: &Url) -> Vec<String> {
    let a_tag_selector = Selector::parse("a[href]").unwrap();
    let html_document = Html::parse_document(html_content);

    html_document
        .select(&a_tag_selector)
        .filter_map(|tag| {
            let href = tag.value().attr("href")?;
            let resolved = base.join(href.trim()).ok()?;

            if !is_same_site(base, &resolved) {
                return None;
            }

            let href = href.to_lowercase();
            let text = stripped_text(tag).to_lowercase();
            let relevant = RELEVANT_PAGE_KEYWORDS
                .iter()
                .any(|&kw| href.contains(kw) || text.contains(kw));

            match relevant {
                true => Some(resolved.to_string()),
                false => None,
            }
        })
        .unique()
        .collect()
}

fn is_same_site(base: &Url, target: &Url) -> bool {
    matches!(target.scheme(), "http" | "https")
        && target.host_str() == base.host_str()
        && target.port() == base.port()
}
