use scraper::{ElementRef, Html};

use crate::domain::name::accept_scraped_candidate;

use super::{FetchError, PageFetcher};

const FOUNDER_MENTION: &str = "founder";

/// Fetches a page and returns candidate names found next to "founder" mentions.
///
/// Candidates are not deduplicated here.
pub async fn extract_founder_candidates(
    fetcher: &PageFetcher,
    page_url: &str,
) -> Result<Vec<String>, FetchError> {
    let html_content = fetcher.fetch(page_url).await?;
    let candidates = scrape_founder_candidates(&html_content);

    log::debug!(
        "Found {} founder candidates on {}",
        candidates.len(),
        page_url
    );

    Ok(candidates)
}

pub fn scrape_founder_candidates(html_content: &str) -> Vec<String> {
    let html_document = Html::parse_document(html_content);

    html_document
        .root_element()
        .descendants()
        .filter(|node| {
            node.value()
                .as_text()
                .is_some_and(|text| text.to_lowercase().contains(FOUNDER_MENTION))
        })
        .filter_map(|mention| mention.parent().and_then(ElementRef::wrap))
        .filter_map(preceding_sibling_candidate)
        .collect()
}

/// Looks at the element before the mention's container, then the one before its parent.
fn preceding_sibling_candidate(container: ElementRef) -> Option<String> {
    let first = previous_sibling_element(container)
        .and_then(|sibling| accept_scraped_candidate(&stripped_text(sibling)));
    if first.is_some() {
        return first;
    }

    container
        .parent()
        .and_then(ElementRef::wrap)
        .and_then(previous_sibling_element)
        .and_then(|sibling| accept_scraped_candidate(&stripped_text(sibling)))
}

fn previous_sibling_element(element: ElementRef) -> Option<ElementRef> {
    element.prev_siblings().find_map(ElementRef::wrap)
}

/// Descendant text with each piece trimmed and empty pieces dropped, joined without spaces.
pub fn stripped_text(element: ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::{scrape_founder_candidates, stripped_text};

    #[test]
    fn scrape_preceding_sibling() {
        let html = r#"
            <div class="bio">
                <h2>Jane Q. Public</h2>
                <p>Founder</p>
            </div>
        "#;

        assert_eq!(scrape_founder_candidates(html), vec!["Jane Q. Public"]);
    }

    #[test]
    fn scrape_parent_preceding_sibling() {
        let html = r#"
            <section>
                <h3>John Smith, PhD</h3>
                <div><span>Co-Founder &amp; CTO</span></div>
            </section>
        "#;

        assert_eq!(scrape_founder_candidates(html), vec!["John Smith"]);
    }

    #[test]
    fn scrape_prefers_container_sibling() {
        let html = r#"
            <section>
                <h3>Ada Lovelace</h3>
                <div>
                    <h4>Grace Hopper</h4>
                    <span>Founder</span>
                </div>
            </section>
        "#;

        assert_eq!(scrape_founder_candidates(html), vec!["Grace Hopper"]);
    }

    #[test]
    fn scrape_falls_back_to_parent_sibling() {
        let html = r#"
            <section>
                <h3>Ada Lovelace</h3>
                <div>
                    <h4>Our Story</h4>
                    <span>Founder</span>
                </div>
            </section>
        "#;

        assert_eq!(scrape_founder_candidates(html), vec!["Ada Lovelace"]);
    }

    #[test]
    fn scrape_keeps_duplicates_from_multiple_mentions() {
        let html = r#"
            <ul>
                <li><h2>Jane Doe</h2><p>Founder</p></li>
                <li><h2>Jane Doe</h2><p>Founder and chair</p></li>
            </ul>
        "#;

        assert_eq!(
            scrape_founder_candidates(html),
            vec!["Jane Doe", "Jane Doe"]
        );
    }

    #[test]
    fn scrape_ignores_non_names_and_missing_siblings() {
        let html = r#"
            <h1>Meet the team</h1>
            <p>Our founder started in a garage.</p>
            <div><p>Founders welcome</p></div>
            <h2>john smith</h2>
            <p>founder</p>
        "#;

        assert!(scrape_founder_candidates(html).is_empty());
    }

    #[test]
    fn stripped_text_joins_trimmed_pieces() {
        let html = Html::parse_fragment("<div> Jane <span> Doe </span>\n</div>");
        let selector = Selector::parse("div").unwrap();
        let div = html.select(&selector).next().unwrap();

        assert_eq!(stripped_text(div), "JaneDoe");
    }
}
