use crate::domain::name::{extract_clean_name, is_name};

use super::{AnalyzedText, EntityRecognizer, SearchEngine, SearchError, PERSON_LABEL};

/// Words near a person entity that mark it as a founder.
pub const FOUNDER_CONTEXT_KEYWORDS: [&str; 3] = ["founder", "co-founder", "ceo"];

/// Tokens inspected on each side of a person entity.
pub const CONTEXT_WINDOW_TOKENS: usize = 5;

pub fn build_founder_search_query(company_name: &str, company_url: &str) -> String {
    format!("{} {} founders", company_name, company_url)
}

/// Searches the web for the company's founders and picks names out of the result snippets.
pub async fn search_founders<S, R>(
    search_engine: &S,
    recognizer: &R,
    company_name: &str,
    company_url: &str,
) -> Result<Vec<String>, SearchError>
where
    S: SearchEngine,
    R: EntityRecognizer,
{
    let query = build_founder_search_query(company_name, company_url);
    let snippets = search_engine.organic_snippets(&query).await?;

    log::info!("Found {} snippets for query: {}", snippets.len(), query);

    let mut founders = vec![];
    for snippet in snippets {
        let analyzed = recognizer.analyze(&snippet).await?;
        founders.extend(founders_from_analyzed(&analyzed, company_name));
    }

    Ok(founders)
}

/// Person entities near a founder keyword that are valid names and not the company itself.
pub fn founders_from_analyzed(analyzed: &AnalyzedText, company_name: &str) -> Vec<String> {
    analyzed
        .entities
        .iter()
        .filter(|ent| ent.label == PERSON_LABEL)
        .filter(|ent| !names_company(&ent.text, company_name))
        .filter(|ent| {
            let window = analyzed
                .doc
                .window(ent.start, ent.end, CONTEXT_WINDOW_TOKENS)
                .to_lowercase();
            FOUNDER_CONTEXT_KEYWORDS
                .iter()
                .any(|&kw| window.contains(kw))
        })
        .filter(|ent| is_name(&ent.text))
        .map(|ent| extract_clean_name(&ent.text))
        .collect()
}

/// Trailing words dropped from a company name before matching it against entities.
const LEGAL_SUFFIXES: [&str; 8] = ["inc", "llc", "ltd", "corp", "co", "gmbh", "plc", "limited"];

// Entity text contains the company name, ignoring case and legal suffixes
fn names_company(entity_text: &str, company_name: &str) -> bool {
    let lowered = company_name.to_lowercase();
    let mut words: Vec<&str> = lowered
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| c == ',' || c == '.'))
        .collect();
    while words.len() > 1 && words.last().is_some_and(|word| LEGAL_SUFFIXES.contains(word)) {
        words.pop();
    }

    let core = words.join(" ");
    !core.is_empty() && entity_text.to_lowercase().contains(&core)
}
