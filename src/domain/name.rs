use std::sync::LazyLock;

use regex::Regex;

/// Words that mark a text span as a heading or call-to-action rather than a person.
pub const NON_NAME_KEYWORDS: [&str; 13] = [
    "team",
    "founder",
    "join",
    "ceo",
    "cto",
    "co-founder",
    "leadership",
    "our",
    "story",
    "mission",
    "values",
    "about",
    "company",
];

pub const MIN_NAME_WORDS: usize = 2;
pub const MAX_NAME_WORDS: usize = 4;

// A capitalised word followed by another capitalised word or a middle initial
static NAME_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-z]+\s[A-Z](?:[a-z]+|\.|\s)").unwrap());

static HONORIFIC_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:Dr\.?|Prof\.?)\s+").unwrap());

static SUFFIX_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:(?:^|,\s*|\s+)(?:Ph\.?D|M\.?D|MBA|MSc|BSc|MS|MA|JD|DDS|DVM)\.?)+$",
    )
    .unwrap()
});

/// Cheap structural check applied to scraped text before `is_name`.
pub fn has_name_shape(text: &str) -> bool {
    NAME_SHAPE.is_match(text)
}

pub fn is_name(text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() {
        return false;
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    if !(MIN_NAME_WORDS..=MAX_NAME_WORDS).contains(&words.len()) {
        return false;
    }

    let lowered = text.to_lowercase();
    if NON_NAME_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        return false;
    }

    words
        .iter()
        .filter(|word| word.chars().all(char::is_alphabetic))
        .all(|word| word.chars().next().is_some_and(char::is_uppercase))
}

/// Strips a leading honorific and any trailing run of degree suffixes.
///
/// Repeats until nothing changes, so `extract_clean_name` is idempotent even for
/// stacked honorifics like `Prof. Dr. Jane Doe`.
pub fn extract_clean_name(text: &str) -> String {
    let mut current = text.trim().to_string();

    loop {
        let stripped = HONORIFIC_PREFIX.replace(&current, "");
        let stripped = SUFFIX_RUN.replace(stripped.trim(), "");
        let stripped = stripped.trim().to_string();

        if stripped == current {
            return current;
        }
        current = stripped;
    }
}

/// Shape check, validation and cleaning in the order the page scraper applies them.
pub fn accept_scraped_candidate(text: &str) -> Option<String> {
    match has_name_shape(text) && is_name(text) {
        true => Some(extract_clean_name(text)),
        false => None,
    }
}
