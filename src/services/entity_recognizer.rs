//! Named-entity recognition over search snippets.
//!
//! Entities carry token offsets into a [`Doc`], so callers can look at the
//! tokens surrounding an entity.

use std::{future::Future, ops::Range};

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const PERSON_LABEL: &str = "PERSON";

// Capitalised words that start sentences far more often than names
const RUN_STOP_WORDS: [&str; 14] = [
    "The", "A", "An", "In", "On", "At", "Of", "And", "By", "For", "With", "From", "As", "Meet",
];

// A run right after one of these names a place or an organisation
const NON_PERSON_LEADERS: [&str; 6] = ["in", "at", "from", "of", "near", "based"];

#[derive(Debug, Error)]
pub enum RecognizerError {
    #[error("entity recognizer request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("entity recognizer returned offsets outside the text: {0}")]
    InvalidOffsets(String),
    #[error("entity recognition model failed: {0}")]
    Model(String),
}

/// Tokenised text; tokens are byte ranges into `text`.
#[derive(Debug, Clone, PartialEq)]
pub struct Doc {
    text: String,
    tokens: Vec<Range<usize>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub label: String,
    /// First token of the entity
    pub start: usize,
    /// One past the last token
    pub end: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzedText {
    pub doc: Doc,
    pub entities: Vec<Entity>,
}

impl Doc {
    pub fn new(text: &str, tokens: Vec<Range<usize>>) -> Result<Self, RecognizerError> {
        let valid = tokens.iter().all(|token| {
            token.start < token.end
                && token.end <= text.len()
                && text.is_char_boundary(token.start)
                && text.is_char_boundary(token.end)
        });

        match valid {
            true => Ok(Doc {
                text: text.to_string(),
                tokens,
            }),
            false => Err(RecognizerError::InvalidOffsets(text.to_string())),
        }
    }

    /// Splits on whitespace; punctuation other than inner `-` and `'` becomes its own token.
    pub fn tokenize(text: &str) -> Self {
        let mut tokens = vec![];
        let mut word_start: Option<usize> = None;

        for (i, c) in text.char_indices() {
            let joins_word =
                c.is_alphanumeric() || (word_start.is_some() && (c == '-' || c == '\''));

            if joins_word {
                word_start.get_or_insert(i);
                continue;
            }
            if let Some(start) = word_start.take() {
                tokens.push(start..i);
            }
            if !c.is_whitespace() {
                tokens.push(i..i + c.len_utf8());
            }
        }
        if let Some(start) = word_start {
            tokens.push(start..text.len());
        }

        Doc {
            text: text.to_string(),
            tokens,
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn token(&self, i: usize) -> &str {
        &self.text[self.tokens[i].clone()]
    }

    /// Original text from the first to the last token of `start..end`, clamped to the doc.
    pub fn span_text(&self, start: usize, end: usize) -> &str {
        let end = end.min(self.tokens.len());
        if start >= end {
            return "";
        }
        &self.text[self.tokens[start].start..self.tokens[end - 1].end]
    }

    /// Up to `size` tokens either side of `start..end`.
    pub fn window(&self, start: usize, end: usize, size: usize) -> &str {
        self.span_text(start.saturating_sub(size), end.saturating_add(size))
    }

    /// Token range, at or after token `from`, whose text is exactly `needle`.
    pub fn find_span(&self, needle: &str, from: usize) -> Option<(usize, usize)> {
        (from..self.tokens.len()).find_map(|start| {
            let begin = self.tokens[start].start;
            let stop = begin + needle.len();
            if !self.text[begin..].starts_with(needle) {
                return None;
            }
            self.tokens[start..]
                .iter()
                .position(|token| token.end == stop)
                .map(|offset| (start, start + offset + 1))
        })
    }

    pub fn entity(&self, label: &str, start: usize, end: usize) -> Entity {
        Entity {
            label: label.to_string(),
            start,
            end,
            text: self.span_text(start, end).to_string(),
        }
    }
}

pub trait EntityRecognizer {
    fn analyze(&self, text: &str)
        -> impl Future<Output = Result<AnalyzedText, RecognizerError>>;
}

/// Tags runs of two or more capitalised words as people.
///
/// Last-resort recognizer for when no model or NER service is configured: it
/// cannot tell people from companies, so runs led by a place or organisation
/// preposition are skipped and callers still filter out the company's own name.
#[derive(Debug, Default, Clone)]
pub struct CapitalizedRunRecognizer;

impl CapitalizedRunRecognizer {
    pub fn recognize(&self, text: &str) -> AnalyzedText {
        let doc = Doc::tokenize(text);
        let mut entities = vec![];
        let mut run_start = None;

        for i in 0..=doc.len() {
            let capitalized = i < doc.len() && is_capitalized_word(doc.token(i));

            match (capitalized, run_start) {
                (true, None) => run_start = Some(i),
                (false, Some(start)) => {
                    if i - start >= 2 && !led_by_non_person_word(&doc, start) {
                        entities.push(doc.entity(PERSON_LABEL, start, i));
                    }
                    run_start = None;
                }
                _ => {}
            }
        }

        AnalyzedText { doc, entities }
    }
}

fn is_capitalized_word(token: &str) -> bool {
    let starts_upper = token.chars().next().is_some_and(char::is_uppercase);
    let shouting = token.chars().count() > 1 && !token.chars().any(char::is_lowercase);

    starts_upper && !shouting && !RUN_STOP_WORDS.contains(&token)
}

fn led_by_non_person_word(doc: &Doc, start: usize) -> bool {
    start > 0 && NON_PERSON_LEADERS.contains(&doc.token(start - 1))
}

impl EntityRecognizer for CapitalizedRunRecognizer {
    async fn analyze(&self, text: &str) -> Result<AnalyzedText, RecognizerError> {
        Ok(self.recognize(text))
    }
}

/// Client for an NER service that returns spaCy-style token and entity offsets.
pub struct RemoteRecognizer {
    client: Client,
    endpoint: String,
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct AnalyzeResponse {
    tokens: Vec<CharSpan>,
    ents: Vec<RemoteEntity>,
}

#[derive(Deserialize)]
struct CharSpan {
    start: usize,
    end: usize,
}

#[derive(Deserialize)]
struct RemoteEntity {
    label: String,
    start: usize,
    end: usize,
}

impl RemoteRecognizer {
    pub fn new(client: Client, endpoint: String) -> Self {
        RemoteRecognizer { client, endpoint }
    }
}

impl EntityRecognizer for RemoteRecognizer {
    async fn analyze(&self, text: &str) -> Result<AnalyzedText, RecognizerError> {
        let response: AnalyzeResponse = self
            .client
            .post(&self.endpoint)
            .json(&AnalyzeRequest { text })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let tokens = response
            .tokens
            .iter()
            .map(|span| char_range_to_bytes(text, span.start, span.end))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| RecognizerError::InvalidOffsets(text.to_string()))?;
        let doc = Doc::new(text, tokens)?;

        let entities = response
            .ents
            .into_iter()
            .filter(|ent| ent.start < ent.end && ent.end <= doc.len())
            .map(|ent| doc.entity(&ent.label, ent.start, ent.end))
            .collect();

        Ok(AnalyzedText { doc, entities })
    }
}

fn char_range_to_bytes(text: &str, start: usize, end: usize) -> Option<Range<usize>> {
    let byte_at = |char_idx: usize| {
        text.char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .nth(char_idx)
    };
    Some(byte_at(start)?..byte_at(end)?)
}

/// Recognizer chosen at startup from configuration.
pub enum Recognizer {
    #[cfg(feature = "ner")]
    Gliner(super::GlinerRecognizer),
    Remote(RemoteRecognizer),
    CapitalizedRun(CapitalizedRunRecognizer),
}

impl EntityRecognizer for Recognizer {
    async fn analyze(&self, text: &str) -> Result<AnalyzedText, RecognizerError> {
        match self {
            #[cfg(feature = "ner")]
            Recognizer::Gliner(recognizer) => recognizer.analyze(text).await,
            Recognizer::CapitalizedRun(recognizer) => recognizer.analyze(text).await,
            Recognizer::Remote(recognizer) => recognizer.analyze(text).await,
        }
    }
}
