//! On-device person recognition with a GLiNER span model.

use gliner::model::{
    input::text::TextInput, params::Parameters, pipeline::span::SpanMode, GLiNER,
};
use orp::params::RuntimeParameters;

use super::{AnalyzedText, Doc, EntityRecognizer, RecognizerError, PERSON_LABEL};

const PERSON_CLASS: &str = "person";
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.5;

pub struct GlinerRecognizer {
    model: GLiNER<SpanMode>,
    min_confidence: f32,
}

impl GlinerRecognizer {
    /// Loads the ONNX model and its tokenizer; done once at startup.
    pub fn new(
        model_path: &str,
        tokenizer_path: &str,
        min_confidence: f32,
    ) -> Result<Self, RecognizerError> {
        let model = GLiNER::<SpanMode>::new(
            Parameters::default(),
            RuntimeParameters::default(),
            tokenizer_path,
            model_path,
        )
        .map_err(|e| RecognizerError::Model(format!("failed to load {}: {}", model_path, e)))?;

        log::info!("Loaded GLiNER model from {}", model_path);

        Ok(GlinerRecognizer {
            model,
            min_confidence,
        })
    }

    pub fn recognize(&self, text: &str) -> Result<AnalyzedText, RecognizerError> {
        let input = TextInput::from_str(&[text], &[PERSON_CLASS])
            .map_err(|e| RecognizerError::Model(e.to_string()))?;
        let output = self
            .model
            .inference(input)
            .map_err(|e| RecognizerError::Model(e.to_string()))?;

        let doc = Doc::tokenize(text);
        let mut entities = vec![];
        let mut cursor = 0;

        for span in output.spans.iter().flatten() {
            if span.class().to_lowercase() != PERSON_CLASS || span.probability() < self.min_confidence
            {
                continue;
            }
            match doc.find_span(span.text().trim(), cursor) {
                Some((start, end)) => {
                    entities.push(doc.entity(PERSON_LABEL, start, end));
                    cursor = end;
                }
                None => log::debug!("Dropping span not aligned to tokens: {}", span.text()),
            }
        }

        Ok(AnalyzedText { doc, entities })
    }
}

impl EntityRecognizer for GlinerRecognizer {
    async fn analyze(&self, text: &str) -> Result<AnalyzedText, RecognizerError> {
        self.recognize(text)
    }
}

#[cfg(test)]
mod tests {
    use super::{GlinerRecognizer, DEFAULT_MIN_CONFIDENCE};
    use crate::services::search_fallback::founders_from_analyzed;

    // Set GLINER_MODEL and GLINER_TOKENIZER to run against a local model.
    fn load_model() -> Option<GlinerRecognizer> {
        let model = std::env::var("GLINER_MODEL").ok()?;
        let tokenizer = std::env::var("GLINER_TOKENIZER").ok()?;
        GlinerRecognizer::new(&model, &tokenizer, DEFAULT_MIN_CONFIDENCE).ok()
    }

    #[test]
    fn test_model_tags_people_not_companies_or_places() {
        let Some(recognizer) = load_model() else {
            return;
        };

        for snippet in [
            "Jane Public, co-founder of Acme Robotics, said...",
            "Acme Robotics CEO Jane Public spoke in San Francisco today.",
        ] {
            let analyzed = recognizer.recognize(snippet).unwrap();
            assert_eq!(
                founders_from_analyzed(&analyzed, "Acme Robotics"),
                vec!["Jane Public"],
                "{}",
                snippet
            );
        }
    }
}
