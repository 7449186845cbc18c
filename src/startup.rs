use crate::{
    configuration::{NerSettings, Settings},
    services::{
        CapitalizedRunRecognizer, FounderResolver, PageFetcher, Recognizer, RemoteRecognizer,
        SerpApiClient,
    },
};

/// Builds the long-lived service handles once; they stay read-only for the whole run.
pub fn build_resolver(
    settings: &Settings,
) -> anyhow::Result<FounderResolver<SerpApiClient, Recognizer>> {
    let fetcher = PageFetcher::new(settings.http.timeout())?;
    let search_engine = SerpApiClient::new(fetcher.client().clone(), settings.search.clone());

    if settings.search.api_key.is_none() {
        log::warn!("SERP_API_KEY is not set, founder search fallback will fail");
    }

    let recognizer = match build_model_recognizer(&settings.ner)? {
        Some(recognizer) => recognizer,
        None => match settings.ner.endpoint {
            Some(ref endpoint) => {
                log::info!("Using remote entity recognizer at {}", endpoint);
                Recognizer::Remote(RemoteRecognizer::new(
                    fetcher.client().clone(),
                    endpoint.clone(),
                ))
            }
            None => {
                log::warn!(
                    "No NER model or endpoint configured, falling back to capitalised-word heuristic"
                );
                Recognizer::CapitalizedRun(CapitalizedRunRecognizer)
            }
        },
    };

    Ok(FounderResolver::new(fetcher, search_engine, recognizer)
        .with_max_concurrent_companies(settings.max_concurrent_companies))
}

#[cfg(feature = "ner")]
fn build_model_recognizer(ner: &NerSettings) -> anyhow::Result<Option<Recognizer>> {
    use crate::services::{GlinerRecognizer, DEFAULT_MIN_CONFIDENCE};

    let (Some(model_path), Some(tokenizer_path)) = (&ner.model_path, &ner.tokenizer_path) else {
        return Ok(None);
    };

    let recognizer = GlinerRecognizer::new(
        model_path,
        tokenizer_path,
        ner.min_confidence.unwrap_or(DEFAULT_MIN_CONFIDENCE),
    )?;
    Ok(Some(Recognizer::Gliner(recognizer)))
}

#[cfg(not(feature = "ner"))]
fn build_model_recognizer(ner: &NerSettings) -> anyhow::Result<Option<Recognizer>> {
    if ner.model_path.is_some() {
        log::warn!("ner.model_path is set but this build lacks the `ner` feature, ignoring it");
    }
    Ok(None)
}
