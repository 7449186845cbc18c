pub mod aggregator;
pub mod entity_recognizer;
pub mod founder_scraper;
#[cfg(feature = "ner")]
pub mod gliner_recognizer;
pub mod google_scraper;
pub mod page_discovery;
pub mod page_fetcher;
pub mod search_fallback;

pub use aggregator::*;
pub use entity_recognizer::*;
pub use founder_scraper::*;
#[cfg(feature = "ner")]
pub use gliner_recognizer::*;
pub use google_scraper::*;
pub use page_discovery::*;
pub use page_fetcher::*;
pub use search_fallback::*;
