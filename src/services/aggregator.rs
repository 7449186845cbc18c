use futures::{stream, StreamExt};

use crate::domain::{
    company::CompanyRecord,
    founder::{FounderSet, OutputMapping},
    name::is_name,
};

use super::{
    discover_subpages, extract_founder_candidates, search_founders, EntityRecognizer, PageFetcher,
    SearchEngine,
};

/// Resolves founders for each company: site pages first, web search when the site has nothing.
pub struct FounderResolver<S, R> {
    fetcher: PageFetcher,
    search_engine: S,
    recognizer: R,
    max_concurrent_companies: usize,
}

impl<S, R> FounderResolver<S, R>
where
    S: SearchEngine,
    R: EntityRecognizer,
{
    pub fn new(fetcher: PageFetcher, search_engine: S, recognizer: R) -> Self {
        FounderResolver {
            fetcher,
            search_engine,
            recognizer,
            max_concurrent_companies: 1,
        }
    }

    pub fn with_max_concurrent_companies(mut self, max_concurrent_companies: usize) -> Self {
        self.max_concurrent_companies = max_concurrent_companies.max(1);
        self
    }

    /// Every company ends up as a key; failures leave that company with what was found so far.
    pub async fn resolve_all(&self, companies: &[CompanyRecord]) -> OutputMapping {
        let resolved: Vec<(String, FounderSet)> = stream::iter(companies)
            .map(|company| async move { (company.name.clone(), self.resolve_company(company).await) })
            .buffered(self.max_concurrent_companies)
            .collect()
            .await;

        let mut output = OutputMapping::new();
        for (name, founders) in resolved {
            output.insert(name, founders.into_vec());
        }
        output
    }

    pub async fn resolve_company(&self, company: &CompanyRecord) -> FounderSet {
        log::info!("Resolving founders for {}", company);
        let mut founders = FounderSet::new();

        let subpages = match discover_subpages(&self.fetcher, &company.url).await {
            Ok(subpages) => subpages,
            Err(e) => {
                log::error!("Page discovery failed for {}: {}", company.name, e);
                vec![]
            }
        };

        for subpage in subpages.iter() {
            match extract_founder_candidates(&self.fetcher, subpage).await {
                Ok(candidates) => founders.extend(candidates),
                Err(e) => log::warn!("Skipping subpage {}: {}", subpage, e),
            }
        }

        match extract_founder_candidates(&self.fetcher, &company.url).await {
            Ok(candidates) => founders.extend(candidates.into_iter().filter(|c| is_name(c))),
            Err(e) => log::warn!("Skipping homepage {}: {}", company.url, e),
        }

        let source = match founders.is_empty() {
            true => {
                match search_founders(
                    &self.search_engine,
                    &self.recognizer,
                    &company.name,
                    &company.url,
                )
                .await
                {
                    Ok(candidates) => founders.extend(candidates),
                    Err(e) => log::error!("Founder search failed for {}: {}", company.name, e),
                }
                "search"
            }
            false => "site",
        };

        log::info!(
            "Found {} founders for {} from {}",
            founders.len(),
            company.name,
            source
        );

        founders
    }
}
