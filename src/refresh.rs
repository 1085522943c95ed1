use tracing::{error, info};

use crate::errors::RefreshError;
use crate::faq_data::{FaqRecord, FaqSnapshot};
use crate::scraping::extract_faq::{extract_faq, FaqSelectors};
use crate::scraping::fetch_page::FetchPage;
use crate::utilities::cache_store::CacheStore;
use crate::utilities::normalize_records::normalize_records;

/// The snapshot to show after a refresh attempt, and how the attempt went.
///
/// On failure `snapshot` is whatever was current before the attempt.
#[derive(Debug)]
pub struct RefreshOutcome {
    pub snapshot: Option<FaqSnapshot>,
    pub result: Result<usize, RefreshError>,
}

impl RefreshOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Fetch, extract and normalize the FAQ page. An empty result is `NoData`.
pub async fn scrape_faq<F: FetchPage>(
    source: &F,
    selectors: &FaqSelectors,
) -> Result<Vec<FaqRecord>, RefreshError> {
    let html = source.fetch_page().await?;
    let raw = extract_faq(&html, selectors);
    let extracted = raw.len();
    let records = normalize_records(raw);

    info!(extracted, kept = records.len(), "Scraped FAQ items");

    if records.is_empty() {
        return Err(RefreshError::NoData);
    }
    Ok(records)
}

/// Replaces `current` with a freshly scraped snapshot and stores it.
/// Any failure leaves `current` untouched.
pub async fn refresh<F: FetchPage>(
    source: &F,
    selectors: &FaqSelectors,
    store: &CacheStore,
    current: Option<FaqSnapshot>,
) -> RefreshOutcome {
    let attempt = async {
        let records = scrape_faq(source, selectors).await?;
        let snapshot = FaqSnapshot::capture(records);
        store.save(&snapshot)?;
        Ok::<_, RefreshError>(snapshot)
    };

    match attempt.await {
        Ok(snapshot) => {
            let count = snapshot.records.len();
            RefreshOutcome {
                snapshot: Some(snapshot),
                result: Ok(count),
            }
        }
        Err(e) => {
            error!(error = %e, "FAQ refresh failed");
            RefreshOutcome {
                snapshot: current,
                result: Err(e),
            }
        }
    }
}

/// Loads the cached snapshot, scraping a new one only when there is none.
pub async fn initialize<F: FetchPage>(
    source: &F,
    selectors: &FaqSelectors,
    store: &CacheStore,
) -> RefreshOutcome {
    if let Some(snapshot) = store.load() {
        let count = snapshot.records.len();
        info!(
            records = count,
            captured_at = %snapshot.captured_at_display(),
            "Using cached FAQ snapshot"
        );
        return RefreshOutcome {
            snapshot: Some(snapshot),
            result: Ok(count),
        };
    }

    info!("No usable cache, fetching FAQ page");
    refresh(source, selectors, store, None).await
}
