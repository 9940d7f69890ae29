use tracing::info;

use crate::config::Config;
use crate::error::MonitorError;
use crate::extract::extract_listings;
use crate::fetch::PageFetcher;
use crate::models::Listing;
use crate::notify::Notifier;
use crate::store::SeenStore;

/// One-shot watch over the category page: fetch, extract, diff against the
/// seen ids, push, persist.
pub struct Monitor<F, N> {
    config: Config,
    fetcher: F,
    notifier: N,
    store: SeenStore,
}

impl<F: PageFetcher, N: Notifier> Monitor<F, N> {
    pub fn new(config: Config, fetcher: F, notifier: N) -> Self {
        let store = SeenStore::new(config.state_path.clone());
        Self {
            config,
            fetcher,
            notifier,
            store,
        }
    }

    /// Run the pipeline once. Every failure is fatal, and ids are only
    /// marked seen after their notification went out.
    pub async fn run(&self) -> Result<(), MonitorError> {
        let mut seen = self.store.load();
        info!("{} ids already seen", seen.len());

        let html = self.fetcher.fetch_page(&self.config.category_url).await?;
        let found = extract_listings(&html, &self.config.category_url);

        let new_listings: Vec<&Listing> = found
            .values()
            .filter(|listing| !seen.contains(&listing.id))
            .collect();
        info!("{} listings extracted, {} new", found.len(), new_listings.len());

        if self.config.force_summary {
            let summary = format!(
                "デバッグ: 抽出 {} 件 / 新規 {} 件",
                found.len(),
                new_listings.len()
            );
            self.notifier.notify(&[summary]).await?;
        }

        if !new_listings.is_empty() {
            let mut lines: Vec<String> = new_listings
                .iter()
                .take(self.config.max_notify)
                .map(|listing| format_block(listing))
                .collect();
            if new_listings.len() > self.config.max_notify {
                lines.push(format!(
                    "…ほか {} 件",
                    new_listings.len() - self.config.max_notify
                ));
            }
            self.notifier.notify(&lines).await?;

            for listing in &new_listings {
                seen.insert(listing.id.clone());
            }
        }

        self.store.save(&seen)?;
        Ok(())
    }
}

/// Three-line notification block for one listing.
fn format_block(listing: &Listing) -> String {
    format!(
        "🆕 {}\n価格: {}\n{}",
        listing.title,
        listing.price.as_deref().unwrap_or("-"),
        listing.url
    )
}
