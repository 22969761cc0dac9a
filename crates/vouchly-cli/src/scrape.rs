//! One-shot collection run: fetch, normalize, persist, report per source.
//!
//! Never touches a server's in-memory snapshot; a running server picks the
//! refreshed documents up on its next boot, and publishes its own cycles
//! in the meantime.

use std::sync::Arc;

use vouchly_core::AppConfig;
use vouchly_scraper::{
    normalize_listing, AmazonSource, IdentityPolicy, MaxMoneySource, RotatingIdentity,
    VoucherSource,
};
use vouchly_store::DiskStore;

pub(crate) async fn run() -> anyhow::Result<()> {
    let config = vouchly_core::load_app_config()?;
    let store = DiskStore::new(config.data_dir.clone());
    let sources = build_sources(&config)?;

    for source in sources {
        let id = source.id();
        let listings = source.fetch_all().await;
        let raw = listings.len();
        let records: Vec<_> = listings
            .into_iter()
            .filter_map(|listing| normalize_listing(listing, id))
            .collect();
        store.write_source(id, &records)?;
        println!(
            "{id}: {raw} listings fetched, {} records persisted",
            records.len()
        );
    }

    Ok(())
}

fn build_sources(config: &AppConfig) -> anyhow::Result<Vec<Arc<dyn VoucherSource>>> {
    let identity: Arc<dyn IdentityPolicy> = Arc::new(RotatingIdentity::new(
        config.page_delay_min_ms,
        config.page_delay_max_ms,
    ));

    let mut sources: Vec<Arc<dyn VoucherSource>> = vec![Arc::new(AmazonSource::new(
        config.request_timeout_secs,
        identity,
        config.page_attempts,
        config.retry_backoff_secs,
        config.max_pages,
    )?)];

    match &config.maxmoney_token {
        Some(token) => {
            sources.push(Arc::new(MaxMoneySource::new(
                config.request_timeout_secs,
                token,
            )?));
        }
        None => {
            tracing::warn!("VOUCHLY_MAXMONEY_TOKEN not set; partner source disabled");
        }
    }

    Ok(sources)
}
