//! Offline lookup against the persisted voucher documents.

use vouchly_match::{best_match, MatchError};
use vouchly_store::DiskStore;

pub(crate) fn run(text: &str, min_score: Option<i64>) -> anyhow::Result<()> {
    let config = vouchly_core::load_app_config()?;
    let store = DiskStore::new(config.data_dir);
    let records = store.read_merged();

    let min_score = min_score.unwrap_or(config.min_match_score);
    match best_match(&records, text, min_score) {
        Ok(winner) => {
            println!(
                "{} ({}% off, {})",
                winner.name, winner.discount_pct, winner.site_name
            );
            println!("  in stock: {}", if winner.in_stock { "yes" } else { "no" });
            println!("  url: {}", winner.url);
            Ok(())
        }
        Err(error @ (MatchError::NoLooseMatch | MatchError::BelowThreshold { .. })) => {
            println!("no match: {error}");
            Ok(())
        }
        Err(MatchError::EmptyCorpus) => {
            anyhow::bail!("no voucher documents found; run `vouchly-cli scrape` first")
        }
        Err(error) => Err(error.into()),
    }
}
