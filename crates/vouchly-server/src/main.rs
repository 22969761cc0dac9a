mod api;
mod cycle;
mod scheduler;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use vouchly_core::AppConfig;
use vouchly_scraper::{
    AmazonSource, IdentityPolicy, MaxMoneySource, RotatingIdentity, VoucherSource,
};
use vouchly_store::{DiskStore, Snapshot, SnapshotHandle};

use crate::api::{build_app, AppState};
use crate::scheduler::CycleRunner;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(vouchly_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let store = Arc::new(DiskStore::new(config.data_dir.clone()));

    // Serve whatever the last run persisted until the first cycle lands.
    let seeded = store.read_merged();
    if seeded.is_empty() {
        tracing::info!("no persisted voucher documents; starting with an empty snapshot");
    } else {
        tracing::info!(records = seeded.len(), "seeded snapshot from persisted documents");
    }
    let snapshot = SnapshotHandle::new(Snapshot::new(seeded));

    let sources = build_sources(&config)?;
    let runner = Arc::new(CycleRunner::new(
        sources,
        Arc::clone(&store),
        snapshot.clone(),
    ));

    // First refresh runs in the background so startup never blocks on
    // upstream sites.
    let startup_runner = Arc::clone(&runner);
    tokio::spawn(async move {
        startup_runner.run_guarded().await;
    });

    let _scheduler = scheduler::build_scheduler(runner, &config.scrape_cron).await?;

    let app = build_app(
        AppState {
            snapshot,
            min_score: config.min_match_score,
        },
        config.cors_origin.as_deref(),
    );

    tracing::info!(addr = %config.bind_addr, "voucher service listening");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
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

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
