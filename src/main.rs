//! Interview screener HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use screener::config::Config;
use screener::gateway::{HandlerState, RouterOptions, create_router_with_state};
use screener::ratelimit::SlidingWindowLimiter;
use screener::scoring::{AnswerScorer, GenAiScorer, MockScorer, RetryingScorer};
use screener::telemetry::init_tracing;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

// The health check builds its own current-thread runtime, so the server runtime is only
// started once the flag has been ruled out.
fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(serve())
}

async fn serve() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.log_format, &config.log_level);
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        service = %config.service_name,
        version = screener::constants::SERVICE_VERSION,
        "Interview screener starting"
    );

    let scorer = build_scorer(&config);

    let limiter = Arc::new(SlidingWindowLimiter::new(
        config.rate_limit,
        config.rate_window(),
    ));
    let sweeper = Arc::clone(&limiter).spawn_sweeper(config.rate_sweep_interval());
    tracing::info!(
        limit = config.rate_limit,
        window_secs = config.rate_window_secs,
        "Rate limiter ready"
    );

    let state = HandlerState::new(scorer, limiter, config.service_name.as_str());
    let app = create_router_with_state(state, &RouterOptions::from_config(&config));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, api_prefix = %config.api_prefix, "Server listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    sweeper.abort();
    tracing::info!("Interview screener shutdown complete");
    Ok(())
}

fn build_scorer(config: &Config) -> Arc<dyn AnswerScorer> {
    if config.mock_provider {
        tracing::warn!("SCREENER_MOCK_PROVIDER set, using the deterministic mock scorer");
        return Arc::new(MockScorer::new());
    }

    let scorer: Arc<dyn AnswerScorer> = Arc::new(GenAiScorer::new(
        config.model.clone(),
        config.scoring_timeout(),
    ));
    tracing::info!(
        model = %config.model,
        timeout_secs = config.scoring_timeout_secs,
        max_retries = config.scoring_max_retries,
        "Using provider-backed scorer"
    );

    if config.scoring_max_retries == 0 {
        return scorer;
    }
    Arc::new(RetryingScorer::new(scorer, config.scoring_max_retries))
}

fn run_health_check() -> i32 {
    let port = std::env::var("SCREENER_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8000);

    let url = format!("http://127.0.0.1:{}/health", port);

    let Ok(rt) = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    else {
        return 1;
    };

    rt.block_on(async {
        let Ok(client) = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
        else {
            return 1;
        };

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
