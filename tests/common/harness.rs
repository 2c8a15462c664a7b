//! Test server harness.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use screener::gateway::{HandlerState, RouterOptions, create_router_with_state};
use screener::ratelimit::SlidingWindowLimiter;
use screener::scoring::{AnswerScorer, MockScorer};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const STARTUP_WAIT_TIMEOUT_SECS: u64 = 5;
const STARTUP_POLL_INTERVAL_MS: u64 = 50;
const TEST_SERVICE_NAME: &str = "AI Interview Screener (test)";

#[derive(Clone)]
pub struct TestServerConfig {
    pub rate_limit: u32,
    pub rate_window: Duration,
    pub api_prefix: String,
    /// Defaults to [`MockScorer`].
    pub scorer: Option<Arc<dyn AnswerScorer>>,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            rate_limit: 1_000,
            rate_window: Duration::from_secs(60),
            api_prefix: String::new(),
            scorer: None,
        }
    }
}

impl TestServerConfig {
    pub fn with_rate_limit(mut self, limit: u32) -> Self {
        self.rate_limit = limit;
        self
    }

    pub fn with_api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = prefix.into();
        self
    }

    pub fn with_scorer(mut self, scorer: Arc<dyn AnswerScorer>) -> Self {
        self.scorer = Some(scorer);
        self
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub service_name: &'static str,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub async fn wait_for_server_ready(
    addr: SocketAddr,
    timeout: Duration,
    interval: Duration,
) -> Result<(), ServerStartupError> {
    let start = std::time::Instant::now();

    loop {
        if start.elapsed() > timeout {
            return Err(ServerStartupError::Timeout);
        }

        match tokio::net::TcpStream::connect(addr).await {
            Ok(_) => return Ok(()),
            Err(_) => {
                tokio::time::sleep(interval).await;
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerStartupError {
    #[error("Server failed to start within timeout")]
    Timeout,
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
}

/// Spawns a server on an ephemeral port with the mock scorer (or the configured one).
///
/// The server is wired exactly like the binary, including peer-address capture, so the
/// rate limiter keys on `127.0.0.1` unless a proxy header is sent.
pub async fn spawn_test_server(config: TestServerConfig) -> Result<TestServer, ServerStartupError> {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let local_addr = listener.local_addr()?;

    let scorer = config
        .scorer
        .unwrap_or_else(|| Arc::new(MockScorer::new()));
    let limiter = Arc::new(SlidingWindowLimiter::new(
        config.rate_limit,
        config.rate_window,
    ));
    let state = HandlerState::new(scorer, limiter, TEST_SERVICE_NAME);

    let options = RouterOptions {
        api_prefix: config.api_prefix,
        ..RouterOptions::default()
    };
    let app = create_router_with_state(state, &options);

    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let server_handle = tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async {
            let _ = shutdown_rx.await;
        })
        .await
        .unwrap();
    });

    wait_for_server_ready(
        local_addr,
        Duration::from_secs(STARTUP_WAIT_TIMEOUT_SECS),
        Duration::from_millis(STARTUP_POLL_INTERVAL_MS),
    )
    .await?;

    Ok(TestServer {
        addr: local_addr,
        service_name: TEST_SERVICE_NAME,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
    })
}
