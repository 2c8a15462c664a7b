//! `screener --health-check` run as a subprocess against a live server.

mod common;

use std::time::Duration;

use tokio::process::Command;

use common::harness::{TestServerConfig, spawn_test_server};

const BINARY: &str = env!("CARGO_BIN_EXE_screener");

async fn health_check_status(port: u16) -> std::process::ExitStatus {
    let run = Command::new(BINARY)
        .arg("--health-check")
        .env("SCREENER_PORT", port.to_string())
        .kill_on_drop(true)
        .status();

    tokio::time::timeout(Duration::from_secs(10), run)
        .await
        .expect("health check should finish")
        .expect("binary should launch")
}

#[tokio::test]
async fn test_health_check_flag_succeeds_against_running_server() {
    let server = spawn_test_server(TestServerConfig::default()).await.unwrap();

    let status = health_check_status(server.addr.port()).await;

    assert_eq!(status.code(), Some(0), "status: {status:?}");
}

#[tokio::test]
async fn test_health_check_flag_fails_without_server() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let status = health_check_status(port).await;

    assert_eq!(status.code(), Some(1), "status: {status:?}");
}
