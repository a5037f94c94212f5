use anyhow::Result;
use greeting_services::core::probe;
use greeting_services::core::{ProbeOutcome, ProbeTarget, ResponseFormat, ServiceSpec};
use greeting_services::{Fleet, FleetConfig, HttpProbe, MemorySink};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::oneshot;
use tokio_test::assert_ok;

fn local_fleet() -> FleetConfig {
    FleetConfig {
        host: "127.0.0.1".to_string(),
        services: vec![
            ServiceSpec::greeting("beta", 0, "¡Hola desde Beta!"),
            ServiceSpec::greeting("charlie", 0, "¡Hola desde Charlie!"),
            ServiceSpec::greeting("fabrizzio", 0, "¡Hola Fabrizzio!"),
            ServiceSpec::lambda("backend", 0),
        ],
    }
}

#[tokio::test]
async fn test_fleet_serves_every_greeting() -> Result<()> {
    let fleet = Fleet::bind(&local_fleet()).await?;
    let addrs = fleet.local_addrs();

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(fleet.serve(async {
        let _ = stop_rx.await;
    }));

    let client = reqwest::Client::new();
    let expected = [
        ("beta", "¡Hola desde Beta!"),
        ("charlie", "¡Hola desde Charlie!"),
        ("fabrizzio", "¡Hola Fabrizzio!"),
    ];

    for (name, greeting) in expected {
        let addr = addrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, addr)| *addr)
            .expect("service is bound");

        // 每次請求都回傳相同字串
        for _ in 0..2 {
            let response = client.get(format!("http://{}/", addr)).send().await?;
            assert_eq!(response.status(), 200);
            assert_eq!(response.text().await?, greeting);
        }
    }

    let _ = stop_tx.send(());
    assert_ok!(server.await?);
    Ok(())
}

#[tokio::test]
async fn test_lambda_service_sends_cors_headers() -> Result<()> {
    let fleet = Fleet::bind(&local_fleet()).await?;
    let addr = fleet.addr_of("backend").expect("backend is bound");

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(fleet.serve(async {
        let _ = stop_rx.await;
    }));

    let response = reqwest::get(format!("http://{}/", addr)).await?;
    assert_eq!(response.status(), 200);
    let headers = response.headers().clone();
    assert_eq!(headers["access-control-allow-headers"], "Content-Type");
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-methods"], "*");
    assert_eq!(response.text().await?, r#"{"message":"Hello from Lambda!"}"#);

    let _ = stop_tx.send(());
    assert_ok!(server.await?);
    Ok(())
}

#[tokio::test]
async fn test_probe_against_running_fleet() -> Result<()> {
    let fleet = Fleet::bind(&local_fleet()).await?;
    let beta = fleet.addr_of("beta").expect("beta is bound");
    let backend = fleet.addr_of("backend").expect("backend is bound");

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(fleet.serve(async {
        let _ = stop_rx.await;
    }));

    let targets = vec![
        ProbeTarget::new(format!("http://{}/", beta), "result1", "response1"),
        ProbeTarget::new(format!("http://{}/", backend), "result2", "response2")
            .with_format(ResponseFormat::Json),
    ];
    let sink = Arc::new(MemorySink::new());
    let outcomes = probe::run_all(Arc::new(HttpProbe::new(None)?), targets, Arc::clone(&sink)).await;

    assert!(outcomes.iter().all(ProbeOutcome::is_success));
    assert_eq!(
        sink.text("response1").as_deref(),
        Some("Message: \"¡Hola desde Beta!\"")
    );
    assert_eq!(
        sink.text("response2").as_deref(),
        Some("Message: \"Hello from Lambda!\"")
    );

    let _ = stop_tx.send(());
    assert_ok!(server.await?);
    Ok(())
}

#[tokio::test]
async fn test_fleet_from_toml_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("fleet.toml");
    tokio::fs::write(
        &config_path,
        r#"
host = "127.0.0.1"

[[services]]
name = "charlie"
port = 0
greeting = "¡Hola desde Charlie!"
"#,
    )
    .await?;

    let config = FleetConfig::from_file(&config_path)?;
    let fleet = Fleet::bind(&config).await?;
    let addr = fleet.addr_of("charlie").expect("charlie is bound");

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(fleet.serve(async {
        let _ = stop_rx.await;
    }));

    let body = reqwest::get(format!("http://{}/", addr)).await?.text().await?;
    assert_eq!(body, "¡Hola desde Charlie!");

    let _ = stop_tx.send(());
    assert_ok!(server.await?);
    Ok(())
}

#[tokio::test]
async fn test_missing_config_file_is_io_error() {
    let result = FleetConfig::from_file("/nonexistent/greeting-fleet.toml");
    assert!(matches!(
        result,
        Err(greeting_services::GreetError::IoError(_))
    ));
}
