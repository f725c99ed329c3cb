//! Integration tests for the CoinGecko client and the chart session.
//!
//! Most tests run against a throwaway HTTP stub bound to localhost, so they
//! exercise the real transport, decoding and notification paths without
//! network access. The live test is `#[ignore]`.
//!
//! Run the live test with:
//! ```bash
//! cargo test --features native --test provider_integration -- --ignored
//! ```
//! Set `COINGECKO_API_URL` (optionally via `.env`) to target another host.

use std::num::NonZeroU32;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use price_compare::prelude::*;

const HOUR_MS: i64 = 3_600_000;
const T0: i64 = 1_709_251_200_000;

// ─── Stub provider ───────────────────────────────────────────────────────────

type Route = fn(&str) -> (u16, String);

struct Stub {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl Stub {
    async fn start(route: Route) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = requests.clone();

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let log = log.clone();
                tokio::spawn(async move {
                    let mut buf = Vec::new();
                    let mut chunk = [0u8; 1024];
                    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut chunk).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => buf.extend_from_slice(&chunk[..n]),
                        }
                    }
                    let head = String::from_utf8_lossy(&buf);
                    let path = head
                        .lines()
                        .next()
                        .and_then(|line| line.split_whitespace().nth(1))
                        .unwrap_or("/")
                        .to_string();
                    log.lock().unwrap().push(path.clone());

                    let (status, body) = route(&path);
                    let response = format!(
                        "HTTP/1.1 {status} Stub\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        Self {
            base_url: format!("http://{addr}/api/v3"),
            requests,
        }
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn count(&self, needle: &str) -> usize {
        self.requests().iter().filter(|p| p.contains(needle)).count()
    }
}

fn client_with_inbox(stub: &Stub) -> (CoinGeckoClient, Arc<Mutex<Vec<Notification>>>) {
    let inbox = Arc::new(Mutex::new(Vec::new()));
    let sink = inbox.clone();
    let client = CoinGeckoClient::builder()
        .base_url(&stub.base_url)
        .timeout(Duration::from_secs(5))
        .notifier(move |n: Notification| sink.lock().unwrap().push(n))
        .build()
        .unwrap();
    (client, inbox)
}

fn market(id: &str, name: &str, symbol: &str, rank: u32, price: f64) -> String {
    format!(
        r#"{{"id":"{id}","symbol":"{symbol}","name":"{name}","image":"https://img.example/{id}.png","current_price":{price},"market_cap":1000000,"market_cap_rank":{rank},"total_volume":5000,"price_change_percentage_24h":-0.5,"last_updated":"2024-03-01T12:34:56.789Z"}}"#
    )
}

fn markets_body() -> String {
    format!(
        "[{},{},{}]",
        market("bitcoin", "Bitcoin", "btc", 1, 62000.0),
        market("ethereum", "Ethereum", "eth", 2, 3200.0),
        market("tether", "Tether", "usdt", 3, 1.0)
    )
}

/// Hourly series; `jitter_ms` shifts every timestamp.
fn chart_body(prices: &[f64], jitter_ms: i64) -> String {
    let points: Vec<String> = prices
        .iter()
        .enumerate()
        .map(|(i, p)| format!("[{},{p}]", T0 + HOUR_MS * i as i64 + jitter_ms))
        .collect();
    format!(r#"{{"prices":[{}],"market_caps":[],"total_volumes":[]}}"#, points.join(","))
}

fn healthy(path: &str) -> (u16, String) {
    if path.contains("/coins/markets") {
        (200, markets_body())
    } else if path.contains("/coins/bitcoin/market_chart") {
        (200, chart_body(&[60000.0, 61000.0, 62000.0], 0))
    } else if path.contains("/coins/ethereum/market_chart") {
        (200, chart_body(&[3000.0, 3100.0, 3200.0], 1_234))
    } else if path.contains("/search/trending") {
        (
            200,
            r#"{"coins":[{"item":{"id":"pepe","name":"Pepe","symbol":"PEPE","market_cap_rank":40,"thumb":"https://img.example/pepe.png"}}]}"#
                .to_string(),
        )
    } else if path.contains("/simple/price") {
        (200, r#"{"bitcoin":{"usd":62000.5}}"#.to_string())
    } else if path.contains("/ping") {
        (200, r#"{"gecko_says":"(V3) To the Moon!"}"#.to_string())
    } else {
        (404, r#"{"error":"not found"}"#.to_string())
    }
}

fn bitcoin_down(path: &str) -> (u16, String) {
    if path.contains("/coins/bitcoin/market_chart") {
        (500, "internal error".to_string())
    } else {
        healthy(path)
    }
}

fn garbled(path: &str) -> (u16, String) {
    if path.contains("/coins/bitcoin/market_chart") {
        (200, r#"{"prices":[[1709251200000,"#.to_string())
    } else if path.contains("/coins/ethereum/market_chart") {
        (200, r#"{"prices":[[1709251200000]]}"#.to_string())
    } else if path.contains("/coins/markets") {
        (200, r#"{"status":"ok"}"#.to_string())
    } else {
        healthy(path)
    }
}

// ─── Client ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_top_assets_requests_limit_and_parses() {
    let stub = Stub::start(healthy).await;
    let (client, inbox) = client_with_inbox(&stub);

    let assets = client
        .assets()
        .top(NonZeroU32::new(3).unwrap())
        .await
        .unwrap();

    assert_eq!(assets.len(), 3);
    assert_eq!(assets[0].id.as_str(), "bitcoin");
    assert_eq!(assets[0].label(), "Bitcoin (BTC)");
    assert_eq!(assets[1].market_cap_rank, Some(2));
    assert_eq!(assets[2].current_price, 1.0);

    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].starts_with("/api/v3/coins/markets?"));
    assert!(requests[0].contains("vs_currency=usd"));
    assert!(requests[0].contains("order=market_cap_desc"));
    assert!(requests[0].contains("per_page=3"));
    assert!(inbox.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_price_history_requests_window_days() {
    let stub = Stub::start(healthy).await;
    let (client, _) = client_with_inbox(&stub);

    let series = client
        .price_history()
        .get(&"ethereum".into(), Granularity::Days90)
        .await
        .unwrap();

    assert_eq!(series.len(), 3);
    assert_eq!(series.granularity, Granularity::Days90);
    assert_eq!(series.first().map(|p| p.timestamp), Some(T0 + 1_234));
    assert_eq!(
        stub.requests(),
        vec!["/api/v3/coins/ethereum/market_chart?vs_currency=usd&days=90".to_string()]
    );
}

#[tokio::test]
async fn test_server_error_is_unavailable_and_notifies_once() {
    let stub = Stub::start(bitcoin_down).await;
    let (client, inbox) = client_with_inbox(&stub);

    let err = client
        .price_history()
        .get(&"bitcoin".into(), Granularity::Hours24)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ProviderUnavailable);
    assert!(stub.requests()[0].ends_with("days=24"));

    let inbox = inbox.lock().unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].severity, Severity::Error);
    assert_eq!(inbox[0].title, "Failed to load price history");
}

#[tokio::test]
async fn test_unparseable_payloads_are_malformed() {
    let stub = Stub::start(garbled).await;
    let (client, inbox) = client_with_inbox(&stub);

    let truncated = client
        .price_history()
        .get(&"bitcoin".into(), Granularity::Days7)
        .await
        .unwrap_err();
    assert_eq!(truncated.kind(), ErrorKind::MalformedResponse);

    let short_point = client
        .price_history()
        .get(&"ethereum".into(), Granularity::Days7)
        .await
        .unwrap_err();
    assert_eq!(short_point.kind(), ErrorKind::MalformedResponse);

    let wrong_shape = client
        .assets()
        .top(NonZeroU32::new(3).unwrap())
        .await
        .unwrap_err();
    assert_eq!(wrong_shape.kind(), ErrorKind::MalformedResponse);

    let titles: Vec<String> = inbox.lock().unwrap().iter().map(|n| n.title.clone()).collect();
    assert_eq!(
        titles,
        vec![
            "Failed to load price history",
            "Failed to load price history",
            "Failed to load top assets",
        ]
    );
}

#[tokio::test]
async fn test_trending_simple_price_and_ping() {
    let stub = Stub::start(healthy).await;
    let (client, inbox) = client_with_inbox(&stub);

    let trending = client.assets().trending().await.unwrap();
    assert_eq!(trending.len(), 1);
    assert_eq!(trending[0].id.as_str(), "pepe");

    let price = client.assets().simple_price(&"bitcoin".into()).await.unwrap();
    assert_eq!(price, Some(62000.5));

    assert!(client.assets().ping().await);
    assert!(inbox.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_ping_failure_does_not_notify() {
    let stub = Stub::start(|_| (503, String::new())).await;
    let (client, inbox) = client_with_inbox(&stub);

    assert!(!client.assets().ping().await);
    assert!(inbox.lock().unwrap().is_empty());
}

// ─── Session ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_session_compares_two_assets_over_seven_days() {
    let stub = Stub::start(healthy).await;
    let (client, inbox) = client_with_inbox(&stub);
    let config = SessionConfig {
        top_assets_limit: NonZeroU32::new(3).unwrap(),
        ..SessionConfig::default()
    };
    let mut session = ChartSession::with_config(client, config);

    session.load_assets().await.unwrap();
    session.select_secondary(Some("ethereum".into())).unwrap();
    session.settle().await;

    let view = session.view();
    assert!(!view.loading);
    assert_eq!(view.error, None);
    assert_eq!(view.rows.len(), 3);
    for (row, expected) in view.rows.iter().zip([3000.0, 3100.0, 3200.0]) {
        assert!(row.primary.is_some());
        assert_eq!(row.secondary, Some(expected));
    }
    assert_eq!(view.primary.as_ref().map(|s| s.label.as_str()), Some("Bitcoin (BTC)"));
    assert_eq!(
        view.secondary.as_ref().map(|s| s.legend_label.as_str()),
        Some("Ethereum (USD)")
    );

    assert_eq!(stub.count("days=7"), 2);
    assert!(inbox.lock().unwrap().is_empty());

    // Flipping away and back is served from the cache.
    session.select_granularity(Granularity::Days30);
    session.settle().await;
    session.select_granularity(Granularity::Days7);
    assert_eq!(session.in_flight(), 0);
    assert_eq!(stub.count("days=7"), 2);
    assert_eq!(stub.count("days=30"), 2);
}

#[tokio::test]
async fn test_session_keeps_compare_line_when_primary_fails() {
    let stub = Stub::start(bitcoin_down).await;
    let (client, inbox) = client_with_inbox(&stub);
    let config = SessionConfig {
        granularity: Granularity::Hours24,
        ..SessionConfig::default()
    };
    let mut session = ChartSession::with_config(client, config);

    session.load_assets().await.unwrap();
    session.select_secondary(Some("ethereum".into())).unwrap();
    session.settle().await;

    let view = session.view();
    assert_eq!(view.error, Some(ErrorKind::ProviderUnavailable));
    assert!(!view.loading);
    assert!(view.has_secondary_line());
    assert!(view.rows.iter().all(|r| r.primary.is_none()));

    let inbox = inbox.lock().unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].title, "Failed to load price history");
}

// ─── Live ────────────────────────────────────────────────────────────────────

#[tokio::test]
#[ignore]
async fn test_live_top_assets_and_history() {
    dotenvy::dotenv().ok();
    let base_url =
        std::env::var("COINGECKO_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    let client = CoinGeckoClient::builder().base_url(&base_url).build().unwrap();

    let assets = client
        .assets()
        .top(NonZeroU32::new(3).unwrap())
        .await
        .expect("top assets should load");
    assert_eq!(assets.len(), 3);

    let series = client
        .price_history()
        .get(&assets[0].id, Granularity::Hours24)
        .await
        .expect("price history should load");
    assert!(!series.is_empty());
    assert!(series
        .points()
        .windows(2)
        .all(|w| w[0].timestamp <= w[1].timestamp));
}
