//! HTTP client layer — `CoinGeckoHttp`, one method per provider endpoint.

pub mod client;

pub use client::CoinGeckoHttp;
