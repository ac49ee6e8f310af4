pub mod client;

pub use client::MockBinanceClient;
