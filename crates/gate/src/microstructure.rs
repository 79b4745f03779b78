use log::warn;
use meridian_core::{GateDecision, GateReason};
use meridian_ports::MarketDataSource;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

/// Admission thresholds
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Reject when relative spread exceeds this (strict >, so a spread
    /// exactly at the threshold is admitted)
    pub max_spread_bps: Decimal,
    /// Reject when bid size + ask size is at or below this (<=, so depth
    /// exactly at the threshold is rejected)
    pub min_total_depth: Decimal,
    /// Reject when the most recent data-path latency exceeds this
    /// (strict >, so latency exactly at the threshold is admitted)
    pub max_latency_ms: u64,
    /// Feed channel whose latency gates admission
    pub latency_channel: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            max_spread_bps: dec!(12),
            min_total_depth: dec!(500),
            max_latency_ms: 800,
            latency_channel: "md.quotes".to_string(),
        }
    }
}

/// Pre-trade admission gate over live top-of-book and feed latency
pub struct MicrostructureGate {
    source: Arc<dyn MarketDataSource>,
    config: GateConfig,
}

impl MicrostructureGate {
    pub fn new(source: Arc<dyn MarketDataSource>) -> Self {
        Self::with_config(source, GateConfig::default())
    }

    pub fn with_config(source: Arc<dyn MarketDataSource>, config: GateConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Admission check for a single symbol
    ///
    /// Pure function of its inputs at call time: no memory of past calls,
    /// no backoff, no retry. Collaborator failures reject conservatively,
    /// with the reason of the first check that could not be evaluated.
    pub async fn pre_trade_guard(&self, symbol: &str) -> GateDecision {
        // Spread check first, so the quote is fetched first
        let tob = match self.source.top_of_book(symbol).await {
            Ok(tob) => tob,
            Err(e) => {
                warn!("[GATE] No usable quote for {}: {}", symbol, e);
                return GateDecision::rejected(GateReason::Spread);
            }
        };

        let mid = tob.mid();
        if mid <= Decimal::ZERO || tob.ask < tob.bid {
            warn!(
                "[GATE] Degenerate quote for {}: bid={} ask={}",
                symbol, tob.bid, tob.ask
            );
            return GateDecision::rejected(GateReason::Spread);
        }

        let spread_bps = (tob.ask - tob.bid) / mid * dec!(10_000);
        if spread_bps > self.config.max_spread_bps {
            return GateDecision::rejected(GateReason::Spread).with_spread(spread_bps);
        }

        let total_depth = tob.total_depth();
        if total_depth <= self.config.min_total_depth {
            return GateDecision::rejected(GateReason::Depth)
                .with_spread(spread_bps)
                .with_depth(total_depth);
        }

        let latency_ms = match self
            .source
            .recent_latency_ms(&self.config.latency_channel)
            .await
        {
            Ok(latency) => latency,
            Err(e) => {
                warn!(
                    "[GATE] No latency reading on {}: {}",
                    self.config.latency_channel, e
                );
                return GateDecision::rejected(GateReason::Latency)
                    .with_spread(spread_bps)
                    .with_depth(total_depth);
            }
        };

        if latency_ms > self.config.max_latency_ms {
            return GateDecision::rejected(GateReason::Latency)
                .with_spread(spread_bps)
                .with_depth(total_depth)
                .with_latency(latency_ms);
        }

        GateDecision::admitted(spread_bps, total_depth, latency_ms)
    }
}
