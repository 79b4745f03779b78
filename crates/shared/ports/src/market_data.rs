use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::MarketDataError;

/// Best bid/ask with displayed sizes
///
/// Sizes are in units consistent with the quote source (shares,
/// contracts).
#[derive(Debug, Clone, PartialEq)]
pub struct TopOfBook {
    pub bid: Decimal,
    pub ask: Decimal,
    pub bid_size: Decimal,
    pub ask_size: Decimal,
}

impl TopOfBook {
    /// Mid-price, (bid + ask) / 2
    pub fn mid(&self) -> Decimal {
        (self.bid + self.ask) / Decimal::TWO
    }

    /// Displayed depth on both sides combined
    pub fn total_depth(&self) -> Decimal {
        self.bid_size + self.ask_size
    }
}

/// Port for live quote and feed-latency queries
///
/// The gate fetches through this on every call; staleness defeats the
/// admission check, so implementations must not serve cached answers.
/// Must tolerate concurrent reads.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Current top-of-book for a symbol
    async fn top_of_book(&self, symbol: &str) -> Result<TopOfBook, MarketDataError>;

    /// Most recent data-path latency for a feed channel, in milliseconds
    async fn recent_latency_ms(&self, channel: &str) -> Result<u64, MarketDataError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_mid_and_depth() {
        let tob = TopOfBook {
            bid: dec!(99.95),
            ask: dec!(100.05),
            bid_size: dec!(1000),
            ask_size: dec!(1000),
        };
        assert_eq!(tob.mid(), dec!(100.00));
        assert_eq!(tob.total_depth(), dec!(2000));
    }
}
