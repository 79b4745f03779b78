use async_trait::async_trait;
use chrono::FixedOffset;

use crate::error::CalendarError;

/// Port for exchange open/auction status
///
/// Holiday and calendar resolution lives behind this boundary; the core
/// depends on the answers but does not implement them. Implementations
/// must tolerate concurrent reads.
#[async_trait]
pub trait ExchangeCalendar: Send + Sync {
    /// Are ALL of the given exchanges currently open for continuous
    /// trading, evaluated in the given time zone?
    async fn is_exchange_open(
        &self,
        exchanges: &[String],
        tz: FixedOffset,
    ) -> Result<bool, CalendarError>;

    /// Is ANY of the given exchanges currently in an auction phase?
    async fn is_in_auction(
        &self,
        exchanges: &[String],
        tz: FixedOffset,
    ) -> Result<bool, CalendarError>;
}
