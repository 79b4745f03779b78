use thiserror::Error;

/// Failures from the exchange calendar collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Unknown exchange: {0}")]
    UnknownExchange(String),

    #[error("Calendar unavailable: {0}")]
    Unavailable(String),
}

/// Failures from the market-data collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketDataError {
    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("No quote available for {0}")]
    NoQuote(String),

    #[error("Unknown latency channel: {0}")]
    UnknownChannel(String),

    #[error("Market data unavailable: {0}")]
    Unavailable(String),
}

/// Failures from the agent-management and order/portfolio collaborators
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ControlError {
    #[error("Unknown target: {0}")]
    UnknownTarget(String),

    #[error("Command rejected: {0}")]
    Rejected(String),

    #[error("Control channel unavailable: {0}")]
    Unavailable(String),
}

/// Failures from the event bus collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("Event bus unavailable: {0}")]
    Unavailable(String),
}
