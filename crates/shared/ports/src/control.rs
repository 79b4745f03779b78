use async_trait::async_trait;

use crate::error::ControlError;

/// Port to the external agent-management collaborator
///
/// Enable/disable are commands, not state queries: enabling an
/// already-enabled session and disabling an already-disabled one must be
/// safe no-ops on the implementation side. The scheduler re-issues the
/// current desired state every tick and tracks nothing.
#[async_trait]
pub trait AgentControl: Send + Sync {
    /// Start (or keep running) the agents bound to a session
    async fn enable_agents(&self, session_id: &str) -> Result<(), ControlError>;

    /// Stop (or keep stopped) the agents bound to a session
    async fn disable_agents(&self, session_id: &str) -> Result<(), ControlError>;
}

/// Port to the external order/portfolio collaborator
///
/// Scope patterns are session-id prefixes (e.g. "EU_" covers every EU
/// session).
#[async_trait]
pub trait PortfolioControl: Send + Sync {
    /// Reject new-position order attempts for the scope; exits remain
    /// allowed
    async fn restrict_entries(&self, scope: &str) -> Result<(), ControlError>;

    /// Close all same-day-opened positions for the scope, regardless of
    /// current P&L
    async fn flatten_intraday(&self, scope: &str) -> Result<(), ControlError>;
}
