//! Per-tick session phase evaluation and agent enablement
//!
//! The scheduler is stateless between ticks: every phase is re-derived
//! from scratch, enable/disable is re-issued as the current desired
//! state, and a status event is published whether or not anything
//! changed. Running the same tick twice with unchanged inputs produces
//! the same calls.

use chrono::{DateTime, Datelike, FixedOffset, Offset, Utc};
use log::warn;
use meridian_core::{
    resolve_phase, Session, SessionPhase, SessionRegistry, SessionStatusEvent, WeekdayMask,
};
use meridian_ports::{AgentControl, Clock, EventSink, ExchangeCalendar};
use meridian_risk::RiskBudgetController;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Scheduler configuration
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Master time zone all decisions are made in
    pub master_offset: FixedOffset,
    /// System-wide trading days; outside these every session is disabled
    /// before any per-session logic runs
    pub trading_weekdays: WeekdayMask,
    /// Deadline applied to every collaborator call, so one hung
    /// collaborator cannot stall the loop
    pub call_timeout: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            master_offset: Utc.fix(),
            trading_weekdays: WeekdayMask::weekdays(),
            call_timeout: Duration::from_secs(5),
        }
    }
}

/// Recomputes every session's phase on a fixed interval and drives agent
/// enablement accordingly
pub struct SessionScheduler {
    registry: Arc<SessionRegistry>,
    clock: Arc<dyn Clock>,
    calendar: Arc<dyn ExchangeCalendar>,
    agents: Arc<dyn AgentControl>,
    events: Arc<dyn EventSink>,
    risk: Arc<RiskBudgetController>,
    config: SchedulerConfig,
}

impl SessionScheduler {
    pub fn new(
        registry: Arc<SessionRegistry>,
        clock: Arc<dyn Clock>,
        calendar: Arc<dyn ExchangeCalendar>,
        agents: Arc<dyn AgentControl>,
        events: Arc<dyn EventSink>,
        risk: Arc<RiskBudgetController>,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            registry,
            clock,
            calendar,
            agents,
            events,
            risk,
            config,
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Read-only snapshot of the static registry, for diagnostics/UI
    pub fn list_sessions(&self) -> &[Session] {
        self.registry.sessions()
    }

    /// Current time in the master time zone
    pub fn local_now(&self) -> DateTime<FixedOffset> {
        self.clock.now().with_timezone(&self.config.master_offset)
    }

    /// Is the given local time on a system trading day?
    pub fn is_trading_day(&self, local: DateTime<FixedOffset>) -> bool {
        self.config.trading_weekdays.contains(local.weekday())
    }

    /// Run one scheduling pass
    ///
    /// Never returns an error to the driver: every per-session failure
    /// degrades to the conservative outcome for that session and is
    /// reported at warn level, and evaluation of the remaining sessions
    /// continues.
    pub async fn tick(&self) {
        let now = self.clock.now();
        let local = now.with_timezone(&self.config.master_offset);

        // Weekend/holiday short-circuit: a full-system override checked
        // before any per-session logic.
        if !self.is_trading_day(local) {
            self.disable_all().await;
            return;
        }

        for session in self.registry.sessions() {
            if !session.active {
                continue;
            }
            self.evaluate_session(session, local, now).await;
        }
    }

    /// Disable every registered session's agents (non-trading day)
    async fn disable_all(&self) {
        for session in self.registry.sessions() {
            if let Err(reason) = self
                .bounded(self.agents.disable_agents(&session.id))
                .await
            {
                warn!(
                    "[SCHEDULER] disable_agents({}) failed: {}",
                    session.id, reason
                );
            }
        }
    }

    /// Evaluate a single session: phase, budget, agents, event
    async fn evaluate_session(
        &self,
        session: &Session,
        local: DateTime<FixedOffset>,
        now: DateTime<Utc>,
    ) {
        let phase = self.classify(session, local).await;

        if phase == SessionPhase::Open {
            // Budget first, so a freshly enabled agent never reads a
            // stale or zero budget.
            self.risk.set_budget(
                &session.id,
                session.max_gross_exposure_pct,
                session.max_order_notional,
            );
            if let Err(reason) = self.bounded(self.agents.enable_agents(&session.id)).await {
                warn!(
                    "[SCHEDULER] enable_agents({}) failed: {}",
                    session.id, reason
                );
            }
        } else if let Err(reason) = self.bounded(self.agents.disable_agents(&session.id)).await {
            warn!(
                "[SCHEDULER] disable_agents({}) failed: {}",
                session.id, reason
            );
        }

        self.publish_status(session, phase, now).await;
    }

    /// Derive the session's phase for the current tick
    ///
    /// An exchange-status query that fails or times out resolves the
    /// session conservatively to `ClosedExchange` for this tick.
    async fn classify(&self, session: &Session, local: DateTime<FixedOffset>) -> SessionPhase {
        let in_window =
            session.weekdays.contains(local.weekday()) && session.in_window(local.time());
        if !in_window {
            return SessionPhase::OutOfWindow;
        }

        let open = match self
            .bounded(
                self.calendar
                    .is_exchange_open(&session.exchanges, self.config.master_offset),
            )
            .await
        {
            Ok(open) => open,
            Err(reason) => {
                warn!(
                    "[SCHEDULER] exchange status unresolved for {}: {}",
                    session.id, reason
                );
                return SessionPhase::ClosedExchange;
            }
        };

        let in_auction = if session.skip_auctions {
            match self
                .bounded(
                    self.calendar
                        .is_in_auction(&session.exchanges, self.config.master_offset),
                )
                .await
            {
                Ok(in_auction) => in_auction,
                Err(reason) => {
                    warn!(
                        "[SCHEDULER] auction status unresolved for {}: {}",
                        session.id, reason
                    );
                    return SessionPhase::ClosedExchange;
                }
            }
        } else {
            false
        };

        resolve_phase(true, open, in_auction)
    }

    /// Publish the per-tick status event; failures are reported, never
    /// propagated
    async fn publish_status(&self, session: &Session, phase: SessionPhase, now: DateTime<Utc>) {
        let event = SessionStatusEvent::new(&session.id, phase, &session.universe, now);
        let payload = match serde_json::to_value(&event) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("[SCHEDULER] could not encode status event: {}", e);
                return;
            }
        };

        if let Err(reason) = self.bounded(self.events.publish("session.status", payload)).await {
            warn!(
                "[SCHEDULER] publish(session.status) failed for {}: {}",
                session.id, reason
            );
        }
    }

    /// Apply the per-call deadline to a collaborator call
    async fn bounded<T, E: std::fmt::Display>(
        &self,
        call: impl Future<Output = Result<T, E>>,
    ) -> Result<T, String> {
        match tokio::time::timeout(self.config.call_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(e.to_string()),
            Err(_) => Err(format!(
                "deadline of {:?} exceeded",
                self.config.call_timeout
            )),
        }
    }
}
