//! Cross-session handoff rules
//!
//! Region-to-region exposure ramp-downs and forced flattening at fixed
//! clock times, evaluated on the shared scheduler tick. Handoffs need
//! sub-window precision (exact minute boundaries) that the generic
//! tick-based phase model does not express, so they live in their own
//! small rule table.
//!
//! Each rule fires at most once per calendar day. That is a designed
//! invariant carried by an explicit last-fired date per rule, not a
//! side effect of the tick interval being coarser than a minute.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Timelike};
use log::{error, info, warn};
use meridian_core::HandoffEvent;
use meridian_ports::{EventSink, PortfolioControl};
use meridian_risk::{RiskBudgetController, RiskError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Standard exposure ramp-down applied to an outgoing region
pub const DEFAULT_WIND_DOWN_FACTOR: Decimal = dec!(0.70);

/// What a rule does when its minute arrives
#[derive(Debug, Clone)]
pub enum HandoffAction {
    /// Restrict new entries for the scope and scale its exposure targets
    /// down. Existing exits remain allowed.
    WindDown { scope: String, factor: Decimal },
    /// Force-close all same-day-opened positions for the scope,
    /// regardless of current P&L. The hard boundary that keeps
    /// dual-region exposure from accumulating across the handoff.
    FlattenIntraday { scope: String },
}

impl HandoffAction {
    fn scope(&self) -> &str {
        match self {
            HandoffAction::WindDown { scope, .. } => scope,
            HandoffAction::FlattenIntraday { scope } => scope,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            HandoffAction::WindDown { .. } => "wind_down",
            HandoffAction::FlattenIntraday { .. } => "flatten_intraday",
        }
    }
}

/// A (time-of-day, action) rule with its once-per-day guard
#[derive(Debug, Clone)]
pub struct HandoffRule {
    /// Minute the rule fires on; seconds are ignored
    at: NaiveTime,
    action: HandoffAction,
    last_fired: Option<NaiveDate>,
}

impl HandoffRule {
    /// Wind-down rule for an outgoing region's sessions
    ///
    /// `factor` must be in (0, 1]; anything else is a configuration
    /// error and is rejected here, before the coordinator ever runs.
    pub fn wind_down(
        at: NaiveTime,
        scope: impl Into<String>,
        factor: Decimal,
    ) -> Result<Self, RiskError> {
        if factor <= Decimal::ZERO || factor > Decimal::ONE {
            return Err(RiskError::InvalidScaleFactor(factor));
        }
        Ok(Self {
            at,
            action: HandoffAction::WindDown {
                scope: scope.into(),
                factor,
            },
            last_fired: None,
        })
    }

    /// Flatten rule at the hard boundary minute
    pub fn flatten_intraday(at: NaiveTime, scope: impl Into<String>) -> Self {
        Self {
            at,
            action: HandoffAction::FlattenIntraday {
                scope: scope.into(),
            },
            last_fired: None,
        }
    }

    /// Human-readable rule label used in events and logs
    pub fn describe(&self) -> String {
        format!(
            "{}@{:02}:{:02}",
            self.action.kind(),
            self.at.hour(),
            self.at.minute()
        )
    }

    fn matches_minute(&self, local: DateTime<FixedOffset>) -> bool {
        local.time().hour() == self.at.hour() && local.time().minute() == self.at.minute()
    }
}

/// Evaluates the handoff rule table on every tick
pub struct HandoffCoordinator {
    rules: Vec<HandoffRule>,
    portfolio: Arc<dyn PortfolioControl>,
    risk: Arc<RiskBudgetController>,
    events: Arc<dyn EventSink>,
    call_timeout: Duration,
}

impl HandoffCoordinator {
    pub fn new(
        rules: Vec<HandoffRule>,
        portfolio: Arc<dyn PortfolioControl>,
        risk: Arc<RiskBudgetController>,
        events: Arc<dyn EventSink>,
        call_timeout: Duration,
    ) -> Self {
        Self {
            rules,
            portfolio,
            risk,
            events,
            call_timeout,
        }
    }

    pub fn rules(&self) -> &[HandoffRule] {
        &self.rules
    }

    /// Check every rule against the current local minute
    ///
    /// A rule that matches and has not yet fired today is marked fired
    /// first, then executed. The mark is kept even when the collaborator
    /// calls fail: a failed action is reported and retried only at the
    /// next day's qualifying minute. Shortening the tick interval below
    /// a minute therefore cannot re-trigger a rule.
    pub async fn evaluate(&mut self, local: DateTime<FixedOffset>) {
        let today = local.date_naive();

        for idx in 0..self.rules.len() {
            if !self.rules[idx].matches_minute(local) || self.rules[idx].last_fired == Some(today) {
                continue;
            }
            self.rules[idx].last_fired = Some(today);

            let rule = self.rules[idx].clone();
            self.fire(&rule, local).await;
        }
    }

    async fn fire(&self, rule: &HandoffRule, local: DateTime<FixedOffset>) {
        let label = rule.describe();
        info!("[HANDOFF] Firing {} for scope {}", label, rule.action.scope());

        match &rule.action {
            HandoffAction::WindDown { scope, factor } => {
                if let Err(reason) = self.bounded(self.portfolio.restrict_entries(scope)).await {
                    error!("[HANDOFF] restrict_entries({}) failed: {}", scope, reason);
                }
                // Factor was validated at rule construction; a rejection
                // here still must not halt the coordinator.
                if let Err(e) = self.risk.scale_budget(scope, *factor) {
                    error!("[HANDOFF] scale_budget({}, {}) rejected: {}", scope, factor, e);
                }
            }
            HandoffAction::FlattenIntraday { scope } => {
                if let Err(reason) = self.bounded(self.portfolio.flatten_intraday(scope)).await {
                    error!("[HANDOFF] flatten_intraday({}) failed: {}", scope, reason);
                }
            }
        }

        let event = HandoffEvent::new(&label, rule.action.scope(), local.to_utc());
        match serde_json::to_value(&event) {
            Ok(payload) => {
                if let Err(reason) = self.bounded(self.events.publish("handoff.fired", payload)).await
                {
                    warn!("[HANDOFF] publish(handoff.fired) failed: {}", reason);
                }
            }
            Err(e) => warn!("[HANDOFF] could not encode handoff event: {}", e),
        }
    }

    async fn bounded<T, E: std::fmt::Display>(
        &self,
        call: impl Future<Output = Result<T, E>>,
    ) -> Result<T, String> {
        match tokio::time::timeout(self.call_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(e.to_string()),
            Err(_) => Err(format!("deadline of {:?} exceeded", self.call_timeout)),
        }
    }
}
