//! Periodic tick driver
//!
//! One timer drives the whole core: session-phase evaluation first, then
//! handoff rules, in that order within a tick. Ticks never overlap - a
//! tick that runs long defers the next one instead of racing it - and
//! the driver is stoppable: an in-flight tick completes, no new tick
//! starts after a stop request.

use log::info;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::handoff::HandoffCoordinator;
use crate::scheduler::SessionScheduler;

/// Driver configuration
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// How often to run a scheduling pass
    pub tick_interval: Duration,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(15),
        }
    }
}

/// Owns the scheduler and handoff coordinator and runs them on a timer
pub struct Orchestrator {
    scheduler: SessionScheduler,
    handoff: HandoffCoordinator,
    config: OrchestratorConfig,
}

impl Orchestrator {
    pub fn new(
        scheduler: SessionScheduler,
        handoff: HandoffCoordinator,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            scheduler,
            handoff,
            config,
        }
    }

    pub fn scheduler(&self) -> &SessionScheduler {
        &self.scheduler
    }

    /// Run one full pass: phases first, then handoff rules, so handoff
    /// always sees this tick's freshly computed phases.
    ///
    /// Callable directly for tests; the timer loop calls exactly this.
    pub async fn tick(&mut self) {
        self.scheduler.tick().await;

        let local = self.scheduler.local_now();
        // The weekend short-circuit already disabled everything; handoff
        // rules describe intra-week region transitions.
        if self.scheduler.is_trading_day(local) {
            self.handoff.evaluate(local).await;
        }
    }

    /// Start the periodic loop on the tokio runtime
    pub fn spawn(mut self) -> OrchestratorHandle {
        let (stop_tx, mut stop_rx) = watch::channel(false);

        let join = tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.config.tick_interval);
            // A tick that runs past the next deadline defers it; ticks
            // are never run concurrently.
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            info!(
                "[ORCH] Started, tick interval {:?}",
                self.config.tick_interval
            );

            loop {
                tokio::select! {
                    _ = stop_rx.changed() => break,
                    _ = interval.tick() => {
                        // Not raced against the stop signal: an in-flight
                        // tick always completes.
                        self.tick().await;
                        if *stop_rx.borrow() {
                            break;
                        }
                    }
                }
            }

            info!("[ORCH] Stopped");
        });

        OrchestratorHandle {
            stop: stop_tx,
            join,
        }
    }
}

/// Handle to a running orchestrator
pub struct OrchestratorHandle {
    stop: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl OrchestratorHandle {
    /// Request a stop and wait for the loop to exit
    ///
    /// Best-effort on the in-flight tick: it completes, and no new tick
    /// starts afterwards.
    pub async fn stop(self) {
        let _ = self.stop.send(true);
        let _ = self.join.await;
    }

    /// Abort without waiting for the current tick
    pub fn abort(self) {
        self.join.abort();
    }
}
