//! Supervisor loop: cycle, wait, cycle.
//!
//! The first cycle runs immediately. Every later cycle is preceded by
//! the [`RetryPolicy`] delay, slept through an injectable [`Sleeper`] so
//! tests can drive the loop without real time passing.

use std::future::Future;
use std::time::Duration;

use gaugesync_hass::HubClient;
use gaugesync_widget::UiSink;
use rand::Rng;

use crate::engine::SyncEngine;
use crate::error::{CycleError, SetupError};

/// Delay between sync cycles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Fixed wait before every cycle after the first.
    pub delay: Duration,
    /// Upper bound of a random extra wait added to `delay`.
    pub jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(10),
            jitter: Duration::ZERO,
        }
    }
}

impl RetryPolicy {
    /// Delay before the next cycle, jitter included.
    pub fn next_delay(&self) -> Duration {
        let jitter_ms = self.jitter.as_millis() as u64;
        if jitter_ms == 0 {
            return self.delay;
        }
        self.delay + Duration::from_millis(rand::rng().random_range(0..=jitter_ms))
    }
}

/// Source of the inter-cycle wait.
pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// [`Sleeper`] backed by the Tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Drives a [`SyncEngine`] forever.
pub struct Supervisor<H, S, Z = TokioSleeper> {
    engine: SyncEngine<H, S>,
    sleeper: Z,
    retry: RetryPolicy,
    cycles: u64,
}

impl<H, S, Z> Supervisor<H, S, Z>
where
    H: HubClient,
    S: UiSink,
    Z: Sleeper,
{
    /// Check the hub is reachable and build the supervisor.
    ///
    /// An unreachable hub is a [`SetupError`]; there is no retry.
    pub async fn start(
        engine: SyncEngine<H, S>,
        sleeper: Z,
        retry: RetryPolicy,
    ) -> Result<Self, SetupError> {
        engine
            .hub()
            .check_api()
            .await
            .map_err(SetupError::Unreachable)?;

        tracing::info!("Hub API reachable");

        Ok(Self {
            engine,
            sleeper,
            retry,
            cycles: 0,
        })
    }

    /// Number of cycles started so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn engine(&self) -> &SyncEngine<H, S> {
        &self.engine
    }

    /// Run cycles until the process is terminated.
    pub async fn run(mut self) {
        loop {
            self.step().await;
        }
    }

    /// Wait if this is not the first cycle, then run one cycle.
    ///
    /// Returns the error that ended the cycle after logging it.
    pub async fn step(&mut self) -> CycleError {
        if self.cycles > 0 {
            let delay = self.retry.next_delay();
            tracing::info!(
                delay_ms = delay.as_millis() as u64,
                "Waiting before next sync cycle"
            );
            self.sleeper.sleep(delay).await;
        }

        self.cycles += 1;
        tracing::info!(cycle = self.cycles, "Starting sync cycle");

        let err = self.engine.run_cycle().await;
        tracing::warn!(
            cycle = self.cycles,
            operation = err.operation(),
            error = %err,
            "Sync cycle failed",
        );
        err
    }
}
