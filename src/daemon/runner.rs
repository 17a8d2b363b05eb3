//! The 1 Hz tick driver.
//!
//! The engine deliberately owns no clock; this driver is the external
//! scheduler that calls `tick()` once per second, whatever the engine's
//! mode. Tests skip the driver entirely and call `tick()` directly, which
//! is what keeps the countdown logic verifiable without real-time waiting.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::engine::TimerEngine;

/// Drives a shared engine at one tick per second.
pub struct TickDriver {
    /// Shared engine instance
    engine: Arc<Mutex<TimerEngine>>,
}

impl TickDriver {
    /// Creates a driver for the given engine.
    pub fn new(engine: Arc<Mutex<TimerEngine>>) -> Self {
        Self { engine }
    }

    /// Runs the tick loop forever.
    ///
    /// Ticks keep coming while the engine is paused — a paused engine
    /// ignores them. Missed ticks (e.g. after suspend) are skipped, not
    /// replayed; the countdown never jumps by more than one second per
    /// tick.
    pub async fn run(self) {
        let mut ticker = interval(Duration::from_secs(1));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            self.engine.lock().await.tick();
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
