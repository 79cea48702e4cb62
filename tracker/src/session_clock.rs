use tokio::time::{Duration, Instant, Interval, interval_at};

/// Wall-clock stopwatch for one tracking session, ticking once per second.
///
/// The reading is always derived from the start instant, never from counting
/// ticks, so a late tick cannot skew it.
#[derive(Debug, Default)]
pub struct SessionClock {
    started_at: Option<Instant>,
    frozen_secs: u64,
    ticker: Option<Interval>,
}

impl SessionClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting from zero. The first tick lands one second in, not
    /// immediately. Starting a running clock is a no-op.
    pub fn start(&mut self) {
        if self.started_at.is_some() {
            tracing::warn!("Session clock already running");
            return;
        }

        let now = Instant::now();
        self.started_at = Some(now);
        self.frozen_secs = 0;
        self.ticker = Some(interval_at(
            now + Duration::from_secs(1),
            Duration::from_secs(1),
        ));
    }

    /// Stop ticking and freeze the reading. Stopping a stopped clock is a
    /// no-op.
    pub fn stop(&mut self) {
        if let Some(started_at) = self.started_at.take() {
            self.frozen_secs = started_at.elapsed().as_secs();
        }
        self.ticker = None;
    }

    /// Whole seconds since `start`, or the frozen reading after `stop`.
    pub fn elapsed_secs(&self) -> u64 {
        match self.started_at {
            Some(started_at) => started_at.elapsed().as_secs(),
            None => self.frozen_secs,
        }
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Wait for the next second boundary and return the reading at that
    /// point. Pends forever while the clock is stopped, so it can sit in a
    /// `select!` arm without firing.
    pub async fn tick(&mut self) -> u64 {
        match self.ticker.as_mut() {
            Some(ticker) => {
                ticker.tick().await;
                self.elapsed_secs()
            }
            None => std::future::pending().await,
        }
    }
}
