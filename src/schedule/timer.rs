use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};
use tracing::debug;

/// Cancellable repeating timer that paces the game
///
/// The first tick fires one full period after (re)starting. Ticks missed
/// while the owner was busy are not replayed in a burst; the schedule
/// slides instead.
#[derive(Debug)]
pub struct TickTimer {
    period: Duration,
    interval: Option<Interval>,
}

impl TickTimer {
    pub fn start(period: Duration) -> Self {
        Self {
            period,
            interval: Some(Self::make_interval(period)),
        }
    }

    /// A timer that never fires until [`TickTimer::restart`] is called
    pub fn stopped(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    fn make_interval(period: Duration) -> Interval {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval
    }

    /// Wait for the next tick
    ///
    /// Returns `None` straight away if the timer is cancelled, so callers
    /// inside `select!` should guard the branch with [`TickTimer::is_active`].
    pub async fn tick(&mut self) -> Option<Instant> {
        match self.interval.as_mut() {
            Some(interval) => Some(interval.tick().await),
            None => None,
        }
    }

    pub fn cancel(&mut self) {
        if self.interval.take().is_some() {
            debug!(period_ms = self.period.as_millis() as u64, "tick timer cancelled");
        }
    }

    /// Cancel and start again, possibly at a new pace
    pub fn restart(&mut self, period: Duration) {
        self.period = period;
        self.interval = Some(Self::make_interval(period));
        debug!(period_ms = period.as_millis() as u64, "tick timer started");
    }

    pub fn is_active(&self) -> bool {
        self.interval.is_some()
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_after_one_period() {
        let period = Duration::from_millis(200);
        let started = Instant::now();
        let mut timer = TickTimer::start(period);

        let fired = timer.tick().await.unwrap();
        assert_eq!(fired.duration_since(started), period);

        let fired_again = timer.tick().await.unwrap();
        assert_eq!(fired_again.duration_since(started), period * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_ticks() {
        let mut timer = TickTimer::start(Duration::from_millis(100));
        assert!(timer.is_active());

        timer.cancel();

        assert!(!timer.is_active());
        assert_eq!(timer.tick().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_with_new_period() {
        let mut timer = TickTimer::start(Duration::from_millis(300));
        timer.tick().await.unwrap();

        let restarted_at = Instant::now();
        timer.restart(Duration::from_millis(90));

        assert_eq!(timer.period(), Duration::from_millis(90));
        let fired = timer.tick().await.unwrap();
        assert_eq!(fired.duration_since(restarted_at), Duration::from_millis(90));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_timer_can_be_started() {
        let mut timer = TickTimer::stopped(Duration::from_millis(100));
        assert!(!timer.is_active());
        assert_eq!(timer.tick().await, None);

        timer.restart(Duration::from_millis(100));
        assert!(timer.tick().await.is_some());
    }
}
