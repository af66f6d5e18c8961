use std::time::Duration;

use tokio::time::{self, Interval, MissedTickBehavior};

/// One-second pacing for the focus timer.
///
/// The interval is re-armed whenever the timer goes from stopped to running,
/// so time spent stopped or paused never turns into a burst of ticks.
pub struct Ticker {
    interval: Interval,
    armed: bool,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self {
            interval,
            armed: false,
        }
    }

    /// Follows the timer's running state. Returns whether ticks should be
    /// awaited.
    pub fn sync(&mut self, running: bool) -> bool {
        if running && !self.armed {
            self.interval.reset();
        }
        self.armed = running;
        self.armed
    }

    pub async fn tick(&mut self) {
        self.interval.tick().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studyforge_app::FocusTimer;

    /// Ticks delivered to `timer` until `window` elapses
    async fn drive(ticker: &mut Ticker, timer: &mut FocusTimer, window: Duration) -> usize {
        let deadline = time::sleep(window);
        tokio::pin!(deadline);
        let mut ticks = 0;
        loop {
            let running = ticker.sync(timer.is_running());
            tokio::select! {
                _ = &mut deadline => return ticks,
                _ = ticker.tick(), if running => {
                    timer.tick();
                    ticks += 1;
                }
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_time_is_not_replayed_on_start() {
        let mut ticker = Ticker::new(Duration::from_secs(1));
        let mut timer = FocusTimer::new(25, 5);

        assert_eq!(drive(&mut ticker, &mut timer, Duration::from_secs(5)).await, 0);

        timer.start();
        assert_eq!(drive(&mut ticker, &mut timer, Duration::from_millis(200)).await, 0);
        assert_eq!(timer.display(), "25:00");

        assert_eq!(drive(&mut ticker, &mut timer, Duration::from_secs(3)).await, 3);
        assert_eq!(timer.display(), "24:57");
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_preserves_remaining_time() {
        let mut ticker = Ticker::new(Duration::from_secs(1));
        let mut timer = FocusTimer::new(25, 5);

        timer.start();
        drive(&mut ticker, &mut timer, Duration::from_millis(2500)).await;
        assert_eq!(timer.display(), "24:58");

        timer.pause();
        assert_eq!(drive(&mut ticker, &mut timer, Duration::from_secs(30)).await, 0);

        timer.start();
        assert_eq!(drive(&mut ticker, &mut timer, Duration::from_millis(500)).await, 0);
        assert_eq!(timer.display(), "24:58");
        assert_eq!(timer.sessions_completed(), 0);
    }
}
