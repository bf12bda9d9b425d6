//! One-second countdown and alert ticker.

use std::time::Duration;

use adzan_schedule::PrayerAlarm;
use adzan_types::{NextPrayerInfo, PrayerAlert};
use chrono::NaiveDateTime;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::day::DaySchedules;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Source of local wall-clock time.
pub trait Clock: Send + 'static {
    fn now(&self) -> NaiveDateTime;
}

/// The device's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

impl<F> Clock for F
where
    F: Fn() -> NaiveDateTime + Send + 'static,
{
    fn now(&self) -> NaiveDateTime {
        self()
    }
}

/// What one tick observed.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub now: NaiveDateTime,
    pub next: Option<NextPrayerInfo>,
    /// Set on the single tick that enters a prayer's alert window.
    pub alert: Option<PrayerAlert>,
}

/// Owns the ticker task. Dropping it stops the ticker.
#[derive(Debug)]
pub struct TickerHandle {
    task: JoinHandle<()>,
}

impl TickerHandle {
    pub fn stop(self) {}

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawns a task that, once per second, recomputes the next prayer from the
/// latest schedules and polls the alarm, handing each [`Tick`] to `on_tick`.
///
/// Publish fresh tables (new day, new location) through the `watch` sender;
/// the ticker picks them up on its next tick. Must be called inside a tokio
/// runtime.
pub fn spawn_prayer_ticker<C, F>(schedules: watch::Receiver<DaySchedules>, clock: C, mut on_tick: F) -> TickerHandle
where
    C: Clock,
    F: FnMut(Tick) + Send + 'static,
{
    let task = tokio::spawn(async move {
        let mut alarm = PrayerAlarm::new();
        let mut interval = tokio::time::interval(TICK_INTERVAL);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            let now = clock.now();
            let (next, alert) = {
                let day = schedules.borrow();
                (day.next_prayer(now), alarm.poll(&day.today, now))
            };
            on_tick(Tick { now, next, alert });
        }
    });
    tracing::debug!("prayer ticker started");
    TickerHandle { task }
}
