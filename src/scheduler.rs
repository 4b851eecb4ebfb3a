//! The reminder cycle: a pending timer and the overlay it opens, alternating.

use std::time::{Duration, Instant};

use crate::interval::Interval;
use crate::timer::{Timer, TimerEvent, TimerId};

/// Coarse state of the cycle, used by the UI.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Nothing armed and nothing showing.
    Stopped,
    /// Waiting for the pending timer to fire.
    Idle,
    /// The blink overlay is on screen.
    Showing,
}

/// Marker for the overlay currently on screen.
#[derive(Debug, Clone)]
pub struct Overlay {
    shown_at: Instant,
}

impl Overlay {
    /// How long the overlay has been visible.
    pub fn visible_for(&self) -> Duration {
        self.shown_at.elapsed()
    }
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    id: TimerId,
    deadline: Instant,
}

/// Owns the live interval, the single pending timer and the single overlay.
///
/// The pending timer and the overlay are never present at the same time:
/// firing consumes the timer and opens the overlay, dismissing closes the
/// overlay and arms the next timer.
pub struct ReminderCycle<T: Timer> {
    timer: T,
    interval: Interval,
    pending: Option<Pending>,
    overlay: Option<Overlay>,
}

impl<T: Timer> ReminderCycle<T> {
    pub fn new(timer: T, interval: Interval) -> Self {
        Self {
            timer,
            interval,
            pending: None,
            overlay: None,
        }
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// Update the interval used by the next re-arm.
    ///
    /// A timer already in flight keeps its original deadline.
    pub fn set_interval(&mut self, interval: Interval) {
        if interval != self.interval {
            log::debug!("Interval changed to {interval} minutes");
            self.interval = interval;
        }
    }

    pub fn phase(&self) -> Phase {
        match (&self.pending, &self.overlay) {
            (_, Some(_)) => Phase::Showing,
            (Some(_), None) => Phase::Idle,
            (None, None) => Phase::Stopped,
        }
    }

    #[cfg(test)]
    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    #[cfg(test)]
    pub fn pending_timer(&self) -> Option<TimerId> {
        self.pending.map(|pending| pending.id)
    }

    /// Time left until the pending timer fires.
    pub fn remaining(&self) -> Option<Duration> {
        self.pending
            .map(|pending| pending.deadline.saturating_duration_since(Instant::now()))
    }

    /// Start the cycle with `interval`, replacing any pending timer.
    ///
    /// An overlay left on screen is closed so the cycle restarts from now.
    pub fn start(&mut self, interval: Interval) {
        self.interval = interval;
        if self.overlay.take().is_some() {
            log::info!("Closing reminder to restart the cycle");
        }
        self.arm();
        log::info!("Blinkly timer started for {interval} minutes.");
    }

    /// Handle the fire notification of timer `id`.
    ///
    /// Returns true when the overlay was opened. Events from timers that are
    /// no longer pending are dropped.
    pub fn on_timer_fire(&mut self, id: TimerId) -> bool {
        match self.pending {
            Some(pending) if pending.id == id && self.overlay.is_none() => {
                self.pending = None;
                self.overlay = Some(Overlay {
                    shown_at: Instant::now(),
                });
                log::info!("Time to blink, showing reminder");
                true
            }
            _ => {
                log::debug!("Ignoring fire event from stale timer {id}");
                false
            }
        }
    }

    /// Close the overlay and arm the next reminder with the live interval.
    ///
    /// Returns false without touching anything when no overlay is showing.
    pub fn dismiss(&mut self) -> bool {
        let Some(overlay) = self.overlay.take() else {
            return false;
        };
        log::info!(
            "Reminder dismissed after {:.1}s.",
            overlay.visible_for().as_secs_f32()
        );
        self.arm();
        true
    }

    /// Cancel the pending timer, if any, and leave the cycle.
    pub fn cancel_all(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.timer.cancel(pending.id);
            log::info!("Cancelled pending timer {}", pending.id);
        }
    }

    #[cfg(test)]
    pub fn timer(&self) -> &T {
        &self.timer
    }

    #[cfg(test)]
    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    /// Collect fire events the timer has posted since the last frame.
    pub fn drain_timer_events(&mut self, out: &mut Vec<TimerEvent>) {
        self.timer.drain_events(out);
    }

    /// Cancel whatever is pending and arm a fresh timer for the live interval.
    fn arm(&mut self) {
        self.cancel_all();
        let delay = self.interval.as_duration();
        let id = self.timer.arm(delay);
        self.pending = Some(Pending {
            id,
            deadline: Instant::now() + delay,
        });
        log::debug!("Armed timer {id} for {}s", delay.as_secs());
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Timer that only records what it was asked to do.
    #[derive(Debug, Default)]
    pub(crate) struct ManualTimer {
        next_id: TimerId,
        pub armed: Vec<(TimerId, Duration)>,
        pub cancelled: Vec<TimerId>,
        pub fired: Vec<TimerId>,
        queued: Vec<TimerEvent>,
    }

    impl ManualTimer {
        /// Ids armed and neither cancelled nor fired.
        pub fn live(&self) -> Vec<TimerId> {
            self.armed
                .iter()
                .map(|(id, _)| *id)
                .filter(|id| !self.cancelled.contains(id) && !self.fired.contains(id))
                .collect()
        }

        pub fn last_delay(&self) -> Option<Duration> {
            self.armed.last().map(|(_, delay)| *delay)
        }

        /// Let timer `id` elapse; its event waits for the next drain.
        pub fn elapse(&mut self, id: TimerId) {
            self.fired.push(id);
            self.queued.push(TimerEvent::Fired(id));
        }
    }

    impl Timer for ManualTimer {
        fn arm(&mut self, delay: Duration) -> TimerId {
            self.next_id += 1;
            self.armed.push((self.next_id, delay));
            self.next_id
        }

        fn cancel(&mut self, id: TimerId) {
            self.cancelled.push(id);
        }

        fn drain_events(&mut self, out: &mut Vec<TimerEvent>) {
            out.append(&mut self.queued);
        }
    }

    pub(crate) fn minutes(m: u32) -> Interval {
        Interval::from_minutes(m).unwrap()
    }

    fn cycle() -> ReminderCycle<ManualTimer> {
        ReminderCycle::new(ManualTimer::default(), Interval::default())
    }

    /// Fire whatever timer is pending.
    pub(crate) fn fire(cycle: &mut ReminderCycle<ManualTimer>) -> bool {
        let id = cycle.pending_timer().expect("a pending timer");
        cycle.timer.fired.push(id);
        cycle.on_timer_fire(id)
    }

    #[test]
    fn starts_stopped() {
        let cycle = cycle();
        assert_eq!(cycle.phase(), Phase::Stopped);
        assert!(cycle.remaining().is_none());
        assert!(cycle.timer().armed.is_empty());
    }

    #[test]
    fn start_arms_one_timer_for_interval() {
        let mut cycle = cycle();
        cycle.start(minutes(5));

        assert_eq!(cycle.phase(), Phase::Idle);
        assert_eq!(cycle.timer().armed.len(), 1);
        assert_eq!(cycle.timer().last_delay(), Some(Duration::from_secs(300)));
        let remaining = cycle.remaining().unwrap();
        assert!(remaining <= Duration::from_secs(300));
        assert!(remaining > Duration::from_secs(290));
    }

    #[test]
    fn firing_shows_overlay_exactly_once() {
        let mut cycle = cycle();
        cycle.start(minutes(5));
        let id = cycle.pending_timer().unwrap();

        assert!(cycle.on_timer_fire(id));
        assert_eq!(cycle.phase(), Phase::Showing);
        assert!(cycle.overlay().is_some());
        assert!(cycle.pending_timer().is_none());

        assert!(!cycle.on_timer_fire(id));
        assert_eq!(cycle.phase(), Phase::Showing);
    }

    #[test]
    fn dismiss_rearms_for_full_interval() {
        let mut cycle = cycle();
        cycle.start(minutes(5));
        assert!(fire(&mut cycle));

        assert!(cycle.dismiss());
        assert_eq!(cycle.phase(), Phase::Idle);
        assert!(cycle.overlay().is_none());
        assert_eq!(cycle.timer().armed.len(), 2);
        assert_eq!(cycle.timer().live().len(), 1);
        assert_eq!(cycle.timer().last_delay(), Some(Duration::from_secs(300)));
    }

    #[test]
    fn dismiss_without_overlay_is_noop() {
        let mut cycle = cycle();
        assert!(!cycle.dismiss());
        assert_eq!(cycle.phase(), Phase::Stopped);

        cycle.start(minutes(5));
        let pending = cycle.pending_timer();
        assert!(!cycle.dismiss());
        assert_eq!(cycle.pending_timer(), pending);
        assert_eq!(cycle.timer().armed.len(), 1);
        assert!(cycle.timer().cancelled.is_empty());
    }

    #[test]
    fn duplicate_dismiss_arms_once() {
        let mut cycle = cycle();
        cycle.start(minutes(5));
        fire(&mut cycle);
        assert!(cycle.dismiss());
        assert!(!cycle.dismiss());
        assert_eq!(cycle.timer().armed.len(), 2);
    }

    #[test]
    fn interval_change_waits_for_next_dismiss() {
        let mut cycle = cycle();
        cycle.start(minutes(5));
        let pending = cycle.pending_timer();

        cycle.set_interval(minutes(15));
        assert_eq!(cycle.pending_timer(), pending);
        assert_eq!(cycle.timer().armed.len(), 1);
        assert!(cycle.timer().cancelled.is_empty());

        fire(&mut cycle);
        cycle.dismiss();
        assert_eq!(cycle.timer().last_delay(), Some(Duration::from_secs(900)));
    }

    #[test]
    fn restart_replaces_pending_timer() {
        let mut cycle = cycle();
        cycle.start(minutes(5));
        let first = cycle.pending_timer().unwrap();
        cycle.start(minutes(10));
        let second = cycle.pending_timer().unwrap();

        assert_ne!(first, second);
        assert_eq!(cycle.timer().cancelled, vec![first]);
        assert_eq!(cycle.timer().live(), vec![second]);
        assert_eq!(cycle.timer().last_delay(), Some(Duration::from_secs(600)));

        // The first timer's notification may still arrive; it must not open anything.
        assert!(!cycle.on_timer_fire(first));
        assert_eq!(cycle.phase(), Phase::Idle);
    }

    #[test]
    fn start_while_showing_closes_overlay() {
        let mut cycle = cycle();
        cycle.start(minutes(5));
        fire(&mut cycle);

        cycle.start(minutes(2));
        assert_eq!(cycle.phase(), Phase::Idle);
        assert!(cycle.overlay().is_none());
        assert_eq!(cycle.timer().last_delay(), Some(Duration::from_secs(120)));
    }

    #[test]
    fn cancel_all_is_idempotent() {
        let mut cycle = cycle();
        cycle.start(minutes(5));
        let id = cycle.pending_timer().unwrap();

        cycle.cancel_all();
        cycle.cancel_all();
        assert_eq!(cycle.phase(), Phase::Stopped);
        assert_eq!(cycle.timer().cancelled, vec![id]);
        assert!(!cycle.on_timer_fire(id));
    }

    #[test]
    fn cancel_all_leaves_overlay_without_rearming() {
        let mut cycle = cycle();
        cycle.start(minutes(5));
        fire(&mut cycle);
        cycle.cancel_all();
        assert_eq!(cycle.phase(), Phase::Showing);
        assert_eq!(cycle.timer().armed.len(), 1);
    }

    #[test]
    fn several_rounds_alternate() {
        let mut cycle = cycle();
        cycle.start(minutes(1));
        for _ in 0..3 {
            assert_eq!(cycle.phase(), Phase::Idle);
            assert!(fire(&mut cycle));
            assert_eq!(cycle.phase(), Phase::Showing);
            assert!(cycle.dismiss());
        }
        assert_eq!(cycle.timer().armed.len(), 4);
        assert_eq!(cycle.timer().live().len(), 1);
    }
}
