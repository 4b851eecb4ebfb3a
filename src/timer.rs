//! Single-shot delayed actions running on a background thread.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Handle identifying one armed delayed action.
pub type TimerId = u64;

/// Arms and cancels single-shot delayed actions.
///
/// Implementations deliver the fire notification out of band; the owner feeds
/// it back into [`crate::scheduler::ReminderCycle::on_timer_fire`] on the UI thread.
pub trait Timer {
    /// Arm a new action that fires once after `delay`.
    fn arm(&mut self, delay: Duration) -> TimerId;
    /// Cancel a previously armed action. Unknown or already fired ids are ignored.
    fn cancel(&mut self, id: TimerId);
    /// Move fire events posted since the last call into `out`.
    fn drain_events(&mut self, out: &mut Vec<TimerEvent>);
}

/// Events emitted by the waiting thread for the UI thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// The delay of the given action elapsed.
    Fired(TimerId),
}

/// Callback used to wake the UI thread after an event was posted.
pub type Waker = Arc<dyn Fn() + Send + Sync>;

/// Handle to the one waiting thread currently armed.
#[derive(Debug)]
struct PendingAction {
    id: TimerId,
    cancel_tx: Sender<()>,
    join: Option<thread::JoinHandle<()>>,
}

impl PendingAction {
    /// Stop the waiting thread without blocking the UI thread.
    fn cancel(mut self) {
        let _ = self.cancel_tx.send(());
        if let Some(join) = self.join.take() {
            thread::spawn(move || {
                let _ = join.join();
            });
        }
    }
}

/// [`Timer`] backed by one short-lived thread per armed action.
///
/// Only one action is kept pending: arming again cancels the previous one.
pub struct ThreadTimer {
    next_id: TimerId,
    event_tx: Sender<TimerEvent>,
    event_rx: Receiver<TimerEvent>,
    pending: Option<PendingAction>,
    waker: Waker,
}

impl ThreadTimer {
    /// Create a timer that calls `waker` after each fire event is posted.
    pub fn new(waker: impl Fn() + Send + Sync + 'static) -> Self {
        let (event_tx, event_rx) = mpsc::channel();
        Self {
            next_id: 0,
            event_tx,
            event_rx,
            pending: None,
            waker: Arc::new(waker),
        }
    }
}

impl Timer for ThreadTimer {
    fn arm(&mut self, delay: Duration) -> TimerId {
        if let Some(previous) = self.pending.take() {
            log::debug!("Replacing pending timer {}", previous.id);
            previous.cancel();
        }

        self.next_id += 1;
        let id = self.next_id;
        let (cancel_tx, cancel_rx) = mpsc::channel();
        let evt_tx = self.event_tx.clone();
        let waker = Arc::clone(&self.waker);

        let handle = thread::spawn(move || wait_then_fire(id, delay, cancel_rx, evt_tx, waker));

        self.pending = Some(PendingAction {
            id,
            cancel_tx,
            join: Some(handle),
        });
        id
    }

    fn cancel(&mut self, id: TimerId) {
        match self.pending.take() {
            Some(pending) if pending.id == id => pending.cancel(),
            other => self.pending = other,
        }
    }

    fn drain_events(&mut self, out: &mut Vec<TimerEvent>) {
        while let Ok(evt) = self.event_rx.try_recv() {
            out.push(evt);
        }
    }
}

impl Drop for ThreadTimer {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }
    }
}

/// Block until `delay` elapses or the action is cancelled.
fn wait_then_fire(
    id: TimerId,
    delay: Duration,
    cancel_rx: Receiver<()>,
    evt_tx: Sender<TimerEvent>,
    waker: Waker,
) {
    match cancel_rx.recv_timeout(delay) {
        Err(RecvTimeoutError::Timeout) => {
            if evt_tx.send(TimerEvent::Fired(id)).is_ok() {
                waker();
            }
        }
        // Cancelled explicitly or the owner went away.
        Ok(()) | Err(RecvTimeoutError::Disconnected) => {}
    }
}
