//! Debounced autosave.
//!
//! Change notifications arrive in bursts while a chat is being written.
//! A [`Debouncer`] keeps one pending deadline; every notification pushes it
//! back by the full delay, so the capture runs once per quiet period instead
//! of once per change. The policy does not look at what changed, so an
//! active page can produce several saved sessions over time.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

/// Quiet period before an autosave fires.
pub const DEFAULT_AUTOSAVE_DELAY: Duration = Duration::from_secs(15);

/// Longest wait between checks of the stop flag.
const STOP_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Single-deadline debounce timer.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record a change at `now`, restarting the pending delay.
    pub fn notify(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Whether the quiet period has elapsed at `now`.
    ///
    /// Returns `true` at most once per pending deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

/// Feed change notifications from `changes` through a debouncer and call
/// `on_quiet` each time a quiet period elapses.
///
/// Returns when the sender side is dropped or `stop` is set. A deadline
/// still pending at that point is discarded.
pub fn run_debounced<F>(changes: &Receiver<()>, delay: Duration, stop: &AtomicBool, mut on_quiet: F)
where
    F: FnMut(),
{
    let mut debouncer = Debouncer::new(delay);

    loop {
        if stop.load(Ordering::SeqCst) {
            break;
        }

        let now = Instant::now();
        if debouncer.poll(now) {
            tracing::debug!("quiet period elapsed, running autosave");
            on_quiet();
            continue;
        }

        let wait = debouncer
            .deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
            .unwrap_or(STOP_POLL_INTERVAL)
            .min(STOP_POLL_INTERVAL);

        match changes.recv_timeout(wait) {
            Ok(()) => {
                tracing::trace!("change notification, restarting autosave delay");
                debouncer.notify(Instant::now());
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::thread;

    #[test]
    fn burst_within_window_fires_once() {
        let mut debouncer = Debouncer::new(Duration::from_secs(15));
        let start = Instant::now();

        for i in 0..5 {
            debouncer.notify(start + Duration::from_secs(i * 2));
            assert!(!debouncer.poll(start + Duration::from_secs(i * 2 + 1)));
        }

        let last = start + Duration::from_secs(8);
        assert!(!debouncer.poll(last + Duration::from_secs(14)));
        assert!(debouncer.poll(last + Duration::from_secs(15)));
        assert!(!debouncer.poll(last + Duration::from_secs(30)));
    }

    #[test]
    fn nothing_pending_never_fires() {
        let mut debouncer = Debouncer::new(Duration::from_millis(10));
        assert_eq!(debouncer.deadline(), None);
        assert!(!debouncer.poll(Instant::now() + Duration::from_secs(60)));
    }

    #[test]
    fn separate_bursts_fire_separately() {
        let mut debouncer = Debouncer::new(Duration::from_secs(1));
        let start = Instant::now();

        debouncer.notify(start);
        assert!(debouncer.poll(start + Duration::from_secs(1)));
        debouncer.notify(start + Duration::from_secs(5));
        assert!(debouncer.poll(start + Duration::from_secs(6)));
    }

    #[test]
    fn five_notifications_trigger_one_capture() {
        let (tx, rx) = mpsc::channel();
        let stop = AtomicBool::new(false);
        let delay = Duration::from_millis(150);

        let sender = thread::spawn(move || {
            for _ in 0..5 {
                tx.send(()).unwrap();
                thread::sleep(Duration::from_millis(10));
            }
            // Stay connected well past the quiet period, then hang up
            thread::sleep(Duration::from_millis(600));
        });

        let mut fired = 0;
        run_debounced(&rx, delay, &stop, || fired += 1);
        sender.join().unwrap();

        assert_eq!(fired, 1);
    }

    #[test]
    fn stop_flag_ends_loop() {
        let (_tx, rx) = mpsc::channel::<()>();
        let stop = AtomicBool::new(true);
        let mut fired = 0;

        run_debounced(&rx, Duration::from_millis(1), &stop, || fired += 1);

        assert_eq!(fired, 0);
    }
}
