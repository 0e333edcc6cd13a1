use std::collections::VecDeque;
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use crate::dispatch::generation::Generation;
use crate::models::capture_result::SavedImage;
use crate::models::error::ProviderError;
use crate::session::capture::CaptureTicket;
use crate::traits::provider_source::CameraProvider;

/// Work handed from a background context to the element's main context.
pub enum MainMessage {
    /// A provider acquisition settled.
    ProviderResolved {
        future: Generation,
        result: Result<Arc<dyn CameraProvider>, ProviderError>,
    },

    /// The platform finished (or failed) writing a still.
    CaptureFinished {
        ticket: CaptureTicket,
        outcome: Result<SavedImage, String>,
    },

    /// A focus-ring display timer elapsed.
    FocusRingExpired { display: Generation },
}

impl MainMessage {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ProviderResolved { .. } => "provider_resolved",
            Self::CaptureFinished { .. } => "capture_finished",
            Self::FocusRingExpired { .. } => "focus_ring_expired",
        }
    }
}

struct Shared {
    queue: Mutex<VecDeque<MainMessage>>,
    ready: Condvar,
}

/// The element's confined main context.
///
/// Owned by the element; only the owner drains it. Background threads hold
/// a [`MainHandle`] and post into it.
pub struct MainQueue {
    shared: Arc<Shared>,
}

impl MainQueue {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                queue: Mutex::new(VecDeque::new()),
                ready: Condvar::new(),
            }),
        }
    }

    pub fn handle(&self) -> MainHandle {
        MainHandle {
            shared: Arc::downgrade(&self.shared),
        }
    }

    /// Take the next queued message without blocking.
    pub fn try_pop(&self) -> Option<MainMessage> {
        self.shared.queue.lock().pop_front()
    }

    /// Block until a message arrives or `timeout` elapses.
    pub fn pop_timeout(&self, timeout: Duration) -> Option<MainMessage> {
        let deadline = Instant::now() + timeout;
        let mut queue = self.shared.queue.lock();
        while queue.is_empty() {
            if self.shared.ready.wait_until(&mut queue, deadline).timed_out() {
                break;
            }
        }
        queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.shared.queue.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MainQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable, thread-safe poster into a [`MainQueue`].
///
/// Holds only a weak reference: once the element is gone, posted messages
/// are discarded.
#[derive(Clone)]
pub struct MainHandle {
    shared: Weak<Shared>,
}

impl MainHandle {
    /// Queue `message` for the main context. Returns `false` if the owning
    /// element no longer exists.
    pub fn post(&self, message: MainMessage) -> bool {
        let Some(shared) = self.shared.upgrade() else {
            log::debug!("Main queue gone, discarding {}", message.kind());
            return false;
        };
        shared.queue.lock().push_back(message);
        shared.ready.notify_one();
        true
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::dispatch::generation::GenerationCounter;

    fn expiry(counter: &mut GenerationCounter) -> MainMessage {
        MainMessage::FocusRingExpired {
            display: counter.advance(),
        }
    }

    #[test]
    fn post_then_pop_in_order() {
        let mut counter = GenerationCounter::new();
        let queue = MainQueue::new();
        let handle = queue.handle();

        assert!(handle.post(expiry(&mut counter)));
        assert!(handle.post(expiry(&mut counter)));
        assert_eq!(queue.len(), 2);

        match queue.try_pop() {
            Some(MainMessage::FocusRingExpired { display }) => assert_eq!(display.value(), 1),
            _ => panic!("expected first expiry"),
        }
        assert!(queue.try_pop().is_some());
        assert!(queue.try_pop().is_none());
    }

    #[test]
    fn post_from_background_thread_wakes_waiter() {
        let queue = MainQueue::new();
        let handle = queue.handle();

        let poster = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            let mut counter = GenerationCounter::new();
            handle.post(expiry(&mut counter))
        });

        let message = queue.pop_timeout(Duration::from_secs(5));
        assert!(matches!(message, Some(MainMessage::FocusRingExpired { .. })));
        assert!(poster.join().unwrap());
    }

    #[test]
    fn pop_timeout_returns_none_when_idle() {
        let queue = MainQueue::new();
        assert!(queue.pop_timeout(Duration::from_millis(10)).is_none());
    }

    #[test]
    fn post_after_queue_dropped_is_discarded() {
        let queue = MainQueue::new();
        let handle = queue.handle();
        drop(queue);

        let mut counter = GenerationCounter::new();
        assert!(!handle.post(expiry(&mut counter)));
    }
}
