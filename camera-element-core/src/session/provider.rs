use std::fmt;
use std::sync::Arc;

use crate::dispatch::generation::{Generation, GenerationCounter};
use crate::dispatch::main_queue::{MainHandle, MainMessage};
use crate::models::error::ProviderError;
use crate::traits::provider_source::{CameraProvider, ProviderSource};

/// State of the single provider future held by an element.
enum FutureState {
    Idle,
    Pending(Generation),
    Ready(Arc<dyn CameraProvider>),
    Failed(ProviderError),
}

impl fmt::Debug for FutureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("Idle"),
            Self::Pending(generation) => write!(f, "Pending({})", generation.value()),
            Self::Ready(_) => f.write_str("Ready"),
            Self::Failed(e) => write!(f, "Failed({})", e),
        }
    }
}

/// Result of [`HardwareSessionProvider::acquire`].
pub enum Acquire {
    Ready(Arc<dyn CameraProvider>),
    /// The acquisition is outstanding; a `ProviderResolved` message follows.
    Pending,
    Unavailable(ProviderError),
}

/// Wraps the platform's asynchronous provider acquisition into one
/// re-usable future per element.
///
/// Pre-warmed at element construction when permission is already granted,
/// so acquisition latency overlaps with host layout. Detach does not cancel
/// it; a completion for an element that no longer exists is discarded by
/// the main queue.
pub struct HardwareSessionProvider {
    source: Arc<dyn ProviderSource>,
    state: FutureState,
    futures: GenerationCounter,
    requests_started: u32,
}

impl HardwareSessionProvider {
    pub fn new(source: Arc<dyn ProviderSource>) -> Self {
        Self {
            source,
            state: FutureState::Idle,
            futures: GenerationCounter::new(),
            requests_started: 0,
        }
    }

    /// Start acquisition early if nothing has been started yet.
    pub fn prewarm(&mut self, main: &MainHandle) {
        if matches!(self.state, FutureState::Idle) {
            log::info!("Pre-warming camera provider");
            self.start(main);
        }
    }

    /// Idempotent acquisition.
    ///
    /// A second call while outstanding joins the same future; a call after
    /// a failure short-circuits without new platform work.
    pub fn acquire(&mut self, main: &MainHandle) -> Acquire {
        match &self.state {
            FutureState::Ready(provider) => Acquire::Ready(Arc::clone(provider)),
            FutureState::Pending(_) => Acquire::Pending,
            FutureState::Failed(e) => Acquire::Unavailable(e.clone()),
            FutureState::Idle => {
                self.start(main);
                Acquire::Pending
            }
        }
    }

    /// Settle the future on the main context.
    ///
    /// Returns `None` for a completion of a future that has since been
    /// invalidated.
    pub fn resolve(
        &mut self,
        future: Generation,
        result: Result<Arc<dyn CameraProvider>, ProviderError>,
    ) -> Option<Result<Arc<dyn CameraProvider>, ProviderError>> {
        if !matches!(self.state, FutureState::Pending(current) if current == future) {
            log::debug!(
                "Dropping stale provider completion {} (state={:?})",
                future.value(),
                self.state
            );
            return None;
        }
        self.state = match &result {
            Ok(provider) => {
                log::info!("Camera provider obtained");
                FutureState::Ready(Arc::clone(provider))
            }
            Err(e) => {
                log::error!("Camera provider error: {}", e);
                FutureState::Failed(e.clone())
            }
        };
        Some(result)
    }

    /// Forget a failed acquisition after a late permission grant so the next
    /// `acquire` starts fresh platform work.
    pub fn invalidate(&mut self) {
        if matches!(self.state, FutureState::Failed(_)) {
            log::info!("Invalidating failed provider future after permission grant");
            self.futures.advance();
            self.state = FutureState::Idle;
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, FutureState::Pending(_))
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, FutureState::Ready(_))
    }

    /// How many platform acquisitions this element has started.
    pub fn requests_started(&self) -> u32 {
        self.requests_started
    }

    fn start(&mut self, main: &MainHandle) {
        let future = self.futures.advance();
        self.state = FutureState::Pending(future);
        self.requests_started += 1;

        let main = main.clone();
        self.source.request_provider(Box::new(move |result| {
            main.post(MainMessage::ProviderResolved { future, result });
        }));
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;
    use crate::dispatch::main_queue::MainQueue;
    use crate::models::config::DeviceSelector;
    use crate::models::hardware::UseCaseSet;
    use crate::traits::camera_device::CameraDevice;
    use crate::traits::lifecycle_scope::LifecycleScope;
    use crate::traits::provider_source::ProviderCallback;

    struct NullProvider;

    impl CameraProvider for NullProvider {
        fn bind_to_lifecycle(
            &self,
            _scope: &dyn LifecycleScope,
            _device: DeviceSelector,
            _use_cases: &UseCaseSet,
        ) -> Result<Arc<dyn CameraDevice>, String> {
            Err("not bindable".into())
        }

        fn unbind_all(&self) {}
    }

    /// Holds callbacks until the test completes them.
    #[derive(Default)]
    struct ManualSource {
        pending: Mutex<Vec<ProviderCallback>>,
    }

    impl ManualSource {
        fn complete(&self, result: Result<Arc<dyn CameraProvider>, ProviderError>) {
            let callback = self.pending.lock().pop().unwrap();
            callback(result);
        }
    }

    impl ProviderSource for ManualSource {
        fn request_provider(&self, complete: ProviderCallback) {
            self.pending.lock().push(complete);
        }
    }

    fn resolve_next(queue: &MainQueue, provider: &mut HardwareSessionProvider) -> bool {
        match queue.try_pop() {
            Some(MainMessage::ProviderResolved { future, result }) => {
                provider.resolve(future, result).is_some()
            }
            _ => panic!("expected provider message"),
        }
    }

    #[test]
    fn concurrent_acquires_share_one_future() {
        let queue = MainQueue::new();
        let source = Arc::new(ManualSource::default());
        let mut provider = HardwareSessionProvider::new(source.clone());

        assert!(matches!(provider.acquire(&queue.handle()), Acquire::Pending));
        assert!(matches!(provider.acquire(&queue.handle()), Acquire::Pending));
        assert_eq!(provider.requests_started(), 1);

        source.complete(Ok(Arc::new(NullProvider)));
        assert!(resolve_next(&queue, &mut provider));
        assert!(matches!(provider.acquire(&queue.handle()), Acquire::Ready(_)));
        assert_eq!(provider.requests_started(), 1);
    }

    #[test]
    fn failure_short_circuits_until_invalidated() {
        let queue = MainQueue::new();
        let source = Arc::new(ManualSource::default());
        let mut provider = HardwareSessionProvider::new(source.clone());

        provider.acquire(&queue.handle());
        source.complete(Err(ProviderError::Unavailable("no camera service".into())));
        assert!(resolve_next(&queue, &mut provider));

        assert!(matches!(provider.acquire(&queue.handle()), Acquire::Unavailable(_)));
        assert_eq!(provider.requests_started(), 1);

        provider.invalidate();
        assert!(matches!(provider.acquire(&queue.handle()), Acquire::Pending));
        assert_eq!(provider.requests_started(), 2);
    }

    #[test]
    fn prewarm_is_reused_by_acquire() {
        let queue = MainQueue::new();
        let source = Arc::new(ManualSource::default());
        let mut provider = HardwareSessionProvider::new(source.clone());

        provider.prewarm(&queue.handle());
        provider.prewarm(&queue.handle());
        assert!(provider.is_pending());
        assert!(matches!(provider.acquire(&queue.handle()), Acquire::Pending));
        assert_eq!(provider.requests_started(), 1);
    }

    #[test]
    fn stale_completion_is_dropped() {
        let queue = MainQueue::new();
        let source = Arc::new(ManualSource::default());
        let mut provider = HardwareSessionProvider::new(source.clone());

        provider.acquire(&queue.handle());
        source.complete(Err(ProviderError::PermissionMissing));
        assert!(resolve_next(&queue, &mut provider));
        provider.invalidate();
        provider.acquire(&queue.handle());

        // A duplicate completion for the first, invalidated future.
        let first = GenerationCounter::new().advance();
        assert!(provider.resolve(first, Ok(Arc::new(NullProvider))).is_none());
        assert!(provider.is_pending());
    }

    #[test]
    fn completion_after_element_gone_is_discarded() {
        let queue = MainQueue::new();
        let source = Arc::new(ManualSource::default());
        let mut provider = HardwareSessionProvider::new(source.clone());
        provider.acquire(&queue.handle());
        drop(queue);

        // Must not panic or block.
        source.complete(Ok(Arc::new(NullProvider)));
    }
}
