use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use camera_element_core::{CameraProvider, ProviderCallback, ProviderError, ProviderSource};

use crate::camera::SimCameraProvider;
use crate::completion::{dispatch, Completion};

type PendingJob = Box<dyn FnOnce() + Send + 'static>;

/// Simulated asynchronous provider acquisition.
///
/// The outcome is fixed when the request is made; `fail_with` affects only
/// later requests.
pub struct SimProviderSource {
    completion: Completion,
    provider: Arc<SimCameraProvider>,
    failure: Mutex<Option<ProviderError>>,
    pending: Mutex<Vec<PendingJob>>,
    requests: AtomicU32,
}

impl SimProviderSource {
    pub fn new(provider: Arc<SimCameraProvider>, completion: Completion) -> Self {
        Self {
            completion,
            provider,
            failure: Mutex::new(None),
            pending: Mutex::new(Vec::new()),
            requests: AtomicU32::new(0),
        }
    }

    pub fn fail_with(&self, error: Option<ProviderError>) {
        *self.failure.lock() = error;
    }

    /// Platform acquisitions requested so far.
    pub fn requests(&self) -> u32 {
        self.requests.load(Ordering::SeqCst)
    }

    /// Settle every manually-held acquisition. Returns how many completed.
    pub fn complete_pending(&self) -> usize {
        let jobs: Vec<PendingJob> = self.pending.lock().drain(..).collect();
        let count = jobs.len();
        for job in jobs {
            job();
        }
        count
    }
}

impl ProviderSource for SimProviderSource {
    fn request_provider(&self, complete: ProviderCallback) {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let outcome: Result<Arc<dyn CameraProvider>, ProviderError> = match self.failure.lock().clone() {
            Some(e) => Err(e),
            None => Ok(Arc::clone(&self.provider) as Arc<dyn CameraProvider>),
        };

        let job = move || complete(outcome);
        if let Some(job) = dispatch(self.completion, "sim-provider", job) {
            self.pending.lock().push(Box::new(job));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(completion: Completion) -> SimProviderSource {
        SimProviderSource::new(Arc::new(SimCameraProvider::new(Completion::Manual)), completion)
    }

    #[test]
    fn manual_requests_wait() {
        let source = source(Completion::Manual);
        let done = Arc::new(Mutex::new(0));
        let counter = done.clone();
        source.request_provider(Box::new(move |result| {
            assert!(result.is_ok());
            *counter.lock() += 1;
        }));

        assert_eq!(*done.lock(), 0);
        assert_eq!(source.complete_pending(), 1);
        assert_eq!(*done.lock(), 1);
        assert_eq!(source.complete_pending(), 0);
        assert_eq!(source.requests(), 1);
    }

    #[test]
    fn failure_applies_to_later_requests() {
        let source = source(Completion::Immediate);
        source.fail_with(Some(ProviderError::Unavailable("offline".into())));
        let outcome = Arc::new(Mutex::new(None));
        let sink = outcome.clone();
        source.request_provider(Box::new(move |result| {
            *sink.lock() = Some(result.err());
        }));

        assert_eq!(
            *outcome.lock(),
            Some(Some(ProviderError::Unavailable("offline".into())))
        );
    }
}
