use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::Mutex;

/// How a simulated asynchronous platform operation completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Completion {
    /// Held until the test completes it explicitly.
    #[default]
    Manual,
    /// Completes inline, on the calling thread.
    Immediate,
    /// Completes on a background thread after a delay.
    After(Duration),
}

/// Run `job` according to `completion`, or hand it back for `Manual`.
pub(crate) fn dispatch<F>(completion: Completion, thread_name: &str, job: F) -> Option<F>
where
    F: FnOnce() + Send + 'static,
{
    match completion {
        Completion::Manual => Some(job),
        Completion::Immediate => {
            job();
            None
        }
        Completion::After(delay) => {
            let slot = Arc::new(Mutex::new(Some(job)));
            let delayed = Arc::clone(&slot);
            let spawned = thread::Builder::new()
                .name(thread_name.into())
                .spawn(move || {
                    thread::sleep(delay);
                    take_and_run(&delayed);
                });
            finish_spawn(spawned, &slot, thread_name);
            None
        }
    }
}

/// A job whose thread could not be started runs inline instead.
fn finish_spawn<F: FnOnce()>(spawned: io::Result<JoinHandle<()>>, slot: &Mutex<Option<F>>, thread_name: &str) {
    if let Err(e) = spawned {
        log::error!("Failed to spawn {} thread, completing inline: {}", thread_name, e);
        take_and_run(slot);
    }
}

fn take_and_run<F: FnOnce()>(slot: &Mutex<Option<F>>) {
    let job = slot.lock().take();
    if let Some(job) = job {
        job();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::mpsc;

    use super::*;

    #[test]
    fn manual_hands_job_back() {
        let ran = Arc::new(AtomicBool::new(false));
        let flag = ran.clone();
        let job = dispatch(Completion::Manual, "test", move || flag.store(true, Ordering::SeqCst));

        assert!(!ran.load(Ordering::SeqCst));
        job.unwrap()();
        assert!(ran.load(Ordering::SeqCst));
    }

    #[test]
    fn delayed_job_runs_on_background_thread() {
        let (tx, rx) = mpsc::channel();
        let held = dispatch(Completion::After(Duration::from_millis(10)), "sim-test", move || {
            tx.send(thread::current().name().map(str::to_string)).unwrap();
        });

        assert!(held.is_none());
        let name = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(name.as_deref(), Some("sim-test"));
    }

    #[test]
    fn failed_spawn_completes_inline() {
        let ran = Arc::new(AtomicBool::new(false));
        let flag = ran.clone();
        let slot = Mutex::new(Some(move || flag.store(true, Ordering::SeqCst)));

        finish_spawn(Err(io::Error::other("thread limit reached")), &slot, "sim-test");
        assert!(ran.load(Ordering::SeqCst));
        assert!(slot.lock().is_none());
    }

    #[test]
    fn spawned_job_is_not_run_twice() {
        let runs = Arc::new(Mutex::new(0));
        let counter = runs.clone();
        let slot = Arc::new(Mutex::new(Some(move || *counter.lock() += 1)));

        let delayed = Arc::clone(&slot);
        let spawned = thread::Builder::new().spawn(move || take_and_run(&delayed));
        let handle = spawned.unwrap();
        handle.join().unwrap();

        finish_spawn(Ok(thread::spawn(|| {})), &slot, "sim-test");
        assert_eq!(*runs.lock(), 1);
    }
}
