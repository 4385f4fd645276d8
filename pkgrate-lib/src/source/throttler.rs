use core::time::Duration;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::time::Instant;

/// Shared outbound request budget for the hosting API.
///
/// Bounds the number of in-flight requests across every concurrent rating and
/// lets any request pause new dispatch when the API reports an exhausted quota.
/// Overlapping pauses keep the latest resume time.
#[derive(Debug)]
pub struct Throttler {
    semaphore: Arc<Semaphore>,
    resume_at: Mutex<Option<Instant>>,
}

impl Throttler {
    /// Create a throttler that allows at most `max_concurrent` requests at a time.
    #[must_use]
    pub fn new(max_concurrent: usize) -> Arc<Self> {
        Arc::new(Self {
            semaphore: Arc::new(Semaphore::new(max_concurrent.max(1))),
            resume_at: Mutex::new(None),
        })
    }

    /// Wait out any active pause, then take a request slot.
    ///
    /// The slot is released when the returned permit is dropped.
    pub async fn acquire(&self) -> OwnedSemaphorePermit {
        loop {
            if let Some(resume_at) = self.paused_until() {
                tokio::time::sleep_until(resume_at).await;
                continue;
            }

            if let Ok(permit) = Arc::clone(&self.semaphore).acquire_owned().await {
                return permit;
            }
        }
    }

    /// Returns when dispatch resumes, if it is currently paused.
    #[must_use]
    pub fn paused_until(&self) -> Option<Instant> {
        let mut guard = self.resume_at.lock().unwrap_or_else(PoisonError::into_inner);
        match *guard {
            Some(t) if t > Instant::now() => Some(t),
            Some(_) => {
                *guard = None;
                None
            }
            None => None,
        }
    }

    /// Pause new dispatch for `duration`.
    ///
    /// Requests already holding a permit are not interrupted. Returns `false`
    /// when an equal or longer pause is already active.
    pub fn pause_for(&self, duration: Duration) -> bool {
        let new_resume_at = Instant::now() + duration;
        let mut guard = self.resume_at.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.is_some_and(|existing| existing >= new_resume_at) {
            return false;
        }

        *guard = Some(new_resume_at);
        true
    }
}
