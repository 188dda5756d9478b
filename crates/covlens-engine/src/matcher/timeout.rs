//! Timeout wrapper for blocking matcher calls.

use std::time::Duration;

use covlens_core::errors::MatcherError;

/// Run a blocking matcher call on a worker thread with a deadline.
///
/// On timeout the call is abandoned: the detached worker finishes (or fails)
/// on its own and its result is dropped. The pipeline observes a timeout as
/// an ordinary matcher failure, never a hang.
pub fn call_with_timeout<T, F>(timeout: Duration, f: F) -> Result<T, MatcherError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, MatcherError> + Send + 'static,
{
    let (tx, rx) = crossbeam_channel::bounded(1);
    let spawned = std::thread::Builder::new()
        .name("covlens-matcher-call".to_string())
        .spawn(move || {
            let _ = tx.send(f());
        });
    if let Err(e) = spawned {
        return Err(MatcherError::Unavailable {
            message: format!("failed to spawn matcher worker: {e}"),
        });
    }

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(_) => Err(MatcherError::Timeout {
            timeout_ms: timeout.as_millis() as u64,
        }),
    }
}
