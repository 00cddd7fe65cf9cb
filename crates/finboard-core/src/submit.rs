use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use tracing::debug;

/// Single-flight lock for form submissions. A held [`SubmitPermit`] blocks
/// further acquisitions until it is dropped, whatever way the guarded work
/// ended.
#[derive(Debug, Clone, Default)]
pub struct SubmitGuard {
    busy: Rc<Cell<bool>>,
}

#[derive(Debug)]
pub struct SubmitPermit {
    busy: Rc<Cell<bool>>,
}

impl SubmitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_acquire(&self) -> Option<SubmitPermit> {
        if self.busy.get() {
            debug!("submit rejected; previous submission still running");
            return None;
        }
        self.busy.set(true);
        Some(SubmitPermit {
            busy: Rc::clone(&self.busy),
        })
    }
}

impl SubmitPermit {
    /// Keeps the lock until `work` settles, whatever its output.
    pub async fn hold<Fut: Future>(self, work: Fut) -> Fut::Output {
        let _permit = self;
        work.await
    }
}

impl Drop for SubmitPermit {
    fn drop(&mut self) {
        self.busy.set(false);
    }
}

#[cfg(test)]
mod tests {
    use std::pin::{Pin, pin};
    use std::task::{Context, Poll, Waker};

    use super::*;

    type Settle = Rc<Cell<Option<Result<(), &'static str>>>>;

    /// Resolves once the test fills the shared slot, like a pending promise.
    struct Deferred(Settle);

    impl Future for Deferred {
        type Output = Result<(), &'static str>;

        fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Self::Output> {
            match self.0.take() {
                Some(outcome) => Poll::Ready(outcome),
                None => Poll::Pending,
            }
        }
    }

    fn poll_once<F: Future>(future: Pin<&mut F>) -> Poll<F::Output> {
        future.poll(&mut Context::from_waker(Waker::noop()))
    }

    #[test]
    fn held_lock_lasts_until_the_work_settles() {
        let guard = SubmitGuard::new();
        let settle = Settle::default();
        let permit = guard.try_acquire().expect("first submission");
        let mut work = pin!(permit.hold(Deferred(Rc::clone(&settle))));

        assert_eq!(poll_once(work.as_mut()), Poll::Pending);
        assert!(guard.try_acquire().is_none());

        settle.set(Some(Err("promise rejected")));
        assert_eq!(poll_once(work.as_mut()), Poll::Ready(Err("promise rejected")));
        assert!(guard.try_acquire().is_some());
    }

    #[test]
    fn abandoned_work_releases_the_lock() {
        let guard = SubmitGuard::new();
        let permit = guard.try_acquire().expect("first submission");
        let work = permit.hold(Deferred(Settle::default()));

        assert!(guard.try_acquire().is_none());
        drop(work);
        assert!(guard.try_acquire().is_some());
    }

    #[test]
    fn second_acquire_fails_while_first_is_held() {
        let guard = SubmitGuard::new();
        let first = guard.try_acquire();

        assert!(first.is_some());
        assert!(guard.try_acquire().is_none());
    }

    #[test]
    fn dropping_the_permit_releases_the_lock() {
        let guard = SubmitGuard::new();
        drop(guard.try_acquire());

        assert!(guard.try_acquire().is_some());
    }

    #[test]
    fn lock_is_released_when_guarded_work_fails() {
        let guard = SubmitGuard::new();

        let outcome: Result<(), &str> = (|| {
            let _permit = guard.try_acquire().ok_or("busy")?;
            Err("server rejected the form")
        })();

        assert_eq!(outcome, Err("server rejected the form"));
        assert!(guard.try_acquire().is_some());
    }

    #[test]
    fn clones_share_the_same_lock() {
        let guard = SubmitGuard::new();
        let other = guard.clone();
        let _permit = guard.try_acquire();

        assert!(other.try_acquire().is_none());
    }
}
