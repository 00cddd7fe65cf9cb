//! Trailing-edge debouncing over an injectable timer.

use std::cell::RefCell;
use std::rc::Rc;

/// One-shot timers. Dropping the returned handle cancels the task if it has
/// not run yet, which is how `gloo` timeouts behave.
pub trait Scheduler {
    type Handle;

    fn schedule(&self, wait_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle;
}

/// Calls `func` once `wait_ms` have passed without another `call`, using the
/// arguments of the last call.
pub struct Debouncer<A, S: Scheduler> {
    func: Rc<dyn Fn(A)>,
    wait_ms: u32,
    scheduler: S,
    pending: RefCell<Option<S::Handle>>,
}

impl<A: 'static, S: Scheduler> Debouncer<A, S> {
    pub fn new(scheduler: S, wait_ms: u32, func: impl Fn(A) + 'static) -> Self {
        Self {
            func: Rc::new(func),
            wait_ms,
            scheduler,
            pending: RefCell::new(None),
        }
    }

    pub fn call(&self, args: A) {
        // drop the previous timer first so it can never fire after this call
        drop(self.pending.borrow_mut().take());

        let func = Rc::clone(&self.func);
        let handle = self
            .scheduler
            .schedule(self.wait_ms, Box::new(move || func(args)));
        *self.pending.borrow_mut() = Some(handle);
    }
}

#[cfg(test)]
pub(crate) mod manual {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::Scheduler;

    type Slot = (Rc<Cell<bool>>, Option<Box<dyn FnOnce()>>);

    /// Timers that only fire when the test says so.
    #[derive(Clone, Default)]
    pub struct ManualScheduler {
        slots: Rc<RefCell<Vec<Slot>>>,
    }

    pub struct ManualHandle {
        cancelled: Rc<Cell<bool>>,
    }

    impl Drop for ManualHandle {
        fn drop(&mut self) {
            self.cancelled.set(true);
        }
    }

    impl Scheduler for ManualScheduler {
        type Handle = ManualHandle;

        fn schedule(&self, _wait_ms: u32, task: Box<dyn FnOnce()>) -> ManualHandle {
            let cancelled = Rc::new(Cell::new(false));
            self.slots
                .borrow_mut()
                .push((Rc::clone(&cancelled), Some(task)));
            ManualHandle { cancelled }
        }
    }

    impl ManualScheduler {
        /// Fires every timer that is still armed; returns how many ran.
        pub fn elapse(&self) -> usize {
            let due: Vec<_> = self
                .slots
                .borrow_mut()
                .iter_mut()
                .filter(|(cancelled, _)| !cancelled.get())
                .filter_map(|(cancelled, task)| {
                    cancelled.set(true);
                    task.take()
                })
                .collect();
            let count = due.len();
            for task in due {
                task();
            }
            count
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::manual::ManualScheduler;
    use super::*;

    fn recording() -> (Rc<RefCell<Vec<String>>>, impl Fn(String) + 'static) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        (calls, move |arg| sink.borrow_mut().push(arg))
    }

    #[test]
    fn burst_of_calls_runs_once_with_last_arguments() {
        let scheduler = ManualScheduler::default();
        let (calls, func) = recording();
        let debounced = Debouncer::new(scheduler.clone(), 300, func);

        for query in ["f", "fa", "fat", "fatura"] {
            debounced.call(query.to_string());
        }

        assert_eq!(scheduler.elapse(), 1);
        assert_eq!(*calls.borrow(), vec!["fatura".to_string()]);
    }

    #[test]
    fn calls_after_the_wait_fire_again() {
        let scheduler = ManualScheduler::default();
        let (calls, func) = recording();
        let debounced = Debouncer::new(scheduler.clone(), 300, func);

        debounced.call("a".to_string());
        scheduler.elapse();
        debounced.call("b".to_string());
        scheduler.elapse();

        assert_eq!(*calls.borrow(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn dropping_the_debouncer_drops_the_pending_call() {
        let scheduler = ManualScheduler::default();
        let (calls, func) = recording();
        let debounced = Debouncer::new(scheduler.clone(), 50, func);

        debounced.call("x".to_string());
        drop(debounced);

        assert_eq!(scheduler.elapse(), 0);
        assert!(calls.borrow().is_empty());
    }
}
