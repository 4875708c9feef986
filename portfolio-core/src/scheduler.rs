use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// One-shot timer source. Every animation in the crate goes through this, so a
/// component only ever talks to timers via `schedule` and `cancel`.
pub trait Scheduler: Clone + 'static {
    type Handle: 'static;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Self::Handle;

    fn cancel(&self, handle: Self::Handle);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

struct PendingTask {
    id: u64,
    due: Duration,
    task: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct VirtualClock {
    now: Duration,
    next_id: u64,
    queue: Vec<PendingTask>,
}

/// Deterministic scheduler driven by an explicit virtual clock. Tasks only run
/// inside [`VirtualScheduler::advance`], ordered by due time and then by the
/// order they were scheduled in.
///
/// Outside the browser the app renders against this scheduler without ever
/// advancing it, which leaves every animation at its first frame.
#[derive(Clone, Default)]
pub struct VirtualScheduler {
    clock: Rc<RefCell<VirtualClock>>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.clock.borrow().now
    }

    pub fn pending(&self) -> usize {
        self.clock.borrow().queue.len()
    }

    /// Moves the clock forward by `by`, running every task that falls due on the
    /// way, including tasks scheduled by tasks that ran earlier in the same call.
    pub fn advance(&self, by: Duration) {
        let target = self.now() + by;
        loop {
            let next = {
                let mut clock = self.clock.borrow_mut();
                let position = clock
                    .queue
                    .iter()
                    .enumerate()
                    .filter(|(_, pending)| pending.due <= target)
                    .min_by_key(|(_, pending)| (pending.due, pending.id))
                    .map(|(index, _)| index);
                match position {
                    Some(index) => {
                        let pending = clock.queue.remove(index);
                        clock.now = pending.due;
                        pending.task
                    }
                    None => {
                        clock.now = target;
                        break;
                    }
                }
            };
            next();
        }
    }

    pub fn advance_ms(&self, millis: u64) {
        self.advance(Duration::from_millis(millis));
    }
}

impl Scheduler for VirtualScheduler {
    type Handle = TimerId;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TimerId {
        let mut clock = self.clock.borrow_mut();
        let id = clock.next_id;
        clock.next_id += 1;
        let due = clock.now + delay;
        clock.queue.push(PendingTask { id, due, task });
        TimerId(id)
    }

    fn cancel(&self, handle: TimerId) {
        self.clock
            .borrow_mut()
            .queue
            .retain(|pending| pending.id != handle.0);
    }
}
