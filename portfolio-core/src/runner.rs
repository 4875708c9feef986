use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crate::notifier::Notifier;
use crate::scheduler::Scheduler;

/// What a machine wants after a transition: another timer, or nothing ever again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    Wait(Duration),
    Done,
}

/// A timer-driven state machine. `start` and `advance` perform exactly one
/// transition each; the runner owns the timer between them.
pub trait Machine: 'static {
    type Frame: Clone + 'static;

    fn start(&mut self, notifier: &dyn Notifier) -> Tick;

    fn advance(&mut self, notifier: &dyn Notifier) -> Tick;

    fn frame(&self) -> Self::Frame;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Status {
    Idle,
    Running,
    Stopped,
    Finished,
}

type FrameObserver<F> = Box<dyn FnMut(F)>;

struct Core<M: Machine, S: Scheduler> {
    scheduler: S,
    notifier: Rc<dyn Notifier>,
    machine: RefCell<M>,
    pending: RefCell<Option<S::Handle>>,
    status: Cell<Status>,
    on_frame: RefCell<Option<FrameObserver<M::Frame>>>,
    on_finish: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl<M: Machine, S: Scheduler> Core<M, S> {
    fn disarm(&self) {
        let pending = self.pending.borrow_mut().take();
        if let Some(handle) = pending {
            self.scheduler.cancel(handle);
        }
    }

    fn publish(&self) {
        let frame = self.machine.borrow().frame();
        let mut observer = self.on_frame.borrow_mut();
        if let Some(observer) = observer.as_mut() {
            observer(frame);
        }
    }
}

fn arm<M: Machine, S: Scheduler>(core: &Rc<Core<M, S>>, delay: Duration) {
    let weak = Rc::downgrade(core);
    let handle = core.scheduler.schedule(
        delay,
        Box::new(move || {
            if let Some(core) = weak.upgrade() {
                fire(&core);
            }
        }),
    );
    let previous = core.pending.borrow_mut().replace(handle);
    if let Some(previous) = previous {
        core.scheduler.cancel(previous);
    }
}

fn fire<M: Machine, S: Scheduler>(core: &Rc<Core<M, S>>) {
    // The handle that just fired is spent; dropping it must not cancel anything.
    drop(core.pending.borrow_mut().take());
    if core.status.get() != Status::Running {
        return;
    }
    let tick = core.machine.borrow_mut().advance(core.notifier.as_ref());
    settle(core, tick);
}

fn settle<M: Machine, S: Scheduler>(core: &Rc<Core<M, S>>, tick: Tick) {
    core.publish();
    if core.status.get() != Status::Running {
        return;
    }
    match tick {
        Tick::Wait(delay) => arm(core, delay),
        Tick::Done => {
            core.status.set(Status::Finished);
            let finish = core.on_finish.borrow_mut().take();
            if let Some(finish) = finish {
                finish();
            }
        }
    }
}

/// Drives one [`Machine`] with at most one pending timer.
///
/// Every transition cancels the previous timer before arming the next one, and
/// scheduled callbacks only hold a weak reference, so nothing observable happens
/// after [`Runner::stop`] or after the runner is dropped.
///
/// Frame observers must not call back into the runner.
pub struct Runner<M: Machine, S: Scheduler> {
    core: Rc<Core<M, S>>,
}

impl<M: Machine, S: Scheduler> Runner<M, S> {
    pub fn new(machine: M, scheduler: S, notifier: Rc<dyn Notifier>) -> Self {
        Self {
            core: Rc::new(Core {
                scheduler,
                notifier,
                machine: RefCell::new(machine),
                pending: RefCell::new(None),
                status: Cell::new(Status::Idle),
                on_frame: RefCell::new(None),
                on_finish: RefCell::new(None),
            }),
        }
    }

    pub fn on_frame(self, observer: impl FnMut(M::Frame) + 'static) -> Self {
        *self.core.on_frame.borrow_mut() = Some(Box::new(observer));
        self
    }

    /// Runs once, the first time the machine reports [`Tick::Done`].
    pub fn on_finish(self, observer: impl FnOnce() + 'static) -> Self {
        *self.core.on_finish.borrow_mut() = Some(Box::new(observer));
        self
    }

    /// Starts (or restarts after [`Runner::stop`]) the machine. A running or
    /// finished runner ignores the call.
    pub fn start(&self) {
        match self.core.status.get() {
            Status::Running | Status::Finished => return,
            Status::Idle | Status::Stopped => {}
        }
        self.core.status.set(Status::Running);
        let tick = self
            .core
            .machine
            .borrow_mut()
            .start(self.core.notifier.as_ref());
        settle(&self.core, tick);
    }

    /// Cancels the pending timer. The machine keeps whatever state it reached.
    pub fn stop(&self) {
        self.core.disarm();
        if self.core.status.get() == Status::Running {
            self.core.status.set(Status::Stopped);
        }
    }

    /// Cancels the pending timer and lets `transition` move the machine
    /// directly, then continues from the tick it returns.
    pub fn interrupt(&self, transition: impl FnOnce(&mut M, &dyn Notifier) -> Tick) {
        if self.core.status.get() == Status::Finished {
            return;
        }
        self.core.disarm();
        self.core.status.set(Status::Running);
        let tick = {
            let mut machine = self.core.machine.borrow_mut();
            transition(&mut machine, self.core.notifier.as_ref())
        };
        settle(&self.core, tick);
    }

    /// Cancels the pending timer, applies `reset` and publishes the resulting
    /// frame once. The runner stays stopped until [`Runner::start`].
    pub fn halt(&self, reset: impl FnOnce(&mut M)) {
        self.core.disarm();
        if self.core.status.get() != Status::Finished {
            self.core.status.set(Status::Stopped);
        }
        reset(&mut self.core.machine.borrow_mut());
        self.core.publish();
    }

    pub fn with<R>(&self, read: impl FnOnce(&M) -> R) -> R {
        read(&self.core.machine.borrow())
    }

    pub fn frame(&self) -> M::Frame {
        self.core.machine.borrow().frame()
    }

    pub fn is_running(&self) -> bool {
        self.core.status.get() == Status::Running
    }

    pub fn is_finished(&self) -> bool {
        self.core.status.get() == Status::Finished
    }
}

impl<M: Machine, S: Scheduler> Drop for Runner<M, S> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifier::Silent;
    use crate::scheduler::VirtualScheduler;
    use pretty_assertions::assert_eq;

    struct Countdown {
        left: u32,
        step: Duration,
    }

    impl Machine for Countdown {
        type Frame = u32;

        fn start(&mut self, _notifier: &dyn Notifier) -> Tick {
            if self.left == 0 {
                Tick::Done
            } else {
                Tick::Wait(self.step)
            }
        }

        fn advance(&mut self, notifier: &dyn Notifier) -> Tick {
            self.left -= 1;
            self.start(notifier)
        }

        fn frame(&self) -> u32 {
            self.left
        }
    }

    fn countdown(left: u32, scheduler: &VirtualScheduler) -> Runner<Countdown, VirtualScheduler> {
        Runner::new(
            Countdown {
                left,
                step: Duration::from_millis(10),
            },
            scheduler.clone(),
            Rc::new(Silent),
        )
    }

    #[test]
    fn publishes_every_frame_and_finishes_once() {
        let scheduler = VirtualScheduler::new();
        let frames = Rc::new(RefCell::new(Vec::new()));
        let finished = Rc::new(Cell::new(0));
        let seen = frames.clone();
        let done = finished.clone();
        let runner = countdown(3, &scheduler)
            .on_frame(move |frame| seen.borrow_mut().push(frame))
            .on_finish(move || done.set(done.get() + 1));

        runner.start();
        runner.start();
        scheduler.advance_ms(1_000);

        assert_eq!(*frames.borrow(), vec![3, 2, 1, 0]);
        assert_eq!(finished.get(), 1);
        assert!(runner.is_finished());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn stop_cancels_the_pending_timer() {
        let scheduler = VirtualScheduler::new();
        let finished = Rc::new(Cell::new(false));
        let done = finished.clone();
        let runner = countdown(3, &scheduler).on_finish(move || done.set(true));

        runner.start();
        scheduler.advance_ms(10);
        runner.stop();
        scheduler.advance_ms(1_000);

        assert_eq!(runner.frame(), 2);
        assert!(!finished.get());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn dropping_the_runner_clears_its_timer() {
        let scheduler = VirtualScheduler::new();
        let frames = Rc::new(RefCell::new(Vec::new()));
        let seen = frames.clone();
        let runner = countdown(5, &scheduler).on_frame(move |frame| seen.borrow_mut().push(frame));
        runner.start();
        drop(runner);
        scheduler.advance_ms(1_000);
        assert_eq!(*frames.borrow(), vec![5]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn interrupt_replaces_the_pending_timer() {
        let scheduler = VirtualScheduler::new();
        let runner = countdown(5, &scheduler);
        runner.start();
        runner.interrupt(|machine, _| {
            machine.left = 1;
            Tick::Wait(Duration::from_millis(50))
        });
        assert_eq!(scheduler.pending(), 1);
        scheduler.advance_ms(49);
        assert_eq!(runner.frame(), 1);
        scheduler.advance_ms(1);
        assert_eq!(runner.frame(), 0);
        assert!(runner.is_finished());
    }

    #[test]
    fn halt_publishes_one_frame_and_stays_stopped() {
        let scheduler = VirtualScheduler::new();
        let frames = Rc::new(RefCell::new(Vec::new()));
        let seen = frames.clone();
        let runner = countdown(4, &scheduler).on_frame(move |frame| seen.borrow_mut().push(frame));
        runner.start();
        runner.halt(|machine| machine.left = 9);
        scheduler.advance_ms(1_000);
        assert_eq!(*frames.borrow(), vec![4, 9]);
        assert!(!runner.is_running());
    }
}
