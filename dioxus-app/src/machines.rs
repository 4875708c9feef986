use dioxus::prelude::*;
use portfolio_core::{Machine, Notifier, Runner};
use std::rc::Rc;

use crate::sounds::use_notifier;
use crate::timers::{app_scheduler, AppScheduler};

/// A component-owned runner plus the signal its frames land in.
pub struct MachineHandle<M: Machine> {
    runner: Rc<Runner<M, AppScheduler>>,
    frame: Signal<M::Frame>,
}

impl<M: Machine> Clone for MachineHandle<M> {
    fn clone(&self) -> Self {
        Self {
            runner: self.runner.clone(),
            frame: self.frame,
        }
    }
}

impl<M: Machine> PartialEq for MachineHandle<M> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.runner, &other.runner)
    }
}

impl<M: Machine> MachineHandle<M> {
    pub fn frame(&self) -> M::Frame {
        (self.frame)()
    }

    pub fn runner(&self) -> &Runner<M, AppScheduler> {
        &self.runner
    }
}

/// Builds the machine once per mount. The runner stops when the component
/// unmounts because the hook drops its last reference.
pub fn use_machine<M: Machine>(init: impl FnOnce() -> M) -> MachineHandle<M> {
    let notifier = use_notifier();
    use_hook(move || build(init(), notifier))
}

pub fn build<M: Machine>(machine: M, notifier: Rc<dyn Notifier>) -> MachineHandle<M> {
    let frame = Signal::new(machine.frame());
    let runner = Runner::new(machine, app_scheduler(), notifier).on_frame(frame_sink(frame));
    MachineHandle {
        runner: Rc::new(runner),
        frame,
    }
}

/// Frame observer that writes into `frame`.
pub fn frame_sink<F: 'static>(mut frame: Signal<F>) -> impl FnMut(F) + 'static {
    move |next| {
        // Teardown may publish after the scope is gone.
        if let Ok(mut slot) = frame.try_write() {
            *slot = next;
        }
    }
}

/// Starts the runner after the first render.
pub fn use_autostart<M: Machine>(handle: &MachineHandle<M>) {
    let handle = handle.clone();
    use_effect(move || handle.runner().start());
}
