use std::cell::RefCell;

/// Short synthesized sounds the terminal plays while typing and running commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    Keypress,
    Click,
    Enter,
    Error,
}

/// Sine tone parameters for a cue.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration_secs: f64,
    pub volume: f32,
}

impl Cue {
    pub fn tone(self) -> Tone {
        match self {
            Cue::Keypress => Tone {
                frequency_hz: 800.0,
                duration_secs: 0.05,
                volume: 0.05,
            },
            Cue::Click => Tone {
                frequency_hz: 1200.0,
                duration_secs: 0.08,
                volume: 0.08,
            },
            Cue::Enter => Tone {
                frequency_hz: 600.0,
                duration_secs: 0.1,
                volume: 0.1,
            },
            Cue::Error => Tone {
                frequency_hz: 200.0,
                duration_secs: 0.15,
                volume: 0.12,
            },
        }
    }
}

/// Best-effort audio sink. Implementations must never panic or report failure:
/// when audio is missing or switched off a cue is simply dropped.
pub trait Notifier {
    fn notify(&self, cue: Cue);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl Notifier for Silent {
    fn notify(&self, _cue: Cue) {}
}

/// Keeps every cue it receives. Handy for asserting on audio side effects.
#[derive(Debug, Default)]
pub struct Recording {
    cues: RefCell<Vec<Cue>>,
}

impl Recording {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cues(&self) -> Vec<Cue> {
        self.cues.borrow().clone()
    }

    pub fn count(&self, cue: Cue) -> usize {
        self.cues.borrow().iter().filter(|seen| **seen == cue).count()
    }
}

impl Notifier for Recording {
    fn notify(&self, cue: Cue) {
        self.cues.borrow_mut().push(cue);
    }
}

impl<N: Notifier + ?Sized> Notifier for std::rc::Rc<N> {
    fn notify(&self, cue: Cue) {
        (**self).notify(cue);
    }
}
