use std::time::Duration;

use crate::error::ConfigError;
use crate::notifier::{Cue, Notifier};
use crate::runner::{Machine, Tick};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CyclerMode {
    Typing,
    PausedFull,
    Deleting,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CyclerTiming {
    pub type_delay: Duration,
    pub delete_delay: Duration,
    pub pause_delay: Duration,
}

impl Default for CyclerTiming {
    fn default() -> Self {
        Self {
            type_delay: Duration::from_millis(100),
            delete_delay: Duration::from_millis(50),
            pause_delay: Duration::from_millis(2000),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CyclerFrame {
    pub phrase_index: usize,
    pub text: String,
    pub mode: CyclerMode,
}

/// Types a phrase, holds it, deletes it and moves on to the next one, forever.
pub struct Cycler {
    phrases: Vec<String>,
    index: usize,
    shown: usize,
    mode: CyclerMode,
    timing: CyclerTiming,
    sound: bool,
    begin_full: bool,
}

impl Cycler {
    pub fn new<I, P>(phrases: I, timing: CyclerTiming) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        let phrases: Vec<String> = phrases.into_iter().map(Into::into).collect();
        if phrases.is_empty() {
            return Err(ConfigError::NoPhrases);
        }
        Ok(Self {
            phrases,
            index: 0,
            shown: 0,
            mode: CyclerMode::Typing,
            timing,
            sound: false,
            begin_full: false,
        })
    }

    pub fn with_sound(mut self, sound: bool) -> Self {
        self.sound = sound;
        self
    }

    /// Opens the cycle with the first phrase already typed out, going straight
    /// to the pause.
    pub fn revealed(mut self) -> Self {
        self.begin_full = true;
        self
    }

    pub fn phrase(&self) -> &str {
        &self.phrases[self.index]
    }

    pub fn displayed(&self) -> &str {
        let phrase = self.phrase();
        let end = phrase
            .char_indices()
            .nth(self.shown)
            .map(|(index, _)| index)
            .unwrap_or(phrase.len());
        &phrase[..end]
    }

    pub fn mode(&self) -> CyclerMode {
        self.mode
    }

    fn phrase_len(&self) -> usize {
        self.phrase().chars().count()
    }

    fn enter_typing(&mut self) -> Tick {
        self.mode = CyclerMode::Typing;
        self.shown = 0;
        if self.phrase_len() == 0 {
            return self.enter_pause();
        }
        Tick::Wait(self.timing.type_delay)
    }

    fn enter_pause(&mut self) -> Tick {
        self.mode = CyclerMode::PausedFull;
        Tick::Wait(self.timing.pause_delay)
    }

    fn next_phrase(&mut self) -> Tick {
        self.index = (self.index + 1) % self.phrases.len();
        self.enter_typing()
    }
}

impl Machine for Cycler {
    type Frame = CyclerFrame;

    fn start(&mut self, _notifier: &dyn Notifier) -> Tick {
        if self.begin_full {
            self.begin_full = false;
            self.shown = self.phrase_len();
            return self.enter_pause();
        }
        match self.mode {
            CyclerMode::Typing if self.shown == 0 => self.enter_typing(),
            CyclerMode::Typing => Tick::Wait(self.timing.type_delay),
            CyclerMode::PausedFull => self.enter_pause(),
            CyclerMode::Deleting => Tick::Wait(self.timing.delete_delay),
        }
    }

    fn advance(&mut self, notifier: &dyn Notifier) -> Tick {
        match self.mode {
            CyclerMode::Typing => {
                self.shown += 1;
                if self.sound {
                    notifier.notify(Cue::Keypress);
                }
                if self.shown >= self.phrase_len() {
                    self.enter_pause()
                } else {
                    Tick::Wait(self.timing.type_delay)
                }
            }
            CyclerMode::PausedFull => {
                self.mode = CyclerMode::Deleting;
                if self.shown == 0 {
                    return self.next_phrase();
                }
                Tick::Wait(self.timing.delete_delay)
            }
            CyclerMode::Deleting => {
                // Softer than typing: every other deleted character clicks.
                if self.sound && self.shown % 2 == 0 {
                    notifier.notify(Cue::Keypress);
                }
                self.shown -= 1;
                if self.shown == 0 {
                    self.next_phrase()
                } else {
                    Tick::Wait(self.timing.delete_delay)
                }
            }
        }
    }

    fn frame(&self) -> CyclerFrame {
        CyclerFrame {
            phrase_index: self.index,
            text: self.displayed().to_string(),
            mode: self.mode,
        }
    }
}
