use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use crate::notifier::{Cue, Notifier};
use crate::runner::{Machine, Tick};

pub const DEFAULT_CHAR_DELAY: Duration = Duration::from_millis(50);

#[derive(Clone, Debug, PartialEq)]
pub struct RevealOptions {
    pub delay: Duration,
    /// Fraction of `delay` each character may deviate by, clamped to `[0, 1]`.
    pub jitter: f64,
    pub show_cursor: bool,
    pub hide_cursor_on_complete: bool,
    pub sound: bool,
    pub seed: u64,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            delay: DEFAULT_CHAR_DELAY,
            jitter: 0.0,
            show_cursor: true,
            hide_cursor_on_complete: false,
            sound: false,
            seed: 0,
        }
    }
}

impl RevealOptions {
    pub fn with_delay_ms(mut self, millis: u64) -> Self {
        self.delay = Duration::from_millis(millis);
        self
    }

    pub fn without_cursor(mut self) -> Self {
        self.show_cursor = false;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealFrame {
    pub text: String,
    pub complete: bool,
    pub show_cursor: bool,
}

/// Typewriter reveal of a single string, one `char` per timer tick.
pub struct Reveal {
    text: String,
    total: usize,
    revealed: usize,
    complete: bool,
    options: RevealOptions,
    rng: SmallRng,
}

impl Reveal {
    pub fn new(text: impl Into<String>, options: RevealOptions) -> Self {
        let text = text.into();
        let total = text.chars().count();
        let rng = SmallRng::seed_from_u64(options.seed);
        Self {
            text,
            total,
            revealed: 0,
            complete: false,
            options,
            rng,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn revealed(&self) -> &str {
        let end = self
            .text
            .char_indices()
            .nth(self.revealed)
            .map(|(index, _)| index)
            .unwrap_or(self.text.len());
        &self.text[..end]
    }

    pub fn revealed_len(&self) -> usize {
        self.revealed
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Shows the whole text at once.
    pub fn finish(&mut self) {
        self.revealed = self.total;
        self.complete = true;
    }

    fn next_delay(&mut self) -> Duration {
        let jitter = self.options.jitter.clamp(0.0, 1.0);
        if jitter == 0.0 {
            return self.options.delay;
        }
        let factor = 1.0 + self.rng.random_range(-jitter..=jitter);
        self.options.delay.mul_f64(factor)
    }

    fn settle(&mut self) -> Tick {
        if self.revealed >= self.total {
            self.complete = true;
            Tick::Done
        } else {
            Tick::Wait(self.next_delay())
        }
    }
}

impl Machine for Reveal {
    type Frame = RevealFrame;

    fn start(&mut self, _notifier: &dyn Notifier) -> Tick {
        if self.complete {
            return Tick::Done;
        }
        self.settle()
    }

    fn advance(&mut self, notifier: &dyn Notifier) -> Tick {
        if self.complete {
            return Tick::Done;
        }
        self.revealed += 1;
        if self.options.sound {
            notifier.notify(Cue::Keypress);
        }
        self.settle()
    }

    fn frame(&self) -> RevealFrame {
        RevealFrame {
            text: self.revealed().to_string(),
            complete: self.complete,
            show_cursor: self.options.show_cursor
                && !(self.complete && self.options.hide_cursor_on_complete),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifier::{Recording, Silent};
    use crate::runner::Runner;
    use crate::scheduler::VirtualScheduler;
    use pretty_assertions::assert_eq;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    struct Harness {
        scheduler: VirtualScheduler,
        frames: Rc<RefCell<Vec<RevealFrame>>>,
        completions: Rc<Cell<u32>>,
        runner: Runner<Reveal, VirtualScheduler>,
    }

    fn harness(text: &str, options: RevealOptions, notifier: Rc<dyn Notifier>) -> Harness {
        let scheduler = VirtualScheduler::new();
        let frames = Rc::new(RefCell::new(Vec::new()));
        let completions = Rc::new(Cell::new(0));
        let seen = frames.clone();
        let done = completions.clone();
        let runner = Runner::new(Reveal::new(text, options), scheduler.clone(), notifier)
            .on_frame(move |frame| seen.borrow_mut().push(frame))
            .on_finish(move || done.set(done.get() + 1));
        Harness {
            scheduler,
            frames,
            completions,
            runner,
        }
    }

    fn texts(frames: &[RevealFrame]) -> Vec<String> {
        frames.iter().map(|frame| frame.text.clone()).collect()
    }

    #[test]
    fn reveals_prefixes_in_order_and_completes_once() {
        let h = harness("abc", RevealOptions::default(), Rc::new(Silent));
        h.runner.start();
        h.scheduler.advance_ms(49);
        assert_eq!(texts(&h.frames.borrow()), vec![""]);
        h.scheduler.advance_ms(1_000);

        assert_eq!(texts(&h.frames.borrow()), vec!["", "a", "ab", "abc"]);
        assert_eq!(h.completions.get(), 1);
        let full = h.frames.borrow().iter().filter(|frame| frame.text == "abc").count();
        assert_eq!(full, 1);
        assert!(h.frames.borrow().last().is_some_and(|frame| frame.complete));
    }

    #[test]
    fn empty_text_completes_immediately() {
        let h = harness("", RevealOptions::default(), Rc::new(Silent));
        h.runner.start();
        assert_eq!(h.completions.get(), 1);
        assert_eq!(h.scheduler.pending(), 0);
        h.runner.start();
        assert_eq!(h.completions.get(), 1);
    }

    #[test]
    fn single_character_completes_after_one_delay() {
        let h = harness("x", RevealOptions::default().with_delay_ms(80), Rc::new(Silent));
        h.runner.start();
        assert_eq!(h.completions.get(), 0);
        h.scheduler.advance_ms(80);
        assert_eq!(h.completions.get(), 1);
        assert_eq!(h.runner.frame().text, "x");
    }

    #[test]
    fn teardown_mid_reveal_suppresses_completion() {
        let h = harness("hello", RevealOptions::default(), Rc::new(Silent));
        h.runner.start();
        h.scheduler.advance_ms(120);
        let Harness {
            scheduler,
            frames,
            completions,
            runner,
        } = h;
        drop(runner);
        scheduler.advance_ms(10_000);
        assert_eq!(texts(&frames.borrow()), vec!["", "h", "he"]);
        assert_eq!(completions.get(), 0);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn jitter_stays_within_bounds_and_keeps_prefix_order() {
        let options = RevealOptions {
            delay: Duration::from_millis(100),
            jitter: 0.25,
            seed: 7,
            ..RevealOptions::default()
        };
        let h = harness("jitter", options, Rc::new(Silent));
        h.runner.start();
        h.scheduler.advance_ms(6 * 75 - 1);
        assert_eq!(h.completions.get(), 0);
        h.scheduler.advance_ms(6 * 125);
        assert_eq!(h.completions.get(), 1);

        let frames = h.frames.borrow();
        for pair in frames.windows(2) {
            assert!(pair[1].text.starts_with(&pair[0].text));
            assert_eq!(pair[1].text.chars().count(), pair[0].text.chars().count() + 1);
        }
    }

    #[test]
    fn each_revealed_character_plays_a_keypress() {
        let recording = Rc::new(Recording::new());
        let options = RevealOptions {
            sound: true,
            ..RevealOptions::default()
        };
        let h = harness("ünï", options, recording.clone());
        h.runner.start();
        h.scheduler.advance_ms(1_000);
        assert_eq!(recording.count(Cue::Keypress), 3);
        assert_eq!(h.runner.frame().text, "ünï");
    }

    #[test]
    fn cursor_hides_on_completion_when_requested() {
        let options = RevealOptions {
            hide_cursor_on_complete: true,
            ..RevealOptions::default()
        };
        let h = harness("ok", options, Rc::new(Silent));
        h.runner.start();
        assert!(h.runner.frame().show_cursor);
        h.scheduler.advance_ms(1_000);
        assert!(!h.runner.frame().show_cursor);
    }

    #[test]
    fn finish_renders_everything_at_once() {
        let mut reveal = Reveal::new("skip me", RevealOptions::default());
        reveal.finish();
        assert_eq!(reveal.revealed(), "skip me");
        assert!(reveal.is_complete());
        assert_eq!(reveal.start(&Silent), Tick::Done);
    }
}
