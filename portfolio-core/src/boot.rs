use std::time::Duration;

use crate::notifier::Notifier;
use crate::reveal::{Reveal, RevealOptions};
use crate::runner::{Machine, Tick};

pub const SPLASH_SESSION_KEY: &str = "boot-sequence-shown";

pub const SPLASH_LINES: [&str; 6] = [
    "booting system...",
    "initializing modules...",
    "loading portfolio...",
    "error: signal noise detected",
    "re-syncing display...",
    "connection established.",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BootStage {
    Heading = 0,
    Subtitle = 1,
    Prompt = 2,
    Commands = 3,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BootOptions {
    pub heading: RevealOptions,
    pub prompt: RevealOptions,
    pub subtitle_gap: Duration,
    pub prompt_lead: Duration,
    pub stagger: Duration,
}

impl Default for BootOptions {
    fn default() -> Self {
        Self {
            heading: RevealOptions::default().with_delay_ms(80).without_cursor(),
            prompt: RevealOptions::default().with_delay_ms(40).without_cursor(),
            subtitle_gap: Duration::from_millis(500),
            prompt_lead: Duration::from_millis(800),
            stagger: Duration::from_millis(100),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BootFrame {
    pub stage: BootStage,
    pub heading: String,
    pub prompt: String,
    pub skipped: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Heading,
    SubtitleGap,
    PromptLead,
    Prompt,
    Done,
}

/// Home page intro: heading, rotating subtitle, prompt line, command list.
///
/// The subtitle cycler is owned by the page; it starts once the stage reaches
/// [`BootStage::Subtitle`] (fully revealed when [`StagedReveal::skipped`]).
pub struct StagedReveal {
    stage: BootStage,
    step: Step,
    heading: Reveal,
    prompt: Reveal,
    subtitle_gap: Duration,
    prompt_lead: Duration,
    stagger: Duration,
    skipped: bool,
}

impl StagedReveal {
    pub fn new(heading: impl Into<String>, prompt: impl Into<String>, options: BootOptions) -> Self {
        Self {
            stage: BootStage::Heading,
            step: Step::Heading,
            heading: Reveal::new(heading, options.heading),
            prompt: Reveal::new(prompt, options.prompt),
            subtitle_gap: options.subtitle_gap,
            prompt_lead: options.prompt_lead,
            stagger: options.stagger,
            skipped: false,
        }
    }

    pub fn stage(&self) -> BootStage {
        self.stage
    }

    pub fn skipped(&self) -> bool {
        self.skipped
    }

    /// Jumps straight to the command list. Does nothing once the list is shown.
    pub fn skip(&mut self) -> Tick {
        if self.stage == BootStage::Commands {
            return Tick::Done;
        }
        self.heading.finish();
        self.prompt.finish();
        self.stage = BootStage::Commands;
        self.step = Step::Done;
        self.skipped = true;
        Tick::Done
    }

    /// Entrance delay for the `index`th command row.
    pub fn command_delay(&self, index: usize) -> Duration {
        if self.skipped {
            return Duration::ZERO;
        }
        self.stagger * index as u32
    }

    fn after_heading(&mut self) -> Tick {
        self.step = Step::SubtitleGap;
        Tick::Wait(self.subtitle_gap)
    }

    fn after_prompt(&mut self) -> Tick {
        self.stage = BootStage::Commands;
        self.step = Step::Done;
        Tick::Done
    }

    fn continue_heading(&mut self, tick: Tick) -> Tick {
        match tick {
            Tick::Done => self.after_heading(),
            wait => wait,
        }
    }

    fn continue_prompt(&mut self, tick: Tick) -> Tick {
        match tick {
            Tick::Done => self.after_prompt(),
            wait => wait,
        }
    }
}

impl Machine for StagedReveal {
    type Frame = BootFrame;

    fn start(&mut self, notifier: &dyn Notifier) -> Tick {
        match self.step {
            Step::Heading => {
                let tick = self.heading.start(notifier);
                self.continue_heading(tick)
            }
            Step::SubtitleGap => Tick::Wait(self.subtitle_gap),
            Step::PromptLead => Tick::Wait(self.prompt_lead),
            Step::Prompt => {
                let tick = self.prompt.start(notifier);
                self.continue_prompt(tick)
            }
            Step::Done => Tick::Done,
        }
    }

    fn advance(&mut self, notifier: &dyn Notifier) -> Tick {
        match self.step {
            Step::Heading => {
                let tick = self.heading.advance(notifier);
                self.continue_heading(tick)
            }
            Step::SubtitleGap => {
                self.stage = BootStage::Subtitle;
                self.step = Step::PromptLead;
                Tick::Wait(self.prompt_lead)
            }
            Step::PromptLead => {
                self.stage = BootStage::Prompt;
                self.step = Step::Prompt;
                let tick = self.prompt.start(notifier);
                self.continue_prompt(tick)
            }
            Step::Prompt => {
                let tick = self.prompt.advance(notifier);
                self.continue_prompt(tick)
            }
            Step::Done => Tick::Done,
        }
    }

    fn frame(&self) -> BootFrame {
        BootFrame {
            stage: self.stage,
            heading: self.heading.revealed().to_string(),
            prompt: self.prompt.revealed().to_string(),
            skipped: self.skipped,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplashFrame {
    pub lines_shown: usize,
    pub glitching: bool,
    pub complete: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SplashEvent {
    Line,
    GlitchOff,
    Complete,
}

/// The full-screen status-line splash. All events are laid out on one
/// timeline measured from mount.
pub struct BootSplash {
    lines: Vec<String>,
    events: Vec<(Duration, SplashEvent)>,
    cursor: usize,
    elapsed: Duration,
    lines_shown: usize,
    glitching: bool,
    complete: bool,
}

impl BootSplash {
    pub const GLITCH_LEAD: Duration = Duration::from_millis(300);

    pub fn new<I, L>(lines: I, total: Duration) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        let mut events = Vec::with_capacity(lines.len() + 2);
        if !lines.is_empty() {
            let step = total / lines.len() as u32;
            for index in 1..lines.len() {
                events.push((step * index as u32, SplashEvent::Line));
            }
        }
        events.push((total.saturating_sub(Self::GLITCH_LEAD), SplashEvent::GlitchOff));
        events.push((total, SplashEvent::Complete));
        events.sort_by_key(|(at, _)| *at);
        let lines_shown = usize::from(!lines.is_empty());
        Self {
            lines,
            events,
            cursor: 0,
            elapsed: Duration::ZERO,
            lines_shown,
            glitching: true,
            complete: false,
        }
    }

    pub fn standard() -> Self {
        Self::new(SPLASH_LINES, Duration::from_millis(2000))
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn visible_lines(&self) -> &[String] {
        &self.lines[..self.lines_shown]
    }

    // Applies every event due at the current offset, then waits for the next.
    fn settle(&mut self) -> Tick {
        while let Some((at, event)) = self.events.get(self.cursor).copied() {
            if at > self.elapsed {
                return Tick::Wait(at - self.elapsed);
            }
            self.cursor += 1;
            match event {
                SplashEvent::Line => self.lines_shown = (self.lines_shown + 1).min(self.lines.len()),
                SplashEvent::GlitchOff => self.glitching = false,
                SplashEvent::Complete => {
                    self.complete = true;
                    return Tick::Done;
                }
            }
        }
        self.complete = true;
        Tick::Done
    }
}

impl Machine for BootSplash {
    type Frame = SplashFrame;

    fn start(&mut self, _notifier: &dyn Notifier) -> Tick {
        if self.complete {
            return Tick::Done;
        }
        self.settle()
    }

    fn advance(&mut self, _notifier: &dyn Notifier) -> Tick {
        if let Some((at, _)) = self.events.get(self.cursor) {
            self.elapsed = *at;
        }
        self.settle()
    }

    fn frame(&self) -> SplashFrame {
        SplashFrame {
            lines_shown: self.lines_shown,
            glitching: self.glitching,
            complete: self.complete,
        }
    }
}

/// Session-scoped "splash already played" flag.
pub trait SessionFlag {
    fn is_set(&self) -> bool;

    fn set(&self);
}

pub fn should_show_splash(flag: &dyn SessionFlag) -> bool {
    !flag.is_set()
}

pub fn mark_splash_shown(flag: &dyn SessionFlag) {
    flag.set();
}

#[derive(Debug, Default)]
pub struct MemoryFlag(std::cell::Cell<bool>);

impl SessionFlag for MemoryFlag {
    fn is_set(&self) -> bool {
        self.0.get()
    }

    fn set(&self) {
        self.0.set(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::SUGGESTIONS;
    use crate::notifier::Silent;
    use crate::runner::Runner;
    use crate::scheduler::VirtualScheduler;
    use pretty_assertions::assert_eq;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn options() -> BootOptions {
        BootOptions {
            heading: RevealOptions::default().with_delay_ms(10),
            prompt: RevealOptions::default().with_delay_ms(10),
            ..BootOptions::default()
        }
    }

    fn staged(
        scheduler: &VirtualScheduler,
    ) -> (Runner<StagedReveal, VirtualScheduler>, Rc<RefCell<Vec<(Duration, BootStage)>>>) {
        let stages = Rc::new(RefCell::new(Vec::new()));
        let seen = stages.clone();
        let clock = scheduler.clone();
        let runner = Runner::new(
            StagedReveal::new("NAME", "$ ls", options()),
            scheduler.clone(),
            Rc::new(Silent),
        )
        .on_frame(move |frame: BootFrame| {
            let mut stages = seen.borrow_mut();
            if stages.last().map(|(_, stage)| *stage) != Some(frame.stage) {
                stages.push((clock.now(), frame.stage));
            }
        });
        (runner, stages)
    }

    #[test]
    fn stages_advance_with_gaps() {
        let scheduler = VirtualScheduler::new();
        let (runner, stages) = staged(&scheduler);
        runner.start();
        scheduler.advance_ms(10_000);

        let ms = |millis| Duration::from_millis(millis);
        assert_eq!(
            *stages.borrow(),
            vec![
                (ms(0), BootStage::Heading),
                (ms(540), BootStage::Subtitle),
                (ms(1_340), BootStage::Prompt),
                (ms(1_380), BootStage::Commands),
            ]
        );
        assert!(runner.is_finished());
        assert_eq!(runner.with(|boot| boot.command_delay(3)), ms(300));
    }

    #[test]
    fn skip_matches_a_natural_finish() {
        let natural_clock = VirtualScheduler::new();
        let (natural, _) = staged(&natural_clock);
        natural.start();
        natural_clock.advance_ms(10_000);

        let skipped_clock = VirtualScheduler::new();
        let (skipped, _) = staged(&skipped_clock);
        skipped.start();
        skipped_clock.advance_ms(600);
        skipped.interrupt(|boot, _| boot.skip());

        let (a, b) = (natural.frame(), skipped.frame());
        assert_eq!(a.stage, b.stage);
        assert_eq!(a.heading, b.heading);
        assert_eq!(a.prompt, b.prompt);
        assert!(b.skipped);
        assert_eq!(skipped.with(|boot| boot.command_delay(4)), Duration::ZERO);
        assert_eq!(skipped_clock.pending(), 0);
    }

    #[test]
    fn skip_during_the_heading_lands_on_the_command_list() {
        let scheduler = VirtualScheduler::new();
        let finishes = Rc::new(Cell::new(0));
        let done = finishes.clone();
        let (runner, _) = staged(&scheduler);
        let runner = runner.on_finish(move || done.set(done.get() + 1));
        runner.start();
        scheduler.advance_ms(25);
        let partial = runner.frame();
        assert_eq!(partial.stage, BootStage::Heading);
        assert!(!partial.heading.is_empty() && partial.heading != "NAME");

        runner.interrupt(|boot, _| boot.skip());

        let frame = runner.frame();
        assert_eq!(frame.stage, BootStage::Commands);
        assert_eq!(frame.heading, "NAME");
        assert_eq!(frame.prompt, "$ ls");
        assert!(frame.skipped);
        for index in 0..SUGGESTIONS.len() {
            assert_eq!(runner.with(|boot| boot.command_delay(index)), Duration::ZERO);
        }
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(finishes.get(), 1);
        scheduler.advance_ms(10_000);
        assert_eq!(finishes.get(), 1);
    }

    #[test]
    fn skip_after_finishing_changes_nothing() {
        let scheduler = VirtualScheduler::new();
        let finishes = Rc::new(Cell::new(0));
        let done = finishes.clone();
        let (runner, _) = staged(&scheduler);
        let runner = runner.on_finish(move || done.set(done.get() + 1));
        runner.start();
        scheduler.advance_ms(10_000);
        runner.interrupt(|boot, _| boot.skip());
        assert!(!runner.frame().skipped);
        assert_eq!(finishes.get(), 1);
        runner.start();
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn splash_plays_lines_then_drops_the_glitch() {
        let scheduler = VirtualScheduler::new();
        let frames = Rc::new(RefCell::new(Vec::new()));
        let seen = frames.clone();
        let clock = scheduler.clone();
        let flag = Rc::new(MemoryFlag::default());
        let marker = flag.clone();
        let runner = Runner::new(BootSplash::standard(), scheduler.clone(), Rc::new(Silent))
            .on_frame(move |frame| seen.borrow_mut().push((clock.now(), frame)))
            .on_finish(move || mark_splash_shown(marker.as_ref()));

        assert!(should_show_splash(flag.as_ref()));
        runner.start();
        assert_eq!(runner.frame().lines_shown, 1);
        assert!(runner.frame().glitching);

        scheduler.advance_ms(1_699);
        assert_eq!(runner.frame().lines_shown, 6);
        assert!(runner.frame().glitching);
        scheduler.advance_ms(1);
        assert!(!runner.frame().glitching);
        assert!(!flag.is_set());
        scheduler.advance_ms(300);
        assert!(runner.frame().complete);
        assert!(!should_show_splash(flag.as_ref()));

        let frames = frames.borrow();
        let counts: Vec<usize> = frames.iter().map(|(_, frame)| frame.lines_shown).collect();
        assert_eq!(counts, vec![1, 2, 3, 4, 5, 6, 6, 6]);
        assert_eq!(frames.last().map(|(at, _)| *at), Some(Duration::from_millis(2_000)));
    }

    #[test]
    fn splash_without_lines_still_completes() {
        let scheduler = VirtualScheduler::new();
        let runner = Runner::new(
            BootSplash::new(Vec::<String>::new(), Duration::from_millis(100)),
            scheduler.clone(),
            Rc::new(Silent),
        );
        runner.start();
        scheduler.advance_ms(100);
        assert!(runner.is_finished());
        assert_eq!(runner.frame().lines_shown, 0);
    }
}
