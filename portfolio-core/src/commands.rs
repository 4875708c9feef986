use crate::notifier::{Cue, Notifier};

pub const RESUME_PATH: &str = "/resume.pdf";

pub const HELP_TEXT: &str =
    "Available commands: about, skills, projects, contact, cat resume.pdf, clear, home";

pub const RESUME_TEXT: &str = "Opening resume...";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    About,
    Skills,
    Projects,
    Contact,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Home,
        Page::About,
        Page::Skills,
        Page::Projects,
        Page::Contact,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::About => "/about",
            Page::Skills => "/skills",
            Page::Projects => "/projects",
            Page::Contact => "/contact",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::About => "about",
            Page::Skills => "skills",
            Page::Projects => "projects",
            Page::Contact => "contact",
        }
    }

    pub fn from_path(path: &str) -> Option<Page> {
        let trimmed = path.trim_end_matches('/');
        Page::ALL
            .into_iter()
            .find(|page| page.path().trim_end_matches('/') == trimmed)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Go(Page),
    Resume,
    Clear,
    Unknown(String),
}

impl Command {
    /// Trims and lower-cases `raw`. Blank input is not a command.
    pub fn parse(raw: &str) -> Option<Command> {
        let normalized = raw.trim().to_lowercase();
        let command = match normalized.as_str() {
            "" => return None,
            "help" => Command::Help,
            "cat resume.pdf" | "resume" => Command::Resume,
            "clear" => Command::Clear,
            other => match Page::ALL.into_iter().find(|page| page.label() == other) {
                Some(page) => Command::Go(page),
                None => Command::Unknown(normalized),
            },
        };
        Some(command)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Echo,
    Output,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub kind: EntryKind,
    pub text: String,
}

/// Append-only command history. The only removal is [`Transcript::clear`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn push(&mut self, kind: EntryKind, text: impl Into<String>) {
        self.entries.push(TranscriptEntry {
            kind,
            text: text.into(),
        });
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// What the UI has to do after a command ran.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    Navigate(Page),
    OpenExternal(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Interpreter {
    transcript: Transcript,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn submit(&mut self, raw: &str, notifier: &dyn Notifier) -> Effect {
        let Some(command) = Command::parse(raw) else {
            return Effect::None;
        };
        tracing::debug!(?command, "terminal: submit");
        self.transcript.push(EntryKind::Echo, format!("$ {raw}"));
        notifier.notify(Cue::Enter);

        match command {
            Command::Help => {
                self.transcript.push(EntryKind::Output, HELP_TEXT);
                Effect::None
            }
            Command::Go(page) => Effect::Navigate(page),
            Command::Resume => {
                self.transcript.push(EntryKind::Output, RESUME_TEXT);
                Effect::OpenExternal(RESUME_PATH.to_string())
            }
            Command::Clear => {
                self.transcript.clear();
                Effect::None
            }
            Command::Unknown(name) => {
                notifier.notify(Cue::Error);
                self.transcript.push(
                    EntryKind::Output,
                    format!("Command not found: {name}. Type 'help' for available commands."),
                );
                Effect::None
            }
        }
    }
}
