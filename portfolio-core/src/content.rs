//! Static copy for the pages.

use crate::commands::{Page, RESUME_PATH};

pub const OWNER_NAME: &str = "SAM RANJITH PAUL";
pub const PROMPT_USER: &str = "sam";
pub const TERMINAL_VERSION: &str = "terminal v1.0.0";
pub const INPUT_PLACEHOLDER: &str = "type command...";
pub const HOME_PROMPT: &str = "Type a command to begin:";

pub const TAGLINES: [&str; 4] = [
    "Full-Stack Developer",
    "Systems Thinker",
    "Open-Source Contributor",
    "Terminal Enthusiast",
];

/// `sam@terminal:~/skills`
pub fn prompt_prefix(path: &str) -> String {
    format!("{PROMPT_USER}@terminal:~{}", path.trim_end_matches('/'))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuggestionTarget {
    Run,
    Route(Page),
    Download(&'static str),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Suggestion {
    pub command: &'static str,
    pub description: &'static str,
    pub target: SuggestionTarget,
}

pub const SUGGESTIONS: [Suggestion; 6] = [
    Suggestion {
        command: "help",
        description: "Show available commands",
        target: SuggestionTarget::Run,
    },
    Suggestion {
        command: "about",
        description: "Display information about me",
        target: SuggestionTarget::Route(Page::About),
    },
    Suggestion {
        command: "skills",
        description: "List technical skills",
        target: SuggestionTarget::Route(Page::Skills),
    },
    Suggestion {
        command: "projects",
        description: "Browse project portfolio",
        target: SuggestionTarget::Route(Page::Projects),
    },
    Suggestion {
        command: "contact",
        description: "Get in touch",
        target: SuggestionTarget::Route(Page::Contact),
    },
    Suggestion {
        command: "cat resume.pdf",
        description: "Download resume",
        target: SuggestionTarget::Download(RESUME_PATH),
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Link {
    pub label: &'static str,
    pub handle: &'static str,
    pub url: &'static str,
}

pub const LINKS: [Link; 3] = [
    Link {
        label: "GitHub",
        handle: "@samranjithpaul",
        url: "https://github.com/samranjithpaul",
    },
    Link {
        label: "LinkedIn",
        handle: "/samranjithpaul",
        url: "https://linkedin.com/in/samranjithpaul",
    },
    Link {
        label: "Email",
        handle: "sam@example.com",
        url: "mailto:sam@example.com",
    },
];

pub mod about {
    pub const COMMAND: &str = "cat about.txt";
    pub const SUMMARY: &str = "Full-stack developer. Building fast, scalable web applications.";
    pub const PARAGRAPHS: [&str; 3] = [
        "Specialized in modern web technologies. React, TypeScript, Node.js. Backend APIs, \
         database design, cloud infrastructure.",
        "Focus on clean code, performance optimization, and user experience. Analytical \
         approach to problem-solving. No-nonsense implementation.",
        "Experience with distributed systems, real-time applications, and complex data flows. \
         Open-source contributor. Continuous learner.",
    ];
    pub const FILE_STATS: [(&str, &str); 3] =
        [("File", "about.txt"), ("Size", "1.2KB"), ("Modified", "2025-01-15")];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Skill {
    pub name: &'static str,
    pub level: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkillCategory {
    pub name: &'static str,
    pub skills: [Skill; 4],
}

const fn skill(name: &'static str, level: u32) -> Skill {
    Skill { name, level }
}

pub mod skills {
    use super::{SkillCategory, skill};

    pub const COMMAND: &str = "list --skills --verbose";
    pub const LOADING: &str = "[INFO] Loading skill database...";
    pub const LOADED: &str = "[OK] Skills loaded successfully.";
    pub const LANGUAGES_HEADING: &str = "[GITHUB LANGUAGES]";
    pub const SUMMARY: &str = "[SUMMARY] Proficient across full-stack development. Focus on \
                               scalable architecture and clean implementation.";

    pub fn total_skills() -> usize {
        CATEGORIES.iter().map(|category| category.skills.len()).sum()
    }

    pub const CATEGORIES: [SkillCategory; 4] = [
        SkillCategory {
            name: "Frontend",
            skills: [
                skill("React / Next.js", 95),
                skill("TypeScript", 90),
                skill("Tailwind CSS", 92),
                skill("State Management", 88),
            ],
        },
        SkillCategory {
            name: "Backend",
            skills: [
                skill("Node.js / Express", 90),
                skill("Python / FastAPI", 85),
                skill("GraphQL / REST", 87),
                skill("Database Design", 88),
            ],
        },
        SkillCategory {
            name: "Tools",
            skills: [
                skill("Git / GitHub", 93),
                skill("Docker / K8s", 82),
                skill("CI/CD Pipelines", 85),
                skill("AWS / Vercel", 88),
            ],
        },
        SkillCategory {
            name: "OS & Systems",
            skills: [
                skill("Linux / Unix", 90),
                skill("Shell Scripting", 87),
                skill("System Design", 85),
                skill("Performance Opt", 88),
            ],
        },
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Project {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub tech: &'static [&'static str],
    pub github: &'static str,
    pub live: Option<&'static str>,
    pub build_log: &'static [&'static str],
}

pub mod projects {
    use super::Project;

    pub const COMMAND: &str = "show projects --detailed";
    pub const FOOTER: &str =
        "Use arrow keys or click to expand project details. All source code available on GitHub.";
    pub const STARRED_HEADING: &str = "[STARRED ON GITHUB]";

    pub fn listing_header() -> String {
        format!("total {} projects", PROJECTS.len())
    }

    pub const PROJECTS: [Project; 4] = [
        Project {
            id: "realtime-collab",
            name: "realtime-collab-platform",
            description: "Real-time collaborative workspace with WebSocket architecture. \
                          Multiplayer text editing, live cursors, presence awareness.",
            tech: &["React", "Node.js", "Socket.io", "Redis", "PostgreSQL"],
            github: "https://github.com/samranjithpaul/realtime-collab",
            live: Some("https://collab-demo.example.com"),
            build_log: &[
                "Installing dependencies... ✓",
                "Compiling TypeScript... ✓",
                "Building WebSocket server... ✓",
                "Optimizing production build... ✓",
                "Deploy complete.",
            ],
        },
        Project {
            id: "api-gateway",
            name: "distributed-api-gateway",
            description: "Microservices API gateway with rate limiting, authentication, and \
                          service discovery. Handles 10k+ req/sec.",
            tech: &["Node.js", "Express", "Redis", "Docker", "Nginx"],
            github: "https://github.com/samranjithpaul/api-gateway",
            live: None,
            build_log: &[
                "Initializing Docker containers... ✓",
                "Configuring load balancer... ✓",
                "Setting up Redis cluster... ✓",
                "Health check passed... ✓",
            ],
        },
        Project {
            id: "ml-pipeline",
            name: "ml-data-pipeline",
            description: "ETL pipeline for ML model training. Automated data ingestion, \
                          transformation, and model deployment.",
            tech: &["Python", "Airflow", "PostgreSQL", "AWS S3", "Scikit-learn"],
            github: "https://github.com/samranjithpaul/ml-pipeline",
            live: None,
            build_log: &[
                "Validating data sources... ✓",
                "Running transformation jobs... ✓",
                "Training model... ✓",
                "Model accuracy: 94.2%... ✓",
            ],
        },
        Project {
            id: "terminal-portfolio",
            name: "terminal-portfolio",
            description: "This portfolio. Terminal-themed developer showcase with live command \
                          execution and theme switching.",
            tech: &["Rust", "Dioxus", "WebAssembly", "axum"],
            github: "https://github.com/samranjithpaul/portfolio",
            live: Some("https://samranjithpaul.dev"),
            build_log: &[
                "Compiling components to wasm32... ✓",
                "Optimizing assets... ✓",
                "Building production bundle... ✓",
                "Deployed... ✓",
            ],
        },
    ];
}

pub mod contact {
    pub const COMMAND: &str = "contact --info";
    pub const INFO_HEADING: &str = "[CONTACT INFORMATION]";
    pub const MESSAGE_HEADING: &str = "[SEND MESSAGE]";
    pub const SENT_NOTICE: &str = "Message sent successfully! I'll get back to you soon.";
}

pub mod not_found {
    pub fn message(path: &str) -> String {
        format!("bash: {path}: No such file or directory")
    }
}
