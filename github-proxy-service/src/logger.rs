use serde_json::{Map, Value};
use std::env;
use std::fmt::Display;
use std::sync::Arc;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }

    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::to_ascii_lowercase).as_deref() {
            Some("error") => LogLevel::Error,
            Some("warn") => LogLevel::Warn,
            Some("debug") => LogLevel::Debug,
            _ => LogLevel::Info,
        }
    }
}

/// One JSON object per line: errors and warnings to stderr, the rest to stdout.
#[derive(Clone, Debug)]
pub struct Logger {
    service: Arc<str>,
    host: Arc<str>,
    min_level: LogLevel,
}

impl Logger {
    pub fn new(service: &'static str) -> Self {
        let host = hostname::get()
            .ok()
            .and_then(|value| value.into_string().ok())
            .unwrap_or_else(|| "unknown".to_string());
        let min_level = LogLevel::parse(env::var("LOG_LEVEL").ok().as_deref());
        Self::with_level(service, &host, min_level)
    }

    pub fn with_level(service: &str, host: &str, min_level: LogLevel) -> Self {
        Self {
            service: Arc::from(service),
            host: Arc::from(host),
            min_level,
        }
    }

    pub fn debug(&self, event: &str, context: impl Into<Value>) {
        self.emit(LogLevel::Debug, event, context);
    }

    pub fn info(&self, event: &str, context: impl Into<Value>) {
        self.emit(LogLevel::Info, event, context);
    }

    pub fn warn(&self, event: &str, context: impl Into<Value>) {
        self.emit(LogLevel::Warn, event, context);
    }

    pub fn error(&self, event: &str, context: impl Into<Value>) {
        self.emit(LogLevel::Error, event, context);
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level <= self.min_level
    }

    fn emit(&self, level: LogLevel, event: &str, context: impl Into<Value>) {
        if !self.enabled(level) {
            return;
        }
        let line = Value::Object(self.payload(level, event, context.into())).to_string();
        match level {
            LogLevel::Error | LogLevel::Warn => eprintln!("{line}"),
            _ => println!("{line}"),
        }
    }

    fn payload(&self, level: LogLevel, event: &str, context: Value) -> Map<String, Value> {
        let timestamp = OffsetDateTime::now_utc();
        let mut payload = Map::new();
        payload.insert(
            "timestamp".into(),
            Value::String(
                timestamp
                    .format(&Rfc3339)
                    .unwrap_or_else(|_| timestamp.to_string()),
            ),
        );
        payload.insert("service".into(), Value::String(self.service.to_string()));
        payload.insert("host".into(), Value::String(self.host.to_string()));
        payload.insert("level".into(), Value::String(level.as_str().to_string()));
        payload.insert("event".into(), Value::String(event.to_string()));

        match context {
            Value::Object(map) => {
                for (key, value) in map {
                    payload.insert(key, value);
                }
            }
            Value::Null => {}
            other => {
                payload.insert("context".into(), other);
            }
        }
        payload
    }
}

pub fn log_error<E: Display>(logger: &Logger, event: &str, error: E) {
    logger.error(
        event,
        Value::Object(Map::from_iter([(
            "error".to_string(),
            Value::String(error.to_string()),
        )])),
    );
}
