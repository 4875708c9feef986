use crate::logger::Logger;
use http::{HeaderMap, Method, Uri};
use serde_json::{Value, json};
use std::time::Instant;
use uuid::Uuid;

#[derive(Clone)]
pub struct RequestContextManager {
    logger: Logger,
}

pub struct RequestContext {
    pub request_id: String,
    method: Method,
    path: String,
    origin: Option<String>,
    started_at: Instant,
    logger: Logger,
}

impl RequestContextManager {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }

    pub fn start(&self, method: Method, uri: &Uri, headers: &HeaderMap) -> RequestContext {
        let request_id = headers
            .get("x-request-id")
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.trim().is_empty())
            .map(|value| value.to_string())
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let origin = headers
            .get("origin")
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        RequestContext {
            request_id,
            method,
            path: uri.path().to_string(),
            origin,
            started_at: Instant::now(),
            logger: self.logger.clone(),
        }
    }
}

impl RequestContext {
    pub fn complete(self, status_code: u16, extra: Value) {
        let mut payload = json!({
            "requestId": self.request_id,
            "method": self.method.as_str(),
            "path": self.path,
            "origin": self.origin,
            "statusCode": status_code,
            "durationMs": self.started_at.elapsed().as_secs_f64() * 1000.0,
        });
        if let (Value::Object(target), Value::Object(extra)) = (&mut payload, extra) {
            target.extend(extra);
        }
        if status_code >= 500 {
            self.logger.warn("request.completed", payload);
        } else {
            self.logger.info("request.completed", payload);
        }
    }
}
