use http::{HeaderMap, HeaderValue, header::HeaderName};

const ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";
const ALLOW_METHODS: &str = "GET, OPTIONS";
const PRE_FLIGHT_MAX_AGE: &str = "600";

/// Every response, success or failure, carries these headers.
#[derive(Clone, Debug)]
pub struct Cors {
    allow_origin: HeaderValue,
}

impl Cors {
    pub fn new(allow_origin: &str) -> Self {
        Self {
            allow_origin: HeaderValue::from_str(allow_origin)
                .unwrap_or_else(|_| HeaderValue::from_static("*")),
        }
    }

    pub fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("access-control-allow-origin"),
            self.allow_origin.clone(),
        );
        headers.insert(
            HeaderName::from_static("access-control-allow-headers"),
            HeaderValue::from_static(ALLOW_HEADERS),
        );
        if self.allow_origin != "*" {
            headers.insert(
                HeaderName::from_static("vary"),
                HeaderValue::from_static("Origin"),
            );
        }
        headers
    }

    pub fn preflight_headers(&self) -> HeaderMap {
        let mut headers = self.build_headers();
        headers.insert(
            HeaderName::from_static("access-control-allow-methods"),
            HeaderValue::from_static(ALLOW_METHODS),
        );
        headers.insert(
            HeaderName::from_static("access-control-max-age"),
            HeaderValue::from_static(PRE_FLIGHT_MAX_AGE),
        );
        headers
    }
}
