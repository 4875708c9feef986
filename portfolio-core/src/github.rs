use serde::de::{MapAccess, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::FetchError;

pub const DEFAULT_DESCRIPTION: &str = "No description available";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageShare {
    pub name: String,
    pub level: u32,
}

/// `{"Rust": 45, "TypeScript": 30}` kept in the order it was written.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LanguagePercentages(pub Vec<LanguageShare>);

impl Serialize for LanguagePercentages {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|share| (&share.name, share.level)))
    }
}

impl<'de> Deserialize<'de> for LanguagePercentages {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedShares;

        impl<'de> Visitor<'de> for OrderedShares {
            type Value = LanguagePercentages;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an object of language percentages")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut shares = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, level)) = map.next_entry::<String, f64>()? {
                    shares.push(LanguageShare {
                        name,
                        level: level.round().clamp(0.0, 100.0) as u32,
                    });
                }
                Ok(LanguagePercentages(shares))
            }
        }

        deserializer.deserialize_map(OrderedShares)
    }
}

/// Body of `GET /github-languages`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageStatsBody {
    pub languages: BTreeMap<String, u64>,
    pub percentages: LanguagePercentages,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
    pub avatar_url: String,
}

/// One entry of `GET /github-starred`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarredRepo {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    pub html_url: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub topics: Vec<String>,
    pub owner: Owner,
}

fn default_description() -> String {
    DEFAULT_DESCRIPTION.to_string()
}

#[derive(Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Deserialize)]
struct LanguagesReply {
    #[serde(default)]
    percentages: Option<LanguagePercentages>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct ErrorReply {
    #[serde(default)]
    error: Option<String>,
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

// Non-2xx bodies are only mined for an `error` message.
fn failed_status(status: u16, body: &str) -> FetchError {
    match serde_json::from_str::<ErrorReply>(body) {
        Ok(ErrorReply { error: Some(error) }) => FetchError::Upstream(error),
        _ => FetchError::Status(status),
    }
}

fn parse_value(body: &str) -> Result<serde_json::Value, FetchError> {
    serde_json::from_str(body).map_err(|err| FetchError::Malformed(err.to_string()))
}

pub fn decode_languages(status: u16, body: &str) -> Result<Vec<LanguageShare>, FetchError> {
    if !is_success(status) {
        return Err(failed_status(status, body));
    }
    if !parse_value(body)?.is_object() {
        return Ok(Vec::new());
    }
    let reply: LanguagesReply =
        serde_json::from_str(body).map_err(|err| FetchError::Malformed(err.to_string()))?;
    match reply {
        LanguagesReply {
            percentages: Some(percentages),
            ..
        } => Ok(percentages.0),
        LanguagesReply {
            error: Some(error), ..
        } => Err(FetchError::Upstream(error)),
        _ => Ok(Vec::new()),
    }
}

pub fn decode_starred(status: u16, body: &str) -> Result<Vec<StarredRepo>, FetchError> {
    if !is_success(status) {
        return Err(failed_status(status, body));
    }
    match parse_value(body)? {
        serde_json::Value::Array(_) => {
            serde_json::from_str(body).map_err(|err| FetchError::Malformed(err.to_string()))
        }
        serde_json::Value::Object(object) => match object.get("error").and_then(|e| e.as_str()) {
            Some(error) => Err(FetchError::Upstream(error.to_string())),
            None => Err(FetchError::UnexpectedShape),
        },
        _ => Err(FetchError::UnexpectedShape),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn share(name: &str, level: u32) -> LanguageShare {
        LanguageShare {
            name: name.to_string(),
            level,
        }
    }

    #[test]
    fn percentages_keep_their_served_order() {
        let body = r#"{"languages":{"Rust":900,"TypeScript":600,"Shell":500},
            "percentages":{"TypeScript":30,"Rust":45,"Shell":25}}"#;
        assert_eq!(
            decode_languages(200, body).unwrap(),
            vec![share("TypeScript", 30), share("Rust", 45), share("Shell", 25)]
        );
    }

    #[test]
    fn serialized_percentages_preserve_order() {
        let body = LanguageStatsBody {
            languages: BTreeMap::from([("Go".to_string(), 10), ("C".to_string(), 90)]),
            percentages: LanguagePercentages(vec![share("C", 90), share("Go", 10)]),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(
            json,
            r#"{"languages":{"C":90,"Go":10},"percentages":{"C":90,"Go":10}}"#
        );
    }

    #[test]
    fn languages_error_field_is_a_failure() {
        let result = decode_languages(200, r#"{"error":"GitHub API returned 403"}"#);
        assert_eq!(
            result,
            Err(FetchError::Upstream("GitHub API returned 403".to_string()))
        );
    }

    #[test]
    fn anything_else_is_an_empty_language_list() {
        assert_eq!(decode_languages(200, "[]").unwrap(), Vec::new());
        assert_eq!(decode_languages(200, r#"{"other":1}"#).unwrap(), Vec::new());
        assert_eq!(decode_languages(200, "null").unwrap(), Vec::new());
    }

    #[test]
    fn error_status_surfaces_the_proxy_message() {
        assert_eq!(
            decode_languages(500, r#"{"error":"GitHub API returned 502"}"#),
            Err(FetchError::Upstream("GitHub API returned 502".to_string()))
        );
        assert_eq!(decode_starred(503, "<html>"), Err(FetchError::Status(503)));
    }

    #[test]
    fn invalid_json_is_malformed() {
        assert!(matches!(
            decode_languages(200, "{nope"),
            Err(FetchError::Malformed(_))
        ));
    }

    #[test]
    fn starred_array_decodes_with_defaults() {
        let body = r#"[{"id":1,"name":"ripgrep","full_name":"BurntSushi/ripgrep",
            "html_url":"https://github.com/BurntSushi/ripgrep",
            "owner":{"login":"BurntSushi","avatar_url":"https://a/b.png"}}]"#;
        let repos = decode_starred(200, body).unwrap();
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].description, DEFAULT_DESCRIPTION);
        assert_eq!(repos[0].topics, Vec::<String>::new());
        assert_eq!(repos[0].language, None);
    }

    #[test]
    fn starred_shapes() {
        assert_eq!(
            decode_starred(200, r#"{"error":"rate limited"}"#),
            Err(FetchError::Upstream("rate limited".to_string()))
        );
        let result = decode_starred(200, r#"{"items":[]}"#);
        assert_eq!(result, Err(FetchError::UnexpectedShape));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Invalid response format"
        );
        assert_eq!(decode_starred(200, "42"), Err(FetchError::UnexpectedShape));
    }
}
