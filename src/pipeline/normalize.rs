//! Reduces the link locker's varying response envelopes to one URL.
//!
//! The locker has been observed to answer with a single object, an object
//! wrapped in a list, a bare list, or an error object. Classification rules,
//! first match wins:
//!
//! | shape   | condition                                        | result            |
//! |---------|--------------------------------------------------|-------------------|
//! | mapping | `type` is created/fetch, `message` non-empty list | `message[0].loot_url` |
//! | mapping | `type` is created/fetch, `message` mapping        | `message.loot_url` |
//! | mapping | any other `type`                                 | error, `message`  |
//! | list    | first element is a mapping with `loot_url`       | that `loot_url`   |
//! | other   |                                                  | unrecognized      |

use serde_json::{Map, Value};

use super::outcome::LinkFailure;

const SUCCESS_TYPES: [&str; 2] = ["created", "fetch"];

/// A classified locker response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkResponse {
    /// `{"type": .., "message": {"loot_url": ..}}`
    SingleObject {
        /// Extracted link.
        loot_url: String,
    },
    /// `{"type": .., "message": [{"loot_url": ..}, ..]}` or `[{"loot_url": ..}, ..]`
    ObjectList {
        /// Link of the first element.
        loot_url: String,
    },
    /// A mapping whose `type` is not a success discriminator.
    ErrorObject {
        /// The `message` field, or "unknown error".
        reason: String,
    },
    /// Anything the rules above do not cover.
    Unrecognized {
        /// What was wrong with the shape.
        reason: String,
    },
}

impl LinkResponse {
    /// Classifies a raw response body.
    #[must_use]
    pub fn classify(raw: &Value) -> Self {
        match raw {
            Value::Object(map) => classify_object(map),
            Value::Array(items) => match items.first() {
                Some(Value::Object(first)) if first.contains_key("loot_url") => {
                    link_from(first, |loot_url| Self::ObjectList { loot_url })
                }
                _ => unrecognized("unexpected response format"),
            },
            _ => unrecognized("unexpected response format"),
        }
    }

    /// The extracted link, or the failure it represents.
    ///
    /// # Errors
    ///
    /// Returns a rejected [`LinkFailure`] for error and unrecognized responses.
    pub fn into_url(self) -> Result<String, LinkFailure> {
        match self {
            Self::SingleObject { loot_url } | Self::ObjectList { loot_url } => Ok(loot_url),
            Self::ErrorObject { reason } | Self::Unrecognized { reason } => {
                Err(LinkFailure::rejected(reason))
            }
        }
    }
}

/// Extracts the link from a raw locker response.
///
/// # Errors
///
/// Returns a rejected [`LinkFailure`] when no link can be extracted.
pub fn extract_url(raw: &Value) -> Result<String, LinkFailure> {
    let response = LinkResponse::classify(raw);
    if let LinkResponse::Unrecognized { reason } = &response {
        tracing::warn!(%raw, reason = %reason, "unrecognized locker response");
    }
    response.into_url()
}

fn classify_object(map: &Map<String, Value>) -> LinkResponse {
    let is_success = map
        .get("type")
        .and_then(Value::as_str)
        .is_some_and(|kind| SUCCESS_TYPES.contains(&kind));

    if !is_success {
        let reason = match map.get("message") {
            Some(Value::String(message)) => message.clone(),
            Some(Value::Null) | None => "unknown error".to_string(),
            Some(other) => other.to_string(),
        };
        return LinkResponse::ErrorObject { reason };
    }

    match map.get("message") {
        Some(Value::Array(items)) if !items.is_empty() => match &items[0] {
            Value::Object(first) => link_from(first, |loot_url| LinkResponse::ObjectList { loot_url }),
            _ => unrecognized("unexpected message format"),
        },
        Some(Value::Object(message)) => {
            link_from(message, |loot_url| LinkResponse::SingleObject { loot_url })
        }
        _ => unrecognized("unexpected message format"),
    }
}

fn link_from(
    map: &Map<String, Value>,
    wrap: impl FnOnce(String) -> LinkResponse,
) -> LinkResponse {
    match map.get("loot_url") {
        Some(Value::String(url)) if !url.trim().is_empty() => wrap(url.clone()),
        Some(Value::String(_)) => unrecognized("empty loot_url"),
        Some(_) => unrecognized("loot_url is not a string"),
        None => unrecognized("missing loot_url"),
    }
}

fn unrecognized(reason: &str) -> LinkResponse {
    LinkResponse::Unrecognized { reason: reason.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::outcome::FailureKind;
    use serde_json::json;

    #[test]
    fn single_object_message() {
        let raw = json!({"type": "created", "message": {"loot_url": "X"}});
        assert_eq!(LinkResponse::classify(&raw), LinkResponse::SingleObject { loot_url: "X".into() });
        assert_eq!(extract_url(&raw).unwrap(), "X");
    }

    #[test]
    fn list_message_takes_first_element() {
        let raw = json!({"type": "created", "message": [{"loot_url": "X"}, {"loot_url": "Y"}]});
        assert_eq!(extract_url(&raw).unwrap(), "X");
    }

    #[test]
    fn fetch_type_is_accepted() {
        let raw = json!({"type": "fetch", "message": [{"loot_url": "https://loot-link.com/s?abc"}]});
        assert_eq!(extract_url(&raw).unwrap(), "https://loot-link.com/s?abc");
    }

    #[test]
    fn top_level_list() {
        let raw = json!([{"loot_url": "X", "short": "abc"}]);
        assert_eq!(LinkResponse::classify(&raw), LinkResponse::ObjectList { loot_url: "X".into() });
        assert_eq!(extract_url(&raw).unwrap(), "X");
    }

    #[test]
    fn error_object_reports_message() {
        let failure = extract_url(&json!({"type": "error", "message": "bad"})).unwrap_err();
        assert_eq!(failure.kind, FailureKind::Rejected);
        assert_eq!(failure.reason, "bad");
    }

    #[test]
    fn error_object_without_message_is_unknown_error() {
        let failure = extract_url(&json!({"type": "error"})).unwrap_err();
        assert_eq!(failure.reason, "unknown error");
        let failure = extract_url(&json!({"message": "no type at all"})).unwrap_err();
        assert_eq!(failure.reason, "no type at all");
    }

    #[test]
    fn success_type_with_empty_list_is_unrecognized() {
        let raw = json!({"type": "created", "message": []});
        assert_eq!(
            LinkResponse::classify(&raw),
            LinkResponse::Unrecognized { reason: "unexpected message format".into() }
        );
    }

    #[test]
    fn missing_or_blank_loot_url_is_unrecognized() {
        assert!(matches!(
            LinkResponse::classify(&json!({"type": "created", "message": {"id": 1}})),
            LinkResponse::Unrecognized { .. }
        ));
        assert!(matches!(
            LinkResponse::classify(&json!({"type": "created", "message": {"loot_url": ""}})),
            LinkResponse::Unrecognized { .. }
        ));
        assert!(matches!(
            LinkResponse::classify(&json!([{"loot_url": 42}])),
            LinkResponse::Unrecognized { .. }
        ));
    }

    #[test]
    fn other_shapes_are_unexpected_format() {
        for raw in [json!("created"), json!(null), json!(7), json!([]), json!([1, 2])] {
            let failure = extract_url(&raw).unwrap_err();
            assert!(failure.reason.starts_with("unexpected"), "{raw}: {}", failure.reason);
        }
        assert_eq!(extract_url(&json!(null)).unwrap_err().reason, "unexpected response format");
    }
}
