//! Text field selector
//!
//! A [`TextField`] tells the extractor where the answer text lives inside a
//! decoded response body. It is configured as a string:
//!
//! - a path such as `choices[0].message.content` or `candidates.0.content.parts.0.text`
//! - a bare key such as `response`, searched depth-first through the whole body
//!
//! A match that is not a JSON string counts as a miss.

use super::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// One step of a [`TextField::Path`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Selector locating the answer text inside a response body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextField {
    /// Exact path from the document root
    Path(Vec<PathSegment>),
    /// First string value stored under this key anywhere in the document
    Key(String),
}

impl TextField {
    /// Locate the raw value addressed by this selector
    pub fn search<'a>(&self, body: &'a Value) -> Option<&'a Value> {
        match self {
            TextField::Path(segments) => {
                let mut current = body;
                for segment in segments {
                    current = match (segment, current) {
                        (PathSegment::Key(key), Value::Object(map)) => map.get(key)?,
                        (PathSegment::Index(i), Value::Array(items)) => items.get(*i)?,
                        // Numeric segments also address object keys like "0"
                        (PathSegment::Index(i), Value::Object(map)) => map.get(&i.to_string())?,
                        _ => return None,
                    };
                }
                Some(current)
            }
            TextField::Key(key) => find_key(body, key),
        }
    }

    /// Locate the answer text, if the selector lands on a JSON string
    pub fn find_text<'a>(&self, body: &'a Value) -> Option<&'a str> {
        self.search(body).and_then(Value::as_str)
    }
}

/// Depth-first, document-order search for the first string under `key`
fn find_key<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.iter().find_map(|(k, v)| {
            if k == key && v.is_string() {
                Some(v)
            } else {
                find_key(v, key)
            }
        }),
        Value::Array(items) => items.iter().find_map(|v| find_key(v, key)),
        _ => None,
    }
}

fn invalid(selector: &str, reason: &str) -> DomainError {
    DomainError::InvalidSelector {
        selector: selector.to_string(),
        reason: reason.to_string(),
    }
}

impl std::str::FromStr for TextField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(invalid(s, "selector is empty"));
        }
        if !s.contains('.') && !s.contains('[') {
            return Ok(TextField::Key(s.to_string()));
        }

        let mut segments = Vec::new();
        for part in s.split('.') {
            if part.is_empty() {
                return Err(invalid(s, "empty path segment"));
            }

            let (head, mut rest) = match part.find('[') {
                Some(pos) => part.split_at(pos),
                None => (part, ""),
            };

            if !head.is_empty() {
                match head.parse::<usize>() {
                    Ok(i) => segments.push(PathSegment::Index(i)),
                    Err(_) => segments.push(PathSegment::Key(head.to_string())),
                }
            }

            while !rest.is_empty() {
                let Some(close) = rest.find(']') else {
                    return Err(invalid(s, "unclosed '['"));
                };
                if !rest.starts_with('[') {
                    return Err(invalid(s, "unexpected text after ']'"));
                }
                let index = rest[1..close]
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| invalid(s, "index is not a number"))?;
                segments.push(PathSegment::Index(index));
                rest = &rest[close + 1..];
            }
        }

        Ok(TextField::Path(segments))
    }
}

impl std::fmt::Display for TextField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextField::Key(key) => write!(f, "{}", key),
            TextField::Path(segments) => {
                for (i, segment) in segments.iter().enumerate() {
                    match segment {
                        PathSegment::Key(key) if i == 0 => write!(f, "{}", key)?,
                        PathSegment::Key(key) => write!(f, ".{}", key)?,
                        PathSegment::Index(index) => write!(f, "[{}]", index)?,
                    }
                }
                Ok(())
            }
        }
    }
}

impl Serialize for TextField {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TextField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
