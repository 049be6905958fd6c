use std::fmt;
use std::str::FromStr;

use super::quality::{parse_header_value, split_unquoted};
use super::{HeaderError, HeaderResult};
use crate::types::Quality;

const WILDCARD: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentType {
    content_type: String,
    content_subtype: String,
    parameters: Vec<(String, String)>,
}

impl ContentType {
    pub fn new(content_type: &str, content_subtype: &str) -> Self {
        Self {
            content_type: content_type.to_ascii_lowercase(),
            content_subtype: content_subtype.to_ascii_lowercase(),
            parameters: Vec::new(),
        }
    }

    pub fn any() -> Self {
        Self::new(WILDCARD, WILDCARD)
    }

    pub fn with_parameter(mut self, name: &str, value: &str) -> Self {
        self.parameters
            .push((name.to_ascii_lowercase(), value.to_string()));
        self
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn content_subtype(&self) -> &str {
        &self.content_subtype
    }

    pub fn parameters(&self) -> &[(String, String)] {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn parse(text: &str) -> HeaderResult<Self> {
        let mut parts = split_unquoted(text, b';').into_iter();
        let main = parts.next().unwrap_or_default().trim();
        let mut content_type = Self::parse_main(main, text)?;

        for raw in parts {
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }
            let Some((name, value)) = raw.split_once('=') else {
                return Err(malformed(text, "parameter is missing '='"));
            };
            let name = name.trim();
            if name.is_empty() {
                return Err(malformed(text, "parameter name is empty"));
            }
            content_type = content_type.with_parameter(name, value.trim().trim_matches('"'));
        }

        Ok(content_type)
    }

    fn parse_main(main: &str, original: &str) -> HeaderResult<Self> {
        if main == WILDCARD {
            return Ok(Self::any());
        }
        let Some((kind, subtype)) = main.split_once('/') else {
            return Err(malformed(original, "expected 'type/subtype'"));
        };
        let (kind, subtype) = (kind.trim(), subtype.trim());
        if kind.is_empty() || subtype.is_empty() {
            return Err(malformed(original, "type and subtype must not be empty"));
        }
        if !is_token(kind) || !is_token(subtype) {
            return Err(malformed(original, "type contains invalid characters"));
        }
        if kind == WILDCARD && subtype != WILDCARD {
            return Err(malformed(original, "wildcard type requires wildcard subtype"));
        }
        Ok(Self::new(kind, subtype))
    }

    /// Checks whether `self` is matched by `pattern`, where the pattern may
    /// use `*` for the type, the subtype, a parameter value or a parameter
    /// name.
    pub fn matches(&self, pattern: &ContentType) -> bool {
        if pattern.content_type != WILDCARD && pattern.content_type != self.content_type {
            return false;
        }
        if pattern.content_subtype != WILDCARD && pattern.content_subtype != self.content_subtype
        {
            return false;
        }

        pattern.parameters.iter().all(|(name, value)| {
            if name == WILDCARD {
                value == WILDCARD
                    || self
                        .parameters
                        .iter()
                        .any(|(_, own)| own.eq_ignore_ascii_case(value))
            } else {
                match self.parameter(name) {
                    Some(own) => value == WILDCARD || own.eq_ignore_ascii_case(value),
                    None => false,
                }
            }
        })
    }

    fn wildcard_count(&self) -> u8 {
        u8::from(self.content_type == WILDCARD) + u8::from(self.content_subtype == WILDCARD)
    }
}

impl FromStr for ContentType {
    type Err = HeaderError;

    fn from_str(text: &str) -> HeaderResult<Self> {
        Self::parse(text)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.content_type, self.content_subtype)?;
        for (name, value) in &self.parameters {
            write!(f, "; {name}={value}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContentTypeCandidate {
    pub content_type: ContentType,
    pub quality: Quality,
}

/// Parses an `Accept`-style header into content types ordered by quality,
/// then by specificity (fewer wildcards, then more parameters first).
pub fn parse_and_sort_content_types(text: Option<&str>) -> HeaderResult<Vec<ContentTypeCandidate>> {
    let mut candidates = Vec::new();
    for item in parse_header_value(text) {
        let mut content_type = ContentType::parse(&item.value)?;
        for (name, value) in &item.params {
            content_type = content_type.with_parameter(name, value);
        }
        candidates.push(ContentTypeCandidate {
            content_type,
            quality: item.quality,
        });
    }

    candidates.sort_by(|a, b| {
        b.quality
            .total_cmp(&a.quality)
            .then_with(|| {
                a.content_type
                    .wildcard_count()
                    .cmp(&b.content_type.wildcard_count())
            })
            .then_with(|| {
                b.content_type
                    .parameters
                    .len()
                    .cmp(&a.content_type.parameters.len())
            })
    });
    Ok(candidates)
}

fn is_token(text: &str) -> bool {
    text.bytes().all(|b| {
        b.is_ascii_alphanumeric()
            || matches!(
                b,
                b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.' | b'^' | b'_'
                    | b'`' | b'|' | b'~'
            )
    })
}

fn malformed(value: &str, reason: &'static str) -> HeaderError {
    HeaderError::MalformedContentType {
        value: value.to_string(),
        reason,
    }
}
