use crate::types::Quality;
use smallvec::SmallVec;

const DEFAULT_QUALITY: Quality = 1.0;

/// One comma-separated item of a header, e.g. `text/html;level=1;q=0.8`.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderValue {
    pub value: String,
    pub quality: Quality,
    pub params: SmallVec<[(String, String); 2]>,
}

impl HeaderValue {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Parses a header into its items in wire order.
///
/// Parsing is lenient: a missing or unparsable `q` counts as 1.0 and empty
/// items are skipped.
pub fn parse_header_value(text: Option<&str>) -> Vec<HeaderValue> {
    let Some(text) = text else {
        return Vec::new();
    };

    let mut out = Vec::new();
    for item in split_unquoted(text, b',') {
        let mut parts = split_unquoted(item, b';').into_iter();
        let value = match parts.next() {
            Some(value) => value.trim(),
            None => continue,
        };
        if value.is_empty() {
            continue;
        }

        let mut quality = DEFAULT_QUALITY;
        let mut params: SmallVec<[(String, String); 2]> = SmallVec::new();
        for raw in parts {
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }
            let (name, param_value) = match raw.split_once('=') {
                Some((name, param_value)) => (name.trim(), unquote(param_value.trim())),
                None => (raw, String::new()),
            };
            if name.eq_ignore_ascii_case("q") {
                quality = param_value
                    .parse::<Quality>()
                    .ok()
                    .filter(|q| (0.0..=1.0).contains(q))
                    .unwrap_or(DEFAULT_QUALITY);
                continue;
            }
            params.push((name.to_string(), param_value));
        }

        out.push(HeaderValue {
            value: value.to_string(),
            quality,
            params,
        });
    }
    out
}

/// Parses a header and orders its items by descending quality.
///
/// The sort is stable, so items with equal quality keep their wire order.
pub fn parse_and_sort(text: Option<&str>) -> Vec<HeaderValue> {
    let mut values = parse_header_value(text);
    values.sort_by(|a, b| b.quality.total_cmp(&a.quality));
    values
}

pub(super) fn split_unquoted(text: &str, delimiter: u8) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut pieces = Vec::new();
    let mut start = 0usize;
    let mut cursor = 0usize;
    let mut in_quotes = false;

    while let Some(rel) = memchr::memchr3(delimiter, b'"', b'\\', &bytes[cursor..]) {
        let pos = cursor + rel;
        match bytes[pos] {
            b'\\' if in_quotes => {
                cursor = (pos + 2).min(bytes.len());
                continue;
            }
            b'"' => in_quotes = !in_quotes,
            byte if byte == delimiter && !in_quotes => {
                pieces.push(&text[start..pos]);
                start = pos + 1;
            }
            _ => {}
        }
        cursor = pos + 1;
    }
    pieces.push(&text[start..]);
    pieces
}

fn unquote(value: &str) -> String {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        let inner = &value[1..value.len() - 1];
        let mut out = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(ch) = chars.next() {
            if ch == '\\' {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            } else {
                out.push(ch);
            }
        }
        return out;
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_header_yields_no_candidates() {
        assert!(parse_and_sort(None).is_empty());
        assert!(parse_and_sort(Some("  ,  ")).is_empty());
    }

    #[test]
    fn sorts_by_quality_and_keeps_wire_order_for_ties() {
        let values = parse_and_sort(Some("a;q=0.5, b, c;q=0.9, d"));
        let order: Vec<_> = values.iter().map(|v| v.value.as_str()).collect();
        assert_eq!(order, vec!["b", "d", "c", "a"]);
        assert_eq!(values[2].quality, 0.9);
    }

    #[test]
    fn invalid_quality_falls_back_to_one() {
        let values = parse_header_value(Some("x;q=abc, y;q=7"));
        assert_eq!(values[0].quality, 1.0);
        assert_eq!(values[1].quality, 1.0);
    }

    #[test]
    fn quoted_delimiters_do_not_split_items() {
        let values = parse_header_value(Some(r#"text/plain;note="a,b;c", text/html"#));
        assert_eq!(values.len(), 2);
        assert_eq!(values[0].param("note"), Some("a,b;c"));
        assert_eq!(values[1].value, "text/html");
    }
}
