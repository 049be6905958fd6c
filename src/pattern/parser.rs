use super::{PathSegmentDescriptor, PatternError, PatternResult, RoutingPath};

const TAILCARD_MARKER: &str = "...";
const OPTIONAL_MARKER: char = '?';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterModifier {
    Required,
    Optional,
    Tailcard,
}

/// Decomposed `prefix{name[?|...][:constraint]}suffix` segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    pub prefix: String,
    pub name: String,
    pub suffix: String,
    pub modifier: ParameterModifier,
    pub constraint: Option<String>,
}

#[tracing::instrument(level = "trace", fields(pattern=%pattern))]
pub fn parse_path(pattern: &str) -> PatternResult<RoutingPath> {
    let mut segments = Vec::new();
    for piece in pattern.split('/') {
        if piece.is_empty() {
            continue;
        }
        segments.push(classify_segment(piece)?);
    }

    let has_trailing_slash = !segments.is_empty() && pattern.ends_with('/');

    Ok(RoutingPath {
        segments,
        has_trailing_slash,
    })
}

fn classify_segment(piece: &str) -> PatternResult<PathSegmentDescriptor> {
    if piece == "*" {
        return Ok(PathSegmentDescriptor::wildcard());
    }

    let mut scanner = SegmentScanner::new(piece);
    let mut literal = String::new();
    let mut groups = 0usize;
    let mut depth = 0usize;

    while let Some(ch) = scanner.peek() {
        if scanner.is_escape_char(ch) {
            let escaped = scanner.consume_escape_char()?;
            if depth == 0 {
                literal.push(escaped);
            }
            continue;
        }
        scanner.next();
        match ch {
            '{' => {
                if depth == 0 {
                    groups += 1;
                    if groups > 1 {
                        return Err(PatternError::MultipleParameters {
                            segment: piece.to_string(),
                        });
                    }
                }
                depth += 1;
            }
            '}' => {
                if depth == 0 {
                    return Err(PatternError::UnbalancedBraces {
                        segment: piece.to_string(),
                    });
                }
                depth -= 1;
            }
            _ if depth == 0 => literal.push(ch),
            _ => {}
        }
    }

    if depth != 0 {
        return Err(PatternError::UnbalancedBraces {
            segment: piece.to_string(),
        });
    }

    if groups == 0 {
        Ok(PathSegmentDescriptor::constant(literal))
    } else {
        Ok(PathSegmentDescriptor::parameter(piece))
    }
}

pub fn parse_parameter(segment: &str) -> PatternResult<ParameterSpec> {
    let mut scanner = SegmentScanner::new(segment);

    let prefix = scanner.read_literal_until_brace()?;
    if scanner.peek() != Some('{') {
        return Err(PatternError::ParameterMissingName {
            segment: segment.to_string(),
        });
    }
    scanner.expect('{');
    let body = scanner.read_group_body()?;
    let suffix = scanner.read_literal_until_brace()?;
    match scanner.peek() {
        Some('{') => {
            return Err(PatternError::MultipleParameters {
                segment: segment.to_string(),
            });
        }
        Some(_) => {
            return Err(PatternError::UnbalancedBraces {
                segment: segment.to_string(),
            });
        }
        None => {}
    }

    let (head, constraint) = match body.split_once(':') {
        Some((head, constraint)) => (head, Some(constraint.to_string())),
        None => (body.as_str(), None),
    };

    let (name, modifier) = if let Some(name) = head.strip_suffix(TAILCARD_MARKER) {
        (name, ParameterModifier::Tailcard)
    } else if let Some(name) = head.strip_suffix(OPTIONAL_MARKER) {
        (name, ParameterModifier::Optional)
    } else {
        (head, ParameterModifier::Required)
    };

    if modifier == ParameterModifier::Tailcard {
        if !suffix.is_empty() {
            return Err(PatternError::TailcardWithSuffix {
                segment: segment.to_string(),
                suffix,
            });
        }
        if constraint.is_some() {
            return Err(PatternError::ConstraintOnTailcard {
                segment: segment.to_string(),
            });
        }
        if prefix.contains('/') {
            return Err(PatternError::TailcardPrefixContainsSlash { prefix });
        }
        if !name.is_empty() {
            validate_parameter_name(name, segment)?;
        }
    } else {
        validate_parameter_name(name, segment)?;
    }

    if constraint.as_deref() == Some("") {
        return Err(PatternError::InvalidConstraint {
            name: name.to_string(),
            constraint: String::new(),
            error: "constraint is empty".to_string(),
        });
    }

    Ok(ParameterSpec {
        prefix,
        name: name.to_string(),
        suffix,
        modifier,
        constraint,
    })
}

pub(crate) fn validate_parameter_name(name: &str, segment: &str) -> PatternResult<()> {
    let bytes = name.as_bytes();
    let Some(&first) = bytes.first() else {
        return Err(PatternError::ParameterMissingName {
            segment: segment.to_string(),
        });
    };

    if !(first.is_ascii_alphabetic() || first == b'_') {
        return Err(PatternError::ParameterInvalidStart {
            segment: segment.to_string(),
            name: name.to_string(),
            found: first as char,
        });
    }

    for &c in &bytes[1..] {
        if !(c.is_ascii_alphanumeric() || c == b'_' || c == b'-') {
            return Err(PatternError::ParameterInvalidCharacter {
                segment: segment.to_string(),
                name: name.to_string(),
                invalid: c as char,
            });
        }
    }
    Ok(())
}

struct SegmentScanner<'a> {
    segment: &'a str,
    chars: Vec<(usize, char)>,
    index: usize,
}

impl<'a> SegmentScanner<'a> {
    fn new(segment: &'a str) -> Self {
        Self {
            segment,
            chars: segment.char_indices().collect(),
            index: 0,
        }
    }

    fn read_literal_until_brace(&mut self) -> PatternResult<String> {
        let mut literal = String::new();
        while let Some(ch) = self.peek() {
            match ch {
                '{' | '}' => break,
                _ if self.is_escape_char(ch) => literal.push(self.consume_escape_char()?),
                _ => {
                    literal.push(ch);
                    self.next();
                }
            }
        }
        Ok(literal)
    }

    // Escapes inside the braces are kept verbatim so constraints see them.
    fn read_group_body(&mut self) -> PatternResult<String> {
        let mut body = String::new();
        let mut depth = 1usize;
        while let Some(ch) = self.peek() {
            if self.is_escape_char(ch) {
                let escaped = self.consume_escape_char()?;
                body.push('\\');
                body.push(escaped);
                continue;
            }
            self.next();
            match ch {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(body);
                    }
                }
                _ => {}
            }
            body.push(ch);
        }

        Err(PatternError::UnbalancedBraces {
            segment: self.segment.to_string(),
        })
    }

    fn expect(&mut self, expected: char) {
        let actual = self.next();
        debug_assert_eq!(Some(expected), actual);
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.index).map(|(_, ch)| *ch)
    }

    fn next(&mut self) -> Option<char> {
        let ch = self.peek();
        if ch.is_some() {
            self.index += 1;
        }
        ch
    }

    fn current_byte_index(&self) -> usize {
        self.chars
            .get(self.index)
            .map(|(idx, _)| *idx)
            .unwrap_or(self.segment.len())
    }

    fn is_escape_char(&self, ch: char) -> bool {
        ch == '\\'
    }

    fn consume_escape_char(&mut self) -> PatternResult<char> {
        let escape_index = self.current_byte_index();
        self.next();
        match self.next() {
            Some(ch) => Ok(ch),
            None => Err(PatternError::LoneEscapeCharacter {
                segment: self.segment.to_string(),
                index: escape_index,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::SegmentKind;

    #[test]
    fn classifies_constant_and_parameter_segments() {
        let path = parse_path("/users/{id}/posts/").unwrap();
        assert_eq!(path.segments.len(), 3);
        assert_eq!(path.segments[0], PathSegmentDescriptor::constant("users"));
        assert_eq!(path.segments[1].kind, SegmentKind::Parameter);
        assert_eq!(path.segments[1].value, "{id}");
        assert!(path.has_trailing_slash);
    }

    #[test]
    fn escaped_braces_stay_constant() {
        let path = parse_path(r"/\{literal\}").unwrap();
        assert_eq!(path.segments[0], PathSegmentDescriptor::constant("{literal}"));
    }

    #[test]
    fn nested_braces_inside_constraint_are_one_parameter() {
        let spec = parse_parameter(r"{code:\d{3}}").unwrap();
        assert_eq!(spec.name, "code");
        assert_eq!(spec.constraint.as_deref(), Some(r"\d{3}"));
    }

    #[test]
    fn lone_escape_is_rejected() {
        let err = parse_path("/abc\\").unwrap_err();
        assert_eq!(
            err,
            PatternError::LoneEscapeCharacter {
                segment: "abc\\".to_string(),
                index: 3
            }
        );
    }
}
