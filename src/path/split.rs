use crate::path::{PathError, PathResult};
use smallvec::SmallVec;

pub const DEFAULT_MAX_SEGMENTS: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitOptions {
    pub decode_percent: bool,
    pub max_segments: usize,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            decode_percent: false,
            max_segments: DEFAULT_MAX_SEGMENTS,
        }
    }
}

/// Request path broken into its non-empty segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestPath {
    pub segments: SmallVec<[String; 8]>,
    pub trailing_slash: bool,
}

impl RequestPath {
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

#[tracing::instrument(level = "trace", skip(path, options), fields(path_len=path.len() as u64))]
pub fn split_request_path(path: &str, options: &SplitOptions) -> PathResult<RequestPath> {
    if path.is_empty() {
        return Err(PathError::Empty);
    }

    let bytes = path.as_bytes();
    let mut segments: SmallVec<[String; 8]> = SmallVec::new();
    let mut start = 0usize;

    while start <= bytes.len() {
        let end = memchr::memchr(b'/', &bytes[start..]).map_or(bytes.len(), |pos| start + pos);
        let raw = &path[start..end];

        if !raw.is_empty() {
            validate_bytes(raw.as_bytes(), path)?;

            let segment = if options.decode_percent && raw.contains('%') {
                let decoded = decode_percent(raw).map_err(|index| {
                    PathError::InvalidPercentEncoding {
                        input: path.to_string(),
                        index: start + index,
                    }
                })?;
                validate_bytes(&decoded, path)?;
                String::from_utf8(decoded).map_err(|_| PathError::InvalidUtf8AfterDecoding {
                    input: path.to_string(),
                })?
            } else {
                raw.to_string()
            };

            if segments.len() == options.max_segments {
                return Err(PathError::TooManySegments {
                    input: path.to_string(),
                    limit: options.max_segments,
                });
            }
            segments.push(segment);
        }

        start = end + 1;
    }

    let trailing_slash = !segments.is_empty() && path.ends_with('/');

    Ok(RequestPath {
        segments,
        trailing_slash,
    })
}

fn validate_bytes(bytes: &[u8], original: &str) -> PathResult<()> {
    match bytes.iter().find(|&&byte| byte < 0x20 || byte == 0x7f) {
        Some(&byte) => Err(PathError::ControlCharacter {
            input: original.to_string(),
            byte,
        }),
        None => Ok(()),
    }
}

/// Decodes `%XX` escapes. On failure returns the byte index of the bad escape.
pub fn decode_percent(input: &str) -> Result<Vec<u8>, usize> {
    let bytes = input.as_bytes();
    let mut output = Vec::with_capacity(bytes.len());
    let mut idx = 0usize;

    while idx < bytes.len() {
        if bytes[idx] == b'%' {
            if idx + 2 >= bytes.len() {
                return Err(idx);
            }
            let value = decode_hex_pair(bytes[idx + 1], bytes[idx + 2]).ok_or(idx)?;
            output.push(value);
            idx += 3;
            continue;
        }
        output.push(bytes[idx]);
        idx += 1;
    }

    Ok(output)
}

fn decode_hex_pair(hi: u8, lo: u8) -> Option<u8> {
    fn val(byte: u8) -> Option<u8> {
        match byte {
            b'0'..=b'9' => Some(byte - b'0'),
            b'a'..=b'f' => Some(byte - b'a' + 10),
            b'A'..=b'F' => Some(byte - b'A' + 10),
            _ => None,
        }
    }

    Some(val(hi)? << 4 | val(lo)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(path: &str) -> RequestPath {
        split_request_path(path, &SplitOptions::default()).unwrap()
    }

    #[test]
    fn splits_segments_and_drops_empty_pieces() {
        let path = split("//users//42");
        assert_eq!(path.segments.as_slice(), ["users", "42"]);
        assert!(!path.trailing_slash);
    }

    #[test]
    fn records_trailing_slash() {
        let path = split("/users/");
        assert_eq!(path.segments.as_slice(), ["users"]);
        assert!(path.trailing_slash);
    }

    #[test]
    fn root_path_has_no_segments_and_no_trailing_slash() {
        let path = split("/");
        assert!(path.is_empty());
        assert!(!path.trailing_slash);
    }

    #[test]
    fn percent_decoding_is_optional() {
        assert_eq!(split("/caf%C3%A9").segments.as_slice(), ["caf%C3%A9"]);

        let options = SplitOptions {
            decode_percent: true,
            ..Default::default()
        };
        let path = split_request_path("/caf%C3%A9", &options).unwrap();
        assert_eq!(path.segments.as_slice(), ["café"]);
    }

    #[test]
    fn rejects_truncated_escape() {
        let options = SplitOptions {
            decode_percent: true,
            ..Default::default()
        };
        let err = split_request_path("/a/b%4", &options).unwrap_err();
        match err {
            PathError::InvalidPercentEncoding { index, .. } => assert_eq!(index, 4),
            other => panic!("expected InvalidPercentEncoding, got {other:?}"),
        }
    }

    #[test]
    fn rejects_control_bytes_after_decoding() {
        let options = SplitOptions {
            decode_percent: true,
            ..Default::default()
        };
        let err = split_request_path("/foo%00bar", &options).unwrap_err();
        match err {
            PathError::ControlCharacter { byte, .. } => assert_eq!(byte, 0),
            other => panic!("expected ControlCharacter, got {other:?}"),
        }
    }

    #[test]
    fn keeps_spaces_inside_segments() {
        assert_eq!(
            split("/files/my file.txt").segments.as_slice(),
            ["files", "my file.txt"]
        );

        let options = SplitOptions {
            decode_percent: true,
            ..Default::default()
        };
        let path = split_request_path("/files/my%20file.txt", &options).unwrap();
        assert_eq!(path.segments.as_slice(), ["files", "my file.txt"]);
    }

    #[test]
    fn rejects_delete_byte() {
        let err = split_request_path("/a\u{7f}b", &SplitOptions::default()).unwrap_err();
        match err {
            PathError::ControlCharacter { byte, .. } => assert_eq!(byte, 0x7f),
            other => panic!("expected ControlCharacter, got {other:?}"),
        }
    }

    #[test]
    fn enforces_segment_limit() {
        let options = SplitOptions {
            max_segments: 2,
            ..Default::default()
        };
        let err = split_request_path("/a/b/c", &options).unwrap_err();
        assert_eq!(
            err,
            PathError::TooManySegments {
                input: "/a/b/c".to_string(),
                limit: 2
            }
        );
    }
}
