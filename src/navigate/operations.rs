//! Path parsing, working-directory resolution and qualification
//!
//! `scheme://a/b`, `scheme:///a/b` and `scheme:/a/b` all name the same path
//! `/a/b`: the authority, when present, is the first segment. Qualified
//! paths are always rendered in the authority form `scheme://a/b`.

use crate::error::FsError;
use crate::navigate::path::FsPath;

/// Input split into its path part, after any `scheme:` and authority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPath {
    pub absolute: bool,
    pub segments: Vec<String>,
}

/// Parses a path string, with or without a `scheme:` prefix.
pub fn parse_uri(scheme: &str, input: &str) -> Result<ParsedPath, FsError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(FsError::InvalidPath("Empty path provided".into()));
    }
    if trimmed.contains('\0') {
        return Err(FsError::InvalidPath(format!("NUL byte in path: {:?}", trimmed)));
    }

    let rest = match split_scheme(trimmed) {
        Some((found, rest)) if found.eq_ignore_ascii_case(scheme) => rest,
        Some((found, _)) => {
            return Err(FsError::InvalidPath(format!(
                "Wrong scheme '{}' in {}, expected '{}'",
                found, trimmed, scheme
            )));
        }
        None => {
            return Ok(ParsedPath {
                absolute: trimmed.starts_with('/'),
                segments: split_segments(trimmed),
            });
        }
    };

    // A scheme-qualified path is always absolute.
    let segments = match rest.strip_prefix("//") {
        Some(after) => {
            let (authority, path) = after.split_once('/').unwrap_or((after, ""));
            let mut segments = Vec::new();
            if !authority.is_empty() {
                segments.push(authority.to_string());
            }
            segments.extend(split_segments(path));
            segments
        }
        None => split_segments(rest),
    };

    Ok(ParsedPath {
        absolute: true,
        segments,
    })
}

/// Resolves `input` against the working directory and normalizes `.` and
/// `..` segments.
pub fn resolve_path(working_dir: &FsPath, scheme: &str, input: &str) -> Result<FsPath, FsError> {
    let parsed = parse_uri(scheme, input)?;

    let mut resolved: Vec<String> = if parsed.absolute {
        Vec::new()
    } else {
        working_dir.segments().to_vec()
    };

    for segment in parsed.segments {
        match segment.as_str() {
            "." => {}
            ".." => {
                if resolved.pop().is_none() {
                    return Err(FsError::InvalidPath(format!(
                        "{} escapes the filesystem root",
                        input
                    )));
                }
            }
            _ => resolved.push(segment),
        }
    }

    Ok(FsPath::from_segments(resolved))
}

/// Canonical URI for a path: `scheme://first/rest`, or `scheme:///` for
/// the root.
pub fn qualify(scheme: &str, path: &FsPath) -> String {
    if path.is_root() {
        format!("{}:///", scheme)
    } else {
        format!("{}://{}", scheme, path.object_key())
    }
}

fn split_scheme(input: &str) -> Option<(&str, &str)> {
    let (candidate, rest) = input.split_once(':')?;
    let valid = !candidate.is_empty()
        && candidate.starts_with(|c: char| c.is_ascii_alphabetic())
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if valid && !candidate.contains('/') {
        Some((candidate, rest))
    } else {
        None
    }
}

fn split_segments(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abs(path: &str) -> FsPath {
        resolve_path(&FsPath::root(), "gs", path).unwrap()
    }

    #[test]
    fn test_authority_forms_are_equivalent() {
        let expected = FsPath::from_segments(["test", "existingDir"]);
        assert_eq!(abs("gs://test/existingDir"), expected);
        assert_eq!(abs("gs:///test/existingDir"), expected);
        assert_eq!(abs("gs:/test/existingDir"), expected);
        assert_eq!(abs("/test/existingDir"), expected);
    }

    #[test]
    fn test_qualify_uses_authority_form() {
        assert_eq!(qualify("gs", &abs("gs:/test/existingDir")), "gs://test/existingDir");
        assert_eq!(qualify("gs", &FsPath::root()), "gs:///");
        assert_eq!(abs(&qualify("gs", &FsPath::root())), FsPath::root());
    }

    #[test]
    fn test_relative_resolution() {
        let cwd = FsPath::from_segments(["test", "hadoop"]);
        assert_eq!(
            resolve_path(&cwd, "gs", "existingDir").unwrap().to_string(),
            "/test/hadoop/existingDir"
        );
        assert_eq!(resolve_path(&cwd, "gs", "..").unwrap().to_string(), "/test");
        assert_eq!(resolve_path(&cwd, "gs", "./a/../b").unwrap().to_string(), "/test/hadoop/b");
        assert_eq!(resolve_path(&cwd, "gs", "/other").unwrap().to_string(), "/other");
    }

    #[test]
    fn test_invalid_paths() {
        assert!(matches!(
            resolve_path(&FsPath::root(), "gs", ""),
            Err(FsError::InvalidPath(_))
        ));
        assert!(matches!(
            resolve_path(&FsPath::root(), "gs", "/.."),
            Err(FsError::InvalidPath(_))
        ));
        assert!(matches!(
            resolve_path(&FsPath::root(), "gs", "s3://bucket/key"),
            Err(FsError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_colon_inside_segment_is_not_a_scheme() {
        let path = resolve_path(&FsPath::root(), "gs", "/logs/12:00").unwrap();
        assert_eq!(path.segments(), &["logs".to_string(), "12:00".to_string()]);
    }
}
