//! Absolute filesystem paths over a flat object namespace

use std::fmt;

/// An absolute path as an ordered list of segments. The root has none.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct FsPath {
    segments: Vec<String>,
}

impl FsPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Build from already-normalized segments. Empty segments are dropped.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments
                .into_iter()
                .map(Into::<String>::into)
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Last segment, `None` for the root
    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    pub fn parent(&self) -> Option<FsPath> {
        if self.is_root() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    pub fn child(&self, name: &str) -> FsPath {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Self { segments }
    }

    /// Proper non-root prefixes, from the root-adjacent one down to the
    /// immediate parent.
    pub fn ancestors(&self) -> impl Iterator<Item = FsPath> + '_ {
        (1..self.segments.len()).map(move |len| Self {
            segments: self.segments[..len].to_vec(),
        })
    }

    /// Whether `self` is `other` or lies beneath it
    pub fn starts_with(&self, other: &FsPath) -> bool {
        self.segments.starts_with(&other.segments)
    }

    /// Key of the object holding this path's file contents ("a/b")
    pub fn object_key(&self) -> String {
        self.segments.join("/")
    }

    /// Key of the directory marker and listing prefix ("a/b/"); empty for
    /// the root.
    pub fn marker_key(&self) -> String {
        if self.is_root() {
            String::new()
        } else {
            format!("{}/", self.object_key())
        }
    }
}

impl fmt::Display for FsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.segments.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root() {
        let root = FsPath::root();
        assert!(root.is_root());
        assert_eq!(root.to_string(), "/");
        assert_eq!(root.parent(), None);
        assert_eq!(root.marker_key(), "");
        assert_eq!(root.ancestors().count(), 0);
    }

    #[test]
    fn test_ancestors_exclude_root_and_self() {
        let path = FsPath::from_segments(["test", "hadoop", "file", "subdir"]);
        let ancestors: Vec<String> = path.ancestors().map(|p| p.to_string()).collect();
        assert_eq!(ancestors, vec!["/test", "/test/hadoop", "/test/hadoop/file"]);
    }

    #[test]
    fn test_keys_and_navigation() {
        let path = FsPath::from_segments(["bucket", "dir", "obj"]);
        assert_eq!(path.object_key(), "bucket/dir/obj");
        assert_eq!(path.marker_key(), "bucket/dir/obj/");
        assert_eq!(path.name(), Some("obj"));
        assert_eq!(path.parent().unwrap().to_string(), "/bucket/dir");
        assert_eq!(path.parent().unwrap().child("other").to_string(), "/bucket/dir/other");
        assert!(path.starts_with(&FsPath::from_segments(["bucket"])));
        assert!(!path.starts_with(&FsPath::from_segments(["buck"])));
    }
}
