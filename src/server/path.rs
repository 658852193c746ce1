//! Request path to filesystem path mapping.

use std::path::PathBuf;

/// Maps request paths onto the document root.
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: String,
    default_document: String,
}

impl PathResolver {
    pub fn new(root: impl Into<String>, default_document: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            default_document: default_document.into(),
        }
    }

    /// Resolve a request path to its target file.
    ///
    /// The result is the document root followed by the request path, byte for byte.
    /// A path ending in `/` gets the default document appended. Nothing is decoded
    /// or normalized, so `..` segments reach the filesystem unchanged; callers that
    /// need containment check [`PathResolver::escapes_root`] first.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let capacity = self.root.len() + path.len() + self.default_document.len();
        let mut target = String::with_capacity(capacity);
        target.push_str(&self.root);
        target.push_str(path);
        if path.ends_with('/') {
            target.push_str(&self.default_document);
        }
        PathBuf::from(target)
    }

    /// Whether the request path has a `..` segment.
    pub fn escapes_root(path: &str) -> bool {
        path.split(['/', '\\']).any(|segment| segment == "..")
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    fn resolver() -> PathResolver {
        PathResolver::new("public", "index.html")
    }

    #[test]
    fn test_plain_path_is_concatenated() {
        assert_eq!(resolver().resolve("/style.css"), Path::new("public/style.css"));
        assert_eq!(resolver().resolve("/a/b/c.js"), Path::new("public/a/b/c.js"));
    }

    #[test]
    fn test_trailing_separator_gets_default_document() {
        assert_eq!(resolver().resolve("/"), Path::new("public/index.html"));
        assert_eq!(resolver().resolve("/subdir/"), Path::new("public/subdir/index.html"));
    }

    #[test]
    fn test_no_normalization() {
        // Path equality is per component, so compare the raw strings.
        assert_eq!(resolver().resolve("//x").to_str(), Some("public//x"));
        assert_eq!(resolver().resolve("/./x").to_str(), Some("public/./x"));
        assert_eq!(resolver().resolve("/a%20b").to_str(), Some("public/a%20b"));
        assert_eq!(resolver().resolve("/../secret").to_str(), Some("public/../secret"));
        assert_eq!(resolver().resolve("noslash").to_str(), Some("publicnoslash"));
    }

    #[test]
    fn test_directory_without_separator_is_literal() {
        assert_eq!(resolver().resolve("/subdir").to_str(), Some("public/subdir"));
    }

    #[test]
    fn test_escapes_root() {
        assert!(PathResolver::escapes_root("/../etc/passwd"));
        assert!(PathResolver::escapes_root("/a/.."));
        assert!(PathResolver::escapes_root("/a\\..\\b"));
        assert!(!PathResolver::escapes_root("/a/..b/c"));
        assert!(!PathResolver::escapes_root("/index.html"));
        assert!(!PathResolver::escapes_root("/"));
    }
}
