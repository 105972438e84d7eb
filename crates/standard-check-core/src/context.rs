//! Context types for rule execution.

use std::path::{Path, PathBuf};

use crate::model::Span;
use crate::types::Location;

/// Context provided to rules for the file being checked.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Absolute path to the file.
    pub path: &'a Path,
    /// Path relative to the scan root, used in every reported location.
    pub relative_path: PathBuf,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, root: &Path) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);

        Self {
            path,
            relative_path,
        }
    }

    /// Builds a location in this file for a declaration span.
    #[must_use]
    pub fn location(&self, span: Span) -> Location {
        Location::from_span(self.relative_path.clone(), span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path() {
        let ctx = FileContext::new(Path::new("/repo/pkg/mod.py"), Path::new("/repo"));
        assert_eq!(ctx.relative_path, PathBuf::from("pkg/mod.py"));

        let outside = FileContext::new(Path::new("/elsewhere/mod.py"), Path::new("/repo"));
        assert_eq!(outside.relative_path, PathBuf::from("/elsewhere/mod.py"));
    }

    #[test]
    fn test_location_carries_span() {
        let ctx = FileContext::new(Path::new("/repo/mod.py"), Path::new("/repo"));
        let loc = ctx.location(Span::new(4, 5, 42, 8));
        assert_eq!(loc.file, PathBuf::from("mod.py"));
        assert_eq!((loc.line, loc.column, loc.offset, loc.length), (4, 5, 42, 8));
    }
}
