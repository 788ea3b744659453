//! Source loading utilities
//!
//! This module provides [`SourceLoader`] - it finds the files named by the entry point,
//! `Include:` and `Embed:`, reads them, and remembers which Metaphor sources have already
//! been consumed during one parse.
//!
//! # Resolution
//!
//! A name is tried as given (relative to the working directory) and then joined onto each
//! search path in order. The first existing candidate wins.
//!
//! # Reuse detection
//!
//! Every Metaphor source is canonicalized before it is read, and a canonical path can only
//! be loaded once per loader. This rejects both direct and transitive include cycles, as
//! well as a plain second include of the same file. Embedded files are leaves and are not
//! tracked.

use glob::{MatchOptions, Pattern};
use log::{debug, warn};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading sources
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("File not found: {0}")]
    NotFound(String),
    #[error("You do not have permission to access: {0}")]
    PermissionDenied(String),
    #[error("Is a directory: {0}")]
    IsDirectory(String),
    #[error("The file '{0}' has already been used")]
    AlreadyUsed(String),
    #[error("Invalid wildcard pattern '{pattern}' for 'Embed': {message}")]
    BadPattern { pattern: String, message: String },
    #[error("OS error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl LoadError {
    /// Whether parsing has to stop. Only a malformed glob pattern is recoverable.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, LoadError::BadPattern { .. })
    }

    fn from_io(name: &str, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound(name.to_string()),
            io::ErrorKind::PermissionDenied => LoadError::PermissionDenied(name.to_string()),
            _ => LoadError::Io {
                path: name.to_string(),
                source: err,
            },
        }
    }
}

/// A file that has been found and read.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// The path the file was found at, as it should be shown to users.
    pub name: String,
    /// Canonical absolute path.
    pub canonical: PathBuf,
    pub contents: String,
}

#[derive(Debug, Clone, Default)]
pub struct SourceLoader {
    search_paths: Vec<PathBuf>,
    seen: HashSet<PathBuf>,
}

impl SourceLoader {
    pub fn new<I, P>(search_paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            search_paths: search_paths
                .into_iter()
                .map(|p| p.as_ref().to_path_buf())
                .collect(),
            seen: HashSet::new(),
        }
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Has this canonical path already been loaded?
    pub fn has_seen(&self, canonical: &Path) -> bool {
        self.seen.contains(canonical)
    }

    /// Candidate locations for `name`, in the order they are tried.
    pub fn candidates(&self, name: &str) -> Vec<PathBuf> {
        let path = Path::new(name);
        let mut candidates = vec![path.to_path_buf()];
        if path.is_relative() {
            candidates.extend(self.search_paths.iter().map(|dir| dir.join(path)));
        }
        candidates
    }

    /// Find `name` without reading it.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, LoadError> {
        self.candidates(name)
            .into_iter()
            .find(|candidate| candidate.exists())
            .ok_or_else(|| LoadError::NotFound(name.to_string()))
    }

    /// Find, cycle-check and read a Metaphor source.
    pub fn load_source(&mut self, name: &str) -> Result<SourceFile, LoadError> {
        let path = self.resolve(name)?;
        if path.is_dir() {
            return Err(LoadError::IsDirectory(name.to_string()));
        }

        let canonical = fs::canonicalize(&path).map_err(|e| LoadError::from_io(name, e))?;
        if !self.seen.insert(canonical.clone()) {
            return Err(LoadError::AlreadyUsed(name.to_string()));
        }

        let contents = fs::read_to_string(&path).map_err(|e| LoadError::from_io(name, e))?;
        debug!("loaded {} ({})", path.display(), canonical.display());

        Ok(SourceFile {
            name: path.to_string_lossy().into_owned(),
            canonical,
            contents,
        })
    }

    /// Read a file matched by `Embed:`. Not cycle-checked; invalid UTF-8 is replaced.
    pub fn load_embedded(&self, path: &Path) -> Result<SourceFile, LoadError> {
        let name = path.to_string_lossy().into_owned();
        if path.is_dir() {
            return Err(LoadError::IsDirectory(name));
        }

        let bytes = fs::read(path).map_err(|e| LoadError::from_io(&name, e))?;
        let canonical = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        Ok(SourceFile {
            contents: String::from_utf8_lossy(&bytes).into_owned(),
            name,
            canonical,
        })
    }

    /// Expand an `Embed:` wildcard.
    ///
    /// Relative patterns are expanded against the working directory first and then against
    /// each search path, stopping at the first location that matches anything. Only regular
    /// files are returned, in the order the glob walk yields them.
    pub fn expand_glob(&self, pattern: &str) -> Result<Vec<PathBuf>, LoadError> {
        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: true,
        };

        let glob_pattern = wildcard_pattern(pattern);
        let mut candidates = vec![glob_pattern.clone()];
        if Path::new(pattern).is_relative() {
            for dir in &self.search_paths {
                let escaped = Pattern::escape(&dir.to_string_lossy());
                candidates.push(format!("{}/{}", escaped.trim_end_matches('/'), glob_pattern));
            }
        }

        for candidate in candidates {
            let paths = glob::glob_with(&candidate, options).map_err(|e| LoadError::BadPattern {
                pattern: pattern.to_string(),
                message: e.msg.to_string(),
            })?;

            let mut matches = Vec::new();
            for entry in paths {
                match entry {
                    Ok(path) if path.is_file() => matches.push(path),
                    Ok(_) => {}
                    Err(e) => warn!("skipping unreadable match for '{}': {}", pattern, e),
                }
            }

            if !matches.is_empty() {
                debug!("'{}' matched {} file(s) via '{}'", pattern, matches.len(), candidate);
                return Ok(matches);
            }
        }

        Ok(Vec::new())
    }
}

/// Only a `**/` segment walks directories. Anywhere else a run of `*` is a plain `*`.
fn wildcard_pattern(pattern: &str) -> String {
    if pattern.contains("**/") {
        return pattern.to_string();
    }

    let mut collapsed = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if c == '*' && collapsed.ends_with('*') {
            continue;
        }
        collapsed.push(c);
    }
    collapsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_prefers_given_path_then_search_paths() {
        let dir = tempdir().expect("tempdir");
        let includes = dir.path().join("includes");
        fs::create_dir(&includes).expect("mkdir");
        fs::write(includes.join("part.m6r"), "Role:\n").expect("write");

        let loader = SourceLoader::new([&includes]);
        assert_eq!(
            loader.resolve("part.m6r").expect("resolves"),
            includes.join("part.m6r")
        );
        assert!(matches!(
            loader.resolve("missing.m6r"),
            Err(LoadError::NotFound(name)) if name == "missing.m6r"
        ));
    }

    #[test]
    fn test_second_load_is_rejected() {
        let dir = tempdir().expect("tempdir");
        let file = dir.path().join("main.m6r");
        fs::write(&file, "Role:\n").expect("write");
        let name = file.to_string_lossy().into_owned();

        let mut loader = SourceLoader::new(Vec::<PathBuf>::new());
        let source = loader.load_source(&name).expect("first load");
        assert_eq!(source.contents, "Role:\n");
        assert!(loader.has_seen(&source.canonical));

        let err = loader.load_source(&name).expect_err("second load");
        assert!(matches!(err, LoadError::AlreadyUsed(_)));
        assert!(err.is_fatal());
        assert!(err.to_string().contains("has already been used"));
    }

    #[test]
    fn test_directory_is_rejected() {
        let dir = tempdir().expect("tempdir");
        let name = dir.path().to_string_lossy().into_owned();
        let mut loader = SourceLoader::default();
        assert!(matches!(
            loader.load_source(&name),
            Err(LoadError::IsDirectory(_))
        ));
    }

    #[test]
    fn test_expand_glob_through_search_path() {
        let dir = tempdir().expect("tempdir");
        fs::write(dir.path().join("test2.txt"), "Content 2").expect("write");
        fs::write(dir.path().join("test1.txt"), "Content 1").expect("write");
        fs::write(dir.path().join("other.md"), "no").expect("write");

        let loader = SourceLoader::new([dir.path()]);
        let matches = loader.expand_glob("test*.txt").expect("valid pattern");
        let names: Vec<_> = matches
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["test1.txt", "test2.txt"]);
    }

    #[test]
    fn test_expand_glob_recursive() {
        let dir = tempdir().expect("tempdir");
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).expect("mkdir");
        fs::write(nested.join("deep.c"), "int x;").expect("write");
        fs::write(dir.path().join("top.c"), "int y;").expect("write");

        let pattern = format!("{}/**/*.c", dir.path().display());
        let matches = SourceLoader::default()
            .expand_glob(&pattern)
            .expect("valid pattern");
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn test_expand_glob_reports_bad_pattern() {
        let err = SourceLoader::default()
            .expand_glob("src/a**b/**/*.rs")
            .expect_err("invalid pattern");
        assert!(!err.is_fatal());
        assert!(err
            .to_string()
            .starts_with("Invalid wildcard pattern 'src/a**b/**/*.rs' for 'Embed'"));
    }

    #[test]
    fn test_double_star_without_separator_is_a_single_star() {
        let dir = tempdir().expect("tempdir");
        let d = dir.path().join("d");
        fs::create_dir_all(d.join("sub")).expect("mkdir");
        fs::write(d.join("top.txt"), "top").expect("write");
        fs::write(d.join("a-to-b"), "ab").expect("write");
        fs::write(d.join("sub").join("deep.txt"), "deep").expect("write");

        let loader = SourceLoader::default();
        let mut everything = loader
            .expand_glob(&format!("{}/d/**", dir.path().display()))
            .expect("valid pattern");
        everything.sort();
        assert_eq!(everything, vec![d.join("a-to-b"), d.join("top.txt")]);

        let between = loader
            .expand_glob(&format!("{}/d/a**b", dir.path().display()))
            .expect("valid pattern");
        assert_eq!(between, vec![d.join("a-to-b")]);
    }

    #[test]
    fn test_wildcard_pattern() {
        assert_eq!(wildcard_pattern("docs/**"), "docs/*");
        assert_eq!(wildcard_pattern("src/a***b"), "src/a*b");
        assert_eq!(wildcard_pattern("src/**/*.rs"), "src/**/*.rs");
        assert_eq!(wildcard_pattern("plain.txt"), "plain.txt");
    }

    #[test]
    fn test_expand_glob_without_matches_is_empty() {
        let dir = tempdir().expect("tempdir");
        let loader = SourceLoader::new([dir.path()]);
        assert!(loader
            .expand_glob("nothing-*.none")
            .expect("valid")
            .is_empty());
    }

    #[test]
    fn test_load_embedded_is_lossy() {
        let dir = tempdir().expect("tempdir");
        let file = dir.path().join("blob.bin");
        fs::write(&file, [0x66, 0x6f, 0xff, 0x6f]).expect("write");
        let source = SourceLoader::default()
            .load_embedded(&file)
            .expect("reads");
        assert_eq!(source.contents, "fo\u{fffd}o");
    }
}
