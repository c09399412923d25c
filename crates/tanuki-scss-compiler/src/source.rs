use crate::{Error, Result};
use glob::{MatchOptions, Pattern};
use std::{
    ffi::OsStr,
    fs,
    path::{Component, Path, PathBuf},
};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

fn is_partial(path: &Path) -> bool {
    path.file_name()
        .and_then(OsStr::to_str)
        .is_some_and(|name| name.starts_with('_'))
}

/// Set of stylesheet sources described by a base directory and a glob relative to it
#[derive(Clone, Debug)]
pub struct SourceSet {
    /// Base directory without `.` components, empty for the working directory.
    /// `glob` strips those from the paths it yields, so prefixes have to be compared in this form.
    base: PathBuf,
    pattern: Pattern,
    skip_partials: bool,
}

impl SourceSet {
    pub fn new<P>(base: P, pattern: &str, skip_partials: bool) -> Result<Self>
    where
        P: Into<PathBuf>,
    {
        let base = base
            .into()
            .components()
            .filter(|component| !matches!(component, Component::CurDir))
            .collect();

        Ok(Self {
            base,
            pattern: Pattern::new(pattern)?,
            skip_partials,
        })
    }

    #[must_use]
    pub fn base(&self) -> &Path {
        if self.base.as_os_str().is_empty() {
            Path::new(".")
        } else {
            &self.base
        }
    }

    /// Find every file that should be compiled, sorted by path.
    ///
    /// Partials are left out when `skip_partials` is set, they only get pulled in through imports.
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        let base = self
            .base
            .to_str()
            .ok_or_else(|| Error::NonUtf8Path(self.base.clone()))?;
        if !self.base().is_dir() {
            return Err(Error::MissingSourceDir(self.base().to_path_buf()));
        }

        let pattern = if base.is_empty() {
            self.pattern.as_str().to_owned()
        } else {
            format!("{}/{}", Pattern::escape(base), self.pattern.as_str())
        };

        let mut sources = Vec::new();
        for entry in glob::glob_with(&pattern, MATCH_OPTIONS)? {
            let path = entry?;
            if !path.is_file() || (self.skip_partials && is_partial(&path)) {
                continue;
            }

            sources.push(path);
        }
        sources.sort();

        Ok(sources)
    }

    /// Path of `path` relative to the base directory.
    ///
    /// Accepts paths relative to the working directory as well as absolute ones (which is what the file watcher hands out).
    #[must_use]
    pub fn relative(&self, path: &Path) -> Option<PathBuf> {
        // An empty base is a prefix of absolute paths too
        let comparable = path.is_relative() || !self.base.as_os_str().is_empty();
        if let Some(relative) = comparable
            .then(|| path.strip_prefix(&self.base).ok())
            .flatten()
        {
            return Some(relative.to_path_buf());
        }

        let base = fs::canonicalize(self.base()).ok()?;
        path.strip_prefix(base).ok().map(Path::to_path_buf)
    }

    /// Whether a change to `path` affects the output.
    ///
    /// Unlike [`SourceSet::discover`] this includes partials.
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        self.relative(path)
            .is_some_and(|relative| self.pattern.matches_path_with(&relative, MATCH_OPTIONS))
    }
}
