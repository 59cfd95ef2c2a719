//! Delimited PATH values.
//!
//! A [`PathList`] wraps the raw string exactly as the store returned it, so a
//! value that isn't modified can be written back (or left alone) byte-for-byte.
//! Comparisons go through [`PathSyntax::normalize`].

use serde::Serialize;

/// Separator and comparison rules for a PATH value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PathSyntax {
    /// `;`-separated, case-insensitive, entries may be double-quoted.
    Windows,
    /// `:`-separated, case-sensitive.
    Posix,
}

impl PathSyntax {
    /// Syntax of the platform this binary was built for.
    pub fn native() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Posix
        }
    }

    /// The list separator.
    pub fn separator(&self) -> char {
        match self {
            Self::Windows => ';',
            Self::Posix => ':',
        }
    }

    fn is_dir_separator(&self, c: char) -> bool {
        match self {
            Self::Windows => c == '\\' || c == '/',
            Self::Posix => c == '/',
        }
    }

    /// Comparison key for a single segment.
    ///
    /// Surrounding whitespace and trailing directory separators are ignored
    /// (a bare root such as `/` or `C:\` is kept as-is). On Windows, quotes
    /// are stripped, `/` is treated as `\` and case is folded.
    pub fn normalize(&self, segment: &str) -> String {
        let mut s = segment.trim();
        if *self == Self::Windows {
            s = s.trim_matches('"').trim();
        }

        let trimmed = s.trim_end_matches(|c| self.is_dir_separator(c));
        let s = if trimmed.is_empty() || (*self == Self::Windows && trimmed.ends_with(':')) {
            s
        } else {
            trimmed
        };

        match self {
            Self::Windows => s.replace('/', "\\").to_ascii_lowercase(),
            Self::Posix => s.to_string(),
        }
    }

    /// Whether two segments name the same directory.
    pub fn same_dir(&self, a: &str, b: &str) -> bool {
        self.normalize(a) == self.normalize(b)
    }

    /// Whether `path` is absolute under this syntax.
    ///
    /// Windows accepts drive-rooted (`C:\`) and UNC (`\\server`) paths.
    pub fn is_absolute(&self, path: &str) -> bool {
        match self {
            Self::Windows => {
                let bytes = path.as_bytes();
                let drive_rooted = bytes.len() >= 3
                    && bytes[0].is_ascii_alphabetic()
                    && bytes[1] == b':'
                    && self.is_dir_separator(bytes[2] as char);
                drive_rooted || path.starts_with(r"\\")
            }
            Self::Posix => path.starts_with('/'),
        }
    }

    /// The directory part of `path`, or `None` if it has no separator.
    pub fn parent_dir<'a>(&self, path: &'a str) -> Option<&'a str> {
        let idx = path.rfind(|c| self.is_dir_separator(c))?;
        let parent = &path[..idx];
        if parent.is_empty() || (*self == Self::Windows && parent.ends_with(':')) {
            // Keep the separator of a root: `/` or `C:\`.
            Some(&path[..idx + 1])
        } else {
            Some(parent)
        }
    }

    /// Whether `dir` can be stored as a single segment.
    pub fn accepts(&self, dir: &str) -> bool {
        !dir.trim().is_empty() && !dir.contains(self.separator())
    }
}

/// An ordered, delimited list of directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathList {
    raw: String,
    syntax: PathSyntax,
}

impl PathList {
    /// Wrap a raw value.
    pub fn new(raw: impl Into<String>, syntax: PathSyntax) -> Self {
        Self {
            raw: raw.into(),
            syntax,
        }
    }

    /// The raw value, unchanged.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Consume the list and return the raw value.
    pub fn into_raw(self) -> String {
        self.raw
    }

    pub fn syntax(&self) -> PathSyntax {
        self.syntax
    }

    /// Non-empty segments in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.raw
            .split(self.syntax.separator())
            .filter(|s| !s.trim().is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.segments().next().is_none()
    }

    /// How many segments name `dir`.
    pub fn occurrences(&self, dir: &str) -> usize {
        let key = self.syntax.normalize(dir);
        self.segments()
            .filter(|s| self.syntax.normalize(s) == key)
            .count()
    }

    /// Whether `dir` is one of the segments.
    pub fn contains(&self, dir: &str) -> bool {
        self.occurrences(dir) > 0
    }

    /// A new list with `dir` appended as the last segment.
    ///
    /// An empty value becomes just `dir`; a value already ending in a
    /// separator doesn't get a second one.
    pub fn appended(&self, dir: &str) -> PathList {
        let sep = self.syntax.separator();
        let raw = if self.raw.is_empty() {
            dir.to_string()
        } else if self.raw.ends_with(sep) {
            format!("{}{}", self.raw, dir)
        } else {
            format!("{}{}{}", self.raw, sep, dir)
        };

        PathList::new(raw, self.syntax)
    }

    /// Segments that appear more than once, in order of their second appearance.
    pub fn duplicates(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        let mut dupes: Vec<String> = Vec::new();

        for segment in self.segments() {
            let key = self.syntax.normalize(segment);
            if seen.contains(&key) {
                if !dupes.iter().any(|d| self.syntax.normalize(d) == key) {
                    dupes.push(segment.to_string());
                }
            } else {
                seen.push(key);
            }
        }

        dupes
    }
}
